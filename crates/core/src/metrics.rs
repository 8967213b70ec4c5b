//! Métriques de densité et de correction d'erreurs

use serde::{Deserialize, Serialize};

/// Métriques rapportées à l'encodage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodeMetrics {
    /// Taille des données d'origine en octets
    pub original_bytes: usize,
    /// Longueur finale de la séquence ADN en nucléotides
    pub dna_length: usize,
    /// Octets d'origine / équivalent octets de l'ADN (1 nt = 0.25 octet)
    pub compression_ratio: f64,
    /// Bits de données d'origine par nucléotide émis
    pub bits_per_nt: f64,
    /// Ratio GC réel de la charge utile (gc_balanced uniquement)
    pub gc_actual: Option<f64>,
    /// Plus long homopolymère réel (gc_balanced uniquement)
    pub max_homopolymer_actual: Option<usize>,
}

impl EncodeMetrics {
    /// Calcule les métriques de densité
    pub fn compute(original_bytes: usize, dna_length: usize) -> Self {
        let dna_equivalent_bytes = dna_length as f64 * 0.25;

        let compression_ratio = if dna_equivalent_bytes > 0.0 {
            original_bytes as f64 / dna_equivalent_bytes
        } else if original_bytes > 0 {
            f64::INFINITY
        } else {
            0.0
        };

        let bits_per_nt = if dna_length > 0 {
            (original_bytes as f64 * 8.0) / dna_length as f64
        } else {
            0.0
        };

        Self {
            original_bytes,
            dna_length,
            compression_ratio,
            bits_per_nt,
            gc_actual: None,
            max_homopolymer_actual: None,
        }
    }
}

/// Métriques rapportées au décodage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeMetrics {
    /// Triplets corrigés par vote majoritaire
    pub triple_repeat_corrected: u64,
    /// Triplets aux trois nucléotides distincts
    pub triple_repeat_uncorrectable: u64,
    /// Bits corrigés par Hamming(7,4)
    pub hamming_corrected: u64,
    /// Symboles corrigés par Reed-Solomon
    pub rs_corrected: u64,
    /// Désaccord de parité observé (non fatal)
    pub parity_mismatch: bool,
}
