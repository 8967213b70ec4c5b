//! Orchestrateur du pipeline d'encodage/décodage
//!
//! Ordre fixe à l'encodage: FEC binaire (Hamming ou Reed-Solomon) →
//! encodeur primaire → parité ADN → triple répétition. Le décodage
//! inverse chaque étape dans l'ordre opposé, piloté uniquement par le
//! descripteur. Aucun état mutable ne persiste entre les appels.

use crate::codec::{base4, gc_balanced, hamming, huffman, parity, triple_repeat};
use crate::codec::{GcConstraints, ReedSolomonCodec, DEFAULT_NSYM, RS_BLOCK_SIZE};
use crate::descriptor::{FecScheme, Method, ParityRule, PipelineDescriptor};
use crate::error::{GeneCoderError, Result};
use crate::metrics::{DecodeMetrics, EncodeMetrics};
use crate::sequence;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Taille de chunk par défaut pour le streaming (octets)
pub const DEFAULT_STREAM_CHUNK_BYTES: usize = 65536;

/// Signal d'annulation partagé, consulté entre les étapes du pipeline
/// et entre les chunks en streaming
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Crée un signal non déclenché
    pub fn new() -> Self {
        Self::default()
    }

    /// Déclenche l'annulation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Retourne true si l'annulation a été demandée
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Point de contrôle: échoue si l'annulation a été demandée
    pub(crate) fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(GeneCoderError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Configuration de l'encodeur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encodeur primaire
    pub method: Method,
    /// Nom du fichier d'origine, recopié dans le descripteur
    pub original_filename: String,
    /// Ajouter le nucléotide de parité (base4_direct et huffman)
    pub add_parity: bool,
    /// Règle de parité
    pub parity_rule: ParityRule,
    /// Couche FEC
    pub fec: FecScheme,
    /// Symboles de parité Reed-Solomon
    pub fec_nsym: usize,
    /// Contraintes GC (gc_balanced uniquement)
    pub constraints: GcConstraints,
    /// Taille de chunk en streaming (octets)
    pub stream_chunk_bytes: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            method: Method::Base4Direct,
            original_filename: String::new(),
            add_parity: false,
            parity_rule: ParityRule::GcEvenAOddT,
            fec: FecScheme::None,
            fec_nsym: DEFAULT_NSYM,
            constraints: GcConstraints::default(),
            stream_chunk_bytes: DEFAULT_STREAM_CHUNK_BYTES,
        }
    }
}

impl EncoderConfig {
    /// Vérifie que la configuration peut produire un descripteur cohérent
    pub fn validate(&self) -> Result<()> {
        if self.method == Method::GcBalanced {
            let constraints = &self.constraints;
            if !(0.0..=1.0).contains(&constraints.gc_min)
                || !(0.0..=1.0).contains(&constraints.gc_max)
                || constraints.gc_min > constraints.gc_max
            {
                return Err(GeneCoderError::InvalidHeader(format!(
                    "plage GC incohérente: gc_min={} gc_max={}",
                    constraints.gc_min, constraints.gc_max
                )));
            }
            if constraints.max_homopolymer < 1 {
                return Err(GeneCoderError::InvalidHeader(
                    "max_homopolymer doit être au moins 1".to_string(),
                ));
            }
        }

        // Un bloc de 255 symboles doit garder au moins un octet de données
        if self.fec == FecScheme::ReedSolomon
            && !(1..RS_BLOCK_SIZE).contains(&self.fec_nsym)
        {
            return Err(GeneCoderError::InvalidHeader(format!(
                "fec_nsym={} hors de l'intervalle 1-{} pour Reed-Solomon",
                self.fec_nsym,
                RS_BLOCK_SIZE - 1
            )));
        }

        Ok(())
    }
}

/// Résultat d'un encodage complet
#[derive(Debug, Clone)]
pub struct EncodeOutput {
    /// Séquence ADN finale
    pub dna: String,
    /// Descripteur sérialisable dans l'en-tête FASTA
    pub descriptor: PipelineDescriptor,
    /// Métriques de densité et de contraintes
    pub metrics: EncodeMetrics,
}

/// Résultat d'un décodage complet
#[derive(Debug, Clone)]
pub struct DecodeOutput {
    /// Octets restitués
    pub data: Vec<u8>,
    /// Compteurs de correction et indicateur de parité
    pub metrics: DecodeMetrics,
}

/// Encode des octets selon la configuration
pub fn encode(data: &[u8], config: &EncoderConfig) -> Result<EncodeOutput> {
    encode_cancellable(data, config, &CancelToken::new())
}

/// Encode des octets, avec point de contrôle d'annulation entre les étapes
pub fn encode_cancellable(
    data: &[u8],
    config: &EncoderConfig,
    cancel: &CancelToken,
) -> Result<EncodeOutput> {
    config.validate()?;

    let mut descriptor = PipelineDescriptor::new(config.method, config.original_filename.clone());
    descriptor.fec = config.fec;

    // Étape 1: FEC binaire sur les octets
    let current: Vec<u8> = match config.fec {
        FecScheme::Hamming74 => {
            let (encoded, padding) = hamming::encode(data);
            descriptor.fec_padding_bits = Some(padding);
            tracing::debug!(
                original = data.len(),
                encoded = encoded.len(),
                padding_bits = padding,
                "FEC Hamming(7,4) appliqué"
            );
            encoded
        }
        FecScheme::ReedSolomon => {
            let codec = ReedSolomonCodec::new(config.fec_nsym);
            let encoded = codec.encode(data);
            descriptor.fec_nsym = Some(config.fec_nsym);
            tracing::debug!(
                original = data.len(),
                encoded = encoded.len(),
                nsym = config.fec_nsym,
                "FEC Reed-Solomon appliqué"
            );
            encoded
        }
        FecScheme::None | FecScheme::TripleRepeat => data.to_vec(),
    };
    cancel.checkpoint()?;

    // Étape 2: encodeur primaire
    let mut metrics = EncodeMetrics::default();
    let mut dna = match config.method {
        Method::Base4Direct => base4::encode(&current),
        Method::Huffman => {
            let (dna, table, padding) = huffman::encode(&current);
            descriptor.huffman_table = Some(table);
            descriptor.huffman_padding = Some(padding);
            dna
        }
        Method::GcBalanced => {
            let dna = gc_balanced::encode(&current, &config.constraints);
            descriptor.gc_min = Some(config.constraints.gc_min);
            descriptor.gc_max = Some(config.constraints.gc_max);
            descriptor.max_homopolymer = Some(config.constraints.max_homopolymer);

            // Métriques de contraintes sur la charge utile, marquage exclu,
            // avant toute FEC ADN
            let payload = &dna[1..];
            metrics.gc_actual = Some(sequence::gc_content(payload));
            metrics.max_homopolymer_actual = Some(sequence::max_homopolymer_run(payload));
            dna
        }
    };
    cancel.checkpoint()?;

    // Étape 3: parité ADN, jamais combinée à Hamming, et seulement pour
    // les méthodes base4_direct et huffman
    let parity_applies = config.add_parity
        && config.fec != FecScheme::Hamming74
        && matches!(config.method, Method::Base4Direct | Method::Huffman);
    if parity_applies {
        dna = parity::append_parity(&dna);
        descriptor.add_parity = true;
        descriptor.parity_rule = Some(config.parity_rule);
    } else if config.add_parity {
        tracing::warn!(
            method = %config.method,
            fec = %config.fec,
            "parité demandée mais non applicable, ignorée"
        );
    }
    cancel.checkpoint()?;

    // Étape 4: FEC au niveau ADN
    if config.fec == FecScheme::TripleRepeat {
        dna = triple_repeat::encode(&dna);
    }

    let density = EncodeMetrics::compute(data.len(), dna.chars().count());
    metrics.original_bytes = density.original_bytes;
    metrics.dna_length = density.dna_length;
    metrics.compression_ratio = density.compression_ratio;
    metrics.bits_per_nt = density.bits_per_nt;

    tracing::info!(
        method = %config.method,
        fec = %config.fec,
        original_bytes = metrics.original_bytes,
        dna_length = metrics.dna_length,
        "encodage terminé"
    );

    Ok(EncodeOutput {
        dna,
        descriptor,
        metrics,
    })
}

/// Décode une séquence ADN selon son descripteur
pub fn decode(dna: &str, descriptor: &PipelineDescriptor) -> Result<DecodeOutput> {
    decode_cancellable(dna, descriptor, &CancelToken::new())
}

/// Décode une séquence, avec point de contrôle d'annulation entre les étapes
pub fn decode_cancellable(
    dna: &str,
    descriptor: &PipelineDescriptor,
    cancel: &CancelToken,
) -> Result<DecodeOutput> {
    descriptor.validate()?;

    let mut metrics = DecodeMetrics::default();

    // Étape 1: défaire la triple répétition
    let dna_primary = if descriptor.fec == FecScheme::TripleRepeat {
        let outcome = triple_repeat::decode(dna)?;
        metrics.triple_repeat_corrected = outcome.corrected;
        metrics.triple_repeat_uncorrectable = outcome.uncorrectable;
        outcome.dna
    } else {
        dna.to_string()
    };
    cancel.checkpoint()?;

    // Étape 2: vérifier et retirer la parité. Un désaccord n'est pas
    // fatal: la charge utile est quand même décodée
    let payload: &str = if descriptor.add_parity {
        match parity::strip_and_verify(&dna_primary) {
            Ok(payload) => payload,
            Err(GeneCoderError::ParityFailure) => {
                metrics.parity_mismatch = true;
                tracing::warn!("désaccord de parité sur la charge utile");
                let last_len = dna_primary
                    .chars()
                    .next_back()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
                &dna_primary[..dna_primary.len() - last_len]
            }
            Err(e) => return Err(e),
        }
    } else {
        &dna_primary
    };
    cancel.checkpoint()?;

    // Étape 3: décodeur primaire
    let binary: Vec<u8> = match descriptor.method {
        Method::Base4Direct => base4::decode(payload)?,
        Method::Huffman => {
            let table = descriptor.huffman_table.as_ref().ok_or_else(|| {
                GeneCoderError::InvalidHeader("table de Huffman absente".to_string())
            })?;
            let padding = descriptor.huffman_padding.ok_or_else(|| {
                GeneCoderError::InvalidHeader("bourrage Huffman absent".to_string())
            })?;
            huffman::decode(payload, table, padding)?
        }
        Method::GcBalanced => gc_balanced::decode(payload)?,
    };
    cancel.checkpoint()?;

    // Étape 4: défaire la FEC binaire
    let data = match descriptor.fec {
        FecScheme::Hamming74 => {
            let padding = descriptor.fec_padding_bits.ok_or_else(|| {
                GeneCoderError::InvalidHeader("bourrage Hamming absent".to_string())
            })?;
            let (data, corrected) = hamming::decode(&binary, padding)?;
            metrics.hamming_corrected = corrected;
            data
        }
        FecScheme::ReedSolomon => {
            let nsym = descriptor.fec_nsym.ok_or_else(|| {
                GeneCoderError::InvalidHeader("fec_nsym absent".to_string())
            })?;
            let codec = ReedSolomonCodec::new(nsym);
            let (data, corrected) = codec.decode(&binary)?;
            metrics.rs_corrected = corrected;
            data
        }
        FecScheme::None | FecScheme::TripleRepeat => binary,
    };

    tracing::info!(
        method = %descriptor.method,
        fec = %descriptor.fec,
        decoded_bytes = data.len(),
        "décodage terminé"
    );

    Ok(DecodeOutput { data, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(method: Method, fec: FecScheme) -> EncoderConfig {
        EncoderConfig {
            method,
            fec,
            original_filename: "test.bin".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_base4_roundtrip() {
        let data = b"pipeline de base";
        let output = encode(data, &config(Method::Base4Direct, FecScheme::None)).unwrap();

        assert_eq!(output.dna.len(), 4 * data.len());
        assert_eq!(output.metrics.original_bytes, data.len());

        let decoded = decode(&output.dna, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
    }

    #[test]
    fn test_huffman_descriptor_carries_table() {
        let data = b"AAAA";
        let output = encode(data, &config(Method::Huffman, FecScheme::None)).unwrap();

        let table = output.descriptor.huffman_table.as_ref().unwrap();
        assert_eq!(table[&b'A'], "0");
        assert_eq!(output.descriptor.huffman_padding, Some(0));
        assert_eq!(output.dna, "AA");

        let decoded = decode(&output.dna, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
    }

    #[test]
    fn test_gc_balanced_reports_actual_metrics() {
        let data = [0x00u8, 0x00];
        let output = encode(&data, &config(Method::GcBalanced, FecScheme::None)).unwrap();

        assert_eq!(output.dna, "TGGGGGGGG");
        assert_eq!(output.metrics.gc_actual, Some(1.0));
        assert_eq!(output.metrics.max_homopolymer_actual, Some(8));

        let decoded = decode(&output.dna, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
    }

    #[test]
    fn test_parity_roundtrip() {
        let mut cfg = config(Method::Base4Direct, FecScheme::None);
        cfg.add_parity = true;

        let data = b"parite";
        let output = encode(data, &cfg).unwrap();

        assert!(output.descriptor.add_parity);
        assert_eq!(output.dna.len(), 4 * data.len() + 1);

        let decoded = decode(&output.dna, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
        assert!(!decoded.metrics.parity_mismatch);
    }

    #[test]
    fn test_parity_dropped_with_hamming() {
        let mut cfg = config(Method::Base4Direct, FecScheme::Hamming74);
        cfg.add_parity = true;

        let output = encode(b"exclusion", &cfg).unwrap();

        // La parité est silencieusement abandonnée et le descripteur
        // raconte une histoire cohérente
        assert!(!output.descriptor.add_parity);
        assert!(output.descriptor.parity_rule.is_none());

        let decoded = decode(&output.dna, &output.descriptor).unwrap();
        assert_eq!(decoded.data, b"exclusion".to_vec());
    }

    #[test]
    fn test_parity_mismatch_is_nonfatal() {
        let mut cfg = config(Method::Base4Direct, FecScheme::None);
        cfg.add_parity = true;

        let data = [0x1Bu8];
        let output = encode(&data, &cfg).unwrap();

        // Corrompre un nucléotide de la charge utile change sa parité GC
        let mut chars: Vec<char> = output.dna.chars().collect();
        chars[3] = if chars[3] == 'G' { 'A' } else { 'G' };
        let corrupted: String = chars.into_iter().collect();

        let decoded = decode(&corrupted, &output.descriptor).unwrap();
        assert!(decoded.metrics.parity_mismatch);
        assert_eq!(decoded.data.len(), data.len());
    }

    #[test]
    fn test_triple_repeat_pipeline() {
        let data = [0x1Bu8];
        let output = encode(&data, &config(Method::Base4Direct, FecScheme::TripleRepeat)).unwrap();
        assert_eq!(output.dna, "AAATTTCCCGGG");

        // Un A remplacé par C dans le premier triplet
        let corrupted = format!("C{}", &output.dna[1..]);
        let decoded = decode(&corrupted, &output.descriptor).unwrap();

        assert_eq!(decoded.data, data.to_vec());
        assert_eq!(decoded.metrics.triple_repeat_corrected, 1);
        assert_eq!(decoded.metrics.triple_repeat_uncorrectable, 0);
    }

    #[test]
    fn test_hamming_pipeline_corrects_flip() {
        let data = b"hamming";
        let output = encode(data, &config(Method::Base4Direct, FecScheme::Hamming74)).unwrap();

        // Inverser un bit = remplacer un nucléotide par son voisin de bit
        let mut chars: Vec<char> = output.dna.chars().collect();
        chars[0] = match chars[0] {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            _ => 'C',
        };
        let corrupted: String = chars.into_iter().collect();

        let decoded = decode(&corrupted, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
        assert_eq!(decoded.metrics.hamming_corrected, 1);
    }

    #[test]
    fn test_reed_solomon_pipeline() {
        let mut cfg = config(Method::Base4Direct, FecScheme::ReedSolomon);
        cfg.fec_nsym = 8;

        let data = b"reed solomon dans le pipeline";
        let output = encode(data, &cfg).unwrap();
        assert_eq!(output.descriptor.fec_nsym, Some(8));

        // Corrompre un octet entier = quatre nucléotides alignés
        let mut chars: Vec<char> = output.dna.chars().collect();
        for c in chars.iter_mut().take(4) {
            *c = match *c {
                'A' => 'G',
                'G' => 'A',
                'T' => 'C',
                _ => 'T',
            };
        }
        let corrupted: String = chars.into_iter().collect();

        let decoded = decode(&corrupted, &output.descriptor).unwrap();
        assert_eq!(decoded.data, data.to_vec());
        assert!(decoded.metrics.rs_corrected >= 1);
    }

    #[test]
    fn test_empty_input_all_methods() {
        for method in [Method::Base4Direct, Method::Huffman, Method::GcBalanced] {
            let output = encode(&[], &config(method, FecScheme::None)).unwrap();
            let decoded = decode(&output.dna, &output.descriptor).unwrap();
            assert!(decoded.data.is_empty(), "méthode {:?}", method);
        }
    }

    #[test]
    fn test_invalid_nsym_rejected() {
        for nsym in [0usize, 255, 4096] {
            let mut cfg = config(Method::Base4Direct, FecScheme::ReedSolomon);
            cfg.fec_nsym = nsym;

            let result = encode(b"bornes", &cfg);
            assert!(
                matches!(result, Err(GeneCoderError::InvalidHeader(_))),
                "nsym={}",
                nsym
            );
        }
    }

    #[test]
    fn test_cancellation() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = encode_cancellable(
            b"annulation",
            &config(Method::Base4Direct, FecScheme::None),
            &cancel,
        );
        assert!(matches!(result, Err(GeneCoderError::Cancelled)));

        let descriptor = PipelineDescriptor::new(Method::Base4Direct, "x");
        let result = decode_cancellable("AAAA", &descriptor, &cancel);
        assert!(matches!(result, Err(GeneCoderError::Cancelled)));
    }
}
