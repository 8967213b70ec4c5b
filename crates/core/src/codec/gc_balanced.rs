//! Encodage Base-4 sous contraintes GC et homopolymères
//!
//! La séquence candidate est l'encodage base-4 direct des données. Si
//! elle respecte les contraintes, elle est émise précédée du nucléotide
//! de marquage `A`. Sinon les octets sont inversés bit à bit, ré-encodés
//! et émis précédés de `T`, sans re-vérification: le `T` annonce un
//! meilleur effort, pas une garantie.

use crate::codec::base4;
use crate::error::{GeneCoderError, Result};
use crate::sequence;
use serde::{Deserialize, Serialize};

/// Nucléotide de marquage: données encodées telles quelles
pub const TAG_DIRECT: char = 'A';
/// Nucléotide de marquage: données inversées bit à bit avant encodage
pub const TAG_INVERTED: char = 'T';

/// Contraintes biochimiques sur la séquence candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcConstraints {
    /// Ratio GC minimum (0-1)
    pub gc_min: f64,
    /// Ratio GC maximum (0-1)
    pub gc_max: f64,
    /// Longueur maximale d'homopolymère
    pub max_homopolymer: usize,
}

impl Default for GcConstraints {
    fn default() -> Self {
        Self {
            gc_min: 0.45,
            gc_max: 0.55,
            max_homopolymer: 3,
        }
    }
}

impl GcConstraints {
    /// Vérifie qu'une séquence respecte les contraintes
    ///
    /// Une séquence vide est considérée conforme (pas de charge utile).
    pub fn is_satisfied_by(&self, dna: &str) -> bool {
        if dna.is_empty() {
            return true;
        }

        let gc = sequence::gc_content(dna);
        let gc_ok = self.gc_min <= gc && gc <= self.gc_max;
        let homopolymer_ok = sequence::max_homopolymer_run(dna) <= self.max_homopolymer;

        gc_ok && homopolymer_ok
    }
}

/// Encode des octets avec le marquage d'inversion
pub fn encode(data: &[u8], constraints: &GcConstraints) -> String {
    let candidate = base4::encode(data);

    if constraints.is_satisfied_by(&candidate) {
        let mut dna = String::with_capacity(candidate.len() + 1);
        dna.push(TAG_DIRECT);
        dna.push_str(&candidate);
        return dna;
    }

    // Remédiation simple: inversion bit à bit des octets, émission
    // inconditionnelle sous le marquage T
    let inverted: Vec<u8> = data.iter().map(|b| !b).collect();
    let alternative = base4::encode(&inverted);

    let mut dna = String::with_capacity(alternative.len() + 1);
    dna.push(TAG_INVERTED);
    dna.push_str(&alternative);
    dna
}

/// Décode une séquence marquée
///
/// Le premier nucléotide indique si les octets doivent être ré-inversés.
pub fn decode(dna: &str) -> Result<Vec<u8>> {
    let mut chars = dna.chars();
    let tag = chars.next().ok_or_else(|| {
        GeneCoderError::TruncatedPayload(
            "séquence vide, nucléotide de marquage absent".to_string(),
        )
    })?;
    let payload = chars.as_str();

    match tag {
        TAG_DIRECT => base4::decode(payload),
        TAG_INVERTED => {
            let data = base4::decode(payload)?;
            Ok(data.iter().map(|b| !b).collect())
        }
        other => Err(GeneCoderError::InvalidTag(other)),
    }
}
