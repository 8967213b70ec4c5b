//! Répétition triple au niveau nucléotidique avec vote majoritaire
//!
//! Chaque nucléotide est émis trois fois. Au décodage un triplet dont
//! deux éléments concordent est corrigé; un triplet aux trois éléments
//! distincts est incorrigible et décodé vers son premier nucléotide.

use crate::error::{GeneCoderError, Result};

/// Résultat d'un décodage triple répétition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleRepeatOutcome {
    /// Séquence décodée
    pub dna: String,
    /// Triplets corrigés par majorité stricte
    pub corrected: u64,
    /// Triplets aux trois nucléotides distincts
    pub uncorrectable: u64,
}

/// Triple chaque nucléotide (longueur de sortie = 3 × entrée)
pub fn encode(dna: &str) -> String {
    let mut out = String::with_capacity(dna.len() * 3);
    for c in dna.chars() {
        for _ in 0..3 {
            out.push(c);
        }
    }
    out
}

/// Décode par vote majoritaire, en comptant les corrections
pub fn decode(dna: &str) -> Result<TripleRepeatOutcome> {
    let chars: Vec<char> = dna.chars().collect();
    if chars.len() % 3 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "longueur {} non multiple de 3 pour la triple répétition",
            chars.len()
        )));
    }

    let mut outcome = TripleRepeatOutcome {
        dna: String::with_capacity(chars.len() / 3),
        ..Default::default()
    };

    for triplet in chars.chunks(3) {
        let (a, b, c) = (triplet[0], triplet[1], triplet[2]);

        if a == b && b == c {
            outcome.dna.push(a);
        } else if a == b || a == c {
            outcome.dna.push(a);
            outcome.corrected += 1;
        } else if b == c {
            outcome.dna.push(b);
            outcome.corrected += 1;
        } else {
            // Aucune majorité: on retient le premier nucléotide
            outcome.dna.push(a);
            outcome.uncorrectable += 1;
        }
    }

    Ok(outcome)
}
