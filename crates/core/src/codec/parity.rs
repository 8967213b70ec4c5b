//! Détection d'erreurs par nucléotide de parité terminal
//!
//! Règle `GC_even_A_odd_T`: le nombre de bases G et C de la charge utile
//! détermine un nucléotide unique ajouté en fin de séquence. `A` si ce
//! compte est pair, `T` s'il est impair.

use crate::error::{GeneCoderError, Result};
use crate::sequence;

/// Calcule le nucléotide de parité d'une charge utile
pub fn parity_nucleotide(dna: &str) -> char {
    if sequence::gc_count(dna) % 2 == 0 {
        'A'
    } else {
        'T'
    }
}

/// Ajoute le nucléotide de parité en fin de séquence
pub fn append_parity(dna: &str) -> String {
    let mut out = String::with_capacity(dna.len() + 1);
    out.push_str(dna);
    out.push(parity_nucleotide(dna));
    out
}

/// Retire le nucléotide de parité et le vérifie
///
/// Retourne la charge utile sans la parité. Un désaccord est signalé par
/// `ParityFailure`: l'appelant décide s'il est fatal.
pub fn strip_and_verify(dna: &str) -> Result<&str> {
    let last = dna.chars().next_back().ok_or_else(|| {
        GeneCoderError::TruncatedPayload(
            "séquence vide, nucléotide de parité absent".to_string(),
        )
    })?;
    let payload = &dna[..dna.len() - last.len_utf8()];

    if parity_nucleotide(payload) != last {
        return Err(GeneCoderError::ParityFailure);
    }

    Ok(payload)
}
