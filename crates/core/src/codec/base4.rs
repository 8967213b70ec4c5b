//! Encodage Base-4 direct: un octet → quatre nucléotides
//!
//! Chaque octet est lu en quatre paires de 2 bits, du bit de poids fort
//! vers le bit de poids faible, et chaque paire devient un nucléotide
//! selon la correspondance fixe `00→A, 01→T, 10→C, 11→G`.

use crate::error::{GeneCoderError, Result};
use crate::sequence::Nucleotide;

/// Encode des octets en séquence ADN (longueur = 4 × nombre d'octets)
pub fn encode(data: &[u8]) -> String {
    let mut dna = String::with_capacity(data.len() * 4);

    for &byte in data {
        // Exemple: 0x1B (0b00011011) -> A T C G
        for shift in [6u8, 4, 2, 0] {
            dna.push(Nucleotide::from_bits((byte >> shift) & 0b11).as_char());
        }
    }

    dna
}

/// Décode une séquence ADN en octets
///
/// La longueur doit être un multiple de 4; chaque groupe de quatre
/// nucléotides reconstruit un octet, premier nucléotide = paire de poids
/// fort.
pub fn decode(dna: &str) -> Result<Vec<u8>> {
    let nucleotides: Vec<Nucleotide> = dna
        .chars()
        .map(Nucleotide::from_char)
        .collect::<Result<_>>()?;

    if nucleotides.len() % 4 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "longueur {} non multiple de 4 pour le décodage base-4",
            nucleotides.len()
        )));
    }

    let mut data = Vec::with_capacity(nucleotides.len() / 4);
    for quad in nucleotides.chunks(4) {
        let mut byte = 0u8;
        for (i, nt) in quad.iter().enumerate() {
            byte |= nt.to_bits() << (6 - 2 * i);
        }
        data.push(byte);
    }

    Ok(data)
}
