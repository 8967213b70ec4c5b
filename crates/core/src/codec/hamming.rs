//! Code de Hamming(7,4) sur flux binaire MSB-first
//!
//! Chaque quartet de données `d1 d2 d3 d4` produit un mot de code de
//! sept bits `p1 p2 d1 p4 d2 d3 d4` avec les parités paires:
//! `p1 = d1⊕d2⊕d4`, `p2 = d1⊕d3⊕d4`, `p4 = d2⊕d3⊕d4`. Le syndrome
//! `(s3 s2 s1)` donne la position (1-indexée depuis le bit de poids
//! fort) du bit à inverser.

use crate::bits::{BitReader, BitWriter};
use crate::error::{GeneCoderError, Result};

/// Encode un quartet (0-15) en mot de code de 7 bits
fn encode_nibble(nibble: u8) -> u8 {
    let d1 = (nibble >> 3) & 1;
    let d2 = (nibble >> 2) & 1;
    let d3 = (nibble >> 1) & 1;
    let d4 = nibble & 1;

    let p1 = d1 ^ d2 ^ d4;
    let p2 = d1 ^ d3 ^ d4;
    let p4 = d2 ^ d3 ^ d4;

    // Ordre du mot de code: p1 p2 d1 p4 d2 d3 d4
    (p1 << 6) | (p2 << 5) | (d1 << 4) | (p4 << 3) | (d2 << 2) | (d3 << 1) | d4
}

/// Décode un mot de code de 7 bits, en corrigeant une erreur simple
///
/// Retourne le quartet et true si une correction a eu lieu.
fn decode_codeword(codeword: u8) -> (u8, bool) {
    let p1 = (codeword >> 6) & 1;
    let p2 = (codeword >> 5) & 1;
    let d1 = (codeword >> 4) & 1;
    let p4 = (codeword >> 3) & 1;
    let d2 = (codeword >> 2) & 1;
    let d3 = (codeword >> 1) & 1;
    let d4 = codeword & 1;

    let s1 = p1 ^ d1 ^ d2 ^ d4;
    let s2 = p2 ^ d1 ^ d3 ^ d4;
    let s3 = p4 ^ d2 ^ d3 ^ d4;

    let error_position = (s3 << 2) | (s2 << 1) | s1;
    if error_position == 0 {
        return ((d1 << 3) | (d2 << 2) | (d3 << 1) | d4, false);
    }

    // Position 1 = bit de poids fort (p1), position 7 = bit de poids faible (d4)
    let corrected = codeword ^ (1 << (7 - error_position));

    let d1 = (corrected >> 4) & 1;
    let d2 = (corrected >> 2) & 1;
    let d3 = (corrected >> 1) & 1;
    let d4 = corrected & 1;

    ((d1 << 3) | (d2 << 2) | (d3 << 1) | d4, true)
}

/// Encode des octets avec Hamming(7,4)
///
/// Les quartets sont consommés du poids fort au poids faible, les mots
/// de code concaténés puis empaquetés en octets. Retourne les octets et
/// le nombre de bits de bourrage terminaux (0-7).
pub fn encode(data: &[u8]) -> (Vec<u8>, u8) {
    if data.is_empty() {
        return (Vec::new(), 0);
    }

    let mut writer = BitWriter::new();
    for &byte in data {
        for nibble in [byte >> 4, byte & 0x0F] {
            writer.write_bits(u16::from(encode_nibble(nibble)), 7);
        }
    }

    writer.finish()
}

/// Décode des octets encodés avec Hamming(7,4)
///
/// Retourne les octets originaux et le nombre de bits corrigés.
pub fn decode(data: &[u8], padding_bits: u8) -> Result<(Vec<u8>, u64)> {
    if data.is_empty() && padding_bits == 0 {
        return Ok((Vec::new(), 0));
    }

    let mut reader = BitReader::with_trailing_padding(data, padding_bits).ok_or_else(|| {
        GeneCoderError::TruncatedPayload(format!(
            "bourrage annoncé de {} bits mais seulement {} bits disponibles",
            padding_bits,
            data.len() * 8
        ))
    })?;

    if reader.remaining() % 7 != 0 {
        return Err(GeneCoderError::TruncatedPayload(format!(
            "flux de {} bits non multiple de 7 après retrait du bourrage",
            reader.remaining()
        )));
    }

    let mut nibbles = Vec::with_capacity(reader.remaining() / 7);
    let mut corrected = 0u64;

    while reader.remaining() >= 7 {
        let codeword = reader.read_bits(7).expect("7 bits disponibles") as u8;
        let (nibble, was_corrected) = decode_codeword(codeword);
        nibbles.push(nibble);
        if was_corrected {
            corrected += 1;
        }
    }

    // Chaque octet d'origine a produit deux quartets: la liste est paire
    let mut bytes = Vec::with_capacity(nibbles.len() / 2);
    for pair in nibbles.chunks(2) {
        let hi = pair[0];
        let lo = if pair.len() == 2 { pair[1] } else { 0 };
        bytes.push((hi << 4) | lo);
    }

    Ok((bytes, corrected))
}
