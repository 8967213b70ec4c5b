//! Codec Reed-Solomon systématique sur GF(2^8)
//!
//! Les données sont découpées en blocs d'au plus `255 − nsym` octets,
//! chacun immédiatement suivi de ses `nsym` octets de parité. Le dernier
//! bloc peut être plus court; aucun bourrage ni préfixe de longueur
//! n'est ajouté, de sorte que le flux reste décodable par l'outillage
//! tiers utilisant la même convention.

use crate::error::{GeneCoderError, Result};
use reed_solomon::{Decoder, Encoder};

/// Taille standard d'un bloc Reed-Solomon complet (données + parité)
pub const RS_BLOCK_SIZE: usize = 255;

/// Nombre de symboles de parité par défaut
pub const DEFAULT_NSYM: usize = 10;

/// Codec Reed-Solomon avec un nombre configurable de symboles de parité
///
/// Peut corriger jusqu'à `nsym / 2` erreurs par bloc.
pub struct ReedSolomonCodec {
    encoder: Encoder,
    decoder: Decoder,
    nsym: usize,
}

impl ReedSolomonCodec {
    /// Crée un codec avec `nsym` symboles de parité par bloc
    pub fn new(nsym: usize) -> Self {
        Self {
            encoder: Encoder::new(nsym),
            decoder: Decoder::new(nsym),
            nsym,
        }
    }

    /// Retourne le nombre de symboles de parité par bloc
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    /// Taille maximale des données par bloc
    pub fn max_data_block(&self) -> usize {
        RS_BLOCK_SIZE - self.nsym
    }

    /// Nombre maximal d'erreurs corrigeables par bloc
    pub fn max_errors_per_block(&self) -> usize {
        self.nsym / 2
    }

    /// Taille encodée pour des données de taille donnée
    pub fn encoded_size(&self, data_len: usize) -> usize {
        if data_len == 0 {
            return 0;
        }
        let blocks = (data_len + self.max_data_block() - 1) / self.max_data_block();
        data_len + blocks * self.nsym
    }

    /// Encode les données, parité ajoutée bloc par bloc
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        if data.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(self.encoded_size(data.len()));
        for chunk in data.chunks(self.max_data_block()) {
            let encoded = self.encoder.encode(chunk);
            out.extend_from_slice(&encoded);
        }

        out
    }

    /// Décode et corrige les données bloc par bloc
    ///
    /// Retourne les octets originaux et le nombre total de symboles
    /// corrigés. Un bloc irrécupérable est une erreur fatale.
    pub fn decode(&self, data: &[u8]) -> Result<(Vec<u8>, u64)> {
        if data.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let mut out = Vec::new();
        let mut corrected = 0u64;

        for block in data.chunks(RS_BLOCK_SIZE) {
            if block.len() <= self.nsym {
                return Err(GeneCoderError::FecFailure(format!(
                    "bloc Reed-Solomon de {} octets sans données (nsym={})",
                    block.len(),
                    self.nsym
                )));
            }

            let buffer = self.decoder.correct(block, None).map_err(|_| {
                GeneCoderError::FecFailure(format!(
                    "bloc Reed-Solomon de {} octets irrécupérable (nsym={})",
                    block.len(),
                    self.nsym
                ))
            })?;

            // Le mot de code corrigé a la même longueur que le bloc reçu:
            // chaque octet qui diffère est un symbole corrigé
            let errors = block
                .iter()
                .zip(buffer.iter())
                .filter(|(received, repaired)| received != repaired)
                .count();

            out.extend_from_slice(buffer.data());
            corrected += errors as u64;
        }

        Ok((out, corrected))
    }
}
