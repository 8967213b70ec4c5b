//! Types d'erreurs pour la bibliothèque GeneCoder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneCoderError {
    #[error("Caractère invalide dans la séquence ADN: '{0}' (seuls A, T, C, G sont autorisés)")]
    InvalidAlphabet(char),

    #[error("Charge utile tronquée: {0}")]
    TruncatedPayload(String),

    #[error("En-tête FASTA invalide: {0}")]
    InvalidHeader(String),

    #[error("Nucléotide de marquage invalide: '{0}' (attendu 'A' ou 'T')")]
    InvalidTag(char),

    #[error("Parité incorrecte sur la charge utile")]
    ParityFailure,

    #[error("Correction d'erreurs impossible: {0}")]
    FecFailure(String),

    #[error("Configuration non supportée en streaming: {0}")]
    UnsupportedForStreaming(String),

    #[error("Opération annulée")]
    Cancelled,

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeneCoderError>;
