//! GeneCoder Core Library
//!
//! Bibliothèque principale pour l'encodage et le décodage de données
//! binaires en ADN simulé: pipeline composable d'encodeurs primaires et
//! de couches de correction d'erreurs, conteneur FASTA portant le
//! descripteur complet du pipeline, et variante en flux pour les
//! fichiers volumineux.

pub mod bits;
pub mod codec;
pub mod descriptor;
pub mod error;
pub mod fasta;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod sequence;
pub mod streaming;

// Réexportations principales
pub use codec::{GcConstraints, HuffmanTable, ReedSolomonCodec};
pub use descriptor::{FecScheme, Method, ParityRule, PipelineDescriptor};
pub use error::{GeneCoderError, Result};
pub use fasta::{from_fasta, from_fasta_all, to_fasta, FASTA_LINE_WIDTH};
pub use metrics::{DecodeMetrics, EncodeMetrics};
pub use pipeline::{
    decode, decode_cancellable, encode, encode_cancellable, CancelToken, DecodeOutput,
    EncodeOutput, EncoderConfig,
};
pub use sequence::Nucleotide;
pub use streaming::{
    decode_stream, decode_stream_cancellable, encode_stream, encode_stream_cancellable,
    StreamReport,
};
