//! Encodeurs primaires et couches de correction d'erreurs
//!
//! Les encodeurs primaires (`base4`, `huffman`, `gc_balanced`)
//! convertissent des octets en nucléotides. Les couches binaires
//! (`hamming`, `reed_solomon`) transforment les octets avant l'encodage
//! primaire; les couches ADN (`parity`, `triple_repeat`) transforment la
//! séquence après.

pub mod base4;
pub mod gc_balanced;
pub mod hamming;
pub mod huffman;
pub mod parity;
pub mod reed_solomon;
pub mod triple_repeat;

pub use gc_balanced::GcConstraints;
pub use huffman::HuffmanTable;
pub use reed_solomon::{ReedSolomonCodec, DEFAULT_NSYM, RS_BLOCK_SIZE};
pub use triple_repeat::TripleRepeatOutcome;
