//! Variante en flux du chemin Base-4 direct
//!
//! L'entrée est lue par chunks de taille fixe; chaque chunk est encodé
//! indépendamment (Base-4 direct ne porte aucun état entre octets) et la
//! sortie est repliée au fil de l'eau. La mémoire utilisée est bornée
//! par la taille de chunk, indépendamment de la taille du fichier. Seule
//! la configuration `base4_direct` sans FEC ni parité est supportée.

use crate::codec::base4;
use crate::descriptor::{FecScheme, Method, PipelineDescriptor};
use crate::error::{GeneCoderError, Result};
use crate::fasta::FASTA_LINE_WIDTH;
use crate::pipeline::{CancelToken, EncoderConfig};
use crate::sequence::Nucleotide;
use std::io::{BufRead, BufReader, Read, Write};

/// Compteurs d'un passage en streaming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Octets de données traités
    pub original_bytes: u64,
    /// Nucléotides produits ou consommés
    pub dna_length: u64,
}

/// Vérifie qu'une configuration est streamable
fn ensure_streamable(method: Method, fec: FecScheme, add_parity: bool) -> Result<()> {
    if method != Method::Base4Direct {
        return Err(GeneCoderError::UnsupportedForStreaming(format!(
            "méthode '{}' (seul base4_direct est supporté)",
            method
        )));
    }
    if fec != FecScheme::None {
        return Err(GeneCoderError::UnsupportedForStreaming(format!(
            "fec '{}' (aucune FEC supportée en flux)",
            fec
        )));
    }
    if add_parity {
        return Err(GeneCoderError::UnsupportedForStreaming(
            "parité ADN non supportée en flux".to_string(),
        ));
    }
    Ok(())
}

/// Encode un flux d'octets en enregistrement FASTA
pub fn encode_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: &EncoderConfig,
) -> Result<StreamReport> {
    encode_stream_cancellable(reader, writer, config, &CancelToken::new())
}

/// Encode un flux, avec point de contrôle d'annulation entre les chunks
pub fn encode_stream_cancellable<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    config: &EncoderConfig,
    cancel: &CancelToken,
) -> Result<StreamReport> {
    ensure_streamable(config.method, config.fec, config.add_parity)?;
    if config.stream_chunk_bytes == 0 {
        return Err(GeneCoderError::UnsupportedForStreaming(
            "taille de chunk nulle".to_string(),
        ));
    }

    let descriptor =
        PipelineDescriptor::new(Method::Base4Direct, config.original_filename.clone());
    writer.write_all(format!(">{}\n", descriptor.to_header()?).as_bytes())?;

    let mut report = StreamReport::default();
    let mut chunk = vec![0u8; config.stream_chunk_bytes];
    // Tampon de repli: jamais plus d'une ligne en attente
    let mut line = String::with_capacity(FASTA_LINE_WIDTH);

    loop {
        cancel.checkpoint()?;

        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }

        let dna = base4::encode(&chunk[..read]);
        report.original_bytes += read as u64;
        report.dna_length += dna.len() as u64;

        let mut rest = dna.as_str();
        while !rest.is_empty() {
            let take = (FASTA_LINE_WIDTH - line.len()).min(rest.len());
            line.push_str(&rest[..take]);
            rest = &rest[take..];

            if line.len() == FASTA_LINE_WIDTH {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
                line.clear();
            }
        }
    }

    if !line.is_empty() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::info!(
        original_bytes = report.original_bytes,
        dna_length = report.dna_length,
        "encodage en flux terminé"
    );

    Ok(report)
}

/// Décode un enregistrement FASTA en flux d'octets
pub fn decode_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    descriptor: &PipelineDescriptor,
) -> Result<StreamReport> {
    decode_stream_cancellable(reader, writer, descriptor, &CancelToken::new())
}

/// Décode un flux, avec point de contrôle d'annulation entre les chunks
pub fn decode_stream_cancellable<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    descriptor: &PipelineDescriptor,
    cancel: &CancelToken,
) -> Result<StreamReport> {
    ensure_streamable(descriptor.method, descriptor.fec, descriptor.add_parity)?;

    let reader = BufReader::new(reader);
    let mut report = StreamReport::default();
    // Nucléotides en attente d'un groupe de 4 complet
    let mut pending = String::new();
    // Décoder par tranches de chunk entier pour borner la mémoire
    let flush_threshold = crate::pipeline::DEFAULT_STREAM_CHUNK_BYTES * 4;

    for line in reader.lines() {
        cancel.checkpoint()?;

        let line = line?;
        let trimmed = line.trim();
        // L'en-tête du flux entrant est sauté: le descripteur fait foi
        if trimmed.is_empty() || trimmed.starts_with('>') {
            continue;
        }

        for c in trimmed.chars() {
            if c.is_whitespace() {
                continue;
            }
            pending.push(Nucleotide::from_char(c)?.as_char());
        }

        if pending.len() >= flush_threshold {
            let take = pending.len() - pending.len() % 4;
            let data = base4::decode(&pending[..take])?;
            writer.write_all(&data)?;

            report.dna_length += take as u64;
            report.original_bytes += data.len() as u64;
            pending.drain(..take);
        }
    }

    let data = base4::decode(&pending)?;
    writer.write_all(&data)?;
    report.dna_length += pending.len() as u64;
    report.original_bytes += data.len() as u64;
    writer.flush()?;

    tracing::info!(
        original_bytes = report.original_bytes,
        dna_length = report.dna_length,
        "décodage en flux terminé"
    );

    Ok(report)
}
