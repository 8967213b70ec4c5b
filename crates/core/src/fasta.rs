//! Conteneur FASTA: en-tête descripteur + séquence repliée
//!
//! Un enregistrement est une ligne d'en-tête commençant par `>` suivie
//! de la séquence repliée à 80 colonnes. L'en-tête porte le descripteur
//! complet du pipeline en jetons `clé=valeur`. Les fichiers
//! multi-enregistrements sont acceptés; les décodeurs travaillent sur le
//! premier sauf demande contraire.

use crate::descriptor::PipelineDescriptor;
use crate::error::{GeneCoderError, Result};
use crate::sequence::Nucleotide;

/// Largeur de repli des lignes de séquence
pub const FASTA_LINE_WIDTH: usize = 80;

/// Sérialise une séquence et son descripteur en enregistrement FASTA
pub fn to_fasta(dna: &str, descriptor: &PipelineDescriptor) -> Result<String> {
    let header = descriptor.to_header()?;

    let mut out = String::with_capacity(dna.len() + header.len() + dna.len() / FASTA_LINE_WIDTH + 8);
    out.push('>');
    out.push_str(&header);
    out.push('\n');

    let mut column = 0;
    for c in dna.chars() {
        out.push(c);
        column += 1;
        if column == FASTA_LINE_WIDTH {
            out.push('\n');
            column = 0;
        }
    }
    if column > 0 {
        out.push('\n');
    }

    Ok(out)
}

/// Parse le premier enregistrement d'un contenu FASTA
pub fn from_fasta(content: &str) -> Result<(String, PipelineDescriptor)> {
    let mut records = from_fasta_all(content)?;
    if records.is_empty() {
        return Err(GeneCoderError::InvalidHeader(
            "aucun enregistrement FASTA trouvé".to_string(),
        ));
    }
    Ok(records.swap_remove(0))
}

/// Parse tous les enregistrements d'un contenu FASTA
///
/// Les lignes précédant le premier `>` sont ignorées. Les espaces et
/// sauts de ligne internes à la séquence sont retirés; les minuscules
/// sont acceptées et normalisées en majuscules. Tout autre caractère est
/// une erreur d'alphabet.
pub fn from_fasta_all(content: &str) -> Result<Vec<(String, PipelineDescriptor)>> {
    let mut records = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some((header, sequence)) = current.take() {
                records.push(finalize_record(&header, sequence)?);
            }
            current = Some((header.trim().to_string(), String::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            for c in trimmed.chars() {
                if c.is_whitespace() {
                    continue;
                }
                sequence.push(Nucleotide::from_char(c)?.as_char());
            }
        }
        // Contenu hors enregistrement: ignoré
    }

    if let Some((header, sequence)) = current.take() {
        records.push(finalize_record(&header, sequence)?);
    }

    Ok(records)
}

fn finalize_record(header: &str, sequence: String) -> Result<(String, PipelineDescriptor)> {
    let descriptor = PipelineDescriptor::parse_header(header)?;
    Ok((sequence, descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Method;

    fn descriptor() -> PipelineDescriptor {
        PipelineDescriptor::new(Method::Base4Direct, "test.bin")
    }

    #[test]
    fn test_to_fasta_wraps_lines() {
        let dna: String = std::iter::repeat('A').take(200).collect();
        let fasta = to_fasta(&dna, &descriptor()).unwrap();

        let lines: Vec<&str> = fasta.lines().collect();
        assert!(lines[0].starts_with('>'));
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 80);
        assert_eq!(lines[3].len(), 40);
    }

    #[test]
    fn test_roundtrip() {
        let dna = "ATCGATCGATCG";
        let desc = descriptor();

        let fasta = to_fasta(dna, &desc).unwrap();
        let (parsed_dna, parsed_desc) = from_fasta(&fasta).unwrap();

        assert_eq!(parsed_dna, dna);
        assert_eq!(parsed_desc, desc);
    }

    #[test]
    fn test_empty_sequence_roundtrip() {
        let fasta = to_fasta("", &descriptor()).unwrap();
        let (dna, _) = from_fasta(&fasta).unwrap();
        assert!(dna.is_empty());
    }

    #[test]
    fn test_lowercase_normalized() {
        let fasta = ">method=base4_direct original_filename=a.bin fec=none\natcg\nGTca\n";
        let (dna, _) = from_fasta(fasta).unwrap();
        assert_eq!(dna, "ATCGGTCA");
    }

    #[test]
    fn test_invalid_character_rejected() {
        let fasta = ">method=base4_direct original_filename=a.bin fec=none\nATXG\n";
        let result = from_fasta(fasta);
        assert!(matches!(result, Err(GeneCoderError::InvalidAlphabet('X'))));
    }

    #[test]
    fn test_internal_whitespace_stripped() {
        let fasta = ">method=base4_direct original_filename=a.bin fec=none\n  AT CG  \nGT\n";
        let (dna, _) = from_fasta(fasta).unwrap();
        assert_eq!(dna, "ATCGGT");
    }

    #[test]
    fn test_multi_record_takes_first() {
        let fasta = ">method=base4_direct original_filename=un.bin fec=none\nAAAA\n\
                     >method=base4_direct original_filename=deux.bin fec=none\nTTTT\n";

        let (dna, desc) = from_fasta(fasta).unwrap();
        assert_eq!(dna, "AAAA");
        assert_eq!(desc.original_filename, "un.bin");

        let all = from_fasta_all(fasta).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].0, "TTTT");
    }

    #[test]
    fn test_content_before_first_header_ignored() {
        let fasta = "commentaire libre\n>method=base4_direct original_filename=a.bin fec=none\nAAAA\n";
        let (dna, _) = from_fasta(fasta).unwrap();
        assert_eq!(dna, "AAAA");
    }

    #[test]
    fn test_no_record_is_an_error() {
        let result = from_fasta("pas de fasta ici\n");
        assert!(matches!(result, Err(GeneCoderError::InvalidHeader(_))));
    }
}
