//! Commande d'inspection d'un fichier FASTA

use anyhow::{Context, Result};
use genecoder_core::sequence;
use genecoder_core::from_fasta_all;
use std::path::PathBuf;

pub fn run(input: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("lecture de {}", input.display()))?;

    let records = from_fasta_all(&content)?;
    anyhow::ensure!(!records.is_empty(), "aucun enregistrement FASTA trouvé");

    for (index, (dna, descriptor)) in records.iter().enumerate() {
        println!("📄 Enregistrement {}:", index + 1);
        println!("   Méthode: {}", descriptor.method);
        println!("   Fichier d'origine: {}", descriptor.original_filename);
        println!("   FEC: {}", descriptor.fec);

        if let Some(nsym) = descriptor.fec_nsym {
            println!("   Symboles de parité RS: {}", nsym);
        }
        if let Some(bits) = descriptor.fec_padding_bits {
            println!("   Bits de bourrage Hamming: {}", bits);
        }
        if descriptor.add_parity {
            println!("   Parité ADN: oui");
        }
        if let Some(table) = &descriptor.huffman_table {
            println!("   Table de Huffman: {} symboles", table.len());
        }
        if let (Some(gc_min), Some(gc_max)) = (descriptor.gc_min, descriptor.gc_max) {
            println!("   Plage GC cible: {:.0}%-{:.0}%", gc_min * 100.0, gc_max * 100.0);
        }

        println!("   Longueur: {} nucléotides", dna.len());
        println!("   GC observé: {:.1}%", sequence::gc_content(dna) * 100.0);
        println!(
            "   Homopolymère max observé: {}",
            sequence::max_homopolymer_run(dna)
        );

        // Extrêmes du profil GC par fenêtres de 100 nt
        let profile = sequence::windowed_gc_content(dna, 100, 100);
        if profile.len() > 1 {
            let min = profile.iter().map(|(_, gc)| *gc).fold(f64::INFINITY, f64::min);
            let max = profile.iter().map(|(_, gc)| *gc).fold(0.0, f64::max);
            println!(
                "   GC par fenêtre de 100 nt: min {:.1}%, max {:.1}%",
                min * 100.0,
                max * 100.0
            );
        }
        println!();
    }

    Ok(())
}
