//! Commande de décodage

use crate::create_spinner;
use anyhow::{Context, Result};
use genecoder_core::{decode, from_fasta_all};
use std::path::PathBuf;

pub fn run(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("🧬 Décodage de: {}", input.display());

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("lecture de {}", input.display()))?;

    let mut records = from_fasta_all(&content)?;
    anyhow::ensure!(!records.is_empty(), "aucun enregistrement FASTA trouvé");
    if records.len() > 1 {
        eprintln!(
            "Attention: {} enregistrements trouvés, seul le premier est décodé",
            records.len()
        );
    }
    let (dna, descriptor) = records.swap_remove(0);

    let spinner = create_spinner("Décodage ADN...");
    let decoded = decode(&dna, &descriptor)?;
    spinner.finish_with_message(format!("{} octets restitués", decoded.data.len()));

    std::fs::write(&output, &decoded.data)
        .with_context(|| format!("écriture de {}", output.display()))?;

    let metrics = &decoded.metrics;
    if metrics.parity_mismatch {
        eprintln!("⚠️  Désaccord de parité détecté: les données peuvent être corrompues");
    }
    if metrics.triple_repeat_corrected > 0 || metrics.triple_repeat_uncorrectable > 0 {
        println!(
            "   Triple répétition: {} triplets corrigés, {} incorrigibles",
            metrics.triple_repeat_corrected, metrics.triple_repeat_uncorrectable
        );
    }
    if metrics.hamming_corrected > 0 {
        println!("   Hamming(7,4): {} bits corrigés", metrics.hamming_corrected);
    }
    if metrics.rs_corrected > 0 {
        println!("   Reed-Solomon: {} symboles corrigés", metrics.rs_corrected);
    }

    println!(
        "\n✅ '{}' décodé vers '{}'",
        input.display(),
        output.display()
    );

    Ok(())
}
