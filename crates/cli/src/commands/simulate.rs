//! Commande de simulation d'erreurs de canal

use anyhow::{Context, Result};
use genecoder_core::{decode, from_fasta};
use genecoder_simulation::{DnaChannel, ErrorModel};
use std::path::PathBuf;

pub fn run(
    input: PathBuf,
    substitution_rate: f64,
    insertion_rate: f64,
    deletion_rate: f64,
    iterations: usize,
    seed: u64,
) -> Result<()> {
    println!("🧬 Simulation de canal sur: {}", input.display());

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("lecture de {}", input.display()))?;
    let (dna, descriptor) = from_fasta(&content)?;

    let model = ErrorModel::new(substitution_rate, insertion_rate, deletion_rate).with_seed(seed);
    anyhow::ensure!(model.is_valid(), "taux d'erreur hors de l'intervalle [0, 1]");

    let reference = decode(&dna, &descriptor)?.data;

    let channel = DnaChannel::new(model);
    let transmissions = channel.transmit_iterations(&dna, iterations);

    let mut recovered = 0usize;
    let mut decode_failures = 0usize;
    let mut total_affected = 0usize;

    for (mutated, metrics) in &transmissions {
        total_affected += metrics.affected_bases();
        match decode(mutated, &descriptor) {
            Ok(result) if result.data == reference => recovered += 1,
            Ok(_) => {}
            Err(_) => decode_failures += 1,
        }
    }

    println!("\n📊 Résultats ({} itérations):", iterations);
    println!(
        "   Bases affectées en moyenne: {:.1}",
        total_affected as f64 / iterations.max(1) as f64
    );
    println!(
        "   Transmissions restituées intactes: {}/{} ({:.1}%)",
        recovered,
        iterations,
        100.0 * recovered as f64 / iterations.max(1) as f64
    );
    println!("   Échecs de décodage: {}", decode_failures);

    Ok(())
}
