//! Commande d'encodage

use crate::{create_spinner, CliFec, CliMethod};
use anyhow::{Context, Result};
use genecoder_core::{
    encode, encode_stream, to_fasta, EncoderConfig, FecScheme, GcConstraints, Method,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

pub struct EncodeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub method: CliMethod,
    pub fec: CliFec,
    pub fec_nsym: usize,
    pub add_parity: bool,
    pub gc_min: f64,
    pub gc_max: f64,
    pub max_homopolymer: usize,
    pub stream: bool,
}

pub fn run(args: EncodeArgs) -> Result<()> {
    println!("🧬 Encodage de: {}", args.input.display());

    let method = match args.method {
        CliMethod::Base4Direct => Method::Base4Direct,
        CliMethod::Huffman => Method::Huffman,
        CliMethod::GcBalanced => Method::GcBalanced,
    };
    let fec = match args.fec {
        CliFec::None => FecScheme::None,
        CliFec::TripleRepeat => FecScheme::TripleRepeat,
        CliFec::Hamming74 => FecScheme::Hamming74,
        CliFec::ReedSolomon => FecScheme::ReedSolomon,
    };

    let original_filename = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input.bin")
        .to_string();

    let config = EncoderConfig {
        method,
        fec,
        fec_nsym: args.fec_nsym,
        add_parity: args.add_parity,
        original_filename,
        constraints: GcConstraints {
            gc_min: args.gc_min,
            gc_max: args.gc_max,
            max_homopolymer: args.max_homopolymer,
        },
        ..Default::default()
    };

    if args.stream {
        return run_stream(&args.input, &args.output, &config);
    }

    // 1. Lire le fichier
    let spinner = create_spinner("Lecture du fichier...");
    let data = std::fs::read(&args.input)
        .with_context(|| format!("lecture de {}", args.input.display()))?;
    spinner.finish_with_message(format!("Fichier lu ({} octets)", data.len()));

    // 2. Encoder
    let spinner = create_spinner("Encodage ADN...");
    let output = encode(&data, &config)?;
    spinner.finish_with_message(format!("{} nucléotides générés", output.dna.len()));

    // 3. Écrire l'enregistrement FASTA
    let fasta = to_fasta(&output.dna, &output.descriptor)?;
    std::fs::write(&args.output, fasta)
        .with_context(|| format!("écriture de {}", args.output.display()))?;

    // 4. Métriques
    let metrics = &output.metrics;
    println!("\n📊 Métriques d'encodage:");
    println!("   Taille originale: {} octets", metrics.original_bytes);
    println!("   Longueur ADN finale: {} nucléotides", metrics.dna_length);
    println!("   Ratio de compression: {:.2}", metrics.compression_ratio);
    println!("   Bits par nucléotide: {:.2}", metrics.bits_per_nt);

    if let (Some(gc), Some(homopolymer)) = (metrics.gc_actual, metrics.max_homopolymer_actual) {
        println!("   GC réel (charge utile): {:.1}%", gc * 100.0);
        println!("   Homopolymère max réel: {}", homopolymer);
    }

    println!(
        "\n✅ '{}' encodé vers '{}'",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}

fn run_stream(input: &PathBuf, output: &PathBuf, config: &EncoderConfig) -> Result<()> {
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("ouverture de {}", input.display()))?,
    );
    let writer = BufWriter::new(
        File::create(output).with_context(|| format!("création de {}", output.display()))?,
    );

    let spinner = create_spinner("Encodage en flux...");
    let report = encode_stream(reader, writer, config)?;
    spinner.finish_with_message(format!(
        "{} octets -> {} nucléotides",
        report.original_bytes, report.dna_length
    ));

    println!(
        "\n✅ '{}' encodé en flux vers '{}'",
        input.display(),
        output.display()
    );

    Ok(())
}
