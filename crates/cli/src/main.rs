//! CLI pour GeneCoder

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

mod commands;

use commands::{decode, encode, info, simulate};

#[derive(Parser)]
#[command(name = "genecoder")]
#[command(about = "Encodage de fichiers en ADN simulé", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode un fichier en enregistrement FASTA
    Encode {
        /// Fichier d'entrée
        #[arg(short, long)]
        input: PathBuf,

        /// Fichier FASTA de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Méthode d'encodage primaire
        #[arg(short, long, value_enum, default_value = "base4-direct")]
        method: CliMethod,

        /// Couche de correction d'erreurs
        #[arg(short, long, value_enum, default_value = "none")]
        fec: CliFec,

        /// Symboles de parité Reed-Solomon
        #[arg(long, default_value = "10")]
        fec_nsym: usize,

        /// Ajouter le nucléotide de parité
        #[arg(short = 'p', long)]
        add_parity: bool,

        /// Ratio GC minimum (gc-balanced)
        #[arg(long, default_value = "0.45")]
        gc_min: f64,

        /// Ratio GC maximum (gc-balanced)
        #[arg(long, default_value = "0.55")]
        gc_max: f64,

        /// Longueur max d'homopolymère (gc-balanced)
        #[arg(long, default_value = "3")]
        max_homopolymer: usize,

        /// Encoder en flux (base4-direct sans FEC uniquement)
        #[arg(short, long)]
        stream: bool,
    },

    /// Décode un enregistrement FASTA en fichier original
    Decode {
        /// Fichier FASTA d'entrée
        #[arg(short, long)]
        input: PathBuf,

        /// Fichier de sortie
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Simule des erreurs de canal sur un fichier FASTA
    Simulate {
        /// Fichier FASTA d'entrée
        #[arg(short, long)]
        input: PathBuf,

        /// Taux de substitution (0.0-1.0)
        #[arg(short, long, default_value = "0.01")]
        substitution_rate: f64,

        /// Taux d'insertion (0.0-1.0)
        #[arg(long, default_value = "0.005")]
        insertion_rate: f64,

        /// Taux de délétion (0.0-1.0)
        #[arg(long, default_value = "0.005")]
        deletion_rate: f64,

        /// Nombre d'itérations
        #[arg(short = 'n', long, default_value = "100")]
        iterations: usize,

        /// Seed du générateur aléatoire
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Affiche le descripteur et les statistiques d'un fichier FASTA
    Info {
        /// Fichier FASTA d'entrée
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum CliMethod {
    Base4Direct,
    Huffman,
    GcBalanced,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum CliFec {
    None,
    TripleRepeat,
    Hamming74,
    ReedSolomon,
}

fn main() -> anyhow::Result<()> {
    genecoder_core::logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            method,
            fec,
            fec_nsym,
            add_parity,
            gc_min,
            gc_max,
            max_homopolymer,
            stream,
        } => {
            encode::run(encode::EncodeArgs {
                input,
                output,
                method,
                fec,
                fec_nsym,
                add_parity,
                gc_min,
                gc_max,
                max_homopolymer,
                stream,
            })?;
        }
        Commands::Decode { input, output } => {
            decode::run(input, output)?;
        }
        Commands::Simulate {
            input,
            substitution_rate,
            insertion_rate,
            deletion_rate,
            iterations,
            seed,
        } => {
            simulate::run(
                input,
                substitution_rate,
                insertion_rate,
                deletion_rate,
                iterations,
                seed,
            )?;
        }
        Commands::Info { input } => {
            info::run(input)?;
        }
    }

    Ok(())
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("gabarit de spinner valide"),
    );
    pb.set_message(msg.to_string());
    pb
}
