//! Canal de transmission ADN simulé
//!
//! Applique des substitutions, insertions et délétions aléatoires à une
//! séquence, avec un RNG seedé pour la reproductibilité. Pour chaque
//! nucléotide les trois tirages sont indépendants: la délétion est
//! testée d'abord, puis la substitution, puis l'insertion après la base
//! (éventuellement substituée).

use crate::error_model::ErrorModel;
use crate::metrics::{ChannelMetrics, MetricsCollector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

const NUCLEOTIDES: [char; 4] = ['A', 'T', 'C', 'G'];

/// Canal de transmission ADN simulé
pub struct DnaChannel {
    model: ErrorModel,
}

impl DnaChannel {
    /// Crée un nouveau canal
    pub fn new(model: ErrorModel) -> Self {
        Self { model }
    }

    /// Retourne le modèle d'erreur du canal
    pub fn model(&self) -> &ErrorModel {
        &self.model
    }

    /// Simule une transmission avec le seed du modèle
    pub fn transmit(&self, dna: &str) -> (String, ChannelMetrics) {
        self.transmit_seeded(dna, self.model.seed)
    }

    /// Simule une transmission avec un seed explicite
    pub fn transmit_seeded(&self, dna: &str, seed: u64) -> (String, ChannelMetrics) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut mutated = String::with_capacity(dna.len() + dna.len() / 8);
        let mut metrics = ChannelMetrics {
            total_bases: dna.chars().count(),
            ..Default::default()
        };

        for nt in dna.chars() {
            // Délétion
            if rng.gen::<f64>() < self.model.deletion_rate {
                metrics.deletions += 1;
                continue;
            }

            // Substitution
            let emitted = if rng.gen::<f64>() < self.model.substitution_rate {
                metrics.substitutions += 1;
                substitute(nt, &mut rng)
            } else {
                nt
            };
            mutated.push(emitted);

            // Insertion après la base (éventuellement substituée)
            if rng.gen::<f64>() < self.model.insertion_rate {
                metrics.insertions += 1;
                mutated.push(NUCLEOTIDES[rng.gen_range(0..4)]);
            }
        }

        (mutated, metrics)
    }

    /// Simule plusieurs transmissions indépendantes en parallèle
    ///
    /// Chaque itération utilise un seed dérivé, donc le résultat est
    /// reproductible quel que soit le découpage des threads.
    pub fn transmit_iterations(&self, dna: &str, iterations: usize) -> Vec<(String, ChannelMetrics)> {
        (0..iterations)
            .into_par_iter()
            .map(|i| self.transmit_seeded(dna, self.model.seed.wrapping_add(i as u64)))
            .collect()
    }

    /// Collecte les métriques de plusieurs transmissions
    pub fn collect_metrics(&self, dna: &str, iterations: usize) -> MetricsCollector {
        let mut collector = MetricsCollector::new();
        for (_, metrics) in self.transmit_iterations(dna, iterations) {
            collector.add(metrics);
        }
        collector
    }
}

/// Substitue une base par une base différente
fn substitute(nt: char, rng: &mut ChaCha8Rng) -> char {
    let mut replacement = nt;
    while replacement == nt {
        replacement = NUCLEOTIDES[rng.gen_range(0..4)];
    }
    replacement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_channel_is_identity() {
        let model = ErrorModel::new(0.0, 0.0, 0.0);
        let channel = DnaChannel::new(model);

        let (mutated, metrics) = channel.transmit("ATCGATCG");
        assert_eq!(mutated, "ATCGATCG");
        assert_eq!(metrics.affected_bases(), 0);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let model = ErrorModel::new(0.2, 0.1, 0.1).with_seed(7);
        let channel = DnaChannel::new(model);

        let dna = "ATCGATCGATCGATCGATCG";
        let (first, _) = channel.transmit(dna);
        let (second, _) = channel.transmit(dna);
        assert_eq!(first, second);
    }

    #[test]
    fn test_substitution_only_preserves_length() {
        let model = ErrorModel::new(0.5, 0.0, 0.0).with_seed(11);
        let channel = DnaChannel::new(model);

        let dna = "ATCGATCGATCG";
        let (mutated, metrics) = channel.transmit(dna);

        assert_eq!(mutated.len(), dna.len());
        assert!(metrics.substitutions > 0);
        assert_eq!(metrics.insertions, 0);
        assert_eq!(metrics.deletions, 0);
    }

    #[test]
    fn test_substitution_changes_base() {
        let model = ErrorModel::new(1.0, 0.0, 0.0).with_seed(3);
        let channel = DnaChannel::new(model);

        let (mutated, metrics) = channel.transmit("AAAAAAAA");
        assert_eq!(metrics.substitutions, 8);
        assert!(mutated.chars().all(|c| c != 'A'));
    }

    #[test]
    fn test_deletion_shortens_sequence() {
        let model = ErrorModel::new(0.0, 0.0, 1.0).with_seed(5);
        let channel = DnaChannel::new(model);

        let (mutated, metrics) = channel.transmit("ATCG");
        assert!(mutated.is_empty());
        assert_eq!(metrics.deletions, 4);
    }

    #[test]
    fn test_iterations_are_reproducible() {
        let model = ErrorModel::new(0.1, 0.05, 0.05).with_seed(42);
        let channel = DnaChannel::new(model);

        let dna = "ATCGATCGATCGATCG";
        let first = channel.transmit_iterations(dna, 8);
        let second = channel.transmit_iterations(dna, 8);

        let sequences_first: Vec<&String> = first.iter().map(|(s, _)| s).collect();
        let sequences_second: Vec<&String> = second.iter().map(|(s, _)| s).collect();
        assert_eq!(sequences_first, sequences_second);
    }

    #[test]
    fn test_collect_metrics() {
        let model = ErrorModel::new(0.2, 0.0, 0.0).with_seed(9);
        let channel = DnaChannel::new(model);

        let collector = channel.collect_metrics("ATCGATCGATCGATCGATCG", 16);
        assert_eq!(collector.len(), 16);
    }
}
