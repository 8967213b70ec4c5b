//! Modèles d'erreur pour la simulation de canal

use serde::{Deserialize, Serialize};

/// Modèle d'erreur pour la simulation
///
/// Chaque taux est une probabilité indépendante appliquée par
/// nucléotide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorModel {
    /// Taux de substitution (par base)
    pub substitution_rate: f64,

    /// Taux d'insertion (par base)
    pub insertion_rate: f64,

    /// Taux de délétion (par base)
    pub deletion_rate: f64,

    /// Seed pour reproductibilité
    pub seed: u64,
}

impl Default for ErrorModel {
    fn default() -> Self {
        Self {
            substitution_rate: 0.01,  // 1%
            insertion_rate: 0.005,    // 0.5%
            deletion_rate: 0.005,     // 0.5%
            seed: 42,
        }
    }
}

impl ErrorModel {
    /// Crée un nouveau modèle d'erreur
    pub fn new(substitution_rate: f64, insertion_rate: f64, deletion_rate: f64) -> Self {
        Self {
            substitution_rate,
            insertion_rate,
            deletion_rate,
            seed: 42,
        }
    }

    /// Définit le seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Taux d'erreur cumulé
    pub fn total_error_rate(&self) -> f64 {
        self.substitution_rate + self.insertion_rate + self.deletion_rate
    }

    /// Vérifie que chaque taux est une probabilité valide
    pub fn is_valid(&self) -> bool {
        [
            self.substitution_rate,
            self.insertion_rate,
            self.deletion_rate,
        ]
        .iter()
        .all(|rate| (0.0..=1.0).contains(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let model = ErrorModel::default();
        assert_eq!(model.substitution_rate, 0.01);
        assert_eq!(model.insertion_rate, 0.005);
        assert_eq!(model.deletion_rate, 0.005);
    }

    #[test]
    fn test_total_error_rate() {
        let model = ErrorModel::default();
        assert!((model.total_error_rate() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_with_seed() {
        let model = ErrorModel::default().with_seed(123);
        assert_eq!(model.seed, 123);
    }

    #[test]
    fn test_validity() {
        assert!(ErrorModel::default().is_valid());

        let invalid = ErrorModel {
            substitution_rate: 1.5,
            insertion_rate: 0.0,
            deletion_rate: 0.0,
            seed: 0,
        };
        assert!(!invalid.is_valid());
    }
}
