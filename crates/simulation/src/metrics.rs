//! Métriques de simulation de canal

use serde::{Deserialize, Serialize};

/// Métriques collectées pendant une transmission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelMetrics {
    /// Nombre de bases de la séquence d'origine
    pub total_bases: usize,

    /// Nombre de substitutions
    pub substitutions: usize,

    /// Nombre d'insertions
    pub insertions: usize,

    /// Nombre de délétions
    pub deletions: usize,
}

impl ChannelMetrics {
    /// Crée des métriques vides
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre total de bases affectées
    pub fn affected_bases(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Taux d'erreur observé
    pub fn error_rate(&self) -> f64 {
        if self.total_bases == 0 {
            return 0.0;
        }
        self.affected_bases() as f64 / self.total_bases as f64
    }
}

/// Collecteur de métriques pour plusieurs transmissions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsCollector {
    metrics: Vec<ChannelMetrics>,
}

impl MetricsCollector {
    /// Crée un nouveau collecteur
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute des métriques
    pub fn add(&mut self, metrics: ChannelMetrics) {
        self.metrics.push(metrics);
    }

    /// Retourne les métriques moyennes
    pub fn average(&self) -> ChannelMetrics {
        if self.metrics.is_empty() {
            return ChannelMetrics::new();
        }

        let n = self.metrics.len();
        ChannelMetrics {
            total_bases: self.metrics.iter().map(|m| m.total_bases).sum::<usize>() / n,
            substitutions: self.metrics.iter().map(|m| m.substitutions).sum::<usize>() / n,
            insertions: self.metrics.iter().map(|m| m.insertions).sum::<usize>() / n,
            deletions: self.metrics.iter().map(|m| m.deletions).sum::<usize>() / n,
        }
    }

    /// Retourne les métriques minimales
    pub fn min(&self) -> ChannelMetrics {
        ChannelMetrics {
            total_bases: self.metrics.iter().map(|m| m.total_bases).min().unwrap_or(0),
            substitutions: self.metrics.iter().map(|m| m.substitutions).min().unwrap_or(0),
            insertions: self.metrics.iter().map(|m| m.insertions).min().unwrap_or(0),
            deletions: self.metrics.iter().map(|m| m.deletions).min().unwrap_or(0),
        }
    }

    /// Retourne les métriques maximales
    pub fn max(&self) -> ChannelMetrics {
        ChannelMetrics {
            total_bases: self.metrics.iter().map(|m| m.total_bases).max().unwrap_or(0),
            substitutions: self.metrics.iter().map(|m| m.substitutions).max().unwrap_or(0),
            insertions: self.metrics.iter().map(|m| m.insertions).max().unwrap_or(0),
            deletions: self.metrics.iter().map(|m| m.deletions).max().unwrap_or(0),
        }
    }

    /// Nombre de transmissions enregistrées
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Vérifie si le collecteur est vide
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_rate() {
        let metrics = ChannelMetrics {
            total_bases: 100,
            substitutions: 3,
            insertions: 1,
            deletions: 1,
        };

        assert_eq!(metrics.affected_bases(), 5);
        assert!((metrics.error_rate() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sequence_rate() {
        assert_eq!(ChannelMetrics::new().error_rate(), 0.0);
    }

    #[test]
    fn test_collector_average() {
        let mut collector = MetricsCollector::new();
        collector.add(ChannelMetrics {
            total_bases: 100,
            substitutions: 10,
            ..Default::default()
        });
        collector.add(ChannelMetrics {
            total_bases: 100,
            substitutions: 20,
            ..Default::default()
        });

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.average().substitutions, 15);
        assert_eq!(collector.min().substitutions, 10);
        assert_eq!(collector.max().substitutions, 20);
    }
}
