//! Simulation d'erreurs de canal pour séquences ADN
//!
//! Reproduit les erreurs de synthèse, stockage et séquençage sur des
//! séquences encodées, pour mesurer la robustesse des couches de
//! correction du pipeline.

pub mod channel;
pub mod error_model;
pub mod metrics;

pub use channel::DnaChannel;
pub use error_model::ErrorModel;
pub use metrics::{ChannelMetrics, MetricsCollector};
