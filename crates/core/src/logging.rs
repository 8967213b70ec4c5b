//! Initialisation du logging pour GeneCoder

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging
///
/// Le niveau est contrôlé par la variable d'environnement `RUST_LOG`.
pub fn init_logging() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}
