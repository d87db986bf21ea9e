pub mod gemini;
pub mod policy;
pub mod traits;

pub use gemini::GeminiOracle;
pub use traits::{CategoryOracle, NoOracle};

use crate::storage::OracleConfig;

/// The configured oracle, or [`NoOracle`] when it is disabled or cannot be
/// set up (no API key). Setup problems are logged, not fatal.
pub fn from_config(config: &OracleConfig) -> Box<dyn CategoryOracle> {
    match GeminiOracle::from_config(config) {
        Ok(oracle) => Box::new(oracle),
        Err(e) => {
            tracing::info!("oracle unavailable, using defaults: {e}");
            Box::new(NoOracle)
        }
    }
}
