pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod quota;
pub mod store;

pub use error::{ReframeError, Result};

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv().ok() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
