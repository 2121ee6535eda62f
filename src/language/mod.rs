// Types representing a swim workout and its summary

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
