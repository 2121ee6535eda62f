//! Presenting workout summaries to people

mod renderer;
mod report;
mod syntax;

// Re-export all public symbols
pub use renderer::*;
pub use report::*;
pub use syntax::*;
