//! Summaries of swim workouts written as free-form text.
//!
//! ```text
//! 200 free easy
//! 3x
//! (100 fly + 100 back)
//! 4x50 kick hr28
//! ```
//!
//! is read line by line into the total distance swum along with how much of
//! it was each stroke, each stroke type, and each intensity.

pub mod formatting;
pub mod journal;
pub mod language;
pub mod parsing;
mod regex;
pub mod service;
