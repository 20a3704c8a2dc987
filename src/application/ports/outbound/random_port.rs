//! Randomness port
//!
//! The critical-hit coin flip is the only non-deterministic step in battle
//! resolution. Keeping the draw behind a port lets tests force both
//! branches.

/// Source of uniform draws in [0, 1)
pub trait RandomSourcePort: Send + Sync {
    fn next_unit(&self) -> f64;
}
