//! Deterministic random number generation
//!
//! All randomness in a run MUST go through this module: the arrival generator
//! and each pool's probabilistic trials own their own seeded `RngManager`.

mod xorshift;

pub use xorshift::RngManager;
