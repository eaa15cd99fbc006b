//! Random number generator verification command.
//!
//! The `rng` command verifies the properties of the ChaCha20 random
//! number generator behind every shuffle. It generates sample random
//! values and displays them for inspection.
//!
//! ## Purpose
//!
//! This command is primarily used for:
//! - Verifying RNG determinism (same seed produces same sequence)
//! - Debugging shuffle reproducibility issues

use std::io::Write;

use rand::{RngCore, SeedableRng};

use crate::error::CliError;

/// Handle the rng command - verify random number generator properties.
///
/// Generates and displays a sample of random numbers using the ChaCha20
/// RNG with the specified seed (or a random seed if not provided).
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let mut vals = vec![];
    for _ in 0..5 {
        vals.push(rng.next_u64());
    }
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}
