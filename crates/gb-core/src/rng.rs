//! Random digit service.
//!
//! Character generation and combat both consume single decimal digits,
//! the systems-neutral stand-in for the gamebook's random number table.
//! The trait keeps the digit source swappable so tests and replays can
//! inject a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CoreError, CoreResult};

/// A source of uniformly distributed decimal digits (0–9).
pub trait DigitRng {
    /// Draw the next digit. Each call is an independent uniform draw.
    fn next_digit(&mut self) -> u8;
}

/// Production digit source backed by `StdRng`.
#[derive(Debug)]
pub struct StdDigits {
    rng: StdRng,
}

impl StdDigits {
    /// Create a digit source with a fixed seed for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a digit source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl DigitRng for StdDigits {
    fn next_digit(&mut self) -> u8 {
        self.rng.random_range(0..=9)
    }
}

/// Deterministic digit source that replays a fixed sequence.
///
/// The sequence cycles once exhausted, so the source is total: a replay
/// that outlives its recorded digits keeps producing values rather than
/// failing mid-combat.
#[derive(Debug, Clone)]
pub struct FixedDigits {
    digits: Vec<u8>,
    position: usize,
}

impl FixedDigits {
    /// Create a fixed digit source from a sequence.
    ///
    /// Fails with [`CoreError::DataIntegrity`] if the sequence is empty
    /// or contains a value above 9.
    pub fn new(digits: Vec<u8>) -> CoreResult<Self> {
        let mut violations = Vec::new();
        if digits.is_empty() {
            violations.push("digit sequence is empty".to_string());
        }
        for (i, d) in digits.iter().enumerate() {
            if *d > 9 {
                violations.push(format!("digit at index {i} is {d}, must be 0-9"));
            }
        }
        if !violations.is_empty() {
            return Err(CoreError::integrity(violations));
        }
        Ok(Self {
            digits,
            position: 0,
        })
    }

    /// How many digits the sequence holds before cycling.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns true if the sequence is empty (never constructible).
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl DigitRng for FixedDigits {
    fn next_digit(&mut self) -> u8 {
        let d = self.digits[self.position % self.digits.len()];
        self.position += 1;
        d
    }
}
