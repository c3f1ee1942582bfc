//! Factorials in the log domain.
//!
//! Poisson terms need `k!` for goal counts well past the point where `u128` overflows (`35!`),
//! so only `ln k!` is ever materialised.

pub trait Factorial {
    /// Natural logarithm of `n!`.
    fn ln(&self, n: u8) -> f64;
}

/// Sums `ln i` on every call.
#[derive(Default)]
pub struct Calculator;

impl Factorial for Calculator {
    #[inline]
    fn ln(&self, n: u8) -> f64 {
        (2..=n).map(|i| f64::ln(i as f64)).sum()
    }
}

const ENTRIES: usize = u8::MAX as usize + 1;

/// Precomputed `ln n!` for every `n` representable as a `u8`.
pub struct Lookup {
    ln_entries: [f64; ENTRIES],
}
impl Factorial for Lookup {
    #[inline]
    fn ln(&self, n: u8) -> f64 {
        self.ln_entries[n as usize]
    }
}

impl Default for Lookup {
    fn default() -> Self {
        let mut ln_entries = [0.0; ENTRIES];
        for n in 2..ENTRIES {
            ln_entries[n] = f64::ln(n as f64) + ln_entries[n - 1];
        }
        Self { ln_entries }
    }
}
