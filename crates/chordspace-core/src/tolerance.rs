//! Epsilon-aware scalar comparison and the numeric constants of chord space

use std::cmp::Ordering;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The size of the octave, consistent with 12-tone equal temperament and MIDI.
pub const OCTAVE: f64 = 12.0;

/// Middle C as a MIDI key number.
pub const MIDDLE_C: f64 = 60.0;

/// Default multiple of [`epsilon`] inside which two pitches are equal.
pub const DEFAULT_EPSILON_FACTOR: f64 = 1000.0;

static EPSILON: OnceLock<f64> = OnceLock::new();

/// Machine epsilon of `f64`, found once by repeated halving.
///
/// The result is the largest power-of-two fraction `e` for which
/// `1 + e / 2 == 1`.
pub fn epsilon() -> f64 {
    *EPSILON.get_or_init(|| {
        let mut e = 1.0_f64;
        loop {
            e /= 2.0;
            if 1.0 + e / 2.0 == 1.0 {
                break e;
            }
        }
    })
}

/// Remainder of `dividend / divisor` under the Euclidean definition.
///
/// For a positive divisor the result lies in `[0, divisor)`.
pub fn modulo(dividend: f64, divisor: f64) -> f64 {
    let quotient = if divisor < 0.0 {
        (dividend / divisor).ceil()
    } else if divisor > 0.0 {
        (dividend / divisor).floor()
    } else {
        0.0
    };
    dividend - quotient * divisor
}

/// Tolerant comparator for pitches and intervals.
///
/// Two values are equal when they differ by less than `epsilon() * factor`.
/// Exactly one of `lt`, `eq`, `gt` holds for any pair of finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub factor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { factor: DEFAULT_EPSILON_FACTOR }
    }
}

impl Tolerance {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Width of the equality band.
    pub fn band(&self) -> f64 {
        epsilon() * self.factor
    }

    pub fn eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.band()
    }

    pub fn lt(&self, a: f64, b: f64) -> bool {
        !self.eq(a, b) && a < b
    }

    pub fn gt(&self, a: f64, b: f64) -> bool {
        !self.eq(a, b) && a > b
    }

    pub fn le(&self, a: f64, b: f64) -> bool {
        self.eq(a, b) || a < b
    }

    pub fn ge(&self, a: f64, b: f64) -> bool {
        self.eq(a, b) || a > b
    }

    /// Three-way comparison consistent with `lt`, `eq` and `gt`.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        if self.lt(a, b) {
            Ordering::Less
        } else if self.gt(a, b) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
