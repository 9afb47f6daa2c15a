use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Number of Sun in one TRX.
pub const SUN_PER_TRX: u64 = 1_000_000;

/// An amount of the native currency in its smallest unit.
///
/// Everything inside the crate is denominated in Sun. Conversion to the
/// 6-decimal TRX unit happens only when reading user input or printing.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sun(u64);

impl Sun {
    pub const ZERO: Sun = Sun(0);

    pub const fn new(sun: u64) -> Self {
        Self(sun)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert a TRX amount typed by the user into Sun.
    ///
    /// Returns `None` for non-finite, non-positive or sub-Sun amounts, and for
    /// amounts that do not fit in a `u64`.
    pub fn from_trx(trx: f64) -> Option<Self> {
        if !trx.is_finite() || trx <= 0.0 {
            return None;
        }
        let sun = (trx * SUN_PER_TRX as f64).round();
        if sun < 1.0 || sun >= u64::MAX as f64 {
            return None;
        }
        Some(Self(sun as u64))
    }

    pub fn as_trx(&self) -> f64 {
        self.0 as f64 / SUN_PER_TRX as f64
    }
}

impl From<u64> for Sun {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for Sun {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:06} TRX",
            self.0 / SUN_PER_TRX,
            self.0 % SUN_PER_TRX
        )
    }
}

/// Render a raw token balance using the token's decimal precision.
pub fn format_units(raw: u64, precision: u32) -> String {
    if precision == 0 {
        return raw.to_string();
    }
    let Some(scale) = 10u64.checked_pow(precision) else {
        return raw.to_string();
    };
    format!(
        "{}.{:0width$}",
        raw / scale,
        raw % scale,
        width = precision as usize
    )
}
