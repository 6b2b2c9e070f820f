// Overs and runs arithmetic.
//
// Overs notation is base-6 in its single fractional digit: `17.2` means 17
// complete overs plus 2 balls, never 17.2 decimal overs. Everything internal
// works in whole balls; the notation only appears at the edges.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ScenarioError;

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u32 = 6;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Runs and balls parsed from a `"runs/overs"` string such as `"192/20.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunsBalls {
    pub runs: u32,
    pub balls: u32,
}

impl FromStr for RunsBalls {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_runs_overs(s)
    }
}

/// A ball count shown in overs notation. Serializes as the notation number
/// (`56` balls becomes `9.2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Overs {
    balls: u32,
}

impl Overs {
    pub fn from_balls(balls: u32) -> Self {
        Overs { balls }
    }

    /// Overs for a whole number of completed overs.
    pub fn whole(overs: u32) -> Self {
        Overs {
            balls: overs.saturating_mul(BALLS_PER_OVER),
        }
    }

    pub fn balls(self) -> u32 {
        self.balls
    }

    pub fn completed_overs(self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    pub fn balls_in_over(self) -> u32 {
        self.balls % BALLS_PER_OVER
    }

    pub fn as_decimal(self) -> f64 {
        balls_to_overs_decimal(self.balls)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed_overs(), self.balls_in_over())
    }
}

impl Serialize for Overs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

// ---------------------------------------------------------------------------
// Overs <-> balls
// ---------------------------------------------------------------------------

/// Convert overs notation held in a decimal (`12.3`) into balls (`75`).
pub fn overs_to_balls(overs: f64) -> Result<u32, ScenarioError> {
    let invalid = || ScenarioError::InvalidOvers {
        value: overs.to_string(),
    };

    if !overs.is_finite() || overs < 0.0 {
        return Err(invalid());
    }

    let whole = overs.trunc();
    if whole > f64::from(u32::MAX) {
        return Err(invalid());
    }

    let balls = ((overs - whole) * 10.0).round();
    if balls >= f64::from(BALLS_PER_OVER) {
        return Err(invalid());
    }

    (whole as u32)
        .checked_mul(BALLS_PER_OVER)
        .and_then(|b| b.checked_add(balls as u32))
        .ok_or_else(invalid)
}

/// Convert balls back into overs notation: `56` becomes `9.2`.
pub fn balls_to_overs_decimal(balls: u32) -> f64 {
    // Dividing the exact integer tenths gives the double closest to the
    // written notation, the same value parsing "9.2" would produce.
    let tenths =
        u64::from(balls / BALLS_PER_OVER) * 10 + u64::from(balls % BALLS_PER_OVER);
    tenths as f64 / 10.0
}

// ---------------------------------------------------------------------------
// "runs/overs" strings
// ---------------------------------------------------------------------------

fn invalid_format(value: &str, reason: &str) -> ScenarioError {
    ScenarioError::InvalidFormat {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Split `"runs/overs"` on its single separator.
fn split_runs_overs(value: &str) -> Result<(&str, &str), ScenarioError> {
    let mut parts = value.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(runs), Some(overs), None) => Ok((runs, overs)),
        _ => Err(invalid_format(value, "expected exactly one `/` separator")),
    }
}

/// Parse the overs half of `"runs/overs"` into balls. A missing `.balls`
/// part counts as zero balls (`"150/20"` is 120 balls).
pub fn overs_string_to_balls(value: &str) -> Result<u32, ScenarioError> {
    let (_, overs_part) = split_runs_overs(value)?;
    let overs_part = overs_part.trim();
    if overs_part.is_empty() {
        return Err(invalid_format(value, "missing overs section"));
    }

    let (whole_part, balls_part) = overs_part.split_once('.').unwrap_or((overs_part, "0"));

    let whole: u32 = whole_part
        .parse()
        .map_err(|_| invalid_format(value, "overs is not a number"))?;
    let balls: u32 = balls_part
        .parse()
        .map_err(|_| invalid_format(value, "balls is not a number"))?;

    if balls >= BALLS_PER_OVER {
        return Err(invalid_format(value, "balls within an over must be 0 to 5"));
    }

    whole
        .checked_mul(BALLS_PER_OVER)
        .and_then(|b| b.checked_add(balls))
        .ok_or_else(|| invalid_format(value, "overs value is out of range"))
}

/// Parse the runs half of `"runs/overs"`.
pub fn runs_string_to_number(value: &str) -> Result<u32, ScenarioError> {
    let runs_part = value.split('/').next().unwrap_or_default().trim();
    runs_part
        .parse()
        .map_err(|_| invalid_format(value, "runs is not a number"))
}

pub fn parse_runs_overs(value: &str) -> Result<RunsBalls, ScenarioError> {
    Ok(RunsBalls {
        runs: runs_string_to_number(value)?,
        balls: overs_string_to_balls(value)?,
    })
}

// ---------------------------------------------------------------------------
// Run rates
// ---------------------------------------------------------------------------

/// Runs per over. Zero balls yields a rate of exactly 0.
pub fn calculate_run_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    f64::from(runs) / (f64::from(balls) / f64::from(BALLS_PER_OVER))
}

/// Batting rate minus bowling rate, rounded to three decimals.
pub fn calculate_net_run_rate(
    for_runs: u32,
    for_balls: u32,
    against_runs: u32,
    against_balls: u32,
) -> f64 {
    let batting = calculate_run_rate(for_runs, for_balls);
    let bowling = calculate_run_rate(against_runs, against_balls);
    round_to_thousandths(batting - bowling)
}

/// Round to three decimals, halves away from zero, judged on the exact value
/// of the double. The result is the double nearest the rounded decimal.
pub fn round_to_thousandths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // A double sits exactly on a half-thousandth only when it is an odd
    // number of sixteenths; float formatting would send those to even.
    let sixteenths = value * 16.0;
    let rounded = if sixteenths.fract() == 0.0 && sixteenths % 2.0 != 0.0 {
        (value * 1000.0).round() / 1000.0
    } else {
        format!("{value:.3}").parse().unwrap_or(value)
    };

    // Collapse -0.0 so serialized output never shows a signed zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
