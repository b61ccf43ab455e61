//! Relative date expressions, resolved to absolute instants at use time.
//!
//! A [`DateMathExpression`] holds a symbolic offset from a reference "now"
//! (`NOW-1DAY/DAY`). Filters store the expression unresolved; a backend
//! translator resolves it with its own reference instant, so the same filter
//! yields different absolute bounds depending on when the query executes.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SedgeError};

lazy_static! {
    static ref STEP_PATTERN: Regex =
        Regex::new(r"^(?:([+-])(\d+)([A-Z]+)|/([A-Z]+))").unwrap();
}

/// Time units understood by date-math expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeUnit {
    fn from_token(token: &str) -> Option<TimeUnit> {
        match token {
            "YEAR" | "YEARS" => Some(TimeUnit::Year),
            "MONTH" | "MONTHS" => Some(TimeUnit::Month),
            "DAY" | "DAYS" => Some(TimeUnit::Day),
            "HOUR" | "HOURS" => Some(TimeUnit::Hour),
            "MINUTE" | "MINUTES" => Some(TimeUnit::Minute),
            "SECOND" | "SECONDS" => Some(TimeUnit::Second),
            "MILLI" | "MILLIS" | "MILLISECOND" | "MILLISECONDS" => Some(TimeUnit::Millisecond),
            _ => None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Year => "YEAR",
            TimeUnit::Month => "MONTH",
            TimeUnit::Day => "DAY",
            TimeUnit::Hour => "HOUR",
            TimeUnit::Minute => "MINUTE",
            TimeUnit::Second => "SECOND",
            TimeUnit::Millisecond => "MILLISECOND",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single step of a date-math expression, applied in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum DateMathStep {
    /// Shift forward by an amount of units.
    Plus(u32, TimeUnit),
    /// Shift backward by an amount of units.
    Minus(u32, TimeUnit),
    /// Round down to the start of the unit.
    Round(TimeUnit),
}

/// A relative time expression resolvable against a reference instant.
///
/// Expressions are built fluently or parsed from the `NOW(±<n><UNIT>|/UNIT)*`
/// grammar. Construction validates the whole expression; [`resolve`] is total.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sedge::filter::DateMathExpression;
///
/// let last_midnight = DateMathExpression::parse("NOW-1DAY/DAY").unwrap();
/// let reference = Utc.with_ymd_and_hms(2020, 6, 15, 10, 30, 0).unwrap();
/// assert_eq!(
///     last_midnight.resolve(reference),
///     Utc.with_ymd_and_hms(2020, 6, 14, 0, 0, 0).unwrap()
/// );
/// ```
///
/// [`resolve`]: DateMathExpression::resolve
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateMathExpression {
    steps: Vec<DateMathStep>,
}

impl DateMathExpression {
    /// Create an expression denoting the reference instant itself (`NOW`).
    pub fn now() -> Self {
        DateMathExpression { steps: Vec::new() }
    }

    /// Shift the expression forward by an amount of units.
    pub fn plus(mut self, amount: u32, unit: TimeUnit) -> Self {
        self.steps.push(DateMathStep::Plus(amount, unit));
        self
    }

    /// Shift the expression backward by an amount of units.
    pub fn minus(mut self, amount: u32, unit: TimeUnit) -> Self {
        self.steps.push(DateMathStep::Minus(amount, unit));
        self
    }

    /// Round down to the start of the given unit.
    pub fn rounded_to(mut self, unit: TimeUnit) -> Self {
        self.steps.push(DateMathStep::Round(unit));
        self
    }

    /// Parse an expression such as `NOW-1DAY/DAY` or `now+3months`.
    ///
    /// The grammar is case-insensitive and fails here, never at resolution
    /// time.
    pub fn parse(expression: &str) -> Result<Self> {
        let normalized = expression.trim().to_ascii_uppercase();
        let Some(mut rest) = normalized.strip_prefix("NOW") else {
            return Err(SedgeError::date_math(format!(
                "expression must start with NOW: '{expression}'"
            )));
        };

        let mut steps = Vec::new();
        while !rest.is_empty() {
            let caps = STEP_PATTERN.captures(rest).ok_or_else(|| {
                SedgeError::date_math(format!("unexpected token at '{rest}' in '{expression}'"))
            })?;
            let consumed = caps[0].len();

            if let (Some(sign), Some(amount), Some(unit)) = (caps.get(1), caps.get(2), caps.get(3))
            {
                let amount: u32 = amount.as_str().parse().map_err(|_| {
                    SedgeError::date_math(format!("offset out of range in '{expression}'"))
                })?;
                let unit = TimeUnit::from_token(unit.as_str()).ok_or_else(|| {
                    SedgeError::date_math(format!(
                        "unknown unit '{}' in '{expression}'",
                        unit.as_str()
                    ))
                })?;
                steps.push(match sign.as_str() {
                    "+" => DateMathStep::Plus(amount, unit),
                    _ => DateMathStep::Minus(amount, unit),
                });
            } else if let Some(unit) = caps.get(4) {
                let unit = TimeUnit::from_token(unit.as_str()).ok_or_else(|| {
                    SedgeError::date_math(format!(
                        "unknown unit '{}' in '{expression}'",
                        unit.as_str()
                    ))
                })?;
                steps.push(DateMathStep::Round(unit));
            }

            rest = &rest[consumed..];
        }

        Ok(DateMathExpression { steps })
    }

    /// Resolve the expression to an absolute instant.
    ///
    /// Pure and deterministic for a given reference. Offsets that would
    /// overflow the representable time range leave the instant unchanged.
    pub fn resolve(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        self.steps.iter().fold(reference, |instant, step| match step {
            DateMathStep::Plus(amount, unit) => shift(instant, i64::from(*amount), *unit),
            DateMathStep::Minus(amount, unit) => shift(instant, -i64::from(*amount), *unit),
            DateMathStep::Round(unit) => truncate(instant, *unit),
        })
    }
}

impl fmt::Display for DateMathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NOW")?;
        for step in &self.steps {
            match step {
                DateMathStep::Plus(amount, unit) => {
                    write!(f, "+{amount}{unit}{}", plural(*amount))?
                }
                DateMathStep::Minus(amount, unit) => {
                    write!(f, "-{amount}{unit}{}", plural(*amount))?
                }
                DateMathStep::Round(unit) => write!(f, "/{unit}")?,
            }
        }
        Ok(())
    }
}

fn plural(amount: u32) -> &'static str {
    if amount == 1 { "" } else { "S" }
}

fn shift(instant: DateTime<Utc>, amount: i64, unit: TimeUnit) -> DateTime<Utc> {
    let shifted = match unit {
        TimeUnit::Year => add_months(instant, amount.saturating_mul(12)),
        TimeUnit::Month => add_months(instant, amount),
        TimeUnit::Day => instant.checked_add_signed(Duration::days(amount)),
        TimeUnit::Hour => instant.checked_add_signed(Duration::hours(amount)),
        TimeUnit::Minute => instant.checked_add_signed(Duration::minutes(amount)),
        TimeUnit::Second => instant.checked_add_signed(Duration::seconds(amount)),
        TimeUnit::Millisecond => instant.checked_add_signed(Duration::milliseconds(amount)),
    };
    shifted.unwrap_or(instant)
}

fn add_months(instant: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    if months >= 0 {
        instant.checked_add_months(Months::new(u32::try_from(months).ok()?))
    } else {
        instant.checked_sub_months(Months::new(u32::try_from(-months).ok()?))
    }
}

fn truncate(instant: DateTime<Utc>, unit: TimeUnit) -> DateTime<Utc> {
    let truncated = match unit {
        TimeUnit::Millisecond => {
            instant.with_nanosecond(instant.nanosecond() / 1_000_000 * 1_000_000)
        }
        TimeUnit::Second => instant.with_nanosecond(0),
        TimeUnit::Minute => instant.with_nanosecond(0).and_then(|t| t.with_second(0)),
        TimeUnit::Hour => instant
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0)),
        TimeUnit::Day => instant
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_hour(0)),
        TimeUnit::Month => instant
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_hour(0))
            .and_then(|t| t.with_day(1)),
        TimeUnit::Year => instant
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_hour(0))
            .and_then(|t| t.with_day(1))
            .and_then(|t| t.with_month(1)),
    };
    truncated.unwrap_or(instant)
}

/// A temporal filter operand: either an absolute instant or an unresolved
/// relative expression.
///
/// All temporal inputs accepted by filter construction funnel through the
/// `From` conversions below, which is where legacy absolute instants and
/// zoned instants in other offsets are normalized to UTC. Relative
/// expressions stay symbolic until a translator resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DateOperand {
    /// An absolute UTC instant.
    Instant(DateTime<Utc>),
    /// A relative expression, resolved at translation time.
    Math(DateMathExpression),
}

impl DateOperand {
    /// Resolve to an absolute instant using the given reference "now".
    pub fn resolve(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            DateOperand::Instant(instant) => *instant,
            DateOperand::Math(expression) => expression.resolve(reference),
        }
    }
}

impl From<DateTime<Utc>> for DateOperand {
    fn from(instant: DateTime<Utc>) -> Self {
        DateOperand::Instant(instant)
    }
}

impl From<DateTime<FixedOffset>> for DateOperand {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        DateOperand::Instant(instant.with_timezone(&Utc))
    }
}

impl From<SystemTime> for DateOperand {
    fn from(instant: SystemTime) -> Self {
        DateOperand::Instant(DateTime::<Utc>::from(instant))
    }
}

impl From<DateMathExpression> for DateOperand {
    fn from(expression: DateMathExpression) -> Self {
        DateOperand::Math(expression)
    }
}
