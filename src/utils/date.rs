//! UTC dates for front-matter, without timezone dependencies.
//!
//! Accepted forms (RFC 3339 and the YAML timestamp type):
//!
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DDTHH:MM:SS` (or a space instead of `T`)
//! - an optional fraction after the seconds, `HH:MM:SS.sss`
//! - an optional zone: `Z`, `+HH:MM`, `-HHMM`, `+H`, separated by
//!   whitespace in the YAML form (`2024-06-15 14:30:00 +02:00`)
//!
//! Offsets are converted to UTC. Sub-second precision is dropped.
//!
//! # Examples
//!
//! ```ignore
//! let date = DateTimeUtc::parse("2024-06-15")?;
//! assert_eq!(date.to_string(), "2024-06-15");
//! ```

use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// UTC datetime without timezone complexity.
///
/// Field order gives chronological `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Whether the source carried a time part (affects formatting only).
    has_time: bool,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            has_time: true,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self {
            has_time: false,
            ..Self::new(year, month, day, 0, 0, 0)
        }
    }

    /// Parse one of the accepted forms and check calendar validity.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            bail!("expected YYYY-MM-DD, found '{s}'");
        }

        let (Some(year), Some(month), Some(day)) = (
            parse_u16(&bytes[0..4]),
            parse_u8(&bytes[5..7]),
            parse_u8(&bytes[8..10]),
        ) else {
            bail!("expected YYYY-MM-DD, found '{s}'");
        };

        let dt = match &bytes[10..] {
            [] => Self::from_ymd(year, month, day),
            [sep, ..] if matches!(*sep, b'T' | b't' | b' ') => {
                // Bytes 0..11 are ASCII, so this is a char boundary
                let Some((hour, minute, second, offset)) = parse_time(&s[11..]) else {
                    bail!(
                        "expected time as HH:MM:SS[.fff] with optional `Z` or ±HH:MM offset, \
                         found '{s}'"
                    );
                };
                let local = Self::new(year, month, day, hour, minute, second);
                local.validate()?;
                local.shift_minutes(-offset)?
            }
            _ => bail!("unexpected trailing characters in '{s}'"),
        };

        dt.validate()?;
        Ok(dt)
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            ..
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    /// Move the time by `minutes`, carrying across day, month, and year.
    fn shift_minutes(self, minutes: i32) -> Result<Self> {
        if minutes == 0 {
            return Ok(self);
        }
        let days = days_from_civil(i64::from(self.year), self.month, self.day);
        let total =
            days * 1440 + i64::from(self.hour) * 60 + i64::from(self.minute) + i64::from(minutes);
        let (year, month, day) = civil_from_days(total.div_euclid(1440));
        let Ok(year) = u16::try_from(year) else {
            bail!("year out of range after UTC conversion: {year}");
        };
        let mins = total.rem_euclid(1440);
        // mins < 1440, so both parts fit in u8
        Ok(Self::new(year, month, day, (mins / 60) as u8, (mins % 60) as u8, self.second))
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// `YYYY-MM-DD` for date-only values, RFC 3339 otherwise.
impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_time {
            f.write_str(&self.to_rfc3339())
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTimeUtc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateVisitor;

        impl de::Visitor<'_> for DateVisitor {
            type Value = DateTimeUtc;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a date like 2024-06-15 or 2024-06-15T14:30:00Z")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                DateTimeUtc::parse(v).map_err(|e| E::custom(format!("invalid date: {e}")))
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

/// Parse `HH:MM:SS[.fff][ ][zone]`, returning the zone as minutes east of UTC.
///
/// The hour may be a single digit, as the YAML timestamp grammar allows.
fn parse_time(s: &str) -> Option<(u8, u8, u8, i32)> {
    let (hour, rest) = s.split_once(':')?;
    let hour = parse_hour(hour)?;
    let minute = parse_u8(rest.get(0..2)?.as_bytes())?;
    let rest = rest.get(2..)?.strip_prefix(':')?;
    let second = parse_u8(rest.get(0..2)?.as_bytes())?;
    let mut rest = rest.get(2..)?;

    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        rest = &frac[digits..];
    }

    let offset = parse_offset(rest.trim_start())?;
    Some((hour, minute, second, offset))
}

/// `Z`, `±HH:MM`, `±HHMM`, `±H`, or nothing (UTC).
fn parse_offset(s: &str) -> Option<i32> {
    if matches!(s, "" | "Z" | "z") {
        return Some(0);
    }
    let (sign, tz) = if let Some(tz) = s.strip_prefix('+') {
        (1, tz)
    } else {
        (-1, s.strip_prefix('-')?)
    };
    let (h, m) = match tz.split_once(':') {
        Some(parts) => parts,
        None if tz.len() == 4 => tz.split_at(2),
        None => (tz, "00"),
    };
    let (h, m) = (parse_hour(h)?, parse_u8(m.as_bytes())?);
    if h > 23 || m > 59 {
        return None;
    }
    Some(sign * (i32::from(h) * 60 + i32::from(m)))
}

/// Parse a 1- or 2-digit hour
#[inline]
fn parse_hour(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [d] if d.is_ascii_digit() => Some(d - b'0'),
        two => parse_u8(two),
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let (m, d) = (i64::from(month), i64::from(day));
    let y = if m <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
