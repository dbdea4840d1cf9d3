//! XMP Date/Time utilities
//!
//! XMP dates are an ISO 8601 subset that allows partial dates
//! (`YYYY`, `YYYY-MM`), time-only values and an optional zone. Real-world
//! writers also emit `Z` followed by a numeric offset (`...56Z-05:00`); the
//! numeric offset wins in that case.

use crate::core::error::{XmpError, XmpResult};
use std::fmt;
use std::str::FromStr;

const KIND: &str = "Date";

/// XMP Date/Time structure
///
/// Represents a date/time value with optional components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpDateTime {
    /// Year (can be negative for BCE dates)
    pub year: i32,
    /// Month (1-12, 0 means not set)
    pub month: u8,
    /// Day (1-31, 0 means not set)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Nanoseconds (0-999999999)
    pub nanosecond: u32,
    /// Whether date components are present
    pub has_date: bool,
    /// Whether time components are present
    pub has_time: bool,
    /// Whether timezone is present
    pub has_timezone: bool,
    /// Timezone sign: -1 (west), 0 (UTC), +1 (east)
    pub tz_sign: i8,
    /// Timezone hour offset (0-23)
    pub tz_hour: u8,
    /// Timezone minute offset (0-59)
    pub tz_minute: u8,
}

/// Byte cursor over the raw date string
struct Cursor<'a> {
    raw: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            bytes: raw.as_bytes(),
            pos: 0,
        }
    }

    fn invalid(&self) -> XmpError {
        XmpError::value_not_valid(KIND, self.raw)
    }

    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> XmpResult<()> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    /// Exactly `width` ASCII digits
    fn fixed(&mut self, width: usize) -> XmpResult<u32> {
        let end = self.pos + width;
        if end > self.bytes.len() || !self.bytes[self.pos..end].iter().all(u8::is_ascii_digit) {
            return Err(self.invalid());
        }
        let value = self.bytes[self.pos..end]
            .iter()
            .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
        self.pos = end;
        Ok(value)
    }

    /// Fractional seconds as nanoseconds; digits past the ninth are truncated
    fn fraction(&mut self) -> XmpResult<u32> {
        let start = self.pos;
        let mut nanos = 0u32;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            if self.pos - start < 9 {
                nanos = nanos * 10 + u32::from(d - b'0');
            }
            self.pos += 1;
        }
        let digits = self.pos - start;
        if digits == 0 {
            return Err(self.invalid());
        }
        for _ in digits..9 {
            nanos *= 10;
        }
        Ok(nanos)
    }
}

impl XmpDateTime {
    /// Create a new empty XMP date/time
    pub fn new() -> Self {
        Self {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            has_date: false,
            has_time: false,
            has_timezone: false,
            tz_sign: 0,
            tz_hour: 0,
            tz_minute: 0,
        }
    }

    /// Parse an XMP date/time string
    ///
    /// Accepted layouts, most specific first:
    /// - `YYYY-MM-DDThh:mm:ss.fffffffff` plus zone
    /// - `YYYY-MM-DDThh:mm:ss` plus zone
    /// - `YYYY-MM-DDThh:mm` plus zone
    /// - `YYYY-MM-DD`, `YYYY-MM`, `YYYY`
    ///
    /// The zone is optional and may be `Z`, `+hh:mm`, `-hh:mm` or `Z` directly
    /// followed by a signed offset. A time without a date starts with `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xmpindex::utils::datetime::XmpDateTime;
    ///
    /// let dt = XmpDateTime::parse("2023-12-25T10:30:00Z").unwrap();
    /// assert_eq!(dt.year, 2023);
    /// assert_eq!(dt.month, 12);
    /// assert_eq!(dt.day, 25);
    /// ```
    pub fn parse(s: &str) -> XmpResult<Self> {
        let mut cur = Cursor::new(s.trim());
        if cur.done() {
            return Err(cur.invalid());
        }

        let mut dt = Self::new();

        if cur.peek() != Some(b'T') {
            dt.has_date = true;
            let negative = cur.eat(b'-');
            let year = cur.fixed(4)? as i32;
            dt.year = if negative { -year } else { year };

            if cur.eat(b'-') {
                dt.month = cur.fixed(2)? as u8;
                if !(1..=12).contains(&dt.month) {
                    return Err(cur.invalid());
                }
                if cur.eat(b'-') {
                    dt.day = cur.fixed(2)? as u8;
                    if dt.day == 0 || dt.day > days_in_month(dt.year, dt.month) {
                        return Err(cur.invalid());
                    }
                }
            }

            if cur.done() {
                return Ok(dt);
            }
            // a time needs a complete date in front of it
            if dt.day == 0 {
                return Err(cur.invalid());
            }
        }

        cur.expect(b'T')?;
        dt.has_time = true;
        dt.hour = cur.fixed(2)? as u8;
        cur.expect(b':')?;
        dt.minute = cur.fixed(2)? as u8;
        if cur.eat(b':') {
            dt.second = cur.fixed(2)? as u8;
            if cur.eat(b'.') {
                dt.nanosecond = cur.fraction()?;
            }
        }
        if dt.hour > 23 || dt.minute > 59 || dt.second > 59 {
            return Err(cur.invalid());
        }

        if cur.eat(b'Z') {
            dt.has_timezone = true;
        }
        if let Some(sign) = cur.peek().filter(|b| *b == b'+' || *b == b'-') {
            cur.pos += 1;
            dt.has_timezone = true;
            dt.tz_sign = if sign == b'+' { 1 } else { -1 };
            dt.tz_hour = cur.fixed(2)? as u8;
            cur.expect(b':')?;
            dt.tz_minute = cur.fixed(2)? as u8;
            if dt.tz_hour > 23 || dt.tz_minute > 59 {
                return Err(cur.invalid());
            }
            if dt.tz_hour == 0 && dt.tz_minute == 0 {
                dt.tz_sign = 0;
            }
        }

        if !cur.done() {
            return Err(cur.invalid());
        }
        Ok(dt)
    }

    /// Format an XMP date/time to string
    ///
    /// Partial dates keep their precision; zero offsets are written as `Z`.
    pub fn format(&self) -> String {
        let mut result = String::new();

        if self.has_date {
            if self.year < 0 {
                result.push('-');
            }
            result.push_str(&format!("{:04}", self.year.unsigned_abs()));
            if self.month != 0 {
                result.push_str(&format!("-{:02}", self.month));
                if self.day != 0 {
                    result.push_str(&format!("-{:02}", self.day));
                }
            }
        }

        if self.has_time {
            result.push_str(&format!(
                "T{:02}:{:02}:{:02}",
                self.hour, self.minute, self.second
            ));
            if self.nanosecond != 0 {
                let frac = format!("{:09}", self.nanosecond);
                result.push('.');
                result.push_str(frac.trim_end_matches('0'));
            }
            if self.has_timezone {
                if self.tz_sign == 0 {
                    result.push('Z');
                } else {
                    let sign = if self.tz_sign < 0 { '-' } else { '+' };
                    result.push_str(&format!(
                        "{}{:02}:{:02}",
                        sign, self.tz_hour, self.tz_minute
                    ));
                }
            }
        }

        result
    }

    /// Seconds since the Unix epoch, with the fractional part truncated
    ///
    /// Missing month/day count as the first, missing time as midnight and a
    /// missing zone as UTC. Time-only values have no instant and yield `None`.
    pub fn unix_timestamp(&self) -> Option<i64> {
        if !self.has_date {
            return None;
        }
        let month = self.month.max(1);
        let day = self.day.max(1);
        let days = days_from_civil(i64::from(self.year), month, day);
        let mut secs = days * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        let offset = i64::from(self.tz_hour) * 3_600 + i64::from(self.tz_minute) * 60;
        secs -= i64::from(self.tz_sign) * offset;
        Some(secs)
    }
}

impl Default for XmpDateTime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for XmpDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for XmpDateTime {
    type Err = XmpError;

    fn from_str(s: &str) -> XmpResult<Self> {
        Self::parse(s)
    }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days between 1970-01-01 and the given proleptic Gregorian date
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
