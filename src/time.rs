//! A small date/time type and its `strftime`-like formatting.
//!
//! Date and time axes carry their values as milliseconds since the Unix epoch (UTC).
//! This module converts such values to calendar components and formats them.
//! Time zones are not supported.
use core::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

const MS_PER_DAY: i64 = 86_400_000;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar field that is out of its valid range
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InvalidFieldError {
    /// Name of the field
    pub field: &'static str,
    /// The invalid value
    pub value: i64,
}

impl From<(&'static str, i64)> for InvalidFieldError {
    fn from((field, value): (&'static str, i64)) -> Self {
        InvalidFieldError { field, value }
    }
}

impl fmt::Display for InvalidFieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.value)
    }
}

impl std::error::Error for InvalidFieldError {}

/// Error returned when a string doesn't match a date/time format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A number or name could not be read
    Parse(String),
    /// A field was read but is out of range
    InvalidField(&'static str, i64),
    /// The input or the format string itself is malformed
    FormatMismatch,
}

impl From<InvalidFieldError> for ParseError {
    fn from(e: InvalidFieldError) -> Self {
        ParseError::InvalidField(e.field, e.value)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Parse(s) => write!(f, "parse error: {s}"),
            ParseError::InvalidField(field, value) => write!(f, "invalid {}: {}", field, value),
            ParseError::FormatMismatch => write!(f, "format mismatch"),
        }
    }
}

impl std::error::Error for ParseError {}

const fn month_days(year: i32) -> &'static [u32; 12] {
    if is_leap_year(year) {
        &[31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        &[31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    }
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days since 1970-01-01 of a proleptic Gregorian date
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian date of a count of days since 1970-01-01
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as i32, month, day)
}

/// A point in time, as milliseconds elapsed since the Unix epoch (1970-01-01 00:00:00 UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(i64);

impl DateTime {
    /// The Unix epoch, 1970-01-01 00:00:00
    pub const fn unix_epoch() -> Self {
        DateTime(0)
    }

    /// Build a datetime from milliseconds since the Unix epoch
    pub const fn from_millis(ms: i64) -> Self {
        DateTime(ms)
    }

    /// Build a datetime from an axis value in milliseconds since the Unix epoch.
    /// The value is truncated to the millisecond.
    /// Returns None for values that are not finite or don't fit the representation.
    pub fn from_axis_value(ms: f64) -> Option<Self> {
        const LIMIT: f64 = i64::MAX as f64;
        if ms.is_finite() && ms.abs() < LIMIT {
            Some(DateTime(ms.trunc() as i64))
        } else {
            None
        }
    }

    /// Build a DateTime from year, month and day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidFieldError> {
        DateTimeComps {
            year,
            month,
            day,
            ..DateTimeComps::unix_epoch()
        }
        .try_into()
    }

    /// Milliseconds elapsed since the Unix epoch (negative before it)
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Parse a string with the given format string.
    /// The format string supports the following specifiers:
    /// - `%Y` for year  (YYYY)
    /// - `%m` for month (MM)
    /// - `%b` for the abbreviated English month name (Jan to Dec)
    /// - `%d` for day   (DD)
    /// - `%j` for the day of the year (001 to 366)
    /// - `%H` for hour  (HH)
    /// - `%M` for minute (MM)
    /// - `%S` for second (SS)
    /// - `%.f` for second fraction (e.g. 340 milliseconds will format to ".34")
    /// - `%.3f` for milliseconds (e.g. 340 milliseconds will format to ".340")
    /// - `%.6f` for microseconds (e.g. 340 milliseconds will format to ".340000")
    /// - `%%` for a literal `%`
    ///
    /// Any other text is copied through.
    pub fn fmt_parse(input: &str, fmt: &str) -> Result<DateTime, ParseError> {
        let comps = DateTimeComps::fmt_parse(input, fmt)?;
        Ok(comps.try_into()?)
    }

    /// Format this DateTime according to the given format string.
    /// See [DateTime::fmt_parse] for supported formats.
    pub fn fmt_write<W>(&self, fmt: &str, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        self.to_comps().fmt_write(fmt, out)
    }

    /// Format this DateTime according to the given format string.
    /// Malformed specifiers are skipped.
    /// See [DateTime::fmt_parse] for supported formats.
    pub fn fmt_to_string(&self, fmt: &str) -> String {
        self.to_comps().fmt_to_string(fmt)
    }

    /// Compute the components of this DateTime
    pub fn to_comps(&self) -> DateTimeComps {
        let days = self.0.div_euclid(MS_PER_DAY);
        let ms_in_day = self.0.rem_euclid(MS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        DateTimeComps {
            year,
            month,
            day,
            hour: (ms_in_day / 3_600_000) as u32,
            minute: (ms_in_day / 60_000 % 60) as u32,
            second: (ms_in_day / 1000 % 60) as u32,
            milli: (ms_in_day % 1000) as u32,
        }
    }
}

/// Write the date time as a string with the format `%Y-%m-%d %H:%M:%S%.f`
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_comps().fmt(f)
    }
}

/// The components of a date time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeComps {
    /// The year (e.g. 2025)
    pub year: i32,
    /// The month (1 to 12)
    pub month: u32,
    /// The day in the month (1 to 31)
    pub day: u32,
    /// The hour in the day (0 to 23)
    pub hour: u32,
    /// The minute in the hour (0 to 59)
    pub minute: u32,
    /// The second in the minute (0 to 59)
    pub second: u32,
    /// The milliseconds in the second (0 to 999)
    pub milli: u32,
}

impl DateTimeComps {
    /// The Unix epoch, 1970-01-01 00:00:00
    pub const fn unix_epoch() -> Self {
        DateTimeComps {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            milli: 0,
        }
    }

    /// The day of the year, starting at 1 for January 1st
    pub fn day_of_year(&self) -> u32 {
        let md = month_days(self.year);
        let before = (self.month as usize).clamp(1, 12) - 1;
        md[..before].iter().sum::<u32>() + self.day
    }

    /// Parse a string with the given format string.
    /// Fields absent from the format default to the Unix epoch.
    /// See [DateTime::fmt_parse] for supported formats.
    pub fn fmt_parse(input: &str, fmt: &str) -> Result<Self, ParseError> {
        let mut res = DateTimeComps {
            month: 0,
            day: 0,
            ..DateTimeComps::unix_epoch()
        };
        let mut day_of_year = None;

        let mut input_chars = input.chars().peekable();

        for tok in FmtStr(fmt).tokens() {
            match tok? {
                FmtToken::Year => res.year = parse_number(&mut input_chars, 4)?,
                FmtToken::Month => res.month = parse_number(&mut input_chars, 2)?,
                FmtToken::MonthName => res.month = parse_month_name(&mut input_chars)?,
                FmtToken::Day => res.day = parse_number(&mut input_chars, 2)?,
                FmtToken::DayOfYear => day_of_year = Some(parse_number(&mut input_chars, 3)?),
                FmtToken::Hour => res.hour = parse_number(&mut input_chars, 2)?,
                FmtToken::Minute => res.minute = parse_number(&mut input_chars, 2)?,
                FmtToken::Second => res.second = parse_number(&mut input_chars, 2)?,
                FmtToken::Milli => res.milli = parse_fraction(&mut input_chars, Some(3))?,
                FmtToken::Micro => res.milli = parse_fraction(&mut input_chars, Some(6))?,
                FmtToken::Frac => res.milli = parse_fraction(&mut input_chars, None)?,
                FmtToken::Lit(s) => {
                    for c in s.chars() {
                        if c != input_chars.next().ok_or(ParseError::FormatMismatch)? {
                            return Err(ParseError::FormatMismatch);
                        }
                    }
                }
            }
        }
        if input_chars.next().is_some() {
            return Err(ParseError::FormatMismatch);
        }

        if let Some(doy) = day_of_year {
            res.set_day_of_year(doy)?;
        }
        if res.month == 0 {
            res.month = 1;
        }
        if res.day == 0 {
            res.day = 1;
        }

        res.check_fields()?;

        Ok(res)
    }

    fn set_day_of_year(&mut self, doy: u32) -> Result<(), InvalidFieldError> {
        let mut rem = doy;
        for (m, days) in month_days(self.year).iter().enumerate() {
            if rem >= 1 && rem <= *days {
                self.month = m as u32 + 1;
                self.day = rem;
                return Ok(());
            }
            rem = rem.saturating_sub(*days);
        }
        Err(("day of year", doy as _).into())
    }

    /// Format this DateTimeComps according to the given format string.
    /// See [DateTime::fmt_parse] for supported formats.
    pub fn fmt_write<W>(&self, fmt: &str, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        for tok in FmtStr(fmt).tokens() {
            let Ok(tok) = tok else { return Err(fmt::Error) };
            self.write_token(tok, out)?;
        }
        Ok(())
    }

    fn write_token<W: fmt::Write>(&self, tok: FmtToken, out: &mut W) -> fmt::Result {
        match tok {
            FmtToken::Year => write!(out, "{:04}", self.year),
            FmtToken::Month => write!(out, "{:02}", self.month),
            FmtToken::MonthName => {
                let idx = (self.month as usize).clamp(1, 12) - 1;
                out.write_str(MONTH_NAMES[idx])
            }
            FmtToken::Day => write!(out, "{:02}", self.day),
            FmtToken::DayOfYear => write!(out, "{:03}", self.day_of_year()),
            FmtToken::Hour => write!(out, "{:02}", self.hour),
            FmtToken::Minute => write!(out, "{:02}", self.minute),
            FmtToken::Second => write!(out, "{:02}", self.second),
            FmtToken::Milli => write!(out, ".{:03}", self.milli),
            FmtToken::Micro => write!(out, ".{:06}", self.milli * 1000),
            FmtToken::Frac => format_milli_opt(out, self.milli),
            FmtToken::Lit(s) => out.write_str(s),
        }
    }

    /// Format this DateTimeComps according to the given format string.
    /// Malformed specifiers are skipped.
    /// See [DateTime::fmt_parse] for supported formats.
    pub fn fmt_to_string(&self, fmt: &str) -> String {
        let mut res = String::new();
        for tok in FmtStr(fmt).tokens().flatten() {
            // writing to a String doesn't fail
            let _ = self.write_token(tok, &mut res);
        }
        res
    }

    fn check_fields(&self) -> Result<(), InvalidFieldError> {
        if self.month < 1 || self.month > 12 {
            Err(("month", self.month as _).into())
        } else if self.day < 1 || self.day > month_days(self.year)[self.month as usize - 1] {
            Err(("day", self.day as _).into())
        } else if self.hour > 23 {
            Err(("hour", self.hour as _).into())
        } else if self.minute > 59 {
            Err(("minute", self.minute as _).into())
        } else if self.second > 59 {
            Err(("second", self.second as _).into())
        } else if self.milli > 999 {
            Err(("millisecond", self.milli as _).into())
        } else {
            Ok(())
        }
    }
}

impl TryFrom<DateTimeComps> for DateTime {
    type Error = InvalidFieldError;

    fn try_from(value: DateTimeComps) -> Result<Self, Self::Error> {
        value.check_fields()?;

        let days = days_from_civil(value.year, value.month, value.day);
        let ms = days * MS_PER_DAY
            + value.hour as i64 * 3_600_000
            + value.minute as i64 * 60_000
            + value.second as i64 * 1000
            + value.milli as i64;
        Ok(DateTime(ms))
    }
}

impl From<DateTime> for DateTimeComps {
    fn from(value: DateTime) -> Self {
        value.to_comps()
    }
}

/// Write the date time as a string with the format `%Y-%m-%d %H:%M:%S%.f`
impl fmt::Display for DateTimeComps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_write("%Y-%m-%d %H:%M:%S%.f", f)
    }
}

#[derive(Debug, Clone, Copy)]
struct FmtStr<'a>(&'a str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FmtToken<'a> {
    Year,
    Month,
    MonthName,
    Day,
    DayOfYear,
    Hour,
    Minute,
    Second,
    Milli,
    Micro,
    Frac,
    Lit(&'a str),
}

impl FmtStr<'_> {
    fn tokens(&self) -> FmtTokens<'_> {
        FmtTokens { remaining: self.0 }
    }
}

#[derive(Debug, Clone)]
struct FmtTokens<'a> {
    remaining: &'a str,
}

const SPECIFIERS: &[(&str, FmtToken<'static>)] = &[
    ("%.3f", FmtToken::Milli),
    ("%.6f", FmtToken::Micro),
    ("%.f", FmtToken::Frac),
    ("%Y", FmtToken::Year),
    ("%m", FmtToken::Month),
    ("%b", FmtToken::MonthName),
    ("%d", FmtToken::Day),
    ("%j", FmtToken::DayOfYear),
    ("%H", FmtToken::Hour),
    ("%M", FmtToken::Minute),
    ("%S", FmtToken::Second),
    ("%%", FmtToken::Lit("%")),
];

impl<'a> Iterator for FmtTokens<'a> {
    type Item = Result<FmtToken<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        for (spec, tok) in SPECIFIERS {
            if let Some(rest) = self.remaining.strip_prefix(spec) {
                self.remaining = rest;
                return Some(Ok(*tok));
            }
        }

        if let Some(rest) = self.remaining.strip_prefix('%') {
            self.remaining = rest;
            return Some(Err(ParseError::FormatMismatch));
        }

        let end = self.remaining.find('%').unwrap_or(self.remaining.len());
        let lit = &self.remaining[..end];
        self.remaining = &self.remaining[end..];
        Some(Ok(FmtToken::Lit(lit)))
    }
}

/// Parse a fixed-width number from the input
fn parse_number<T: FromStr>(chars: &mut Peekable<Chars>, width: usize) -> Result<T, ParseError> {
    let mut s = String::with_capacity(width);
    for _ in 0..width {
        match chars.next() {
            Some(c) => s.push(c),
            None => return Err(ParseError::Parse("Unexpected end of input".to_string())),
        }
    }
    s.parse()
        .map_err(|_| ParseError::Parse(format!("Failed to parse number {s:?}")))
}

fn parse_month_name(chars: &mut Peekable<Chars>) -> Result<u32, ParseError> {
    let name: String = chars.take(3).collect();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(&name))
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| ParseError::Parse(format!("Unknown month name {name:?}")))
}

/// Parse the fractional seconds (milliseconds)
fn parse_fraction(chars: &mut Peekable<Chars>, len: Option<usize>) -> Result<u32, ParseError> {
    if chars.next() != Some('.') {
        return Err(ParseError::FormatMismatch);
    }
    let mut s = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        s.push(c);
    }

    if let Some(len) = len {
        if s.len() != len {
            return Err(ParseError::FormatMismatch);
        }
    }

    while s.len() < 3 {
        s.push('0');
    }
    Ok(s[..3].parse().unwrap_or(0))
}

fn format_milli_opt<W: fmt::Write>(out: &mut W, milli: u32) -> fmt::Result {
    if milli != 0 {
        let digits = format!("{:03}", milli);
        write!(out, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}
