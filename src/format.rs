//! Tick label formatting.
//!
//! Labels are plain strings. The [`LabelType::Exponent`] form produces LaTeX-like markup
//! (`2.5{\cdot}10^{-7}`) that a math-aware surface can render.
use std::fmt;
use std::str::FromStr;

use crate::time::DateTime;

/// Textual rendering policy of tick values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelType {
    /// Fixed-point decimal, trailing zeros removed
    Default,
    /// Decimal, switching to `a{\cdot}10^{b}` for very small or large values
    #[default]
    Exponent,
    /// Decimal with an SI suffix (`1.5k`, `20µ`)
    ExponentCharacter,
    /// Values are Unix-epoch milliseconds, formatted as dates
    Date,
    /// Values are Unix-epoch milliseconds, formatted as times of day
    Time,
    /// Values are Unix-epoch milliseconds, formatted as date and time
    DateTime,
}

impl LabelType {
    /// Whether values are calendar timestamps
    pub const fn is_calendar(&self) -> bool {
        matches!(self, LabelType::Date | LabelType::Time | LabelType::DateTime)
    }

    /// Name of the type in persisted settings
    pub const fn as_str(&self) -> &'static str {
        match self {
            LabelType::Default => "default",
            LabelType::Exponent => "exponent",
            LabelType::ExponentCharacter => "exponent_character",
            LabelType::Date => "date",
            LabelType::Time => "time",
            LabelType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(LabelType::Default),
            "exponent" => Ok(LabelType::Exponent),
            "exponent_character" => Ok(LabelType::ExponentCharacter),
            "date" => Ok(LabelType::Date),
            "time" => Ok(LabelType::Time),
            "datetime" => Ok(LabelType::DateTime),
            _ => Err(crate::Error::UnknownEnumValue {
                kind: "LabelType",
                value: s.to_string(),
            }),
        }
    }
}

/// Format `x` with `digits` decimals, then strip trailing zeros and a trailing decimal point
pub fn format_decimal(x: f64, digits: usize) -> String {
    let mut s = format!("{x:.digits$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Format `x` as a decimal when `min_no_exp <= |x| <= max_no_exp`,
/// and as `a{\cdot}10^{b}` (or `10^{b}` when `a` is 1) otherwise.
///
/// Values with `|x| < below_is_zero` are written `0`.
pub fn format_latex_exponent(
    x: f64,
    digits: usize,
    below_is_zero: f64,
    min_no_exp: f64,
    max_no_exp: f64,
) -> String {
    let ax = x.abs();
    if (below_is_zero > 0.0 && ax < below_is_zero) || ax < 5.0 * f64::MIN_POSITIVE {
        return "0".to_string();
    }
    if !x.is_finite() || (min_no_exp <= ax && ax <= max_no_exp) {
        return format_decimal(x, digits);
    }

    let mut exp = ax.log10().floor() as i32;
    let mantissa = format_decimal(x / 10f64.powi(exp), digits);
    match mantissa.as_str() {
        "1" => format!("10^{{{exp}}}"),
        "10" => {
            exp += 1;
            format!("10^{{{exp}}}")
        }
        _ => format!("{mantissa}{{\\cdot}}10^{{{exp}}}"),
    }
}

const SI_SUFFIXES: &[(f64, &str)] = &[
    (1e15, "P"),
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
    (1e-12, "p"),
    (1e-15, "f"),
];

/// Format `x` as a decimal scaled by an SI prefix, which is appended (`1.5k`, `-20µ`)
pub fn format_unit_suffix(x: f64, digits: usize) -> String {
    if x == 0.0 || !x.is_finite() {
        return format_decimal(x, digits);
    }
    let ax = x.abs();
    let (factor, suffix) = SI_SUFFIXES
        .iter()
        .find(|(factor, _)| ax >= *factor)
        .copied()
        .unwrap_or((1e-15, "f"));
    let mut s = format_decimal(x / factor, digits);
    s.push_str(suffix);
    s
}

/// Everything needed to turn a tick value into its label
#[derive(Debug, Clone, Copy)]
pub struct LabelFormat<'a> {
    /// The rendering policy
    pub label_type: LabelType,
    /// Number of decimals
    pub digits: usize,
    /// Magnitude under which values are written `0` in exponent form
    pub below_is_zero: f64,
    /// Format of [`LabelType::Date`] labels
    pub date_format: &'a str,
    /// Format of [`LabelType::Time`] labels
    pub time_format: &'a str,
    /// Format of [`LabelType::DateTime`] labels
    pub datetime_format: &'a str,
}

impl LabelFormat<'_> {
    /// Format a tick value
    pub fn format(&self, x: f64) -> String {
        self.format_with(x, self.digits, self.below_is_zero)
    }

    /// Format a tick value with explicit precision and zero threshold
    pub fn format_with(&self, x: f64, digits: usize, below_is_zero: f64) -> String {
        match self.label_type {
            LabelType::Default => format_decimal(x, digits),
            LabelType::Exponent => {
                let min_no_exp = 10f64.powi(-(digits as i32));
                let max_no_exp = 10f64.powi(digits as i32 + 1);
                format_latex_exponent(x, digits, below_is_zero, min_no_exp, max_no_exp)
            }
            LabelType::ExponentCharacter => format_unit_suffix(x, digits),
            LabelType::Date => format_calendar(x, self.date_format),
            LabelType::Time => format_calendar(x, self.time_format),
            LabelType::DateTime => format_calendar(x, self.datetime_format),
        }
    }
}

fn format_calendar(x: f64, fmt: &str) -> String {
    DateTime::from_axis_value(x)
        .map(|dt| dt.fmt_to_string(fmt))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(20.0, 3), "20");
        assert_eq!(format_decimal(2.5, 3), "2.5");
        assert_eq!(format_decimal(100.0, 0), "100");
        assert_eq!(format_decimal(-0.0001, 2), "0");
        assert_eq!(format_decimal(-1.25, 1), "-1.2");
        assert_eq!(format_decimal(0.1 + 0.2, 4), "0.3");
    }

    #[test]
    fn test_format_latex_exponent() {
        let fmt = |x| format_latex_exponent(x, 3, 1e-300, 1e-3, 1e4);
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(20.0), "20");
        assert_eq!(fmt(1234.5), "1234.5");
        assert_eq!(fmt(25000.0), "2.5{\\cdot}10^{4}");
        assert_eq!(fmt(1e6), "10^{6}");
        assert_eq!(fmt(9.9999e6), "10^{7}");
        assert_eq!(fmt(-3e-5), "-3{\\cdot}10^{-5}");
        assert_eq!(fmt(1e-7), "10^{-7}");
    }

    #[test]
    fn test_format_latex_exponent_below_zero() {
        assert_eq!(format_latex_exponent(1e-9, 3, 1e-6, 1e-3, 1e4), "0");
        assert_eq!(format_latex_exponent(1e-5, 3, 1e-6, 1e-3, 1e4), "10^{-5}");
    }

    #[test]
    fn test_format_unit_suffix() {
        assert_eq!(format_unit_suffix(0.0, 1), "0");
        assert_eq!(format_unit_suffix(1.0, 1), "1");
        assert_eq!(format_unit_suffix(1.2e3, 1), "1.2k");
        assert_eq!(format_unit_suffix(-1.2e6, 1), "-1.2M");
        assert_eq!(format_unit_suffix(1.2e-3, 1), "1.2m");
        assert_eq!(format_unit_suffix(-1.2e-6, 1), "-1.2µ");
        assert_eq!(format_unit_suffix(0.5, 1), "500m");
        assert_eq!(format_unit_suffix(3e-13, 1), "300f");
        assert_eq!(format_unit_suffix(2e18, 0), "2000P");
    }

    #[test]
    fn test_label_format() {
        let mut fmt = LabelFormat {
            label_type: LabelType::Default,
            digits: 2,
            below_is_zero: 1e-6,
            date_format: "%Y-%m-%d",
            time_format: "%H:%M",
            datetime_format: "%Y-%m-%d %H:%M",
        };
        assert_eq!(fmt.format(12.5), "12.5");

        fmt.label_type = LabelType::Exponent;
        assert_eq!(fmt.format(12.5), "12.5");
        assert_eq!(fmt.format(12500.0), "1.25{\\cdot}10^{4}");
        assert_eq!(fmt.format(1e-7), "0");

        fmt.label_type = LabelType::ExponentCharacter;
        assert_eq!(fmt.format(12500.0), "12.5k");

        // 2025-01-13 15:46:32.250 UTC
        let ms = 1_736_783_192_250.0;
        fmt.label_type = LabelType::Date;
        assert_eq!(fmt.format(ms), "2025-01-13");
        fmt.label_type = LabelType::Time;
        assert_eq!(fmt.format(ms), "15:46");
        fmt.label_type = LabelType::DateTime;
        assert_eq!(fmt.format(ms), "2025-01-13 15:46");
        assert_eq!(fmt.format(f64::NAN), "");
    }

    #[test]
    fn test_label_type_codec() {
        for lt in [
            LabelType::Default,
            LabelType::Exponent,
            LabelType::ExponentCharacter,
            LabelType::Date,
            LabelType::Time,
            LabelType::DateTime,
        ] {
            assert_eq!(lt.as_str().parse::<LabelType>().unwrap(), lt);
        }
        assert!("scientific".parse::<LabelType>().is_err());
    }
}
