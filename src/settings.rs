//! Diff-based persistence of axis and style properties.
//!
//! Properties are stored as strings in a [`Settings`] key/value store,
//! under keys made of a caller supplied group and a fixed field key (e.g. `x_axis/ticks/width`).
//! Only the values differing from a reference are written.
use std::collections::BTreeMap;
use std::fmt;

use crate::format::LabelType;
use crate::style::{AxisStyle, DrawMode, LabelPosition, LinePattern, TickMode};
use crate::{ColorU8, Error};

/// A string key/value store
pub trait Settings {
    /// The value stored under `key`
    fn value(&self, key: &str) -> Option<&str>;

    /// Store `value` under `key`
    fn set_value(&mut self, key: &str, value: String);

    /// Remove the value stored under `key`
    fn remove(&mut self, key: &str);
}

/// Join a group and a field key
pub fn full_key(group: &str, key: &str) -> String {
    let group = group.trim_end_matches('/');
    if group.is_empty() {
        key.to_string()
    } else {
        format!("{group}/{key}")
    }
}

/// Error raised when parsing INI text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniParseError {
    /// A section header is not closed
    UnclosedSection {
        /// Line number (1-based)
        line: usize,
    },
    /// A line is neither a section, a comment nor a `key=value` pair
    MissingSeparator {
        /// Line number (1-based)
        line: usize,
    },
    /// A key is empty
    EmptyKey {
        /// Line number (1-based)
        line: usize,
    },
}

impl fmt::Display for IniParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniParseError::UnclosedSection { line } => {
                write!(f, "Unclosed section header at line {line}")
            }
            IniParseError::MissingSeparator { line } => {
                write!(f, "Missing '=' at line {line}")
            }
            IniParseError::EmptyKey { line } => write!(f, "Empty key at line {line}"),
        }
    }
}

impl std::error::Error for IniParseError {}

/// In-memory [`Settings`], convertible to and from INI text.
///
/// In INI text, the first segment of a key is its section:
/// `x_axis/ticks/width` is written as `ticks/width` in section `[x_axis]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemSettings {
    values: BTreeMap<String, String>,
}

impl MemSettings {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the stored key/value pairs, ordered by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse INI text.
    ///
    /// Lines starting with `;` or `#` are comments.
    /// Keys and values are trimmed.
    pub fn parse_ini(text: &str) -> Result<Self, IniParseError> {
        let mut values = BTreeMap::new();
        let mut section = String::new();

        for (idx, line) in text.lines().enumerate() {
            let line_num = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']') else {
                    return Err(IniParseError::UnclosedSection { line: line_num });
                };
                section = name.trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(IniParseError::MissingSeparator { line: line_num });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(IniParseError::EmptyKey { line: line_num });
            }
            values.insert(full_key(&section, key), value.trim().to_string());
        }

        Ok(MemSettings { values })
    }

    /// Write the values as INI text
    pub fn to_ini(&self) -> String {
        let mut out = String::new();
        let mut section: Option<&str> = None;
        for (key, value) in self.values.iter() {
            let (sect, key) = match key.split_once('/') {
                Some((sect, rest)) => (sect, rest),
                None => ("", key.as_str()),
            };
            if section != Some(sect) {
                if section.is_some() {
                    out.push('\n');
                }
                if !sect.is_empty() {
                    out.push_str(&format!("[{sect}]\n"));
                }
                section = Some(sect);
            }
            out.push_str(&format!("{key}={value}\n"));
        }
        out
    }
}

impl Settings for MemSettings {
    fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// String encoding of a persisted value
pub(crate) trait Value: Sized {
    fn encode(&self) -> String;
    fn decode(s: &str) -> Result<Self, String>;
}

macro_rules! impl_value_parse {
    ($($ty:ty),*) => {
        $(
            impl Value for $ty {
                fn encode(&self) -> String {
                    self.to_string()
                }

                fn decode(s: &str) -> Result<Self, String> {
                    s.trim().parse().map_err(|err| format!("{err}"))
                }
            }
        )*
    };
}

impl_value_parse!(
    bool,
    f32,
    f64,
    u32,
    usize,
    ColorU8,
    DrawMode,
    TickMode,
    LabelType,
    LabelPosition,
    LinePattern
);

impl Value for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(s: &str) -> Result<Self, String> {
        Ok(s.to_string())
    }
}

/// A persisted property of `T`
pub(crate) struct Field<T> {
    pub key: &'static str,
    pub encode: fn(&T) -> String,
    pub decode: fn(&mut T, &str) -> Result<(), String>,
}

macro_rules! field {
    ($ty:ty, $key:literal, $($path:ident).+) => {
        $crate::settings::Field::<$ty> {
            key: $key,
            encode: |s: &$ty| $crate::settings::Value::encode(&s.$($path).+),
            decode: |s: &mut $ty, v: &str| {
                s.$($path).+ = $crate::settings::Value::decode(v)?;
                Ok(())
            },
        }
    };
}

pub(crate) use field;

/// Keys accepted on load in place of the canonical key
const ALIASES: &[(&str, &str)] = &[
    ("zero_line/enabled", "show_zero_line"),
    ("grid/color", "grid_color"),
    ("ticks/mode", "tick_mode"),
];

/// Write the fields of `current` that differ from `reference`, and remove the others
pub(crate) fn save_fields<T, S>(
    fields: &[Field<T>],
    current: &T,
    reference: &T,
    settings: &mut S,
    group: &str,
) where
    S: Settings + ?Sized,
{
    for f in fields {
        let key = full_key(group, f.key);
        let value = (f.encode)(current);
        if value != (f.encode)(reference) {
            settings.set_value(&key, value);
        } else {
            settings.remove(&key);
        }
    }
}

/// Read the fields present in `settings` into `target`.
///
/// Undecodable values are skipped with a warning, the first one is returned as error
/// after all the other fields are loaded.
pub(crate) fn load_fields<T, S>(
    fields: &[Field<T>],
    target: &mut T,
    settings: &S,
    group: &str,
) -> Result<(), Error>
where
    S: Settings + ?Sized,
{
    let mut first_err = None;
    for f in fields {
        let mut key = full_key(group, f.key);
        let mut value = settings.value(&key);
        if value.is_none() {
            if let Some((_, alias)) = ALIASES.iter().find(|(k, _)| *k == f.key) {
                key = full_key(group, alias);
                value = settings.value(&key);
            }
        }
        let Some(value) = value else {
            continue;
        };
        if let Err(reason) = (f.decode)(target, value) {
            log::warn!("Skipping setting {key}={value:?}: {reason}");
            first_err.get_or_insert(Error::Settings {
                key,
                value: value.to_string(),
                reason,
            });
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

static STYLE_FIELDS: &[Field<AxisStyle>] = &[
    field!(AxisStyle, "zero_line/enabled", show_zero_axis),
    field!(AxisStyle, "zero_line/line_width", line_width_zero_axis),
    field!(AxisStyle, "zero_line/color", zero_axis_color),
    field!(AxisStyle, "zero_line/style", zero_axis_pattern),
    field!(AxisStyle, "minor_tick/labels_enabled", minor_tick_labels_enabled),
    field!(AxisStyle, "minor_tick/width", minor_tick_width),
    field!(AxisStyle, "minor_tick/label_font_size", minor_tick_label_font_size),
    field!(AxisStyle, "minor_tick/label_full_number", minor_tick_label_full_number),
    field!(AxisStyle, "minor_tick/count", minor_ticks),
    field!(AxisStyle, "minor_tick/outside_length", minor_tick_outside_length),
    field!(AxisStyle, "minor_tick/inside_length", minor_tick_inside_length),
    field!(AxisStyle, "minor_tick/color", minor_tick_color),
    field!(AxisStyle, "minor_tick/label_color", minor_tick_label_color),
    field!(AxisStyle, "ticks/width", tick_width),
    field!(AxisStyle, "ticks/label_font_size", tick_label_font_size),
    field!(AxisStyle, "ticks/time_format", tick_time_format),
    field!(AxisStyle, "ticks/date_format", tick_date_format),
    field!(AxisStyle, "ticks/datetime_format", tick_datetime_format),
    field!(AxisStyle, "ticks/printf_format", tick_printf_format),
    field!(AxisStyle, "ticks/outside_length", tick_outside_length),
    field!(AxisStyle, "ticks/inside_length", tick_inside_length),
    field!(AxisStyle, "ticks/label_distance", tick_label_distance),
    field!(AxisStyle, "ticks/type", tick_label_type),
    field!(AxisStyle, "ticks/color", tick_color),
    field!(AxisStyle, "ticks/label_color", tick_label_color),
    field!(AxisStyle, "ticks/mode", tick_mode),
    field!(AxisStyle, "ticks/label_angle", tick_label_angle),
    field!(AxisStyle, "ticks/label_digits", label_digits),
    field!(AxisStyle, "ticks/auto_label_digits", auto_label_digits),
    field!(AxisStyle, "axis_label/font_size", label_font_size),
    field!(AxisStyle, "axis_label/distance", label_distance),
    field!(AxisStyle, "axis_label/position", label_position),
    field!(AxisStyle, "axis_label/color", label_color),
    field!(AxisStyle, "grid/enabled", major_grid.enabled),
    field!(AxisStyle, "grid/color", major_grid.line.color),
    field!(AxisStyle, "grid/width", major_grid.line.width),
    field!(AxisStyle, "grid/style", major_grid.line.pattern),
    field!(AxisStyle, "minor_grid/enabled", minor_grid.enabled),
    field!(AxisStyle, "minor_grid/color", minor_grid.line.color),
    field!(AxisStyle, "minor_grid/width", minor_grid.line.width),
    field!(AxisStyle, "minor_grid/style", minor_grid.line.pattern),
    field!(AxisStyle, "line_width", line_width),
    field!(AxisStyle, "arrow_size_factor", arrow_size_factor),
    field!(AxisStyle, "min_ticks", min_ticks),
    field!(AxisStyle, "color", axis_color),
    field!(AxisStyle, "draw_mode0", draw_mode0),
    field!(AxisStyle, "draw_mode1", draw_mode1),
    field!(AxisStyle, "draw_mode2", draw_mode2),
    field!(AxisStyle, "axis_lines_offset", axis_line_offset),
];

/// Write the style properties differing from `reference` under `group`.
/// Stale keys of properties equal to the reference are removed.
pub fn save_style<S>(style: &AxisStyle, reference: &AxisStyle, settings: &mut S, group: &str)
where
    S: Settings + ?Sized,
{
    save_fields(STYLE_FIELDS, style, reference, settings, group);
}

/// Read the style properties present under `group`.
///
/// Absent keys keep their current value.
/// Undecodable values are skipped, and the first of them is reported.
pub fn load_style<S>(style: &mut AxisStyle, settings: &S, group: &str) -> Result<(), Error>
where
    S: Settings + ?Sized,
{
    load_fields(STYLE_FIELDS, style, settings, group)
}
