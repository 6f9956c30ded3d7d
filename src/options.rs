//! Configuration for text serialization.
//!
//! - [`SerializerOptions`]: immutable knob groups, one per value kind
//! - [`SerializerContext`]: the options plus the current indentation depth,
//!   copied (never mutated) when descending into a container
//!
//! Options derive `serde` traits with field defaults, so a partial JSON (or
//! any serde format) document is enough to configure a serializer.
//!
//! ## Examples
//!
//! ```rust
//! use axion::{to_string_with_options, NumberFormat, SerializerOptions, Value};
//!
//! let options = SerializerOptions::new()
//!     .with_number_format(NumberFormat::BigHex)
//!     .with_digit_separator(true);
//! assert_eq!(to_string_with_options(&Value::from(1234567890), &options), "0X4996_02D2");
//! ```

use crate::timestamp::TimestampPrecision;
use serde::{Deserialize, Serialize};

/// Letter case used for `true`/`false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueCase {
    Upper,
    #[default]
    Lower,
    Title,
}

impl ValueCase {
    #[must_use]
    pub fn apply(self, word: &str) -> String {
        match self {
            ValueCase::Upper => word.to_uppercase(),
            ValueCase::Lower => word.to_lowercase(),
            ValueCase::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        }
    }
}

/// Radix and prefix style for integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberFormat {
    #[default]
    Decimal,
    /// `0X` prefix, upper-case digits
    BigHex,
    /// `0x` prefix, lower-case digits
    SmallHex,
    /// `0B` prefix
    BigBinary,
    /// `0b` prefix
    SmallBinary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Singleline,
    /// Text is cut into `'''` segments of `line_break_point` characters.
    Multiline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndentationStyle {
    Tabs,
    #[default]
    Spaces,
    None,
}

impl IndentationStyle {
    /// One level of indentation.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            IndentationStyle::Tabs => "\t",
            IndentationStyle::Spaces => "    ",
            IndentationStyle::None => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoolOptions {
    pub value_case: ValueCase,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    pub number_format: NumberFormat,
    pub use_digit_separator: bool,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalOptions {
    pub use_exponent_notation: bool,
}

/// Shared by strings and clobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub line_style: LineStyle,
    pub line_break_point: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            line_style: LineStyle::default(),
            line_break_point: 80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    pub use_multiple_lines: bool,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructOptions {
    pub use_multiple_lines: bool,
    pub use_quoted_identifier_property_names: bool,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NullOptions {
    pub use_long_form_nulls: bool,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampOptions {
    pub timestamp_precision: TimestampPrecision,
}

/// Configuration options for text serialization.
///
/// # Examples
///
/// ```rust
/// use axion::{IndentationStyle, LineStyle, SerializerOptions, TimestampPrecision};
///
/// let options = SerializerOptions::pretty()
///     .with_indentation_style(IndentationStyle::Tabs)
///     .with_string_line_style(LineStyle::Multiline, 40)
///     .with_timestamp_precision(TimestampPrecision::Second);
/// assert!(options.lists.use_multiple_lines);
/// assert_eq!(options.strings.line_break_point, 40);
/// ```
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
    pub bools: BoolOptions,
    pub ints: IntOptions,
    pub decimals: DecimalOptions,
    pub strings: TextOptions,
    pub clobs: TextOptions,
    pub lists: ContainerOptions,
    pub sexps: ContainerOptions,
    pub structs: StructOptions,
    pub nulls: NullOptions,
    pub timestamps: TimestampOptions,
    pub indentation_style: IndentationStyle,
}

impl SerializerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that put every container child on its own indented line.
    #[must_use]
    pub fn pretty() -> Self {
        SerializerOptions {
            lists: ContainerOptions {
                use_multiple_lines: true,
            },
            sexps: ContainerOptions {
                use_multiple_lines: true,
            },
            structs: StructOptions {
                use_multiple_lines: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_bool_case(mut self, value_case: ValueCase) -> Self {
        self.bools.value_case = value_case;
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.ints.number_format = number_format;
        self
    }

    #[must_use]
    pub fn with_digit_separator(mut self, enabled: bool) -> Self {
        self.ints.use_digit_separator = enabled;
        self
    }

    #[must_use]
    pub fn with_exponent_decimals(mut self, enabled: bool) -> Self {
        self.decimals.use_exponent_notation = enabled;
        self
    }

    #[must_use]
    pub fn with_string_line_style(mut self, line_style: LineStyle, line_break_point: usize) -> Self {
        self.strings = TextOptions {
            line_style,
            line_break_point,
        };
        self
    }

    #[must_use]
    pub fn with_clob_line_style(mut self, line_style: LineStyle, line_break_point: usize) -> Self {
        self.clobs = TextOptions {
            line_style,
            line_break_point,
        };
        self
    }

    /// Sets multi-line layout for lists, sexps and structs at once.
    #[must_use]
    pub fn with_multiple_lines(mut self, enabled: bool) -> Self {
        self.lists.use_multiple_lines = enabled;
        self.sexps.use_multiple_lines = enabled;
        self.structs.use_multiple_lines = enabled;
        self
    }

    #[must_use]
    pub fn with_quoted_property_names(mut self, enabled: bool) -> Self {
        self.structs.use_quoted_identifier_property_names = enabled;
        self
    }

    #[must_use]
    pub fn with_long_form_nulls(mut self, enabled: bool) -> Self {
        self.nulls.use_long_form_nulls = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp_precision(mut self, precision: TimestampPrecision) -> Self {
        self.timestamps.timestamp_precision = precision;
        self
    }

    #[must_use]
    pub fn with_indentation_style(mut self, style: IndentationStyle) -> Self {
        self.indentation_style = style;
        self
    }
}

/// Options plus the current nesting depth.
///
/// Containers call [`SerializerContext::indent`] once per nesting level and
/// pass the new context to their children; the original is never changed.
#[derive(Clone, Copy, Debug)]
pub struct SerializerContext<'a> {
    options: &'a SerializerOptions,
    depth: usize,
}

impl<'a> SerializerContext<'a> {
    #[must_use]
    pub fn new(options: &'a SerializerOptions) -> Self {
        SerializerContext { options, depth: 0 }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &'a SerializerOptions {
        self.options
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// A context one level deeper.
    #[must_use]
    pub fn indent(&self) -> Self {
        SerializerContext {
            options: self.options,
            depth: self.depth + 1,
        }
    }

    /// `depth + extra` repetitions of the indentation unit.
    #[must_use]
    pub fn indentation(&self, extra: usize) -> String {
        self.options
            .indentation_style
            .unit()
            .repeat(self.depth + extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_copies_context() {
        let options = SerializerOptions::new();
        let root = SerializerContext::new(&options);
        let child = root.indent();
        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.indent().indentation(0), "        ");
        assert_eq!(root.indentation(1), "    ");
    }

    #[test]
    fn test_indentation_styles() {
        let tabs = SerializerOptions::new().with_indentation_style(IndentationStyle::Tabs);
        assert_eq!(SerializerContext::new(&tabs).indent().indentation(1), "\t\t");
        let none = SerializerOptions::new().with_indentation_style(IndentationStyle::None);
        assert_eq!(SerializerContext::new(&none).indent().indentation(3), "");
    }

    #[test]
    fn test_value_case() {
        assert_eq!(ValueCase::Upper.apply("true"), "TRUE");
        assert_eq!(ValueCase::Title.apply("false"), "False");
        assert_eq!(ValueCase::Lower.apply("TRUE"), "true");
    }

    #[test]
    fn test_defaults() {
        let options = SerializerOptions::default();
        assert_eq!(options.strings.line_break_point, 80);
        assert_eq!(
            options.timestamps.timestamp_precision,
            TimestampPrecision::Millisecond
        );
        assert!(!options.lists.use_multiple_lines);
        assert!(SerializerOptions::pretty().structs.use_multiple_lines);
    }
}
