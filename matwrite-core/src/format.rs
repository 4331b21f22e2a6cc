// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! printf-style row templates.
//!
//! A template such as `" %10.4f %10.4f"` is parsed once into literal and
//! field segments, then rendered against a slice of values. Rendering follows
//! C `printf` semantics for the supported conversions so that every strategy
//! produces byte-identical text.
//!
//! Supported syntax: `%[flags][width][.precision][length]conv` where flags are
//! any of `-+ 0#`, `length` is an ignored `h`, `l` or `L`, and `conv` is one of
//! `f F e E`. `%%` is a literal percent sign.

use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{FormatSpecError, MatwriteError, MatwriteResult};

/// Precision used when a specifier omits one.
pub const DEFAULT_PRECISION: usize = 6;

const SPACES: &str = "                                                                ";
const ZEROS: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Conversion character of a field specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%f`
    Fixed,
    /// `%F`
    FixedUpper,
    /// `%e`
    Exponent,
    /// `%E`
    ExponentUpper,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(Self::Fixed),
            'F' => Some(Self::FixedUpper),
            'e' => Some(Self::Exponent),
            'E' => Some(Self::ExponentUpper),
            _ => None,
        }
    }

    fn is_upper(self) -> bool {
        matches!(self, Self::FixedUpper | Self::ExponentUpper)
    }
}

/// A single parsed conversion specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub left_align: bool,
    pub zero_pad: bool,
    pub plus_sign: bool,
    pub space_sign: bool,
    pub alternate: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub conversion: Conversion,
}

impl FieldSpec {
    /// Append `value` rendered under this specifier to `out`.
    pub fn write(&self, out: &mut String, value: f64) {
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let upper = self.conversion.is_upper();
        let start = out.len();

        // NaN keeps its sign bit, as glibc prints `-nan`.
        let sign = if value.is_sign_negative() {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };
        out.push_str(sign);

        let finite = value.is_finite();
        if value.is_nan() {
            out.push_str(if upper { "NAN" } else { "nan" });
        } else if value.is_infinite() {
            out.push_str(if upper { "INF" } else { "inf" });
        } else {
            match self.conversion {
                Conversion::Fixed | Conversion::FixedUpper => {
                    let _ = write!(out, "{:.*}", precision, value.abs());
                    if self.alternate && precision == 0 {
                        out.push('.');
                    }
                }
                Conversion::Exponent | Conversion::ExponentUpper => {
                    write_exponent(out, value.abs(), precision, upper, self.alternate);
                }
            }
        }

        let written = out.len() - start;
        if written >= self.width {
            return;
        }
        let pad = self.width - written;

        if self.left_align {
            push_fill(out, SPACES, pad);
        } else if self.zero_pad && finite {
            insert_fill(out, start + sign.len(), ZEROS, pad);
        } else {
            insert_fill(out, start, SPACES, pad);
        }
    }
}

/// `d.ddde±XX`: Rust prints `1.5e0`, C prints `1.5e+00`.
fn write_exponent(out: &mut String, value: f64, precision: usize, upper: bool, alternate: bool) {
    let raw = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    out.push_str(mantissa);
    if alternate && precision == 0 {
        out.push('.');
    }
    out.push(if upper { 'E' } else { 'e' });
    out.push(if exponent < 0 { '-' } else { '+' });
    let _ = write!(out, "{:02}", exponent.unsigned_abs());
}

fn push_fill(out: &mut String, fill: &'static str, mut count: usize) {
    while count > 0 {
        let chunk = count.min(fill.len());
        out.push_str(&fill[..chunk]);
        count -= chunk;
    }
}

fn insert_fill(out: &mut String, at: usize, fill: &'static str, mut count: usize) {
    while count > 0 {
        let chunk = count.min(fill.len());
        out.insert_str(at, &fill[..chunk]);
        count -= chunk;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(FieldSpec),
}

/// A parsed row template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFormat {
    template: String,
    segments: Vec<Segment>,
    placeholders: usize,
}

impl RowFormat {
    /// Parse a template. At least one conversion specifier is required.
    pub fn parse(template: &str) -> Result<Self, FormatSpecError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut placeholders = 0;
        let mut chars = template.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.peek() {
                None => return Err(FormatSpecError::DanglingPercent { offset }),
                Some((_, '%')) => {
                    chars.next();
                    literal.push('%');
                }
                Some(_) => {
                    let field = parse_field(&mut chars, offset)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                    placeholders += 1;
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if placeholders == 0 {
            return Err(FormatSpecError::NoPlaceholders {
                template: template.to_string(),
            });
        }

        Ok(Self {
            template: template.to_string(),
            segments,
            placeholders,
        })
    }

    /// A single specifier repeated `cols` times, joined by `delimiter`.
    pub fn uniform(spec: &str, cols: usize, delimiter: &str) -> Result<Self, FormatSpecError> {
        let template = vec![spec; cols].join(delimiter);
        Self::parse(&template)
    }

    /// Resolve a template for a matrix with `cols` columns.
    ///
    /// A template with exactly one specifier is repeated across the columns;
    /// otherwise its specifier count must equal `cols`.
    pub fn for_columns(template: &str, cols: usize, delimiter: &str) -> MatwriteResult<Self> {
        let format = Self::parse(template)?;
        if format.placeholders == cols {
            return Ok(format);
        }
        if format.placeholders == 1 {
            return Ok(Self::uniform(template, cols, delimiter)?);
        }
        Err(MatwriteError::ShapeMismatch {
            expected: format.placeholders,
            actual: cols,
        })
    }

    /// Number of conversion specifiers.
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// The template this format was parsed from.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Render `values` positionally and append the text to `out`.
    ///
    /// Fails without writing anything if the value count differs from the
    /// number of placeholders.
    pub fn render_into(&self, out: &mut String, values: &[f64]) -> MatwriteResult<()> {
        if values.len() != self.placeholders {
            return Err(MatwriteError::ShapeMismatch {
                expected: self.placeholders,
                actual: values.len(),
            });
        }

        let mut values = values.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(spec) => {
                    if let Some(&value) = values.next() {
                        spec.write(out, value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Render `values` into a new string.
    pub fn render(&self, values: &[f64]) -> MatwriteResult<String> {
        let mut out = String::new();
        self.render_into(&mut out, values)?;
        Ok(out)
    }
}

impl fmt::Display for RowFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl std::str::FromStr for RowFormat {
    type Err = FormatSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_field(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<FieldSpec, FormatSpecError> {
    let mut spec = FieldSpec {
        left_align: false,
        zero_pad: false,
        plus_sign: false,
        space_sign: false,
        alternate: false,
        width: 0,
        precision: None,
        conversion: Conversion::Fixed,
    };

    while let Some(&(_, c)) = chars.peek() {
        match c {
            '-' => spec.left_align = true,
            '+' => spec.plus_sign = true,
            ' ' => spec.space_sign = true,
            '0' => spec.zero_pad = true,
            '#' => spec.alternate = true,
            _ => break,
        }
        chars.next();
    }

    spec.width = parse_number(chars, "width")?.unwrap_or(0);

    if let Some(&(_, '.')) = chars.peek() {
        chars.next();
        // "%.f" means precision 0, as in C
        spec.precision = Some(parse_number(chars, "precision")?.unwrap_or(0));
    }

    while let Some(&(_, 'h' | 'l' | 'L')) = chars.peek() {
        chars.next();
    }

    let (offset, c) = chars
        .next()
        .ok_or(FormatSpecError::MissingConversion { offset: start })?;
    spec.conversion = Conversion::from_char(c).ok_or(FormatSpecError::UnsupportedConversion {
        conversion: c,
        offset,
    })?;

    Ok(spec)
}

fn parse_number(
    chars: &mut Peekable<CharIndices<'_>>,
    field: &'static str,
) -> Result<Option<usize>, FormatSpecError> {
    let mut value: Option<usize> = None;

    while let Some(&(offset, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        let next = value
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or(FormatSpecError::NumberOverflow { field, offset })?;
        value = Some(next);
        chars.next();
    }

    Ok(value)
}
