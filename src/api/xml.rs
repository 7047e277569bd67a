//! Number formatting and element helpers of the XML report
//!
//! Consumers of the report compare numbers textually, so the notation follows
//! the classic `printf` conventions: `%.Nf` for fixed values and `%.Ne` with a
//! signed two digit exponent for scientific values.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

/// Fixed notation with the given number of decimals
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub f64, pub usize);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write_non_finite(f, self.0);
        }
        write!(f, "{:.*}", self.1, self.0)
    }
}

/// Scientific notation with the given number of mantissa decimals
#[derive(Debug, Clone, Copy)]
pub struct Sci(pub f64, pub usize);

impl fmt::Display for Sci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write_non_finite(f, self.0);
        }
        let formatted = format!("{:.*e}", self.1, self.0);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
                let sign = if exponent < 0 { '-' } else { '+' };
                write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            None => f.write_str(&formatted),
        }
    }
}

fn write_non_finite(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("nan")
    } else if value.is_sign_negative() {
        f.write_str("-inf")
    } else {
        f.write_str("inf")
    }
}

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Indented element on its own line
pub fn tag_nl<W: Write + ?Sized>(out: &mut W, tag: &str, value: impl fmt::Display) -> io::Result<()> {
    writeln!(out, "   <{tag}>{value}</{tag}>")
}

/// Inline element followed by a space
pub fn tag_sp<W: Write + ?Sized>(out: &mut W, tag: &str, value: impl fmt::Display) -> io::Result<()> {
    write!(out, "<{tag}>{value}</{tag}> ")
}
