// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text rendering and parsing of primitive values.
//!
//! Every primitive renders in an invariant form through [`Display`](core::fmt::Display),
//! and [`parse_primitive`] reads that form back. Locale-aware rendering goes
//! through a [`FormatProvider`].
//!
//! | Kind | Invariant form |
//! |------|----------------|
//! | integers, `bool` | Rust `Display` |
//! | floats | shortest round-trip `Display` |
//! | decimal | digits with the value's own scale, e.g. `-12.50` |
//! | char | the character itself |
//! | GUID | hyphenated lowercase |
//! | date | `%Y-%m-%d` |
//! | time | `%H:%M:%S%.f` |
//! | date-time | `%Y-%m-%dT%H:%M:%S%.f` |
//! | date-time with offset | `%Y-%m-%dT%H:%M:%S%.f%:z`, or `%::z` when the offset has seconds |
//! | time span | `[-][d.]hh:mm:ss[.fffffffff]` |

use alloc::string::{String, ToString};
use core::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

use crate::error::ParseError;
use crate::kind::PrimitiveKind;
use crate::primitive::Primitive;

/// Invariant pattern for [`PrimitiveKind::Date`].
pub const DATE_PATTERN: &str = "%Y-%m-%d";
/// Invariant pattern for [`PrimitiveKind::Time`].
pub const TIME_PATTERN: &str = "%H:%M:%S%.f";
/// Invariant pattern for [`PrimitiveKind::DateTime`].
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Invariant pattern for [`PrimitiveKind::DateTimeOffset`].
pub const DATE_TIME_OFFSET_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
/// Invariant pattern for [`PrimitiveKind::DateTimeOffset`] values whose offset
/// is not a whole number of minutes.
pub const DATE_TIME_OFFSET_SECONDS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f%::z";

const SECONDS_PER_DAY: i64 = 86_400;

/// Culture-specific formatting rules.
///
/// Every method has an invariant default, so a provider only overrides what
/// differs. Date and time patterns use `chrono` strftime syntax; an invalid
/// pattern makes formatting fail.
///
/// GUIDs, characters, booleans and time spans always render invariantly.
///
/// # Example
///
/// ```rust
/// use understory_flex::{FormatProvider, Primitive};
///
/// struct German;
///
/// impl FormatProvider for German {
///     fn decimal_separator(&self) -> char {
///         ','
///     }
///     fn group_separator(&self) -> Option<char> {
///         Some('.')
///     }
///     fn date_pattern(&self) -> &str {
///         "%d.%m.%Y"
///     }
/// }
///
/// assert_eq!(Primitive::F64(1234.5).format_with(&German).unwrap(), "1.234,5");
/// assert_eq!(Primitive::F64(1234.5).to_string(), "1234.5");
/// ```
pub trait FormatProvider {
    /// Separator between integer and fractional digits.
    fn decimal_separator(&self) -> char {
        '.'
    }

    /// Separator inserted between groups of three integer digits, if any.
    fn group_separator(&self) -> Option<char> {
        None
    }

    /// Pattern for calendar dates.
    fn date_pattern(&self) -> &str {
        DATE_PATTERN
    }

    /// Pattern for times of day.
    fn time_pattern(&self) -> &str {
        TIME_PATTERN
    }

    /// Pattern for date-times without an offset.
    fn date_time_pattern(&self) -> &str {
        DATE_TIME_PATTERN
    }

    /// Pattern for date-times with an offset.
    fn date_time_offset_pattern(&self) -> &str {
        DATE_TIME_OFFSET_PATTERN
    }
}

/// The invariant culture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Invariant;

impl FormatProvider for Invariant {}

impl Primitive {
    /// Renders this value using `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if one of the provider's date or time patterns
    /// is invalid.
    pub fn format_with(&self, provider: &dyn FormatProvider) -> Result<String, fmt::Error> {
        let mut out = String::new();
        write_primitive(&mut out, self, provider)?;
        Ok(out)
    }

    /// Parses the invariant form of a value of the given kind.
    ///
    /// This is the same as [`parse_primitive`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if `text` is not a valid literal of `kind`.
    pub fn parse(kind: PrimitiveKind, text: &str) -> Result<Self, ParseError> {
        parse_primitive(kind, text)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_primitive(f, self, &Invariant)
    }
}

/// Writes `value` to `out` using `provider`.
pub(crate) fn write_primitive<W: fmt::Write + ?Sized>(
    out: &mut W,
    value: &Primitive,
    provider: &dyn FormatProvider,
) -> fmt::Result {
    match value {
        Primitive::I8(v) => write_number(out, v, provider),
        Primitive::I16(v) => write_number(out, v, provider),
        Primitive::I32(v) => write_number(out, v, provider),
        Primitive::I64(v) => write_number(out, v, provider),
        Primitive::U8(v) => write_number(out, v, provider),
        Primitive::U16(v) => write_number(out, v, provider),
        Primitive::U32(v) => write_number(out, v, provider),
        Primitive::U64(v) => write_number(out, v, provider),
        Primitive::F32(v) => write_number(out, v, provider),
        Primitive::F64(v) => write_number(out, v, provider),
        Primitive::Decimal(v) => write_number(out, v, provider),
        Primitive::Bool(v) => write!(out, "{v}"),
        Primitive::Char(v) => out.write_char(*v),
        Primitive::Guid(v) => write!(out, "{}", v.hyphenated()),
        Primitive::DateTimeOffset(v) => {
            let mut pattern = provider.date_time_offset_pattern();
            // `%:z` drops offset seconds.
            if pattern == DATE_TIME_OFFSET_PATTERN && v.offset().local_minus_utc() % 60 != 0 {
                pattern = DATE_TIME_OFFSET_SECONDS_PATTERN;
            }
            write!(out, "{}", v.format(pattern))
        }
        Primitive::DateTime(v) => write!(out, "{}", v.format(provider.date_time_pattern())),
        Primitive::Date(v) => write!(out, "{}", v.format(provider.date_pattern())),
        Primitive::Time(v) => write!(out, "{}", v.format(provider.time_pattern())),
        Primitive::TimeSpan(v) => write_time_span(out, *v),
    }
}

fn write_number<W: fmt::Write + ?Sized>(
    out: &mut W,
    value: &dyn fmt::Display,
    provider: &dyn FormatProvider,
) -> fmt::Result {
    let separator = provider.decimal_separator();
    let group = provider.group_separator();
    if separator == '.' && group.is_none() {
        return write!(out, "{value}");
    }

    let text = value.to_string();
    let (sign, body) = match text.strip_prefix('-') {
        Some(body) => ("-", body),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    out.write_str(sign)?;
    match group {
        // `inf` and `NaN` are not grouped.
        Some(group) if int_part.bytes().all(|b| b.is_ascii_digit()) => {
            for (i, digit) in int_part.chars().enumerate() {
                if i > 0 && (int_part.len() - i) % 3 == 0 {
                    out.write_char(group)?;
                }
                out.write_char(digit)?;
            }
        }
        _ => out.write_str(int_part)?,
    }
    if let Some(frac_part) = frac_part {
        out.write_char(separator)?;
        out.write_str(frac_part)?;
    }
    Ok(())
}

fn write_time_span<W: fmt::Write + ?Sized>(out: &mut W, value: TimeDelta) -> fmt::Result {
    if value < TimeDelta::zero() {
        out.write_char('-')?;
    }
    let magnitude = value.abs();
    let total = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();

    let days = total / SECONDS_PER_DAY;
    let rest = total % SECONDS_PER_DAY;
    if days > 0 {
        write!(out, "{days}.")?;
    }
    write!(
        out,
        "{:02}:{:02}:{:02}",
        rest / 3600,
        rest % 3600 / 60,
        rest % 60
    )?;
    if nanos > 0 {
        let fraction = alloc::format!("{nanos:09}");
        write!(out, ".{}", fraction.trim_end_matches('0'))?;
    }
    Ok(())
}

/// Parses the invariant form of a primitive of the given kind.
///
/// For every primitive `p`, `parse_primitive(p.kind(), &p.to_string())`
/// returns a value equal to `p`.
///
/// # Errors
///
/// Returns [`ParseError`] if `text` is not a valid literal of `kind`.
///
/// # Example
///
/// ```rust
/// use understory_flex::{Primitive, PrimitiveKind, parse_primitive};
///
/// assert_eq!(parse_primitive(PrimitiveKind::U16, "512"), Ok(Primitive::U16(512)));
/// assert!(parse_primitive(PrimitiveKind::U8, "512").is_err());
/// ```
pub fn parse_primitive(kind: PrimitiveKind, text: &str) -> Result<Primitive, ParseError> {
    let err = || ParseError::new(kind, text);
    let value = match kind {
        PrimitiveKind::I8 => Primitive::I8(parse_with(kind, text)?),
        PrimitiveKind::I16 => Primitive::I16(parse_with(kind, text)?),
        PrimitiveKind::I32 => Primitive::I32(parse_with(kind, text)?),
        PrimitiveKind::I64 => Primitive::I64(parse_with(kind, text)?),
        PrimitiveKind::U8 => Primitive::U8(parse_with(kind, text)?),
        PrimitiveKind::U16 => Primitive::U16(parse_with(kind, text)?),
        PrimitiveKind::U32 => Primitive::U32(parse_with(kind, text)?),
        PrimitiveKind::U64 => Primitive::U64(parse_with(kind, text)?),
        PrimitiveKind::F32 => Primitive::F32(parse_with(kind, text)?),
        PrimitiveKind::F64 => Primitive::F64(parse_with(kind, text)?),
        PrimitiveKind::Decimal => Primitive::Decimal(text.parse()?),
        PrimitiveKind::Bool => Primitive::Bool(parse_with(kind, text)?),
        PrimitiveKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Primitive::Char(c),
                _ => return Err(err()),
            }
        }
        PrimitiveKind::Guid => Primitive::Guid(Uuid::parse_str(text).map_err(|_| err())?),
        PrimitiveKind::DateTimeOffset => {
            Primitive::DateTimeOffset(parse_date_time_offset(text).ok_or_else(err)?)
        }
        PrimitiveKind::DateTime => Primitive::DateTime(
            NaiveDateTime::parse_from_str(text, DATE_TIME_PATTERN).map_err(|_| err())?,
        ),
        PrimitiveKind::Date => {
            Primitive::Date(NaiveDate::parse_from_str(text, DATE_PATTERN).map_err(|_| err())?)
        }
        PrimitiveKind::Time => {
            Primitive::Time(NaiveTime::parse_from_str(text, TIME_PATTERN).map_err(|_| err())?)
        }
        PrimitiveKind::TimeSpan => {
            Primitive::TimeSpan(parse_time_span(text).ok_or_else(err)?)
        }
    };
    Ok(value)
}

fn parse_with<T: core::str::FromStr>(kind: PrimitiveKind, text: &str) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::new(kind, text))
}

fn parse_date_time_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(value) = DateTime::parse_from_str(text, DATE_TIME_OFFSET_PATTERN) {
        return Some(value);
    }

    // chrono cannot parse `+hh:mm:ss` offsets.
    let split = text.rfind(['+', '-'])?;
    let (local, offset) = text.split_at(split);
    let (negative, offset) = (offset.starts_with('-'), &offset[1..]);
    let mut fields = offset.split(':');
    let (hours, minutes, seconds) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() || [hours, minutes, seconds].iter().any(|f| f.len() != 2) {
        return None;
    }
    let (hours, minutes, seconds) = (
        parse_digits(hours)?,
        parse_digits(minutes)?,
        parse_digits(seconds)?,
    );
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let total = i32::try_from(hours * 3600 + minutes * 60 + seconds).ok()?;
    let offset = FixedOffset::east_opt(if negative { -total } else { total })?;
    let local = NaiveDateTime::parse_from_str(local, DATE_TIME_PATTERN).ok()?;
    local.and_local_timezone(offset).single()
}

fn parse_time_span(text: &str) -> Option<TimeDelta> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, text),
    };

    let mut fields = body.split(':');
    let (head, minutes, seconds) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (parse_digits(days)?, parse_digits(hours)?),
        None => (0, parse_digits(head)?),
    };
    let (seconds, fraction) = match seconds.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (seconds, None),
    };
    let (minutes, seconds) = (parse_digits(minutes)?, parse_digits(seconds)?);
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let nanos = match fraction {
        Some(fraction) if (1..=9).contains(&fraction.len()) => {
            let value = parse_digits(fraction)?;
            let padding = 9 - u32::try_from(fraction.len()).ok()?;
            u32::try_from(value * 10_i64.pow(padding)).ok()?
        }
        Some(_) => return None,
        None => 0,
    };

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    let magnitude = TimeDelta::new(total, nanos)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
