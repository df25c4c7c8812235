//! SQL values and literal encoding.
//!
//! [`SqlValue`] is the closed set of value kinds a mapped column can carry.
//! Every statement generator in this crate goes through
//! [`SqlValue::to_sql_literal`] so that literal formatting is decided in
//! exactly one place.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Wire format for temporal literals: second precision, no timezone.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A SQL value of one of the recognized semantic kinds.
///
/// The set of kinds is fixed; statement generators match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value, rendered as `1` / `0`.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Fixed-decimal value.
    Decimal(Decimal),
    /// Date/time value, rendered as `'YYYY-MM-DD HH:MM:SS'`.
    DateTime(NaiveDateTime),
    /// Text value.
    Text(String),
}

impl SqlValue {
    /// Returns the SQL literal for inline use in a statement.
    ///
    /// **Warning**: text is single-quoted with no escaping of embedded
    /// quote characters. This reproduces the behavior of the system this
    /// crate replaces and is a known injection hazard for untrusted input.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Decimal(d) => format!("{d}"),
            Self::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
            Self::Text(s) => format!("'{s}'"),
        }
    }

    /// Returns true for the numeric kinds (rendered unquoted).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Decimal(_))
    }

    /// Returns true for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Errors raised while converting between Rust values and [`SqlValue`]s.
#[derive(Debug, Error)]
pub enum ValueError {
    /// A mapped column was not present in the result row.
    #[error("column `{0}` missing from result row")]
    MissingColumn(&'static str),

    /// A value could not be coerced to the requested Rust type.
    #[error("cannot convert {value} to {target}")]
    Conversion {
        /// Debug rendering of the offending value.
        value: String,
        /// Name of the requested target type.
        target: &'static str,
    },
}

impl ValueError {
    fn conversion(value: &SqlValue, target: &'static str) -> Self {
        Self::Conversion {
            value: format!("{value:?}"),
            target,
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u8 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for Decimal {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Decimal(self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

/// Trait for types that can be read back out of a [`SqlValue`].
///
/// Coercions are deliberately lenient across the numeric kinds: identity
/// values come back from the backend as wide decimals and have to land in
/// whatever integer width the key field uses.
pub trait FromSqlValue: Sized {
    /// Converts a `SqlValue` into the target type.
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError>;
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Int(n) => Ok(*n),
            SqlValue::Float(f) => Ok(*f as Self),
            SqlValue::Decimal(d) => d
                .trunc()
                .to_i64()
                .ok_or_else(|| ValueError::conversion(value, "i64")),
            SqlValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ValueError::conversion(value, "i64")),
            _ => Err(ValueError::conversion(value, "i64")),
        }
    }
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "i32"))
    }
}

impl FromSqlValue for i16 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "i16"))
    }
}

impl FromSqlValue for i8 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "i8"))
    }
}

impl FromSqlValue for u32 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "u32"))
    }
}

impl FromSqlValue for u16 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "u16"))
    }
}

impl FromSqlValue for u8 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| ValueError::conversion(value, "u8"))
    }
}

impl FromSqlValue for f64 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Float(f) => Ok(*f),
            SqlValue::Int(n) => Ok(*n as Self),
            SqlValue::Decimal(d) => d
                .to_f64()
                .ok_or_else(|| ValueError::conversion(value, "f64")),
            SqlValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ValueError::conversion(value, "f64")),
            _ => Err(ValueError::conversion(value, "f64")),
        }
    }
}

impl FromSqlValue for f32 {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        Ok(f64::from_sql_value(value)? as Self)
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Bool(b) => Ok(*b),
            SqlValue::Int(0) => Ok(false),
            SqlValue::Int(1) => Ok(true),
            _ => Err(ValueError::conversion(value, "bool")),
        }
    }
}

impl FromSqlValue for Decimal {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Decimal(d) => Ok(*d),
            SqlValue::Int(n) => Ok(Self::from(*n)),
            SqlValue::Float(f) => {
                Self::try_from(*f).map_err(|_| ValueError::conversion(value, "Decimal"))
            }
            SqlValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ValueError::conversion(value, "Decimal")),
            _ => Err(ValueError::conversion(value, "Decimal")),
        }
    }
}

impl FromSqlValue for NaiveDateTime {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::DateTime(dt) => Ok(*dt),
            SqlValue::Text(s) => Self::parse_from_str(s.trim(), DATETIME_FORMAT)
                .map_err(|_| ValueError::conversion(value, "NaiveDateTime")),
            _ => Err(ValueError::conversion(value, "NaiveDateTime")),
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Text(s) => Ok(s.clone()),
            SqlValue::Int(n) => Ok(n.to_string()),
            SqlValue::Float(f) => Ok(f.to_string()),
            SqlValue::Decimal(d) => Ok(d.to_string()),
            _ => Err(ValueError::conversion(value, "String")),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> Result<Self, ValueError> {
        match value {
            SqlValue::Null => Ok(None),
            other => Ok(Some(T::from_sql_value(other)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_literal_null() {
        assert_eq!(SqlValue::Null.to_sql_literal(), "NULL");
    }

    #[test]
    fn test_literal_bool() {
        assert_eq!(SqlValue::Bool(true).to_sql_literal(), "1");
        assert_eq!(SqlValue::Bool(false).to_sql_literal(), "0");
    }

    #[test]
    fn test_literal_numeric_unquoted() {
        assert_eq!(SqlValue::Int(42).to_sql_literal(), "42");
        assert_eq!(SqlValue::Int(-100).to_sql_literal(), "-100");
        assert_eq!(SqlValue::Float(2.5).to_sql_literal(), "2.5");
        assert_eq!(
            SqlValue::Decimal("19.99".parse().unwrap()).to_sql_literal(),
            "19.99"
        );
    }

    #[test]
    fn test_literal_datetime() {
        assert_eq!(
            SqlValue::DateTime(sample_datetime()).to_sql_literal(),
            "'2024-03-05 13:00:00'"
        );
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(
            SqlValue::Text(String::from("hello")).to_sql_literal(),
            "'hello'"
        );
    }

    #[test]
    fn test_literal_text_quotes_not_escaped() {
        // Embedded quotes pass through untouched. Compatibility behavior,
        // see the module docs.
        assert_eq!(
            SqlValue::Text(String::from("O'Brien")).to_sql_literal(),
            "'O'Brien'"
        );
    }

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!("hi".to_sql_value(), SqlValue::Text(String::from("hi")));
        assert_eq!(None::<i64>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(7_i64).to_sql_value(), SqlValue::Int(7));
        assert_eq!(
            sample_datetime().to_sql_value(),
            SqlValue::DateTime(sample_datetime())
        );
    }

    #[test]
    fn test_from_sql_value_int_widening() {
        assert_eq!(i64::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert_eq!(i32::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert!(i32::from_sql_value(&SqlValue::Int(i64::MAX)).is_err());
    }

    #[test]
    fn test_from_sql_value_narrow_int_widths() {
        // Every width ToSqlValue accepts can be read back out.
        assert_eq!(i16::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert_eq!(i8::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert_eq!(u32::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert_eq!(u16::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert_eq!(u8::from_sql_value(&SqlValue::Int(9)).unwrap(), 9);
        assert!(u8::from_sql_value(&SqlValue::Int(300)).is_err());
        assert!(u16::from_sql_value(&SqlValue::Int(-1)).is_err());
    }

    #[test]
    fn test_from_sql_value_identity_coercions() {
        // SCOPE_IDENTITY comes back as a wide decimal.
        let identity = SqlValue::Decimal("42".parse().unwrap());
        assert_eq!(i64::from_sql_value(&identity).unwrap(), 42);

        // Some drivers hand scalars back as text.
        let text = SqlValue::Text(String::from("42"));
        assert_eq!(i64::from_sql_value(&text).unwrap(), 42);
    }

    #[test]
    fn test_from_sql_value_option() {
        assert_eq!(Option::<i64>::from_sql_value(&SqlValue::Null).unwrap(), None);
        assert_eq!(
            Option::<i64>::from_sql_value(&SqlValue::Int(3)).unwrap(),
            Some(3)
        );
    }

    #[test]
    fn test_from_sql_value_datetime_text() {
        assert_eq!(
            NaiveDateTime::from_sql_value(&SqlValue::Text(String::from("2024-03-05 13:00:00")))
                .unwrap(),
            sample_datetime()
        );
    }

    #[test]
    fn test_from_sql_value_conversion_error() {
        let err = bool::from_sql_value(&SqlValue::Text(String::from("yes"))).unwrap_err();
        assert!(matches!(err, ValueError::Conversion { .. }));
    }
}
