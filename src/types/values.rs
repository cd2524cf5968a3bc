//! Closed value sets and scalar payload types.

use crate::{Error, ErrorContext, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire format of pixel dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        Error::validation_with_context(
            format!("invalid date {:?}: {}", value, e),
            ErrorContext::new()
                .with_field_path("date")
                .with_details("expected yyyyMMdd"),
        )
    })
}

/// Numeric type of a graph's quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Int,
    Float,
}

/// Display colour of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphColor {
    /// green
    Shibafu,
    /// red
    Momiji,
    /// blue
    Sora,
    /// yellow
    Ichou,
    /// purple
    Ajisai,
    /// black
    Kuro,
}

/// How a graph increments or decrements itself through its webhooks and the
/// increment/decrement endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfSufficient {
    Increment,
    Decrement,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookType {
    Increment,
    Decrement,
}

/// Rendering mode of the SVG graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvgMode {
    Short,
    Badge,
    Line,
}

impl SvgMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SvgMode::Short => "short",
            SvgMode::Badge => "badge",
            SvgMode::Line => "line",
        }
    }
}

/// IANA timezone name, checked against the tz database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(String);

impl Timezone {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        value.parse::<chrono_tz::Tz>().map_err(|e| {
            Error::validation_with_context(
                format!("unknown timezone {:?}", value),
                ErrorContext::new()
                    .with_field_path("timezone")
                    .with_details(e.to_string()),
            )
        })?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Timezone {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Timezone> for String {
    fn from(value: Timezone) -> String {
        value.0
    }
}

/// Pixel quantity. Sent as a string, as the service expects.
///
/// Floats enter through `TryFrom<f64>` or `FromStr`, both of which reject
/// NaN and infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Int(v) => write!(f, "{}", v),
            // Debug keeps the fractional part of whole floats ("2.0").
            Quantity::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || {
            Error::validation_with_context(
                format!("invalid quantity {:?}", s),
                ErrorContext::new()
                    .with_field_path("quantity")
                    .with_details("expected an integer or decimal number"),
            )
        };
        if s.contains(&['.', 'e', 'E'][..]) {
            let v = s.parse::<f64>().map_err(|_| invalid())?;
            if !v.is_finite() {
                return Err(invalid());
            }
            Ok(Quantity::Float(v))
        } else {
            s.parse::<i64>().map(Quantity::Int).map_err(|_| invalid())
        }
    }
}

impl From<i64> for Quantity {
    fn from(v: i64) -> Self {
        Quantity::Int(v)
    }
}

impl From<i32> for Quantity {
    fn from(v: i32) -> Self {
        Quantity::Int(v as i64)
    }
}

impl From<u32> for Quantity {
    fn from(v: u32) -> Self {
        Quantity::Int(v as i64)
    }
}

impl TryFrom<f64> for Quantity {
    type Error = Error;

    fn try_from(v: f64) -> Result<Self> {
        if v.is_finite() {
            Ok(Quantity::Float(v))
        } else {
            Err(Error::validation_with_context(
                format!("invalid quantity {}", v),
                ErrorContext::new()
                    .with_field_path("quantity")
                    .with_details("expected a finite number"),
            ))
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let Quantity::Float(v) = self {
            if !v.is_finite() {
                return Err(serde::ser::Error::custom(format!("non-finite quantity {}", v)));
            }
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
