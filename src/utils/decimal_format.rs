//! Serde modules for monetary values.
//!
//! `rust_decimal`'s default serde support writes decimals as JSON strings, while
//! Lockstep expects JSON numbers. These modules write the decimal's exact
//! digits as a JSON number (`1234.56`, never `1234.5599999999999`) and read
//! the literal digits of numbers or numeric strings back, so no value ever
//! passes through `f64`. This relies on `serde_json`'s `arbitrary_precision`.

use std::fmt;

use rust_decimal::{Decimal, serde::arbitrary_precision};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

struct OptionDecimalVisitor;

impl<'de> Visitor<'de> for OptionDecimalVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal number, a numeric string or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `arbitrary_precision_option` reads through `deserialize_f64`, which
        // rejects numeric strings; the non-option reader accepts both.
        arbitrary_precision::deserialize(deserializer).map(Some)
    }
}

/// `#[serde(with = "decimal_format")]` for a required `Decimal`.
pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    arbitrary_precision::serialize(value, serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    arbitrary_precision::deserialize(deserializer)
}

/// `#[serde(with = "decimal_format::option")]` for an `Option<Decimal>`.
pub mod option {
    use super::{Decimal, Deserializer, OptionDecimalVisitor, Serializer, arbitrary_precision};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => arbitrary_precision::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionDecimalVisitor)
    }
}
