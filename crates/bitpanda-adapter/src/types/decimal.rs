/*
[INPUT]:  Decimal strings from the exchange
[OUTPUT]: serde `with` modules for exact Decimal fields
[POS]:    Data layer - decimal wire encoding
[UPDATE]: When changing how amounts and prices are encoded
*/

//! Amounts and prices travel as JSON strings. Parsing uses
//! `Decimal::from_str_exact`, so a value that does not fit the 96-bit
//! mantissa is a decode error instead of being rounded.

use rust_decimal::Decimal;
use serde::{Deserializer, Serializer};

fn parse_exact<E: serde::de::Error>(raw: &str) -> Result<Decimal, E> {
    Decimal::from_str_exact(raw)
        .map_err(|err| E::custom(format!("decimal {raw:?} cannot be represented exactly: {err}")))
}

/// `#[serde(with = "...::decimal::exact")]` for `Decimal` fields
pub mod exact {
    use super::*;
    use serde::Deserialize;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_exact(&raw)
    }
}

/// `#[serde(with = "...::decimal::exact_option")]` for `Option<Decimal>` fields
pub mod exact_option {
    use super::*;
    use serde::Deserialize;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_exact(&raw).map(Some),
            None => Ok(None),
        }
    }
}
