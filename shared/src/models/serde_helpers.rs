//! Serde helpers for identifiers that arrive either as JSON numbers or as
//! numeric strings (`5` and `"5"` are the same table id).

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

struct IntOrStringVisitor;

impl<'de> Visitor<'de> for IntOrStringVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a numeric string")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(value).map_err(|_| de::Error::custom(format!("id out of range: {}", value)))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid numeric id: {}", value)))
    }
}

/// Deserialize an i64 from a number or a numeric string
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntOrStringVisitor)
}

/// Deserialize an optional i64 from a number, a numeric string or null
pub fn opt_int_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "int_or_string")] i64);

    Option::<Wrapper>::deserialize(deserializer).map(|opt| opt.map(|w| w.0))
}
