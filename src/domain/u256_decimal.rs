//! Serde helper for 256-bit amounts in decimal-string form.
//!
//! The Mesh JSON-RPC wire format carries every `uint256` amount as a
//! decimal string (`"100000000000000000000"`), and `config.toml` uses the
//! same convention because TOML integers cap out at 64 bits. Deserializing
//! also accepts plain integers for small values.

use std::fmt;

use alloy::primitives::U256;
use serde::{de, Deserializer, Serializer};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(U256Visitor)
}

struct U256Visitor;

impl de::Visitor<'_> for U256Visitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal encoded 256-bit unsigned integer")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map_err(de::Error::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(U256::from(value))
    }

    // TOML integers arrive as i64.
    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(U256::from)
            .map_err(|_| de::Error::custom("amount cannot be negative"))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        amount: U256,
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let wrapper = Wrapper {
            amount: U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)),
        };
        let json = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(json["amount"], "100000000000000000000");
    }

    #[test]
    fn test_deserializes_string_and_integer() {
        let from_str: Wrapper = serde_json::from_str(r#"{"amount":"42"}"#).unwrap();
        let from_int: Wrapper = serde_json::from_str(r#"{"amount":42}"#).unwrap();
        assert_eq!(from_str.amount, U256::from(42u64));
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"0xzz"}"#).is_err());
    }
}
