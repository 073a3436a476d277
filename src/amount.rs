use num_bigint::BigInt;
use std::str::FromStr;
use crate::types::FaraidhError;

/// Trait for converting various types into `BigInt` currency amounts.
///
/// This trait allows users to pass `i32`, `u64`, `&str`, etc. directly into
/// builders without wrapping them in `BigInt::from()` first.
pub trait IntoAmount {
    fn into_amount(self) -> Result<BigInt, FaraidhError>;
}

// Implement for BigInt (passthrough)
impl IntoAmount for BigInt {
    fn into_amount(self) -> Result<BigInt, FaraidhError> {
        Ok(self)
    }
}

impl IntoAmount for &BigInt {
    fn into_amount(self) -> Result<BigInt, FaraidhError> {
        Ok(self.clone())
    }
}

// Implement for Integers
macro_rules! impl_into_amount_int {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> Result<BigInt, FaraidhError> {
                    Ok(BigInt::from(self))
                }
            }
        )*
    };
}

impl_into_amount_int!(i32, u32, i64, u64, i128, u128, isize, usize);

// Implement for Strings. Thousand separators ("1_000_000", "1.000.000") are not accepted:
// an amount is a plain base-10 integer in the smallest currency unit.
impl IntoAmount for &str {
    fn into_amount(self) -> Result<BigInt, FaraidhError> {
        BigInt::from_str(self.trim()).map_err(|_| FaraidhError::InvalidAmount(self.to_string()))
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> Result<BigInt, FaraidhError> {
        self.as_str().into_amount()
    }
}

/// Serde adapter that writes a `BigInt` as a decimal string and reads either a
/// string or a JSON integer.
pub mod serde_bigint {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => BigInt::from_str(s.trim()).map_err(serde::de::Error::custom),
            Repr::Signed(n) => Ok(BigInt::from(n)),
            Repr::Unsigned(n) => Ok(BigInt::from(n)),
        }
    }
}

/// [`serde_bigint`] for optional values; `None` is written as `null`.
pub mod serde_bigint_opt {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    struct Wrapper(#[serde(with = "super::serde_bigint")] BigInt);

    pub fn serialize<S: Serializer>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::serde_bigint::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BigInt>, D::Error> {
        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(v)| v))
    }
}
