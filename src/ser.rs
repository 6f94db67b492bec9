use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{
    ser::{Serialize, SerializeMap, SerializeSeq},
    Serializer,
};

use crate::number::Decimal;
use crate::value::Value;

// serde has no arbitrary-precision number, so anything a 64-bit number cannot
// hold exactly goes out as a string of its digits.
fn serialize_integer<S>(num: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if let Some(num) = num.to_u64() {
        serializer.serialize_u64(num)
    } else if let Some(num) = num.to_i64() {
        serializer.serialize_i64(num)
    } else {
        serializer.serialize_str(&num.to_string())
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_f64_exact() {
            Some(num) => serializer.serialize_f64(num),
            None => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Integer(num) => serialize_integer(num, serializer),
            Self::Decimal(num) => num.serialize(serializer),
            Self::Text(str) => serializer.serialize_str(str),
            Self::Boolean(bool) => serializer.serialize_bool(*bool),
            Self::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;

                for v in array {
                    seq.serialize_element(v)?;
                }

                seq.end()
            }
            Self::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;

                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }

                map.end()
            }
        }
    }
}
