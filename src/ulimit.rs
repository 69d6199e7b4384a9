use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Soft and hard limit for a single resource.
///
/// The codec never checks that `soft <= hard`, that is left to the runtime
/// applying the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ulimit {
    pub soft: i64,
    pub hard: i64,
}

impl Ulimit {
    pub fn new(soft: i64, hard: i64) -> Self {
        Self { soft, hard }
    }

    /// A limit where the hard value equals the soft one.
    pub fn single(value: i64) -> Self {
        Self {
            soft: value,
            hard: value,
        }
    }
}

impl Serialize for Ulimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        crate::value::encode_ulimit(Some(self)).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ulimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::value::decode_ulimit(&value).map_err(serde::de::Error::custom)
    }
}
