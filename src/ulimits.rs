use crate::descriptor::{RuntimeUlimit, UlimitOpt};
use crate::ulimit::Ulimit;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ulimits keyed by resource name.
///
/// Iteration follows insertion order, renderings are sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ulimits {
    values: IndexMap<String, Ulimit>,
}

impl Ulimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the limit for `name`.
    pub fn insert(&mut self, name: impl Into<String>, ulimit: Ulimit) -> Option<Ulimit> {
        self.values.insert(name.into(), ulimit)
    }

    pub fn get(&self, name: &str) -> Option<&Ulimit> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Ulimit> {
        self.values.iter()
    }

    /// Returns `self` with every entry of `overlay` written over it.
    ///
    /// The base is taken by value so its storage can be reused; `overlay`
    /// is only read.
    pub fn merge(mut self, overlay: &Ulimits) -> Ulimits {
        for (name, ulimit) in overlay.iter() {
            if let Some(previous) = self.values.insert(name.clone(), *ulimit) {
                debug!("Overriding ulimit {} ({:?} -> {:?})", name, previous, ulimit);
            }
        }
        self
    }

    /// Builds the runtime option value, one descriptor per resource.
    pub fn to_ulimit_opt(&self) -> UlimitOpt {
        UlimitOpt::new(
            self.iter()
                .map(|(name, ulimit)| RuntimeUlimit {
                    name: name.clone(),
                    soft: ulimit.soft,
                    hard: ulimit.hard,
                })
                .collect(),
        )
    }
}

/// Merges `overlay` over an optional `base`, a missing base counts as empty.
pub fn merge(base: Option<Ulimits>, overlay: &Ulimits) -> Ulimits {
    base.unwrap_or_default().merge(overlay)
}

impl FromIterator<(String, Ulimit)> for Ulimits {
    fn from_iter<T: IntoIterator<Item = (String, Ulimit)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ulimits {
    type Item = (&'a String, &'a Ulimit);
    type IntoIter = indexmap::map::Iter<'a, String, Ulimit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Ulimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ulimit_opt())
    }
}

impl Serialize for Ulimits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        crate::value::encode_ulimits(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ulimits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::value::decode_ulimits(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ulimits(entries: &[(&str, i64, i64)]) -> Ulimits {
        entries
            .iter()
            .map(|(name, soft, hard)| (name.to_string(), Ulimit::new(*soft, *hard)))
            .collect()
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ulimits(&[("nofile", 1024, 1024)]);
        let overlay = ulimits(&[("nofile", 2048, 4096), ("nproc", 100, 100)]);

        let merged = base.merge(&overlay);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("nofile"), Some(&Ulimit::new(2048, 4096)));
        assert_eq!(merged.get("nproc"), Some(&Ulimit::single(100)));
        // overlay untouched
        assert_eq!(overlay.len(), 2);
    }

    #[test]
    fn merge_keeps_base_entries() {
        let base = ulimits(&[("core", 0, 0), ("nofile", 1024, 1024)]);
        let overlay = ulimits(&[("nofile", 2048, 2048)]);

        let merged = merge(Some(base), &overlay);
        assert_eq!(merged.get("core"), Some(&Ulimit::single(0)));
        assert_eq!(merged.get("nofile"), Some(&Ulimit::single(2048)));
    }

    #[test]
    fn merge_without_base() {
        let overlay = ulimits(&[("nproc", 100, 200)]);
        assert_eq!(merge(None, &overlay), overlay);
        assert!(merge(None, &Ulimits::new()).is_empty());
    }

    #[test]
    fn runtime_descriptors_sorted() {
        let opt = ulimits(&[("stack", 8192, 8192), ("core", 0, -1)]).to_ulimit_opt();
        let names: Vec<&str> = opt.values().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["core", "stack"]);
        assert_eq!(opt.values()[0].hard, -1);
    }

    #[test]
    fn display() {
        let ulimits = ulimits(&[("nproc", 100, 100), ("nofile", 1024, 2048)]);
        assert_eq!(ulimits.to_string(), "[nofile=1024:2048 nproc=100:100]");
        assert_eq!(Ulimits::new().to_string(), "[]");
    }

    #[test]
    fn serde_yaml_round_trip() {
        let yaml = "nofile: \"1024:2048\"\nnproc: 100\n";
        let decoded: Ulimits = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(decoded, ulimits(&[("nofile", 1024, 2048), ("nproc", 100, 100)]));

        let encoded = serde_yaml::to_string(&decoded).unwrap();
        let again: Ulimits = serde_yaml::from_str(&encoded).unwrap();
        assert_eq!(again, decoded);
    }
}
