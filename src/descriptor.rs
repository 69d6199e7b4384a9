use serde::{Deserialize, Serialize};
use std::fmt;

/// A named resource limit as the container engine expects it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeUlimit {
    pub name: String,
    pub soft: i64,
    pub hard: i64,
}

impl fmt::Display for RuntimeUlimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}:{}", self.name, self.soft, self.hard)
    }
}

/// Ulimit option value handed to the runtime, sorted by resource name.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct UlimitOpt {
    values: Vec<RuntimeUlimit>,
}

impl UlimitOpt {
    pub fn new(mut values: Vec<RuntimeUlimit>) -> Self {
        values.sort_by(|a, b| a.name.cmp(&b.name));
        Self { values }
    }

    pub fn values(&self) -> &[RuntimeUlimit] {
        &self.values
    }

    pub fn into_values(self) -> Vec<RuntimeUlimit> {
        self.values
    }
}

impl fmt::Display for UlimitOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime_ulimit(name: &str, soft: i64, hard: i64) -> RuntimeUlimit {
        RuntimeUlimit {
            name: name.to_string(),
            soft,
            hard,
        }
    }

    #[test]
    fn display() {
        assert_eq!(runtime_ulimit("nofile", 1024, 2048).to_string(), "nofile=1024:2048");

        let opt = UlimitOpt::new(vec![
            runtime_ulimit("nproc", 100, 100),
            runtime_ulimit("core", -1, -1),
        ]);
        assert_eq!(opt.to_string(), "[core=-1:-1 nproc=100:100]");
        assert_eq!(UlimitOpt::default().to_string(), "[]");
    }

    #[test]
    fn serialize() {
        let opt = UlimitOpt::new(vec![runtime_ulimit("nofile", 1024, 2048)]);
        assert_eq!(
            serde_json::to_value(&opt).unwrap(),
            serde_json::json!([{"Name": "nofile", "Soft": 1024, "Hard": 2048}])
        );
    }
}
