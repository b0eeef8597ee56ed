use serde_json::{Map, Value};

/// The full parsed upload, kept unmodified for the raw tree view.
pub type Document = Value;

/// One entry of `log_history`: metric name -> value.
pub type Record = Map<String, Value>;

/// Records in upload order (not assumed sorted).
pub type LogHistory = Vec<Record>;

/// Keys that are x-axis candidates rather than metric fields.
pub const RESERVED_KEYS: [&str; 2] = ["epoch", "step"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Read `key` from a record when it holds a JSON number.
pub fn numeric(record: &Record, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}

/// Which reserved field is plotted on the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XKey {
    Epoch,
    Step,
}

impl XKey {
    pub const ALL: [XKey; 2] = [XKey::Epoch, XKey::Step];

    /// Field name in the record.
    pub fn as_str(&self) -> &'static str {
        match self {
            XKey::Epoch => "epoch",
            XKey::Step => "step",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            XKey::Epoch => "Epoch",
            XKey::Step => "Step",
        }
    }
}

impl Default for XKey {
    fn default() -> Self {
        XKey::Epoch
    }
}

impl std::fmt::Display for XKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn numeric_only_accepts_numbers() {
        let r = record(json!({"epoch": 1.5, "step": "10", "loss": null}));
        assert_eq!(numeric(&r, "epoch"), Some(1.5));
        assert_eq!(numeric(&r, "step"), None);
        assert_eq!(numeric(&r, "loss"), None);
        assert_eq!(numeric(&r, "missing"), None);
    }

    #[test]
    fn x_key_names_match_record_fields() {
        assert_eq!(XKey::Epoch.as_str(), "epoch");
        assert_eq!(XKey::Step.to_string(), "step");
        assert_eq!(XKey::Step.label(), "Step");
        assert_eq!(XKey::default(), XKey::Epoch);
        assert!(is_reserved("epoch") && is_reserved("step"));
        assert!(!is_reserved("eval_loss"));
    }
}
