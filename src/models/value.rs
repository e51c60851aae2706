use serde::{Deserialize, Serialize};

/// A single untyped cell from an uploaded table.
///
/// Absent or unusable data is an explicit `Missing` marker, never a display
/// string; substituting placeholder text is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Missing,
}

impl Value {
    /// Build a value from a raw CSV field. Empty fields and common missing-data
    /// sentinels map to `Missing`; anything that parses as a number becomes
    /// `Number`; the rest stays text.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();

        if trimmed.is_empty() || matches!(trimmed, "N/A" | "n/a" | "NA" | "NaN" | "nan" | "null") {
            return Value::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    /// Numeric coercion: numbers pass through, numeric-looking text parses,
    /// everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Serialized form for CSV output. Missing values become empty fields.
    pub fn to_field(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Missing => String::new(),
        }
    }
}
