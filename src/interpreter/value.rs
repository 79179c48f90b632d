//! Runtime values shared by the tree-walking interpreter and the bytecode VM.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A runtime value.
///
/// Literal constants in the syntax tree are values too, so this type is also
/// the constant-pool element type. In JSON a value is the plain literal:
/// `42`, `4.5`, `"text"`, `true`, `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    None,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::None => "NoneType",
        }
    }

    /// Numeric view used by arithmetic; booleans count as 0 and 1.
    fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            other => other.as_int().map(|n| n as f64),
        }
    }

    /// `self + other`, or `None` when the operand types do not support it.
    ///
    /// Integer overflow is reported as unsupported rather than wrapping.
    pub fn add(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => {
                let mut out = String::with_capacity(a.len() + b.len());
                out.push_str(a);
                out.push_str(b);
                Some(Value::Str(out))
            }
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                Some(Value::Float(self.as_float()? + other.as_float()?))
            }
            _ => self
                .as_int()?
                .checked_add(other.as_int()?)
                .map(Value::Int),
        }
    }

    /// Equality for comparing engine results: like `==`, except that NaN
    /// matches NaN.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) if a.is_nan() && b.is_nan() => true,
            _ => self == other,
        }
    }

    /// Python-style `repr()`: strings are quoted.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            other => other.to_string(),
        }
    }
}

fn format_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "nan")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "inf" } else { "-inf" })
    } else if n.fract() == 0.0 && n.abs() < 1e16 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => format_float(*n, f),
            Value::Str(s) => write!(f, "{}", s),
            Value::None => write!(f, "None"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_int_addition() {
        assert_eq!(Value::Int(2).add(&Value::Int(3)), Some(Value::Int(5)));
    }

    #[test]
    fn test_mixed_numeric_addition_promotes_to_float() {
        assert_eq!(Value::Int(1).add(&Value::Float(0.5)), Some(Value::Float(1.5)));
        assert_eq!(Value::Float(0.5).add(&Value::Bool(true)), Some(Value::Float(1.5)));
    }

    #[test]
    fn test_bool_counts_as_int() {
        assert_eq!(Value::Bool(true).add(&Value::Int(1)), Some(Value::Int(2)));
        assert_eq!(Value::Bool(true).add(&Value::Bool(true)), Some(Value::Int(2)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            Value::from("foo").add(&Value::from("bar")),
            Some(Value::from("foobar"))
        );
    }

    #[test]
    fn test_invalid_operands() {
        assert_eq!(Value::Int(1).add(&Value::from("a")), None);
        assert_eq!(Value::None.add(&Value::Int(1)), None);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert_eq!(Value::Int(i64::MAX).add(&Value::Int(1)), None);
    }

    #[test]
    fn test_same_as_matches_nan() {
        let nan = Value::Float(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert!(nan.same_as(&Value::Float(f64::NAN)));
        assert!(Value::Int(1).same_as(&Value::Int(1)));
        assert!(!Value::Int(1).same_as(&Value::Float(1.0)));
        assert!(!nan.same_as(&Value::Float(0.0)));
    }

    #[test]
    fn test_display_matches_python_str() {
        assert_eq!(Value::Float(-16.0).to_string(), "-16.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::from("greater").to_string(), "greater");
    }

    #[test]
    fn test_repr_quotes_strings() {
        assert_eq!(Value::from("it's").repr(), "'it\\'s'");
        assert_eq!(Value::Int(7).repr(), "7");
    }

    #[test]
    fn test_json_literals() {
        let values: Vec<Value> = serde_json::from_str(r#"[42, 4.5, "s", true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Int(42),
                Value::Float(4.5),
                Value::from("s"),
                Value::Bool(true),
                Value::None
            ]
        );
    }
}
