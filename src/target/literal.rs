use serde_json::Value;
use std::fmt;

/// Renders text as a double-quoted Python string literal.
///
/// JSON string escapes are a subset of Python's, so the JSON encoding of the
/// string is already a valid Python literal with the same value.
pub fn py_str(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Renders a JSON value as the equivalent Python literal.
pub struct PyLiteral<'a>(pub &'a Value);

impl fmt::Display for PyLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(&py_str(s)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", PyLiteral(item))?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", py_str(key), PyLiteral(item))?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Turns a user-chosen variable name into a Python identifier.
///
/// ASCII punctuation becomes `_`; any other character is spelled out by code
/// point, so names in non-Latin scripts stay distinct.
pub fn py_ident(name: &str) -> String {
    let mut ident = String::from("var_");
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            ident.push(c);
        } else if c.is_ascii() {
            ident.push('_');
        } else {
            ident.push_str(&format!("_u{:04x}", c as u32));
        }
    }
    ident
}

/// Converts milliseconds into a seconds literal, e.g. `1500` -> `1.5`.
pub fn seconds(millis: u64) -> String {
    format!("{:?}", millis as f64 / 1000.0)
}
