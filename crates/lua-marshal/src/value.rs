//! Native Value Type
//!
//! The host side of the Lua boundary. `NativeValue` is a closed dynamic type:
//! - Scalars: null, bool, number (f64), string
//! - Composites: ordered sequences and string-keyed mappings
//! - `Opaque`: any other host value, rendered to text on demand
//!
//! Design follows the serde_json pattern:
//! - Explicit extraction: .as_str(), .as_number()
//! - Safe lookups: missing keys and out-of-range indices return `None`

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Host-side dynamic value exchanged with Lua
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// Absent value (Lua `nil`)
    Null,
    /// Boolean
    Bool(bool),
    /// Number (IEEE 754 double-precision)
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Ordered list, 0-based on the host side
    Sequence(Vec<NativeValue>),
    /// Text-keyed map, insertion order not significant
    Mapping(HashMap<String, NativeValue>),
    /// Any other host value, carried by its textual rendering
    Opaque(Opaque),
}

/// A host value with no dedicated conversion rule.
///
/// The wrapped value is rendered with its `Debug` implementation when it
/// crosses into Lua. Opaque values produced by decoding hold the text the
/// runtime reported for them.
#[derive(Clone)]
pub struct Opaque {
    inner: Arc<dyn fmt::Debug + Send + Sync>,
}

/// Pre-rendered text whose `Debug` output is the text itself
struct Rendered(String);

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Opaque {
    /// Wrap an arbitrary host value
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Wrap text that is already the final rendering
    pub fn from_rendering(text: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Rendered(text.into())),
        }
    }

    /// Default textual rendering of the wrapped value
    pub fn render(&self) -> String {
        format!("{:?}", self.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.render())
    }
}

// Two opaque values are equal when they render identically; identity of the
// wrapped object is not observable across the boundary.
impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl NativeValue {
    /// Wrap an arbitrary host value as `Opaque`
    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        NativeValue::Opaque(Opaque::new(value))
    }

    /// Create a new sequence
    pub fn sequence(values: Vec<NativeValue>) -> Self {
        NativeValue::Sequence(values)
    }

    /// Create a new mapping
    pub fn mapping(map: HashMap<String, NativeValue>) -> Self {
        NativeValue::Mapping(map)
    }

    /// Short name of the variant, used in log fields
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Number(_) => "number",
            NativeValue::String(_) => "string",
            NativeValue::Sequence(_) => "sequence",
            NativeValue::Mapping(_) => "mapping",
            NativeValue::Opaque(_) => "opaque",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, NativeValue::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, NativeValue::Mapping(_))
    }

    /// Extract as boolean, returns None if not a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NativeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as number, returns None if not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            NativeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as string slice, returns None if not a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract as sequence slice, returns None if not a sequence
    pub fn as_sequence(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Extract as mapping reference, returns None if not a mapping
    pub fn as_mapping(&self) -> Option<&HashMap<String, NativeValue>> {
        match self {
            NativeValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key in a mapping
    pub fn get(&self, key: &str) -> Option<&NativeValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Look up a 0-based position in a sequence
    pub fn at(&self, index: usize) -> Option<&NativeValue> {
        self.as_sequence().and_then(|items| items.get(index))
    }

    /// Get the length of a sequence or mapping
    /// Returns None for scalars
    pub fn len(&self) -> Option<usize> {
        match self {
            NativeValue::Sequence(items) => Some(items.len()),
            NativeValue::Mapping(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Check if a sequence or mapping is empty
    /// Returns true for scalars
    pub fn is_empty(&self) -> bool {
        match self {
            NativeValue::Sequence(items) => items.is_empty(),
            NativeValue::Mapping(map) => map.is_empty(),
            _ => true,
        }
    }
}

/// Format a number without a trailing `.0` when it is integral
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Write a string as a JSON string literal, escaping quotes and control characters
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Null => write!(f, "null"),
            NativeValue::Bool(b) => write!(f, "{}", b),
            NativeValue::Number(n) => write!(f, "{}", format_number(*n)),
            NativeValue::String(s) => write_quoted(f, s),
            NativeValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            NativeValue::Mapping(map) => {
                // Sorted so output is stable across runs
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {}", map[key])?;
                }
                write!(f, "}}")
            }
            NativeValue::Opaque(opaque) => write!(f, "{}", opaque.render()),
        }
    }
}

// Host type conversions. Every numeric width widens to f64.

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for NativeValue {
                fn from(n: $ty) -> Self {
                    NativeValue::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::String(s)
    }
}

impl From<()> for NativeValue {
    fn from(_: ()) -> Self {
        NativeValue::Null
    }
}

impl From<Opaque> for NativeValue {
    fn from(opaque: Opaque) -> Self {
        NativeValue::Opaque(opaque)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(value: Option<T>) -> Self {
        match value {
            None => NativeValue::Null,
            Some(v) => v.into(),
        }
    }
}

impl<T: Into<NativeValue>> From<Vec<T>> for NativeValue {
    fn from(values: Vec<T>) -> Self {
        NativeValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NativeValue>> From<HashMap<String, T>> for NativeValue {
    fn from(map: HashMap<String, T>) -> Self {
        NativeValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_null() {
        let val = NativeValue::Null;
        assert!(val.is_null());
        assert!(!val.is_sequence());
        assert!(!val.is_mapping());
        assert_eq!(val.to_string(), "null");
    }

    #[test]
    fn test_number_widening() {
        assert_eq!(NativeValue::from(42i32), NativeValue::Number(42.0));
        assert_eq!(NativeValue::from(42u8), NativeValue::Number(42.0));
        assert_eq!(NativeValue::from(-7i64), NativeValue::Number(-7.0));
        assert_eq!(NativeValue::from(1.5f32), NativeValue::Number(1.5));
        assert_eq!(NativeValue::from(3usize).as_number(), Some(3.0));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(NativeValue::Number(42.0).to_string(), "42");
        assert_eq!(NativeValue::Number(3.14).to_string(), "3.14");
        assert_eq!(NativeValue::Number(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(NativeValue::from(None::<f64>), NativeValue::Null);
        assert_eq!(NativeValue::from(Some("x")), NativeValue::String("x".into()));
        assert_eq!(NativeValue::from(()), NativeValue::Null);
    }

    #[test]
    fn test_sequence_from_vec() {
        let val = NativeValue::from(vec![1, 2, 3]);
        assert!(val.is_sequence());
        assert_eq!(val.len(), Some(3));
        assert_eq!(val.at(1), Some(&NativeValue::Number(2.0)));
        assert_eq!(val.at(3), None);
        assert_eq!(val.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_mapping_lookup() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), NativeValue::from("Alice"));
        map.insert("age".to_string(), NativeValue::from(30));
        let val = NativeValue::mapping(map);

        assert_eq!(val.get("name").and_then(NativeValue::as_str), Some("Alice"));
        assert_eq!(val.get("missing"), None);
        assert_eq!(NativeValue::Number(1.0).get("name"), None);
        assert_eq!(val.to_string(), r#"{"age": 30, "name": "Alice"}"#);
    }

    #[test]
    fn test_display_escapes_strings() {
        assert_eq!(
            NativeValue::from(r#"say "hi" \ bye"#).to_string(),
            r#""say \"hi\" \\ bye""#
        );
        assert_eq!(NativeValue::from("line\nbreak").to_string(), r#""line\nbreak""#);

        let mut map = HashMap::new();
        map.insert(r#"a"b"#.to_string(), NativeValue::from("c"));
        let val = NativeValue::mapping(map);
        assert_eq!(val.to_string(), r#"{"a\"b": "c"}"#);
        let parsed: serde_json::Value = serde_json::from_str(&val.to_string()).unwrap();
        assert_eq!(parsed["a\"b"], "c");
    }

    #[test]
    fn test_opaque_renders_with_debug() {
        let val = NativeValue::opaque(Point { x: 1, y: 2 });
        assert_eq!(val.type_name(), "opaque");
        assert_eq!(val.to_string(), "Point { x: 1, y: 2 }");
    }

    #[test]
    fn test_opaque_equality_by_rendering() {
        let a = Opaque::new(Point { x: 1, y: 2 });
        let b = Opaque::from_rendering("Point { x: 1, y: 2 }");
        assert_eq!(a, b);
        assert_ne!(a, Opaque::from_rendering("Point"));
        assert_eq!(format!("{:?}", b), "Opaque(Point { x: 1, y: 2 })");
    }

    #[test]
    fn test_is_empty() {
        assert!(NativeValue::Null.is_empty());
        assert!(NativeValue::sequence(vec![]).is_empty());
        assert!(NativeValue::mapping(HashMap::new()).is_empty());
        assert!(!NativeValue::from(vec![NativeValue::Null]).is_empty());
    }
}
