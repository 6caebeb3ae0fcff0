//! Output - Output values and ordered output sets

/// A single value produced by a definition module
///
/// Mirrors the JSON data model: the compiled artifact is JSON and published
/// outputs are JSON again, so conversions in both directions are total.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<OutputValue>),
    /// Nested mapping, ordered like a top-level output set
    Map(OutputSet),
}

impl OutputValue {
    /// Name of this value's type, for error messages and display
    pub fn type_name(&self) -> &'static str {
        match self {
            OutputValue::Null => "null",
            OutputValue::String(_) => "string",
            OutputValue::Int(_) => "int",
            OutputValue::Float(_) => "float",
            OutputValue::Bool(_) => "bool",
            OutputValue::List(_) => "list",
            OutputValue::Map(_) => "map",
        }
    }

    /// Convert a JSON value into an output value
    ///
    /// Integral numbers that fit i64 become Int; all other numbers become
    /// Float.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => OutputValue::Null,
            serde_json::Value::Bool(b) => OutputValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => OutputValue::Int(i),
                // as_f64 is total for standard JSON numbers
                None => OutputValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => OutputValue::String(s),
            serde_json::Value::Array(items) => {
                OutputValue::List(items.into_iter().map(OutputValue::from_json).collect())
            }
            serde_json::Value::Object(map) => OutputValue::Map(OutputSet::from_json_object(&map)),
        }
    }

    /// Convert this value back into JSON
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OutputValue::Null => serde_json::Value::Null,
            OutputValue::String(s) => serde_json::Value::String(s.clone()),
            OutputValue::Int(i) => serde_json::Value::Number((*i).into()),
            // Non-finite floats have no JSON representation
            OutputValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            OutputValue::Bool(b) => serde_json::Value::Bool(*b),
            OutputValue::List(items) => {
                serde_json::Value::Array(items.iter().map(|v| v.to_json()).collect())
            }
            OutputValue::Map(set) => set.to_json(),
        }
    }
}

impl std::fmt::Display for OutputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputValue::Null => write!(f, "null"),
            OutputValue::String(s) => {
                if s.len() > 50 {
                    write!(f, "\"{}...\"", &s[..47])
                } else {
                    write!(f, "\"{}\"", s)
                }
            }
            OutputValue::Int(n) => write!(f, "{}", n),
            OutputValue::Float(n) => write!(f, "{}", n),
            OutputValue::Bool(b) => write!(f, "{}", b),
            OutputValue::List(items) => {
                if items.is_empty() {
                    write!(f, "[]")
                } else if items.len() <= 3 {
                    let strs: Vec<_> = items.iter().map(|v| v.to_string()).collect();
                    write!(f, "[{}]", strs.join(", "))
                } else {
                    write!(f, "[{} items]", items.len())
                }
            }
            OutputValue::Map(set) => {
                if set.is_empty() {
                    write!(f, "{{}}")
                } else {
                    write!(f, "{{...{} keys}}", set.len())
                }
            }
        }
    }
}

/// Insertion-ordered mapping of output names to values
///
/// Output names are unique within a set: inserting an existing name
/// overwrites the value in place (last write wins) and the name keeps its
/// original position. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSet {
    entries: Vec<(String, OutputValue)>,
}

impl OutputSet {
    /// Create a new empty output set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an output, overwriting any existing value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: OutputValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder-style insert
    pub fn with_output(mut self, name: impl Into<String>, value: OutputValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Get an output value by name
    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check whether an output with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over outputs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate over output names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Merge another output set into this one
    ///
    /// Plain union: same-named outputs are overwritten by the incoming set.
    pub fn merge(&mut self, other: OutputSet) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// Build an output set from a JSON object
    pub fn from_json_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut set = OutputSet::new();
        for (name, value) in map {
            set.insert(name.clone(), OutputValue::from_json(value.clone()));
        }
        set
    }

    /// Convert this set into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

impl IntoIterator for OutputSet {
    type Item = (String, OutputValue);
    type IntoIter = std::vec::IntoIter<(String, OutputValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, OutputValue)> for OutputSet {
    fn from_iter<I: IntoIterator<Item = (String, OutputValue)>>(iter: I) -> Self {
        let mut set = OutputSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
