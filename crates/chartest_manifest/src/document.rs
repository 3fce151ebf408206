//! Navigable view over a rendered manifest document.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde_yaml::Value;

/// A full rendered document.
///
/// Dereferences to [`serde_yaml::Value`], so nested fields can be indexed
/// directly: `manifest["spec"]["replicas"]`. Indexing a missing key yields
/// `Value::Null` rather than panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    value: Value,
}

impl Manifest {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a dotted path such as `spec.template.spec.containers.0.image`.
    ///
    /// Numeric segments index into sequences. Use [`Manifest::at_path`] for
    /// keys that themselves contain dots (labels, annotations).
    pub fn at(&self, path: &str) -> Option<&Value> {
        self.at_path(path.split('.').filter(|s| !s.is_empty()))
    }

    /// Look up a path given as individual segments.
    pub fn at_path<'a, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .try_fold(&self.value, |current, segment| match current {
                Value::Mapping(map) => map.get(segment),
                Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.at(path).and_then(Value::as_str)
    }

    pub fn i64_at(&self, path: &str) -> Option<i64> {
        self.at(path).and_then(Value::as_i64)
    }

    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.at(path).and_then(Value::as_bool)
    }

    /// Deserialize the whole document into a typed model.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_yaml::Error> {
        serde_yaml::from_value(self.value.clone())
    }
}

impl Deref for Manifest {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl From<Value> for Manifest {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
