//! The [`TelemetryRecord`], a mapping from field name to [`Value`] produced
//! from a single telemetry line.

use serde::{ser::SerializeMap, Serialize, Serializer};
use std::fmt;

/// A numeric field value. Whether a field is an [`Value::Integer`] or a
/// [`Value::Float`] depends only on how the number was written on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A literal with neither a decimal point nor an exponent marker
    Integer(i64),
    /// A literal with a decimal point or an exponent marker
    Float(f64),
}

impl Value {
    /// The value widened to an `f64`, for arithmetic that doesn't care about
    /// the lexical type.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Integer(i) => i as f64,
            Value::Float(f) => f,
        }
    }

    /// `true` if this value was written as a floating-point literal.
    pub fn is_float(self) -> bool {
        matches!(self, Value::Float(_))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

// Floats always keep a fractional part so `3.00` shows up as `3.0` and
// never as the integer `3`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

/// All of the fields found on one telemetry line.
///
/// Keys are unique. Inserting a key that is already present overwrites its
/// value but keeps the position where the key was first seen, so iteration
/// follows the order the producer sent the fields in. Equality compares the
/// records as mappings and ignores that order.
#[derive(Debug, Clone, Default)]
pub struct TelemetryRecord {
    fields: Vec<(String, Value)>,
}

impl TelemetryRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|&(_, v)| v)
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the line had no recognizable fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl PartialEq for TelemetryRecord {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for TelemetryRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut record = TelemetryRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Formats the record the same way it arrives on the wire:
/// `Eventid: 128, Spo2: 96.3, ...`
impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        Ok(())
    }
}

impl Serialize for TelemetryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, &v)?;
        }
        map.end()
    }
}
