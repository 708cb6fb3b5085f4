//! Sanjo value representation.

use serde::{Serialize, Serializer};

/// The data held by a [`Value`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Data {
    /// A single string, exactly as written after the assignment operator.
    Scalar(String),
    /// Elements of a list key, in source order.
    List(Vec<String>),
}

/// A key paired with its data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    key: String,
    data: Data,
}

impl Value {
    pub fn new(key: impl Into<String>, data: Data) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }

    /// Shorthand for a scalar value.
    pub fn scalar(key: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(key, Data::Scalar(data.into()))
    }

    /// Shorthand for a list value.
    pub fn list<I, S>(key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(key, Data::List(items.into_iter().map(Into::into).collect()))
    }

    /// The key, without the key marker or list suffix.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns the string if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            Data::Scalar(s) => Some(s),
            Data::List(_) => None,
        }
    }

    /// Returns the elements if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match &self.data {
            Data::List(items) => Some(items),
            Data::Scalar(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.data, Data::List(_))
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Scalar(s) => serializer.serialize_str(s),
            Data::List(items) => serializer.collect_seq(items),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}
