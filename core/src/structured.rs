//! Structured projection of [`Optional`], for interchange with logging and transport layers.
//!
//! With the `serde` feature, `Optional<T>` serializes as `{"kind":"Present","value":…}` or `{"kind":"Absent"}`.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::optional::Optional;

/// Discriminant of an [`Optional`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Kind {
  Present,
  Absent,
}

impl Display for Kind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Kind::Present => f.write_str("Present"),
      Kind::Absent => f.write_str("Absent"),
    }
  }
}

/// Structured form of an [`Optional`]: its kind, and its value if present.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Structured<T> {
  pub kind: Kind,
  #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
  pub value: Option<T>,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Error)]
pub enum ProjectionError {
  #[error("structured optional of kind `Present` has no value")]
  MissingValue,
  #[error("structured optional of kind `Absent` has a value")]
  UnexpectedValue,
}

impl<T> Structured<T> {
  /// Converts back into an [`Optional`], rejecting a kind that disagrees with the presence of a value.
  pub fn into_optional(self) -> Result<Optional<T>, ProjectionError> {
    match (self.kind, self.value) {
      (Kind::Present, Some(value)) => Ok(Optional::Present(value)),
      (Kind::Absent, None) => Ok(Optional::Absent),
      (Kind::Present, None) => Err(ProjectionError::MissingValue),
      (Kind::Absent, Some(_)) => Err(ProjectionError::UnexpectedValue),
    }
  }
}

impl<T> From<Optional<T>> for Structured<T> {
  #[inline]
  fn from(optional: Optional<T>) -> Self { optional.into_structured() }
}


#[cfg(feature = "serde")]
mod serde_impls {
  use std::marker::PhantomData;

  use serde::{Deserialize, Deserializer, Serialize, Serializer};
  use serde::de::{self, IgnoredAny, MapAccess, Visitor};
  use serde_json::{Map, Value};

  use crate::repr::PLACEHOLDER;

  use super::*;

  impl<T: Serialize> Serialize for Optional<T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
      self.to_structured().serialize(serializer)
    }
  }

  const FIELDS: &[&str] = &["kind", "value"];

  /// Reads `value` with `T`'s own deserializer whenever the key is there, so a present payload that serializes to
  /// `null` (such as `()` or `None`) survives a round trip.
  impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
      deserializer.deserialize_struct("Optional", FIELDS, OptionalVisitor(PhantomData))
    }
  }

  struct OptionalVisitor<T>(PhantomData<T>);

  impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
    type Value = Optional<T>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
      f.write_str("a structured optional with a `kind` and, if present, a `value`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
      let mut kind: Option<Kind> = None;
      let mut value: Option<T> = None;
      while let Some(key) = map.next_key::<String>()? {
        match key.as_str() {
          "kind" => {
            if kind.is_some() { return Err(de::Error::duplicate_field("kind")); }
            kind = Some(map.next_value()?);
          }
          "value" => {
            if value.is_some() { return Err(de::Error::duplicate_field("value")); }
            value = Some(map.next_value()?);
          }
          _ => { map.next_value::<IgnoredAny>()?; }
        }
      }
      let kind = kind.ok_or_else(|| de::Error::missing_field("kind"))?;
      Structured { kind, value }.into_optional().map_err(de::Error::custom)
    }
  }

  impl<T: Serialize> Optional<T> {
    /// Serializes the structured projection into a JSON value. Never fails: if the payload cannot be serialized, its
    /// value is replaced by [`PLACEHOLDER`].
    pub fn to_json_value(&self) -> Value {
      match serde_json::to_value(self) {
        Ok(value) => value,
        Err(cause) => {
          tracing::warn!(%cause, "failed to serialize payload of optional; substituting placeholder");
          let mut object = Map::new();
          object.insert("kind".to_string(), Value::String(self.kind().to_string()));
          object.insert("value".to_string(), Value::String(PLACEHOLDER.to_string()));
          Value::Object(object)
        }
      }
    }
  }
}
