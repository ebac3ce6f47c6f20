//! Bounded debug formatting of payloads, used by the [`Display`] implementation of [`Optional`].
//!
//! Strings render quoted, sequences render bracketed with their elements rendered recursively, and records render
//! through structural serialization when wrapped in [`Structural`]. Payloads without a canonical textual form render
//! as [`PLACEHOLDER`]. Rendering never fails because of the payload.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

use crate::optional::Optional;

/// Rendered in place of a payload that has no textual form, or whose structural serialization failed.
pub const PLACEHOLDER: &str = "[object Object]";

/// Debug representation of a payload.
pub trait Repr {
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result;

  #[inline]
  fn repr(&self) -> String {
    ReprDisplay(self).to_string()
  }
}

/// Adapts a [`Repr`] into a [`Display`].
#[derive(Clone, Copy)]
pub struct ReprDisplay<'a, T: ?Sized>(pub &'a T);

impl<T: Repr + ?Sized> Display for ReprDisplay<'_, T> {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { self.0.fmt_repr(f) }
}


// Scalars

macro_rules! display_repr {
  ($($ty:ty),* $(,)?) => {$(
    impl Repr for $ty {
      #[inline]
      fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(self, f) }
    }
  )*};
}

display_repr!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

impl Repr for str {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "\"{}\"", self) }
}

impl Repr for String {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { self.as_str().fmt_repr(f) }
}

impl Repr for Cow<'_, str> {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { self.as_ref().fmt_repr(f) }
}

impl Repr for char {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "'{}'", self) }
}

impl Repr for () {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str("undefined") }
}


// Sequences

fn fmt_sequence<'a, T: Repr + 'a>(items: impl IntoIterator<Item=&'a T>, f: &mut Formatter<'_>) -> fmt::Result {
  f.write_str("[")?;
  for (index, item) in items.into_iter().enumerate() {
    if index > 0 {
      f.write_str(", ")?;
    }
    item.fmt_repr(f)?;
  }
  f.write_str("]")
}

impl<T: Repr> Repr for [T] {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { fmt_sequence(self, f) }
}

impl<T: Repr, const N: usize> Repr for [T; N] {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { fmt_sequence(self, f) }
}

impl<T: Repr> Repr for Vec<T> {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { fmt_sequence(self, f) }
}

impl<T: Repr> Repr for VecDeque<T> {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { fmt_sequence(self, f) }
}

impl<A: Repr, B: Repr> Repr for (A, B) {
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    self.0.fmt_repr(f)?;
    f.write_str(", ")?;
    self.1.fmt_repr(f)?;
    f.write_str("]")
  }
}


// Nullable and nested containers

impl<T: Repr> Repr for Option<T> {
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Some(value) => value.fmt_repr(f),
      None => f.write_str("null"),
    }
  }
}

impl<T: Repr> Repr for Optional<T> {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(self, f) }
}


// Pointers

macro_rules! deref_repr {
  ($($ty:ty),* $(,)?) => {$(
    impl<T: Repr + ?Sized> Repr for $ty {
      #[inline]
      fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { (**self).fmt_repr(f) }
    }
  )*};
}

deref_repr!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);


// Wrappers for payloads without a built-in representation

/// Renders a record through structural serialization (compact JSON), or [`PLACEHOLDER`] if serialization fails.
#[cfg(feature = "serde")]
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Structural<T>(pub T);

#[cfg(feature = "serde")]
impl<T: serde::Serialize> Repr for Structural<T> {
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match serde_json::to_string(&self.0) {
      Ok(json) => f.write_str(&json),
      Err(cause) => {
        tracing::trace!(%cause, "structural serialization failed; rendering placeholder");
        f.write_str(PLACEHOLDER)
      }
    }
  }
}

#[cfg(feature = "serde")]
impl Repr for serde_json::Value {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(self, f) }
}

/// Renders a function as `function <name>`, or `function` if it has no name (closures, function pointers).
#[derive(Default, Clone, Copy, Debug)]
pub struct Function<F>(pub F);

impl<F> Function<F> {
  /// Name of the function item `F`, without its module path and generic arguments.
  pub fn name(&self) -> Option<&'static str> {
    let type_name = std::any::type_name::<F>();
    if type_name.contains("{{closure}}") || type_name.starts_with("fn(") {
      return None;
    }
    let path = type_name.split('<').next().unwrap_or(type_name);
    path.rsplit("::").next().filter(|name| !name.is_empty())
  }
}

impl<F> Repr for Function<F> {
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.name() {
      Some(name) => write!(f, "function {}", name),
      None => f.write_str("function"),
    }
  }
}

/// Renders any payload as [`PLACEHOLDER`].
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Opaque<T>(pub T);

impl<T> Repr for Opaque<T> {
  #[inline]
  fn fmt_repr(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(PLACEHOLDER) }
}


#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use crate::optional::{absent, present};

  use super::*;

  fn double(n: i32) -> i32 { n * 2 }

  #[test]
  fn scalars() {
    assert_eq!(0i32.repr(), "0");
    assert_eq!((-1.5f64).repr(), "-1.5");
    assert_eq!(false.repr(), "false");
    assert_eq!('x'.repr(), "'x'");
    assert_eq!(().repr(), "undefined");
  }

  #[test]
  fn strings_are_quoted() {
    assert_eq!("hi".repr(), "\"hi\"");
    assert_eq!(String::new().repr(), "\"\"");
    assert_eq!(Cow::Borrowed("cow").repr(), "\"cow\"");
  }

  #[test]
  fn sequences_render_recursively() {
    assert_eq!(vec!["a", "b"].repr(), "[\"a\", \"b\"]");
    assert_eq!(vec![vec![1], vec![], vec![2, 3]].repr(), "[[1], [], [2, 3]]");
    assert_eq!([Some(1), None].repr(), "[1, null]");
    assert_eq!((1, "one").repr(), "[1, \"one\"]");
    assert_eq!(Vec::<i32>::new().repr(), "[]");
  }

  #[test]
  fn nested_containers() {
    assert_eq!(vec![present(1), absent()].repr(), "[Present(1), Absent]");
    assert_eq!(Box::new(present("x")).repr(), "Present(\"x\")");
  }

  #[cfg(feature = "serde")]
  #[test]
  fn structural_records() {
    #[derive(serde::Serialize)]
    struct Profile {
      age: u32,
      city: &'static str,
    }

    let profile = Structural(Profile { age: 25, city: "Beijing" });
    assert_eq!(profile.repr(), r#"{"age":25,"city":"Beijing"}"#);
    assert_eq!(present(profile).to_string(), r#"Present({"age":25,"city":"Beijing"})"#);
    assert_eq!(serde_json::json!({ "name": "test" }).repr(), r#"{"name":"test"}"#);
  }

  #[cfg(feature = "serde")]
  #[test]
  fn structural_failure_renders_placeholder() {
    let mut map = std::collections::BTreeMap::new();
    map.insert((1, 2), "tuple keys cannot be JSON object keys");
    assert_eq!(present(Structural(map)).to_string(), "Present([object Object])");
  }

  #[test]
  fn functions_render_by_name() {
    assert_eq!(Function(double).repr(), "function double");
    assert_eq!(Function(|n: i32| n + 1).repr(), "function");
    assert_eq!(Function(double as fn(i32) -> i32).repr(), "function");
  }

  #[test]
  fn opaque_renders_placeholder() {
    assert_eq!(present(Opaque(std::time::Instant::now())).to_string(), "Present([object Object])");
  }
}
