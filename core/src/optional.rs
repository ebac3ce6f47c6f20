use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use crate::error::EmptyUnwrap;
use crate::repr::Repr;
use crate::structured::{Kind, Structured};

/// A value that may or may not be present.
///
/// Exactly one variant is active at a time. A container is never mutated: every combinator consumes or borrows the
/// receiver and produces a new container. "No value" is only ever represented by [`Absent`](Self::Absent); use
/// [`from_nullable`](Self::from_nullable) to fold a nullable source into a container.
///
/// All operations are total except [`unwrap`](Self::unwrap), which panics on an absent container.
#[must_use]
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Optional<T> {
  /// Holds exactly one value.
  Present(T),
  /// Holds no value.
  Absent,
}

impl<T> Default for Optional<T> {
  #[inline]
  fn default() -> Self { Self::Absent }
}


// Construction

impl<T> Optional<T> {
  /// Wraps `value` verbatim. Zero-like values such as `0`, `""`, or `false` are present values.
  #[inline]
  pub const fn present(value: T) -> Self { Self::Present(value) }

  /// Creates an absent container.
  #[inline]
  pub const fn absent() -> Self { Self::Absent }

  /// Folds a nullable `value` into a container: `None` becomes [`Absent`](Self::Absent), `Some(v)` becomes
  /// [`Present(v)`](Self::Present).
  #[inline]
  pub fn from_nullable(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::Present(value),
      None => Self::Absent,
    }
  }
}

#[cfg(feature = "serde")]
impl Optional<serde_json::Value> {
  /// Folds a JSON `value` into a container, where JSON `null` becomes [`Absent`](Self::Absent).
  #[inline]
  pub fn from_json(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => Self::Absent,
      value => Self::Present(value),
    }
  }
}

/// Wraps `value` in a present container.
#[inline]
pub const fn present<T>(value: T) -> Optional<T> { Optional::Present(value) }

/// Creates an absent container of any type.
#[inline]
pub const fn absent<T>() -> Optional<T> { Optional::Absent }

/// Folds a nullable `value` into a container. See [`Optional::from_nullable`].
#[inline]
pub fn from_nullable<T>(value: Option<T>) -> Optional<T> { Optional::from_nullable(value) }


// Inspection and borrowing

impl<T> Optional<T> {
  #[inline]
  pub const fn is_present(&self) -> bool { matches!(self, Self::Present(_)) }

  #[inline]
  pub const fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  #[inline]
  pub fn as_ref(&self) -> Optional<&T> {
    match self {
      Self::Present(value) => Optional::Present(value),
      Self::Absent => Optional::Absent,
    }
  }

  #[inline]
  pub fn as_deref(&self) -> Optional<&T::Target> where
    T: Deref
  {
    self.as_ref().map(|value| value.deref())
  }

  #[inline]
  pub fn into_option(self) -> Option<T> { self.into() }

  /// Iterates over the payload, yielding one item if present and none otherwise.
  #[inline]
  pub fn iter(&self) -> std::option::IntoIter<&T> { self.as_ref().into_iter() }
}

impl<T: Copy> Optional<&T> {
  #[inline]
  pub fn copied(self) -> Optional<T> { self.map(|value| *value) }
}

impl<T: Clone> Optional<&T> {
  #[inline]
  pub fn cloned(self) -> Optional<T> { self.map(T::clone) }
}


// Extraction

impl<T> Optional<T> {
  /// Returns the payload.
  ///
  /// # Panics
  ///
  /// Panics with an [`EmptyUnwrap`] payload if the container is [`Absent`](Self::Absent). This is the only
  /// operation on `Optional` that is not total: only call it where presence has already been established, or in
  /// tests. Prefer [`try_unwrap`](Self::try_unwrap), [`unwrap_or`](Self::unwrap_or), or
  /// [`match_with`](Self::match_with) everywhere else.
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self {
      Self::Present(value) => value,
      Self::Absent => std::panic::panic_any(EmptyUnwrap),
    }
  }

  /// Returns the payload, or `Err(EmptyUnwrap)` if absent.
  #[inline]
  pub fn try_unwrap(self) -> Result<T, EmptyUnwrap> {
    match self {
      Self::Present(value) => Ok(value),
      Self::Absent => Err(EmptyUnwrap),
    }
  }

  #[inline]
  pub fn unwrap_or(self, default: T) -> T {
    match self {
      Self::Present(value) => value,
      Self::Absent => default,
    }
  }

  /// Returns the payload, or the result of `default` if absent. `default` is only invoked when absent.
  #[inline]
  pub fn unwrap_or_else(self, default: impl FnOnce() -> T) -> T {
    match self {
      Self::Present(value) => value,
      Self::Absent => default(),
    }
  }
}


// Transformation

impl<T> Optional<T> {
  /// Applies `f` to the payload if present. `f` is not invoked when absent.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
    match self {
      Self::Present(value) => Optional::Present(f(value)),
      Self::Absent => Optional::Absent,
    }
  }

  #[inline]
  pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Present(value) => f(value),
      Self::Absent => default,
    }
  }

  #[inline]
  pub fn map_or_else<U>(self, default: impl FnOnce() -> U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Present(value) => f(value),
      Self::Absent => default(),
    }
  }

  /// Keeps the container if present and `predicate` holds for the payload; returns [`Absent`](Self::Absent)
  /// otherwise. `predicate` is not invoked when absent.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self {
      Self::Present(value) => if predicate(&value) { Self::Present(value) } else { Self::Absent },
      Self::Absent => Self::Absent,
    }
  }

  /// Chains a computation that itself produces a container, without nesting the result.
  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
    match self {
      Self::Present(value) => f(value),
      Self::Absent => Optional::Absent,
    }
  }

  /// Returns `self` if present, otherwise `other`. `other` is evaluated eagerly by the caller; use
  /// [`or_else`](Self::or_else) to defer it.
  #[inline]
  pub fn or(self, other: Self) -> Self {
    match self {
      present @ Self::Present(_) => present,
      Self::Absent => other,
    }
  }

  #[inline]
  pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
    match self {
      present @ Self::Present(_) => present,
      Self::Absent => f(),
    }
  }
}


// Matching

/// Both arms of a [`match_with`](Optional::match_with). Neither arm can be left out.
#[derive(Clone, Copy, Debug)]
pub struct Handlers<P, A> {
  pub present: P,
  pub absent: A,
}

impl<P, A> Handlers<P, A> {
  #[inline]
  pub const fn new(present: P, absent: A) -> Self { Self { present, absent } }
}

impl<T> Optional<T> {
  /// Dispatches on the variant, invoking exactly one of `handlers` and returning its result.
  #[inline]
  pub fn match_with<U, P, A>(self, handlers: Handlers<P, A>) -> U where
    P: FnOnce(T) -> U,
    A: FnOnce() -> U,
  {
    match self {
      Self::Present(value) => (handlers.present)(value),
      Self::Absent => (handlers.absent)(),
    }
  }
}


// Representation

impl<T> Optional<T> {
  #[inline]
  pub fn kind(&self) -> Kind {
    match self {
      Self::Present(_) => Kind::Present,
      Self::Absent => Kind::Absent,
    }
  }

  /// Projects this container into its structured form, borrowing the payload.
  #[inline]
  pub fn to_structured(&self) -> Structured<&T> { self.as_ref().into_structured() }

  /// Projects this container into its structured form.
  #[inline]
  pub fn into_structured(self) -> Structured<T> {
    let kind = self.kind();
    Structured { kind, value: self.into_option() }
  }
}

/// Formats as `Present(<repr of payload>)` or `Absent`. Never fails on account of the payload: payloads that
/// cannot be rendered are shown as a placeholder.
impl<T: Repr> Display for Optional<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::Present(value) => {
        f.write_str("Present(")?;
        value.fmt_repr(f)?;
        f.write_str(")")
      }
      Self::Absent => f.write_str("Absent"),
    }
  }
}


// Conversions

impl<T> From<Option<T>> for Optional<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::from_nullable(value) }
}

impl<T> From<Optional<T>> for Option<T> {
  #[inline]
  fn from(value: Optional<T>) -> Self {
    match value {
      Optional::Present(value) => Some(value),
      Optional::Absent => None,
    }
  }
}

impl<T> IntoIterator for Optional<T> {
  type Item = T;
  type IntoIter = std::option::IntoIter<T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.into_option().into_iter() }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
  type Item = &'a T;
  type IntoIter = std::option::IntoIter<&'a T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.iter() }
}


#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::panic::catch_unwind;

  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn inspection_is_exclusive() {
    assert!(present(1).is_present());
    assert!(!present(1).is_absent());
    assert!(!absent::<i32>().is_present());
    assert!(absent::<i32>().is_absent());
  }

  #[test]
  fn zero_like_values_stay_present() {
    assert_eq!(from_nullable(Some(0)), present(0));
    assert_eq!(from_nullable(Some("")), present(""));
    assert_eq!(from_nullable(Some(false)), present(false));
    assert_eq!(from_nullable::<i32>(None), absent());
  }

  #[cfg(feature = "serde")]
  #[test]
  fn json_null_is_absent() {
    assert_eq!(Optional::from_json(serde_json::Value::Null), absent());
    assert_eq!(Optional::from_json(serde_json::json!(0)), present(serde_json::json!(0)));
  }

  #[test]
  fn absent_values_are_equal() {
    assert_eq!(Optional::<String>::absent(), Optional::<String>::default());
    assert_eq!(present(String::from("a")), present(String::from("a")));
    assert_ne!(present(1), absent());
  }

  #[test]
  fn unwrap_returns_payload() {
    assert_eq!(present("value").unwrap(), "value");
    assert_eq!(present(7).try_unwrap(), Ok(7));
  }

  #[test]
  fn unwrap_absent_panics_with_empty_unwrap() {
    let payload = catch_unwind(|| absent::<i32>().unwrap()).unwrap_err();
    assert_eq!(EmptyUnwrap::from_panic_payload(payload.as_ref()), Some(&EmptyUnwrap));
  }

  #[test]
  fn try_unwrap_absent_is_error() {
    assert_eq!(absent::<i32>().try_unwrap(), Err(EmptyUnwrap));
  }

  #[test]
  fn unwrap_or_else_is_lazy() {
    let calls = Cell::new(0);
    let default = || {
      calls.set(calls.get() + 1);
      -1
    };
    assert_eq!(present(3).unwrap_or_else(default), 3);
    assert_eq!(calls.get(), 0);
    assert_eq!(absent().unwrap_or_else(default), -1);
    assert_eq!(calls.get(), 1);
    assert_eq!(absent().unwrap_or(5), 5);
  }

  #[test]
  fn map_skips_absent() {
    let calls = Cell::new(0);
    let double = |n: i32| {
      calls.set(calls.get() + 1);
      n * 2
    };
    assert_eq!(present(21).map(double), present(42));
    assert_eq!(absent().map(double), absent());
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn map_or_variants() {
    assert_eq!(present(2).map_or(0, |n| n + 1), 3);
    assert_eq!(absent::<i32>().map_or(0, |n| n + 1), 0);
    assert_eq!(present("abc").map_or_else(|| 0, str::len), 3);
    assert_eq!(absent::<&str>().map_or_else(|| 0, str::len), 0);
  }

  #[test]
  fn filter_keeps_or_drops() {
    assert_eq!(present(4).filter(|n| *n > 0), present(4));
    assert_eq!(present(-1).filter(|n| *n > 0), absent());

    let calls = Cell::new(0);
    let result = absent::<i32>().filter(|_| {
      calls.set(calls.get() + 1);
      true
    });
    assert_eq!(result, absent());
    assert_eq!(calls.get(), 0);
  }

  #[test]
  fn and_then_does_not_nest() {
    let half = |n: i32| if n % 2 == 0 { present(n / 2) } else { absent() };
    assert_eq!(present(10).and_then(half), present(5));
    assert_eq!(present(3).and_then(half), absent());

    let calls = Cell::new(0);
    let result = absent::<i32>().and_then(|n| {
      calls.set(calls.get() + 1);
      present(n)
    });
    assert_eq!(result, absent());
    assert_eq!(calls.get(), 0);
  }

  #[test]
  fn or_and_or_else() {
    assert_eq!(present(1).or(present(2)), present(1));
    assert_eq!(absent().or(present(2)), present(2));
    assert_eq!(absent::<i32>().or(absent()), absent());

    let calls = Cell::new(0);
    let fallback = || {
      calls.set(calls.get() + 1);
      present(9)
    };
    assert_eq!(present(1).or_else(fallback), present(1));
    assert_eq!(calls.get(), 0);
    assert_eq!(absent().or_else(fallback), present(9));
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn match_with_invokes_one_handler() {
    let handlers = || Handlers { present: |v: i32| v * 2, absent: || -1 };
    assert_eq!(present(3).match_with(handlers()), 6);
    assert_eq!(absent().match_with(handlers()), -1);

    let present_calls = Cell::new(0);
    let absent_calls = Cell::new(0);
    absent::<i32>().match_with(Handlers::new(
      |_: i32| present_calls.set(present_calls.get() + 1),
      || absent_calls.set(absent_calls.get() + 1),
    ));
    assert_eq!((present_calls.get(), absent_calls.get()), (0, 1));
  }

  #[test]
  #[should_panic(expected = "callback failed")]
  fn callback_panics_propagate() {
    let _ = present(1).map(|_: i32| -> i32 { panic!("callback failed") });
  }

  #[test]
  fn display_shape() {
    assert_eq!(present(42).to_string(), "Present(42)");
    assert_eq!(present("hi").to_string(), "Present(\"hi\")");
    assert_eq!(present(vec![1, 2, 3]).to_string(), "Present([1, 2, 3])");
    assert_eq!(absent::<i32>().to_string(), "Absent");
    assert_eq!(present(present(1)).to_string(), "Present(Present(1))");
  }

  #[test]
  fn borrowing_adapters() {
    let name = present(String::from("optio"));
    assert_eq!(name.as_deref(), present("optio"));
    assert_eq!(name.iter().count(), 1);
    assert_eq!(name.as_ref().cloned(), name);
    assert_eq!(present(&5).copied(), present(5));
    assert_eq!(absent::<String>().iter().count(), 0);
    assert_eq!(name.into_option(), Some(String::from("optio")));
    assert_eq!(Option::<i32>::from(absent()), None);
  }
}
