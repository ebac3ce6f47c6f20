//! Combinators over collections of [`Optional`] values.
//!
//! Inputs are consumed lazily: combinators that can stop early do not pull, evaluate, or map items past the point
//! where the outcome is decided.

use crate::optional::Optional;

/// Collects the payloads of `items` in order if every item is present; returns [`Absent`](Optional::Absent) at the
/// first absent item without pulling any further items.
pub fn sequence<T>(items: impl IntoIterator<Item=Optional<T>>) -> Optional<Vec<T>> {
  items.into_iter().collect()
}

/// Applies `f` to each item and collects the payloads if every result is present.
///
/// Short-circuits: `f` is not invoked on the items that follow the first absent result.
pub fn traverse<T, U>(items: impl IntoIterator<Item=T>, f: impl FnMut(T) -> Optional<U>) -> Optional<Vec<U>> {
  sequence(items.into_iter().map(f))
}

/// Combines two containers with `f`; present only if both are present.
#[inline]
pub fn map2<T, U, V>(a: Optional<T>, b: Optional<U>, f: impl FnOnce(T, U) -> V) -> Optional<V> {
  a.and_then(|a| b.map(|b| f(a, b)))
}

/// Returns the first present item, or [`Absent`](Optional::Absent) if there is none (including for empty input).
pub fn first_present<T>(items: impl IntoIterator<Item=Optional<T>>) -> Optional<T> {
  items.into_iter().find(Optional::is_present).unwrap_or_default()
}

/// Applies `f` to every item, keeping the payloads of present results in their original order. Absent results are
/// dropped.
pub fn filter_map<T, U>(items: impl IntoIterator<Item=T>, f: impl FnMut(T) -> Optional<U>) -> Vec<U> {
  items.into_iter().flat_map(f).collect()
}

/// Collects an iterator of containers into a container of a collection, stopping at the first absent item.
impl<T, V: FromIterator<T>> FromIterator<Optional<T>> for Optional<V> {
  fn from_iter<I: IntoIterator<Item=Optional<T>>>(items: I) -> Self {
    let mut absent = false;
    let collected = items.into_iter()
      .map_while(|item| match item {
        Optional::Present(value) => Some(value),
        Optional::Absent => {
          absent = true;
          None
        }
      })
      .collect();
    if absent { Optional::Absent } else { Optional::Present(collected) }
  }
}
