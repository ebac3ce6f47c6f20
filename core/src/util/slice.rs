use crate::optional::Optional;

/// Slice access that yields [`Optional`] instead of panicking or returning [`Option`].
pub trait SliceExt<T> {
  /// Element at `index`, or [`Absent`](Optional::Absent) if out of bounds.
  fn get_optional(&self, index: usize) -> Optional<&T>;

  /// First element satisfying `predicate`, or [`Absent`](Optional::Absent) if there is none.
  fn find_optional(&self, predicate: impl FnMut(&T) -> bool) -> Optional<&T>;
}

impl<T> SliceExt<T> for [T] {
  #[inline]
  fn get_optional(&self, index: usize) -> Optional<&T> {
    self.get(index).into()
  }

  #[inline]
  fn find_optional(&self, mut predicate: impl FnMut(&T) -> bool) -> Optional<&T> {
    self.iter().find(|item| predicate(item)).into()
  }
}


#[cfg(test)]
mod tests {
  use crate::optional::{absent, present};

  use super::*;

  #[test]
  fn get_in_and_out_of_bounds() {
    let numbers = [10, 20, 30, 40, 50];
    assert_eq!(numbers.get_optional(2), present(&30));
    assert_eq!(numbers.get_optional(10), absent());
    assert_eq!(numbers.get_optional(2).copied().unwrap_or(-1), 30);
  }

  #[test]
  fn find_first_match() {
    let words = vec!["alpha", "beta", "gamma"];
    assert_eq!(words.find_optional(|word| word.starts_with('g')), present(&"gamma"));
    assert_eq!(words.find_optional(|word| word.is_empty()), absent());
  }
}
