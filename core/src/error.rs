use thiserror::Error;

/// Error produced when the payload of an [`Absent`](crate::Optional::Absent) container is requested.
///
/// This is the only failure the container itself can produce. [`Optional::try_unwrap`](crate::Optional::try_unwrap)
/// returns it, and [`Optional::unwrap`](crate::Optional::unwrap) panics with it as the panic payload, so an unwind can
/// be caught and [downcast](std::any::Any::downcast_ref) to `EmptyUnwrap` to tell it apart from other panics.
#[derive(Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Error)]
#[error("called `Optional::unwrap()` on an `Absent` value")]
pub struct EmptyUnwrap;

impl EmptyUnwrap {
  /// Returns the `EmptyUnwrap` carried by a panic `payload`, if that is what the panic was raised with.
  #[inline]
  pub fn from_panic_payload(payload: &(dyn std::any::Any + Send)) -> Option<&EmptyUnwrap> {
    payload.downcast_ref::<EmptyUnwrap>()
  }
}
