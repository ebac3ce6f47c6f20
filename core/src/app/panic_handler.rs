use std::panic;

use crate::error::EmptyUnwrap;

/// Installs a panic hook that reports [`EmptyUnwrap`] panics, which carry no message string, with a readable message
/// through `tracing`. Every other panic is passed on to the previously installed hook.
pub fn install_panic_handler() {
  let previous_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let Some(empty_unwrap) = EmptyUnwrap::from_panic_payload(info.payload()) else {
      return previous_hook(info);
    };
    let location = info.location().map(|l| l.to_string()).unwrap_or_else(|| "unknown location".to_string());
    if tracing::dispatcher::has_been_set() {
      tracing::error!(%location, "panicked: {}", empty_unwrap);
    } else {
      eprintln!("panicked at {}: {}", location, empty_unwrap);
    }
  }));
}
