//! Parsing that yields [`Optional`] instead of an error: text that does not parse is simply absent.

use crate::optional::{absent, Optional};

/// Parses a radix-10 integer from the start of `text`.
///
/// Leading whitespace is skipped, an optional `+` or `-` sign is accepted, and the longest run of ASCII digits that
/// follows is parsed; anything after it is ignored, so `"12abc"` parses as `12`. Returns
/// [`Absent`](Optional::Absent) when there are no digits or the value does not fit in an `i64`.
pub fn parse_int(text: &str) -> Optional<i64> {
  let text = text.trim_start();
  let (negative, rest) = match text.as_bytes().first() {
    Some(b'-') => (true, &text[1..]),
    Some(b'+') => (false, &text[1..]),
    _ => (false, text),
  };
  let end = rest.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(rest.len());
  if end == 0 {
    return absent();
  }

  let value = rest[..end].bytes().try_fold(0i64, |value, digit| {
    let digit = i64::from(digit - b'0');
    let value = value.checked_mul(10)?;
    // Accumulate negative values downwards so that `i64::MIN` is reachable.
    if negative { value.checked_sub(digit) } else { value.checked_add(digit) }
  });
  Optional::from_nullable(value)
}

/// Parses `text` as JSON. Invalid JSON and JSON `null` are [`Absent`](Optional::Absent).
#[cfg(feature = "serde")]
pub fn parse_json(text: &str) -> Optional<serde_json::Value> {
  match serde_json::from_str(text) {
    Ok(value) => Optional::from_json(value),
    Err(cause) => {
      tracing::debug!(%cause, "text is not valid JSON");
      absent()
    }
  }
}
