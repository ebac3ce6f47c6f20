use optio_core::{absent, filter_map, map2, present, sequence, Handlers, Optional};
use optio_core::repr::{Repr, Structural};
use optio_core::util::parse::{parse_int, parse_json};
use optio_core::util::slice::SliceExt;

use crate::config::Config;
use crate::users::{describe, Users};

/// Lines of the walkthrough, grouped in titled sections.
pub fn walkthrough(users: &Users, config: &Config) -> Vec<String> {
  let mut lines = Vec::new();
  section(&mut lines, "users", user_lines(users, config));
  section(&mut lines, "utilities", utility_lines());
  section(&mut lines, "matching", matching_lines());
  section(&mut lines, "chaining", chaining_lines());
  section(&mut lines, "risky input", risky_input_lines());
  lines
}

fn section(lines: &mut Vec<String>, title: &str, section_lines: Vec<String>) {
  lines.push(format!("== {} ==", title));
  lines.extend(section_lines);
}

fn user_lines(users: &Users, config: &Config) -> Vec<String> {
  let mut lines = Vec::new();
  for id in [1, 999] {
    lines.push(format!("user {}: {}", id, users.display_name(id, &config.unknown_user)));
    lines.push(format!("user {} city: {}", id, users.city(id).unwrap_or(&config.unknown_city)));
    lines.push(format!("user {} info: {}", id, users.info(id).map(Structural)));
    lines.push(describe(users.find_by_id(id)));
  }
  lines
}

fn utility_lines() -> Vec<String> {
  let numbers = [10, 20, 30, 40, 50];
  let strings = ["1", "2", "abc", "3", "def", "4"];
  vec![
    format!("numbers[2]: {}", numbers.get_optional(2).copied().unwrap_or(-1)),
    format!("numbers[10]: {}", numbers.get_optional(10).copied().unwrap_or(-1)),
    format!("valid JSON: {}", parse_json(r#"{"name": "test", "value": 42}"#)),
    format!("invalid JSON: {}", parse_json("{invalid json}")),
    format!("parse \"123\": {}", parse_int("123").unwrap_or(-1)),
    format!("parse \"abc\": {}", parse_int("abc").unwrap_or(-1)),
    format!("combine 5 + 10: {}", map2(present(5), present(10), |a, b| a + b).unwrap_or(0)),
    format!("combine 5 + nothing: {}", map2(present(5), absent::<i32>(), |a, b| a + b).unwrap_or(0)),
    format!("parsed numbers: {}", filter_map(strings, parse_int).repr()),
    format!("all present: {}", sequence([present(1), present(2), present(3)])),
    format!("with absent: {}", sequence([present(1), absent(), present(3)])),
  ]
}

fn matching_lines() -> Vec<String> {
  fn describe_value<T: Repr>(value: Optional<T>) -> String {
    value.match_with(Handlers {
      present: |value: T| format!("value: {}", value.repr()),
      absent: || "no value".to_string(),
    })
  }

  vec![
    describe_value(present(42)),
    describe_value(present("Hello")),
    describe_value(present(vec![1, 2, 3])),
    describe_value(parse_json(r#"{"name": "test", "value": 123}"#)),
    describe_value(absent::<i32>()),
  ]
}

fn chaining_lines() -> Vec<String> {
  let words = present("  Hello World  ")
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase)
    .map(|s| s.split(' ').map(str::to_string).collect::<Vec<_>>())
    .filter(|words| words.len() > 1)
    .map(|words| words.join("-"))
    .unwrap_or_else(|| "processing-failed".to_string());

  let math = present(10)
    .filter(|n| *n > 0)
    .map(|n| n * 2)
    .and_then(|n| if n > 15 { present(n) } else { absent() })
    .map(|n| f64::from(n).sqrt())
    .map(|n| (n * 100.0).round() / 100.0)
    .unwrap_or(0.0);

  vec![
    format!("string chain: {}", words),
    format!("math chain: {}", math),
  ]
}

fn risky_input_lines() -> Vec<String> {
  fn risky(input: &str) -> Optional<i64> {
    present(input)
      .filter(|input| !input.is_empty())
      .and_then(parse_int)
      .filter(|n| *n >= 0)
  }

  ["", "abc", "-5", "0", "42"].into_iter()
    .map(|input| {
      let result = risky(input).map(|n| n * 2).filter(|n| *n > 10).unwrap_or(-1);
      format!("input {:?} -> {}", input, result)
    })
    .collect()
}


#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn user_section() {
    let lines = user_lines(&Users::with_sample_users(), &Config::default());
    assert_eq!(lines, vec![
      "user 1: Zhang San".to_string(),
      "user 1 city: Beijing".to_string(),
      r#"user 1 info: Present({"name":"Zhang San","email":"zhangsan@example.com","city":"Beijing"})"#.to_string(),
      "user: Zhang San (zhangsan@example.com)".to_string(),
      "user 999: unknown user".to_string(),
      "user 999 city: unknown city".to_string(),
      "user 999 info: Absent".to_string(),
      "user does not exist".to_string(),
    ]);
  }

  #[test]
  fn utility_section() {
    let lines = utility_lines();
    assert_eq!(lines[0], "numbers[2]: 30");
    assert_eq!(lines[1], "numbers[10]: -1");
    assert_eq!(lines[2], r#"valid JSON: Present({"name":"test","value":42})"#);
    assert_eq!(lines[3], "invalid JSON: Absent");
    assert_eq!(lines[8], "parsed numbers: [1, 2, 3, 4]");
    assert_eq!(lines[9], "all present: Present([1, 2, 3])");
    assert_eq!(lines[10], "with absent: Absent");
  }

  #[test]
  fn matching_section() {
    assert_eq!(matching_lines(), vec![
      "value: 42".to_string(),
      "value: \"Hello\"".to_string(),
      "value: [1, 2, 3]".to_string(),
      r#"value: {"name":"test","value":123}"#.to_string(),
      "no value".to_string(),
    ]);
  }

  #[test]
  fn chaining_section() {
    assert_eq!(chaining_lines(), vec!["string chain: hello-world".to_string(), "math chain: 4.47".to_string()]);
  }

  #[test]
  fn risky_input_section() {
    let lines = risky_input_lines();
    assert_eq!(lines.first().map(String::as_str), Some(r#"input "" -> -1"#));
    assert_eq!(lines.last().map(String::as_str), Some(r#"input "42" -> 84"#));
  }

  #[test]
  fn sections_are_titled() {
    let lines = walkthrough(&Users::with_sample_users(), &Config::default());
    assert_eq!(lines[0], "== users ==");
    assert!(lines.contains(&"== risky input ==".to_string()));
  }
}
