use std::path::PathBuf;

use optio_core::app::env;
use optio_core::Optional;

/// Demo configuration, read from the environment (and a `.env` file, if any).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Config {
  /// Shown in place of the name of a user that does not exist.
  pub unknown_user: String,
  /// Shown in place of the city of a user without a profile.
  pub unknown_city: String,
  /// File to additionally write logs to.
  pub log_file: Optional<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      unknown_user: "unknown user".to_string(),
      unknown_city: "unknown city".to_string(),
      log_file: Optional::absent(),
    }
  }
}

impl Config {
  pub fn from_env() -> Self {
    let default = Self::default();
    Self {
      unknown_user: env::var("OPTIO_UNKNOWN_USER").unwrap_or(default.unknown_user),
      unknown_city: env::var("OPTIO_UNKNOWN_CITY").unwrap_or(default.unknown_city),
      log_file: env::var("OPTIO_LOG_FILE").filter(|path| !path.is_empty()).map(PathBuf::from),
    }
  }
}
