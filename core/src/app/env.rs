use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use crate::optional::{absent, present, Optional};

/// Loads variables from a `.env` file, searched for in the working directory and its ancestors, into the process
/// environment. Variables that are already set are not overridden.
///
/// Returns the path of the loaded file, or [`Absent`](Optional::Absent) if there is no such file.
pub fn load_dotenv_into_env() -> Result<Optional<PathBuf>, dotenvy::Error> {
  match dotenvy::dotenv() {
    Ok(path) => Ok(present(path)),
    Err(e) if e.not_found() => Ok(absent()),
    Err(e) => Err(e),
  }
}

/// Loads variables from the `.env`-formatted file at `path` into the process environment, like
/// [`load_dotenv_into_env`]. A missing file is [`Absent`](Optional::Absent).
pub fn load_dotenv_file_into_env(path: impl AsRef<Path>) -> Result<Optional<PathBuf>, dotenvy::Error> {
  let path = path.as_ref();
  match dotenvy::from_path(path) {
    Ok(()) => Ok(present(path.to_path_buf())),
    Err(e) if e.not_found() => Ok(absent()),
    Err(e) => Err(e),
  }
}

/// Reads environment variable `key`. Unset variables, and variables that are not valid unicode, are absent.
pub fn var(key: &str) -> Optional<String> {
  match env::var(key) {
    Ok(value) => present(value),
    Err(VarError::NotPresent) => absent(),
    Err(VarError::NotUnicode(_)) => {
      tracing::warn!(key, "ignoring environment variable that is not valid unicode");
      absent()
    }
  }
}

/// Reads environment variable `key`, falling back to `default` if it is not set.
pub fn var_or(key: &str, default: &str) -> String {
  var(key).unwrap_or_else(|| default.to_string())
}
