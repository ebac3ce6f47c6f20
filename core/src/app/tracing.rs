use std::io;
use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::optional::Optional;

/// Environment variable with the filter directives for console output.
pub const CONSOLE_FILTER_VAR: &str = "CONSOLE_LOG";
/// Environment variable with the filter directives for file output.
pub const FILE_FILTER_VAR: &str = "FILE_LOG";

#[derive(Default)]
pub struct AppTracingBuilder {
  console_filter: Optional<EnvFilter>,
  log_file_path: Optional<PathBuf>,
  file_filter: Optional<EnvFilter>,
}
impl AppTracingBuilder {
  pub fn with_console_filter(mut self, console_filter: EnvFilter) -> Self {
    self.console_filter = Optional::present(console_filter);
    self
  }

  pub fn with_log_file_path(mut self, log_file_path: impl Into<PathBuf>) -> Self {
    self.log_file_path = Optional::present(log_file_path.into());
    self
  }
  pub fn with_log_file_path_opt(mut self, log_file_path: Optional<impl Into<PathBuf>>) -> Self {
    self.log_file_path = log_file_path.map(Into::into);
    self
  }
  pub fn with_file_filter(mut self, file_filter: EnvFilter) -> Self {
    self.file_filter = Optional::present(file_filter);
    self
  }

  /// Installs the global subscriber. Filters that were not set are read from [`CONSOLE_FILTER_VAR`] and
  /// [`FILE_FILTER_VAR`], falling back to the default filter if unset or invalid.
  ///
  /// # Panics
  ///
  /// Panics if a global subscriber was already installed.
  pub fn build(self) -> AppTracing {
    let (console_filter, file) = self.into_filters();
    AppTracing::new(console_filter, file)
  }

  fn into_filters(self) -> (EnvFilter, Optional<(PathBuf, EnvFilter)>) {
    let console_filter = self.console_filter.unwrap_or_else(|| filter_from_env(CONSOLE_FILTER_VAR));
    let file_filter = self.file_filter;
    let file = self.log_file_path
      .map(|path| (path, file_filter.unwrap_or_else(|| filter_from_env(FILE_FILTER_VAR))));
    (console_filter, file)
  }
}

/// Filter from the directives in environment variable `var`; the default filter if unset or invalid.
fn filter_from_env(var: &str) -> EnvFilter {
  EnvFilter::try_from_env(var).unwrap_or_default()
}

/// Keeps file logging alive; buffered log lines are flushed when this is dropped.
pub struct AppTracing {
  _file_tracing: FileTracing,
}
#[cfg(feature = "app_tracing_file")]
#[derive(Default)]
struct FileTracing {
  _guard: Optional<tracing_appender::non_blocking::WorkerGuard>,
}
#[cfg(not(feature = "app_tracing_file"))]
#[derive(Default)]
struct FileTracing;


impl AppTracing {
  fn new(
    console_filter: EnvFilter,
    file: Optional<(PathBuf, EnvFilter)>,
  ) -> Self {
    let layered = tracing_subscriber::registry();
    let layered = layered.with(
      tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter)
    );

    #[cfg(feature = "app_tracing_file")] let _file_tracing = {
      use std::fs::{create_dir_all, File};
      use std::io::BufWriter;

      match file {
        Optional::Present((file_path, filter)) => {
          let result = (|| {
            if let Some(parent) = file_path.parent() {
              create_dir_all(parent)?;
            }
            File::create(&file_path)
          })();
          match result {
            Err(e) => {
              layered.init();
              tracing::warn!("Cannot log to file; could not truncate/create and open log file '{}' for writing: {}", file_path.display(), e);
              FileTracing::default()
            }
            Ok(log_file) => {
              let writer = BufWriter::new(log_file);
              let (non_blocking, guard) = tracing_appender::non_blocking(writer);
              let layered = layered.with(
                tracing_subscriber::fmt::layer()
                  .with_writer(non_blocking)
                  .with_ansi(false)
                  .with_filter(filter)
              );
              layered.init();
              FileTracing { _guard: Optional::present(guard) }
            }
          }
        }
        Optional::Absent => {
          layered.init();
          FileTracing { _guard: Optional::absent() }
        }
      }
    };
    #[cfg(not(feature = "app_tracing_file"))] let _file_tracing = {
      layered.init();
      if let Optional::Present((file_path, _)) = file {
        tracing::warn!("Cannot log to file '{}'; file logging is not enabled in this build", file_path.display());
      }
      FileTracing
    };

    Self { _file_tracing }
  }
}
