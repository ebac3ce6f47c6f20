use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use optio_core::app::env;
use optio_core::app::panic_handler::install_panic_handler;
use optio_core::app::tracing::AppTracingBuilder;
use optio_core::{filter_map, present, Optional};
use optio_core::repr::Repr;
use optio_core::util::parse::{parse_int, parse_json};

use crate::config::Config;
use crate::users::{describe, User, Users};

mod config;
mod users;
mod walkthrough;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Look up a user in the sample directory
  Lookup {
    #[arg()]
    id: u32,
  },
  /// Look up a user in the sample directory by email address
  FindEmail {
    #[arg()]
    email: String,
  },
  /// Add a user to the sample directory and describe it
  Register {
    #[arg()]
    id: u32,
    #[arg()]
    name: String,
    #[arg(long)]
    email: Option<String>,
  },
  /// Print the values that parse as integers
  Parse {
    #[arg()]
    values: Vec<String>,
  },
  /// Print the structured form of parsing text as JSON
  Json {
    #[arg()]
    text: String,
  },
  /// Print a walkthrough of the optional-value API
  Walkthrough,
}

fn main() -> Result<(), Box<dyn Error>> {
  let dotenv = env::load_dotenv_into_env();
  install_panic_handler();
  let config = Config::from_env();
  let _tracing = AppTracingBuilder::default()
    .with_log_file_path_opt(config.log_file.clone())
    .build();
  log_dotenv_outcome(dotenv);

  let cli = Cli::parse();
  run(cli.command, &config)
}

/// Logs the outcome of loading a `.env` file, which is not required. Returns whether a file was loaded.
fn log_dotenv_outcome<E: Display>(outcome: Result<Optional<PathBuf>, E>) -> bool {
  match outcome {
    Ok(Optional::Present(path)) => {
      debug!(path = %path.display(), "loaded environment from file");
      true
    }
    Ok(Optional::Absent) => false,
    Err(cause) => {
      warn!(%cause, "ignoring .env file that could not be loaded");
      false
    }
  }
}

fn run(command: Command, config: &Config) -> Result<(), Box<dyn Error>> {
  let mut users = Users::with_sample_users();
  match command {
    Command::Lookup { id } => {
      println!("name: {}", users.display_name(id, &config.unknown_user));
      println!("city: {}", users.city(id).unwrap_or(&config.unknown_city));
      println!("email: {}", users.email_or(id, "none"));
      println!("info: {}", serde_json::to_string(&users.info(id))?);
      println!("{}", describe(users.find_by_id(id)));
    }
    Command::FindEmail { email } => {
      println!("{}", describe(users.find_by_email(&email)));
    }
    Command::Register { id, name, email } => {
      let mut user = User::new(id, name);
      if let Some(email) = email {
        user = user.with_email(email);
      }
      println!("{}", describe(present(users.save(user)?)));
    }
    Command::Parse { values } => {
      let numbers = filter_map(&values, |value| parse_int(value));
      debug!(parsed = numbers.len(), dropped = values.len() - numbers.len(), "parsed values");
      println!("{}", numbers.repr());
    }
    Command::Json { text } => {
      println!("{}", parse_json(&text).to_json_value());
    }
    Command::Walkthrough => {
      for line in walkthrough::walkthrough(&users, config) {
        println!("{}", line);
      }
    }
  }
  Ok(())
}


#[cfg(test)]
mod tests {
  use optio_core::absent;

  use super::*;

  #[test]
  fn dotenv_outcome() {
    assert!(log_dotenv_outcome(Ok::<_, String>(present(PathBuf::from(".env")))));
    assert!(!log_dotenv_outcome(Ok::<_, String>(absent())));
  }

  #[test]
  fn malformed_dotenv_is_not_fatal() {
    let path = std::env::temp_dir().join(format!("optio_demo_malformed_{}.env", std::process::id()));
    std::fs::write(&path, "this is not valid\n").unwrap();
    let outcome = env::load_dotenv_file_into_env(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(outcome.is_err());
    assert!(!log_dotenv_outcome(outcome));
  }

  #[test]
  fn register_rejects_duplicates() {
    let config = Config::default();
    assert!(run(Command::Register { id: 9, name: "Sun Qi".to_string(), email: None }, &config).is_ok());
    assert!(run(Command::Register { id: 1, name: "Again".to_string(), email: None }, &config).is_err());
    assert!(run(Command::FindEmail { email: "lisi@example.com".to_string() }, &config).is_ok());
  }
}
