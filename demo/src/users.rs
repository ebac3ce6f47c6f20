use std::fmt::{self, Debug, Formatter};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use optio_core::{absent, present, Handlers, Optional};
use optio_core::util::slice::SliceExt;

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Profile {
  pub age: u32,
  pub city: String,
}

#[derive(Clone, Eq, PartialEq, Serialize)]
pub struct User {
  pub id: u32,
  pub name: String,
  pub email: Option<String>,
  pub profile: Option<Profile>,
}

impl User {
  pub fn new(id: u32, name: impl Into<String>) -> Self {
    Self { id, name: name.into(), email: None, profile: None }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  pub fn with_profile(mut self, age: u32, city: impl Into<String>) -> Self {
    self.profile = Some(Profile { age, city: city.into() });
    self
  }

  #[inline]
  pub fn email(&self) -> Optional<&str> { Optional::from_nullable(self.email.as_deref()) }

  #[inline]
  pub fn profile(&self) -> Optional<&Profile> { Optional::from_nullable(self.profile.as_ref()) }
}

impl Debug for User {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("email", &self.email.as_ref().map(|_| "[redacted]"))
      .field("profile", &self.profile)
      .finish()
  }
}

/// Contact information of a user that has both an email address and a profile.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct UserInfo {
  pub name: String,
  pub email: String,
  pub city: String,
}


// Implementation

/// In-memory user directory.
#[derive(Default, Clone, Debug)]
pub struct Users {
  users: Vec<User>,
}

#[derive(Debug, Error)]
pub enum UsersError {
  #[error("User name must not be empty")]
  EmptyName,
  #[error("User with id {0} already exists")]
  DuplicateId(u32),
}

impl Users {
  pub fn new(users: Vec<User>) -> Self {
    Self { users }
  }

  /// Directory with a couple of sample users.
  pub fn with_sample_users() -> Self {
    Self::new(vec![
      User::new(1, "Zhang San").with_email("zhangsan@example.com").with_profile(25, "Beijing"),
      User::new(2, "Li Si").with_email("lisi@example.com").with_profile(30, "Shanghai"),
      User::new(3, "Wang Wu"),
    ])
  }

  #[instrument(skip(self))]
  pub fn find_by_id(&self, id: u32) -> Optional<&User> {
    let user = self.users.find_optional(|user| user.id == id);
    debug!(found = user.is_present(), "looked up user by id");
    user
  }

  #[instrument(skip(self))]
  pub fn find_by_email(&self, email: &str) -> Optional<&User> {
    self.users.find_optional(|user| user.email.as_deref() == Some(email))
  }

  #[instrument(skip_all, fields(user.id = user.id), err)]
  pub fn save(&mut self, user: User) -> Result<&User, UsersError> {
    if user.name.is_empty() {
      return Err(UsersError::EmptyName);
    }
    if self.find_by_id(user.id).is_present() {
      return Err(UsersError::DuplicateId(user.id));
    }
    self.users.push(user);
    let index = self.users.len() - 1;
    Ok(&self.users[index])
  }


  pub fn display_name(&self, id: u32, fallback: &str) -> String {
    self.find_by_id(id)
      .map(|user| user.name.clone())
      .unwrap_or_else(|| fallback.to_string())
  }

  pub fn city(&self, id: u32) -> Optional<&str> {
    self.find_by_id(id)
      .and_then(User::profile)
      .map(|profile| profile.city.as_str())
  }

  pub fn info(&self, id: u32) -> Optional<UserInfo> {
    self.find_by_id(id).and_then(|user| {
      let (email, profile) = match (user.email(), user.profile()) {
        (Optional::Present(email), Optional::Present(profile)) => (email, profile),
        _ => return absent(),
      };
      present(UserInfo { name: user.name.clone(), email: email.to_string(), city: profile.city.clone() })
    })
  }

  /// Email address of user `id`, or `fallback` if the user does not exist or has no email address.
  pub fn email_or(&self, id: u32, fallback: &str) -> String {
    self.find_by_id(id)
      .and_then(User::email)
      .filter(|email| !email.is_empty())
      .map_or_else(|| fallback.to_string(), str::to_string)
  }
}

/// One-line description of a possibly missing user.
pub fn describe(user: Optional<&User>) -> String {
  user.match_with(Handlers {
    present: |user: &User| {
      let email = user.email().unwrap_or("no email");
      format!("user: {} ({})", user.name, email)
    },
    absent: || "user does not exist".to_string(),
  })
}
