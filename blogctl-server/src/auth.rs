//! The single configured account

use std::fmt;

/// Why a login attempt was refused. The display text is shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    InvalidUsername,
    InvalidPassword,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUsername => write!(f, "Invalid username"),
            Self::InvalidPassword => write!(f, "Invalid password"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Username/password pair from configuration
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact comparison, username first.
    pub fn check(&self, username: &str, password: &str) -> Result<(), LoginError> {
        if username != self.username {
            return Err(LoginError::InvalidUsername);
        }
        if password != self.password {
            return Err(LoginError::InvalidPassword);
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
