use crate::user::{User, UserChanges, UserMessage};
use derive_more::Display;
use diesel::result::Error as DieselError;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Display, PartialEq)]
pub enum StoreError {
    #[display(fmt = "User can't be found")]
    NotFound,
    #[display(fmt = "{}", _0)]
    Backend(String),
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> StoreError {
        match error {
            DieselError::NotFound => StoreError::NotFound,
            err => StoreError::Backend(err.to_string()),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> StoreError {
        StoreError::Backend(format!("Failed getting db connection: {}", error))
    }
}

/// Persistence for user records. Both backends honor the same contract:
/// `get`, `update` and `delete` answer `NotFound` for unknown ids, and
/// `create` always assigns a fresh id and creation timestamp.
#[cfg_attr(test, automock)]
pub trait UserStore: Send + Sync {
    fn list(&self) -> Result<Vec<User>, StoreError>;

    fn get(&self, id: &str) -> Result<User, StoreError>;

    fn create(&self, user: UserMessage) -> Result<User, StoreError>;

    /// Overwrites only the fields present in `changes`.
    fn update(&self, id: &str, changes: UserChanges) -> Result<User, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_is_not_found() {
        assert_eq!(StoreError::from(DieselError::NotFound), StoreError::NotFound);
    }

    #[test]
    fn other_diesel_errors_are_backend() {
        let error = StoreError::from(DieselError::RollbackTransaction);

        match error {
            StoreError::Backend(message) => assert!(!message.is_empty()),
            StoreError::NotFound => panic!("expected a backend error"),
        }
    }
}
