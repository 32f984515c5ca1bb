//! The credential record stored inside a vault.
//!
//! A record is an ordered (username, password, note) triple.  Two records
//! are equal only when all three strings are identical.  Field memory is
//! wiped when a record is dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single credential entry.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct Record {
    pub username: String,
    pub password: String,
    /// Free-form note; empty when none was given.
    pub note: String,
}

impl Record {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            note: note.into(),
        }
    }

    /// Exact field-wise comparison against borrowed values.
    pub fn matches(&self, username: &str, password: &str, note: &str) -> bool {
        self.username == username && self.password == password && self.note == note
    }

    /// The three fields in wire order.
    pub fn fields(&self) -> [&str; 3] {
        [self.username.as_str(), self.password.as_str(), self.note.as_str()]
    }
}

// Passwords never end up in logs or panic messages.
impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("note", &self.note)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_field_wise() {
        let a = Record::new("alice", "p1", "work");
        assert_eq!(a, Record::new("alice", "p1", "work"));
        assert_ne!(a, Record::new("alice", "p1", ""));
        assert_ne!(a, Record::new("alice", "p2", "work"));
        assert!(a.matches("alice", "p1", "work"));
        assert!(!a.matches("Alice", "p1", "work"));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", Record::new("bob", "hunter2", "home"));
        assert!(rendered.contains("bob"));
        assert!(!rendered.contains("hunter2"));
    }
}
