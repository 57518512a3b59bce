//! The acting user behind an inbound event

use std::fmt;

/// Identity of the user an event acts for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shopper {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl Shopper {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Best available display name: username, then first name, then the id
    pub fn display_name(&self) -> String {
        if let Some(ref username) = self.username {
            username.clone()
        } else if let Some(ref first) = self.first_name {
            first.clone()
        } else {
            self.id.to_string()
        }
    }

    /// t.me link target for operator notifications
    pub fn mention_target(&self) -> String {
        match self.username {
            Some(ref username) => username.clone(),
            None => self.id.to_string(),
        }
    }
}

impl fmt::Display for Shopper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_username() {
        let shopper = Shopper::new(5).with_username("ana").with_first_name("Ana");
        assert_eq!(shopper.display_name(), "ana");
    }

    #[test]
    fn display_name_falls_back_to_first_name_then_id() {
        assert_eq!(Shopper::new(5).with_first_name("Ana").display_name(), "Ana");
        assert_eq!(Shopper::new(5).display_name(), "5");
    }
}
