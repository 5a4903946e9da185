use crate::clock::Clock;

/// Login state carried by every user. Starts logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
    last_login_at: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session logged in and stamps the login time.
    pub fn open(&mut self, clock: &dyn Clock) {
        self.logged_in = true;
        self.last_login_at = Some(clock.now_timestamp());
    }

    pub fn close(&mut self) {
        self.logged_in = false;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn last_login_at(&self) -> Option<&str> {
        self.last_login_at.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn open_and_close() {
        let clock = FixedClock("2024-06-01 08:30:00".into());
        let mut s = Session::new();
        assert!(!s.is_logged_in());
        assert_eq!(s.last_login_at(), None);

        s.open(&clock);
        assert!(s.is_logged_in());
        assert_eq!(s.last_login_at(), Some("2024-06-01 08:30:00"));

        // last login survives logout
        s.close();
        assert!(!s.is_logged_in());
        assert_eq!(s.last_login_at(), Some("2024-06-01 08:30:00"));

        s.close();
        assert!(!s.is_logged_in());
    }
}
