use crate::auth::{password::Argon2Hasher, PasswordHashing};
use crate::clock::{Clock, FixedClock, SystemClock};
use std::fmt;
use std::sync::Arc;

/// Collaborators every user needs: a clock for logins and a password hasher.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub hasher: Arc<dyn PasswordHashing>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn init() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            hasher: Arc::new(Argon2Hasher),
        }
    }

    pub fn from_parts(clock: Arc<dyn Clock>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { clock, hasher }
    }

    /// Deterministic collaborators for tests: a frozen clock and a hasher
    /// that only tags its input.
    pub fn fake() -> Self {
        #[derive(Clone)]
        struct FakeHasher;
        impl PasswordHashing for FakeHasher {
            fn hash_password(&self, plain: &str) -> anyhow::Result<String> {
                Ok(format!("fake${plain}"))
            }
        }

        Self {
            clock: Arc::new(FixedClock("2024-01-01 12:00:00".into())),
            hasher: Arc::new(FakeHasher),
        }
    }
}
