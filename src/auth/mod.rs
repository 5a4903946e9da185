pub mod password;
pub mod services;
pub mod session;

/// Passwords with fewer characters than this are refused by [`Resettable::reset_password`].
pub const MIN_PASSWORD_LEN: usize = 8;

/// One-way password hashing. The result is stored as-is and never inspected.
pub trait PasswordHashing: Send + Sync {
    fn hash_password(&self, plain: &str) -> anyhow::Result<String>;
}

/// Anything that can have its password reset.
pub trait Resettable {
    /// Returns `false` without changing anything when the password is too
    /// short or cannot be hashed.
    fn reset_password(&mut self, new_password: &str) -> bool;
}
