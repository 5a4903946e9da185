pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod users;

pub use error::{UserError, UserResult};
pub use state::AppState;
