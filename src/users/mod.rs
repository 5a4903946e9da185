pub mod dto;
pub mod input;
pub mod models;
pub mod services;

pub use models::{
    instance_count, reset_instance_count, AdminUser, CustomerUser, MembershipLevel, Permission,
    Role, User, UserBase,
};
