pub mod dto;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{NewUser, ProfileUpdate};
pub use repo_types::{Usage, User};
