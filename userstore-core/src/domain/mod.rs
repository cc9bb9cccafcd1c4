//! Core domain entities
//!
//! Pure data structures and the username rules - no I/O.

mod user;
pub mod username;
pub mod result;

pub use user::User;
