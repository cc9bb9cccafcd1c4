//! Service layer
//!
//! The user store is the core component. The other services support the
//! CLI: inspecting the interpolated SQL, seeding sample rows and recording
//! events.

mod demo;
pub mod inspect;
pub mod logging;
mod user_store;

pub use demo::{demo_users, DemoService};
pub use inspect::{inspect_delete, inspect_lookup, InjectionReport, StatementKind};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use user_store::UserStore;
