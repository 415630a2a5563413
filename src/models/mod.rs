pub mod attendance;
pub mod event_type;
pub mod face;
pub mod log_entry;
pub mod serde_fmt;
pub mod status;
pub mod summary;
pub mod user;
