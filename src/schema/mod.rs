//! Record models for remindal
//!
//! Users and calendar entries, with field-level validation applied
//! before any write reaches the store.

mod types;

pub use types::{CalendarDate, CalendarDocument, User, UserDocument};
