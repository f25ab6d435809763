//! Document storage for remindal
//!
//! The REST layer only talks to [`DocumentStore`]. Filters arrive as
//! serialized filter documents; the store never sees query parameters.
//!
//! [`MemoryStore`] is the bundled engine; it evaluates filter documents
//! with the same semantics a Mongo-style backend applies.

mod errors;
mod matcher;
mod memory;
mod store;

pub use errors::{StoreError, StoreResult};
pub use matcher::{compare_values, FilterMatcher};
pub use memory::MemoryStore;
pub use store::{
    Direction, DocumentStore, SortSpec, CALENDAR_COLLECTION, ID_KEY, USER_COLLECTION,
};
