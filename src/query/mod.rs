//! # Query Filter Compiler
//!
//! Compiles HTTP query parameters into a typed, validated filter and
//! renders it as a document-store filter.
//!
//! ```
//! use remindal::query::{serialize, FieldRegistry, QueryCompiler};
//!
//! let registry = FieldRegistry::users().unwrap();
//! let filter = QueryCompiler::new(&registry)
//!     .compile([("age", "18%-65"), ("name", "Ann%,Bob")])
//!     .unwrap();
//! assert_eq!(filter.len(), 2);
//!
//! let doc = serialize(&filter);
//! assert!(doc.to_string().starts_with(r#"{"$and":"#));
//! ```

pub mod coerce;
pub mod compiler;
pub mod errors;
pub mod filter;
pub mod parser;
pub mod registry;
pub mod serializer;

pub use coerce::{Coercion, CoercionError, TypedValue};
pub use compiler::{CompileResult, QueryCompiler, UnknownFieldPolicy};
pub use errors::{CompileErrors, FilterError, FilterErrorKind, RegistryError, RegistryResult};
pub use filter::{CompositeFilter, FilterTerm};
pub use parser::{classify, RawTerm, LIST_DELIMITER, RANGE_DELIMITER};
pub use registry::{FieldRegistry, FieldSpec, FilterKind, CALENDAR_FIELDS, USER_FIELDS};
pub use serializer::{serialize, FilterDocument};
