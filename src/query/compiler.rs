//! # Filter Compiler
//!
//! Turns the query parameters of one request into a [`CompositeFilter`].
//!
//! Per parameter: skip empty values, resolve the field, classify the
//! value, coerce every token, check range ordering, append the term.
//! A failure aborts that parameter only; every failure of the call is
//! returned together.

use std::cmp::Ordering;

use tracing::debug;

use super::coerce::TypedValue;
use super::errors::{CompileErrors, FilterError, FilterErrorKind};
use super::filter::{CompositeFilter, FilterTerm};
use super::parser::{classify, RawTerm};
use super::registry::{FieldRegistry, FieldSpec};

/// Result of compiling one parameter set
pub type CompileResult = Result<CompositeFilter, CompileErrors>;

/// What to do with parameters naming no registered field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Report `UnknownField`
    #[default]
    Reject,
    /// Skip the parameter
    Ignore,
}

/// Per-request filter builder.
///
/// Borrows the shared registry; owns the in-progress filter and the
/// collected errors. Not meant to be shared between requests.
#[derive(Debug)]
pub struct QueryCompiler<'r> {
    registry: &'r FieldRegistry,
    policy: UnknownFieldPolicy,
    filter: CompositeFilter,
    errors: Vec<FilterError>,
}

impl<'r> QueryCompiler<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            policy: UnknownFieldPolicy::default(),
            filter: CompositeFilter::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compile a full parameter multimap in one call
    pub fn compile<I, K, V>(mut self, params: I) -> CompileResult
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            self.add(key.as_ref(), value.as_ref());
        }
        self.finish()
    }

    /// Process a single `key=value` pair
    pub fn add(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }

        let Some(spec) = self.registry.lookup(key) else {
            match self.policy {
                UnknownFieldPolicy::Reject => {
                    self.errors
                        .push(FilterError::new(FilterErrorKind::UnknownField, key, value));
                }
                UnknownFieldPolicy::Ignore => {
                    debug!(
                        collection = self.registry.collection(),
                        field = key,
                        "ignoring unknown filter field"
                    );
                }
            }
            return;
        };

        match build_term(spec, value) {
            Ok(term) => self.filter.push(term),
            Err(kind) => self.errors.push(FilterError::new(kind, key, value)),
        }
    }

    /// Errors collected so far
    pub fn errors(&self) -> &[FilterError] {
        &self.errors
    }

    /// The composite filter, or every collected error
    pub fn finish(self) -> CompileResult {
        match CompileErrors::from_vec(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(self.filter),
        }
    }
}

fn build_term(spec: &FieldSpec, value: &str) -> Result<FilterTerm, FilterErrorKind> {
    let key = spec.storage_key;
    match classify(value, spec)? {
        RawTerm::Equality(token) => Ok(FilterTerm::equals(key, coerce(spec, token)?)),
        RawTerm::Membership(tokens) => {
            let values = tokens
                .into_iter()
                .map(|token| {
                    if token.is_empty() {
                        return Err(FilterErrorKind::EmptyListItem);
                    }
                    coerce(spec, token)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FilterTerm::one_of(key, values))
        }
        RawTerm::Range { min, max } => {
            let min = min.map(|t| coerce(spec, t)).transpose()?;
            let max = max.map(|t| coerce(spec, t)).transpose()?;
            if let (Some(lo), Some(hi)) = (&min, &max) {
                if lo.compare(hi) == Some(Ordering::Greater) {
                    return Err(FilterErrorKind::InvalidRangeOrder);
                }
            }
            Ok(FilterTerm::range(key, min, max))
        }
    }
}

fn coerce(spec: &FieldSpec, token: &str) -> Result<TypedValue, FilterErrorKind> {
    spec.coercion
        .apply(token)
        .map_err(|_| FilterErrorKind::ConversionError)
}
