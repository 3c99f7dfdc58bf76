//! # Mock Storage
//!
//! Utilities for testing stores against a misbehaving storage backend.
//!
//! [`MockStorage`] behaves like [`MemoryStorage`](crate::framework::MemoryStorage)
//! until told otherwise. Expectations queue up scripted results per operation kind;
//! each scripted result is consumed by the next matching call. Every call is recorded
//! so tests can assert exactly what was written.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use tradein_cart::framework::mock::{MockStorage, StorageOp};
//! use tradein_cart::framework::{DurableStorage, StorageError};
//!
//! let mock = Arc::new(MockStorage::new());
//! mock.expect_set().return_err(StorageError::Unavailable("private mode".into()));
//!
//! assert!(mock.set("cart", "{}").is_err());
//! assert!(mock.set("cart", "{}").is_ok());
//! assert_eq!(mock.ops().len(), 2);
//! mock.verify();
//! ```

use crate::framework::error::StorageError;
use crate::framework::storage::{DurableStorage, MemoryStorage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A recorded storage call.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageOp {
    Get(String),
    Set(String, String),
    Remove(String),
}

/// Scripted outcome for the next call of one operation kind.
enum Expectation {
    Get(Result<Option<String>, StorageError>),
    Set(Result<(), StorageError>),
    Remove(Result<(), StorageError>),
}

impl Expectation {
    fn matches(&self, op: &StorageOp) -> bool {
        matches!(
            (self, op),
            (Expectation::Get(_), StorageOp::Get(_))
                | (Expectation::Set(_), StorageOp::Set(..))
                | (Expectation::Remove(_), StorageOp::Remove(_))
        )
    }
}

/// Storage backend with expectation tracking for fluent testing.
#[derive(Default)]
pub struct MockStorage {
    backing: MemoryStorage,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    ops: Mutex<Vec<StorageOp>>,
}

impl MockStorage {
    /// Creates a mock with no expectations; all calls hit the in-memory backing map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, e.g. a corrupt entry. Not recorded as an operation.
    pub fn seed(&self, key: &str, value: &str) {
        self.backing.seed(key, value);
    }

    /// Expects a `get` call.
    pub fn expect_get(&self) -> GetExpectationBuilder {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `set` call.
    pub fn expect_set(&self) -> WriteExpectationBuilder {
        WriteExpectationBuilder {
            remove: false,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `remove` call.
    pub fn expect_remove(&self) -> WriteExpectationBuilder {
        WriteExpectationBuilder {
            remove: true,
            expectations: self.expectations.clone(),
        }
    }

    /// Every call made so far, in order.
    pub fn ops(&self) -> Vec<StorageOp> {
        self.ops.lock().unwrap().clone()
    }

    /// The raw value currently held by the backing map.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backing.get(key).ok().flatten()
    }

    /// Verifies that all expectations were consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all storage expectations were met. {} remaining", exps.len());
        }
    }

    fn record(&self, op: StorageOp) -> Option<Expectation> {
        let mut exps = self.expectations.lock().unwrap();
        let scripted = exps.iter().position(|e| e.matches(&op));
        self.ops.lock().unwrap().push(op);
        scripted.and_then(|index| exps.remove(index))
    }
}

impl DurableStorage for MockStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.record(StorageOp::Get(key.to_string())) {
            Some(Expectation::Get(response)) => response,
            _ => self.backing.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.record(StorageOp::Set(key.to_string(), value.to_string())) {
            Some(Expectation::Set(response)) => response,
            _ => self.backing.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.record(StorageOp::Remove(key.to_string())) {
            Some(Expectation::Remove(response)) => response,
            _ => self.backing.remove(key),
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl GetExpectationBuilder {
    /// The next `get` returns `value` instead of the backing map's contents.
    pub fn return_ok(self, value: Option<String>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get(Ok(value)));
    }

    /// The next `get` fails.
    pub fn return_err(self, error: StorageError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get(Err(error)));
    }
}

/// Builder for `set` and `remove` expectations.
pub struct WriteExpectationBuilder {
    remove: bool,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl WriteExpectationBuilder {
    /// The next call fails without touching the backing map.
    pub fn return_err(self, error: StorageError) {
        let mut exps = self.expectations.lock().unwrap();
        if self.remove {
            exps.push_back(Expectation::Remove(Err(error)));
        } else {
            exps.push_back(Expectation::Set(Err(error)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_failures_are_consumed_in_order_per_kind() {
        let mock = MockStorage::new();
        mock.expect_remove()
            .return_err(StorageError::Unavailable("disabled".into()));
        mock.expect_set()
            .return_err(StorageError::Unavailable("disabled".into()));

        // The set expectation is found even though a remove expectation is queued first.
        assert!(mock.set("k", "v").is_err());
        assert_eq!(mock.raw("k"), None);
        assert!(mock.remove("k").is_err());
        assert!(mock.set("k", "v").is_ok());
        assert_eq!(mock.raw("k").as_deref(), Some("v"));

        assert_eq!(
            mock.ops(),
            vec![
                StorageOp::Set("k".into(), "v".into()),
                StorageOp::Remove("k".into()),
                StorageOp::Set("k".into(), "v".into()),
            ]
        );
        mock.verify();
    }

    #[test]
    fn scripted_get_overrides_backing_value() {
        let mock = MockStorage::new();
        mock.seed("k", "real");
        mock.expect_get().return_ok(Some("scripted".into()));

        assert_eq!(mock.get("k").unwrap().as_deref(), Some("scripted"));
        assert_eq!(mock.get("k").unwrap().as_deref(), Some("real"));
    }
}
