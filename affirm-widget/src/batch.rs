//! Batched field writes.
//!
//! A [`Batch`] is one logical update: a set of field writes that the
//! [`BatchWriter`] issues concurrently. Control returns only after every
//! write has finished, which is what lets the caller fire the renderer
//! signal knowing the whole batch has landed.
//!
//! The store has no transactions. A failed write does not undo the writes
//! that succeeded next to it.

use crate::error::{SyncError, SyncResult};
use crate::keys::{Field, KeySchema};
use affirm_store::{SharedStore, StoreError, StoreValue};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// One field write. `None` removes the key.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub field: Field,
    pub value: Option<StoreValue>,
}

/// An ordered set of field writes, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    writes: Vec<FieldWrite>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to `value`, replacing an earlier write of the same field.
    pub fn set(&mut self, field: Field, value: impl Into<StoreValue>) -> &mut Self {
        self.push(FieldWrite {
            field,
            value: Some(value.into()),
        })
    }

    /// Removes `field`, replacing an earlier write of the same field.
    pub fn clear(&mut self, field: Field) -> &mut Self {
        self.push(FieldWrite { field, value: None })
    }

    fn push(&mut self, write: FieldWrite) -> &mut Self {
        match self.writes.iter_mut().find(|w| w.field == write.field) {
            Some(existing) => *existing = write,
            None => self.writes.push(write),
        }
        self
    }

    /// Appends every write of `other`.
    pub fn merge(&mut self, other: Batch) -> &mut Self {
        for write in other.writes {
            self.push(write);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldWrite> {
        self.writes.iter()
    }

    /// The write for `field`, if the batch has one.
    pub fn get(&self, field: Field) -> Option<&FieldWrite> {
        self.writes.iter().find(|w| w.field == field)
    }
}

/// A write that did not land.
#[derive(Debug)]
pub struct WriteFailure {
    pub field: Field,
    pub key: &'static str,
    pub error: StoreError,
}

/// What happened to a committed batch.
#[derive(Debug, Default)]
#[must_use = "CommitOutcome may contain failed writes that should be checked"]
pub struct CommitOutcome {
    /// Writes that landed.
    pub written: usize,
    /// Writes that failed, in batch order.
    pub failures: Vec<WriteFailure>,
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.written + self.failures.len()
    }

    /// Converts into a result.
    ///
    /// When every write failed because the store is unavailable, the store
    /// error itself is returned rather than a per-key summary.
    pub fn into_result(self) -> SyncResult<usize> {
        if self.failures.is_empty() {
            return Ok(self.written);
        }
        let total = self.total();
        let failed = self.failures.len();
        let keys = self.failures.iter().map(|f| f.key.to_string()).collect();
        let all_unavailable = self.written == 0
            && self
                .failures
                .iter()
                .all(|f| matches!(f.error, StoreError::Unavailable(_)));
        if all_unavailable {
            if let Some(first) = self.failures.into_iter().next() {
                return Err(SyncError::Store(first.error));
            }
        }
        Err(SyncError::BatchFailed {
            failed,
            total,
            keys,
        })
    }
}

/// Issues a batch's writes concurrently against the shared store.
pub struct BatchWriter {
    store: Arc<dyn SharedStore>,
    schema: KeySchema,
}

impl BatchWriter {
    pub fn new(store: Arc<dyn SharedStore>, schema: KeySchema) -> Self {
        Self { store, schema }
    }

    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    /// Writes every field of `batch` and waits for all of them.
    ///
    /// Writes are independent of each other and are not retried. Values
    /// whose type does not match the field's kind fail without touching the
    /// store.
    pub async fn commit(&self, batch: &Batch) -> CommitOutcome {
        let writes = batch.iter().map(|write| self.write_one(write));
        let results = join_all(writes).await;

        let mut outcome = CommitOutcome::default();
        for (write, result) in batch.iter().zip(results) {
            match result {
                Ok(()) => outcome.written += 1,
                Err(error) => {
                    let key = self.schema.key(write.field);
                    warn!(field = %write.field, key, error = %error, "Widget field write failed");
                    outcome.failures.push(WriteFailure {
                        field: write.field,
                        key,
                        error,
                    });
                }
            }
        }

        debug!(
            backend = self.store.backend_name(),
            written = outcome.written,
            failed = outcome.failures.len(),
            "Committed batch"
        );
        outcome
    }

    async fn write_one(&self, write: &FieldWrite) -> Result<(), StoreError> {
        let record = self.schema.record(write.field);
        match &write.value {
            Some(value) if !record.kind.accepts(value) => Err(StoreError::WriteFailed {
                key: record.key.to_string(),
                reason: format!(
                    "{} {value} is not a valid {:?} value",
                    value.type_name(),
                    record.kind
                ),
            }),
            Some(value) => self.store.set(record.key, value.clone()).await,
            None => self.store.remove(record.key).await,
        }
    }
}
