//! Sheet Mirror Port
//!
//! The spreadsheet is a read-only copy of the store for non-technical
//! readers. It is always fully replaced, never patched.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

#[async_trait]
pub trait SheetMirror: Send + Sync {
    /// Clear the target range and write `values` (header included) in one
    /// bulk write. Returns the number of rows written.
    async fn replace_all(&self, values: Vec<Vec<String>>) -> Result<usize, DomainError>;
}
