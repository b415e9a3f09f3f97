//! Port abstraction for storage lifecycle control.
//!
//! Used only by the seeder and the test harness; request handlers never
//! touch it.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while resetting storage.
    pub enum StorageLifecycleError {
        /// Backing store connection could not be established.
        Connection { message: String } => "storage connection failed: {message}",
        /// Reset statement failed during execution.
        Reset { message: String } => "storage reset failed: {message}",
    }
}

/// Destructive lifecycle operations on the backing store.
#[async_trait]
pub trait StorageLifecycle: Send + Sync {
    /// Remove every row from every table, respecting foreign-key order.
    async fn reset_all(&self) -> Result<(), StorageLifecycleError>;
}
