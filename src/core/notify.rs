//! User notification interface.
//!
//! The core never renders anything itself. It reports short status messages and
//! asks yes/no questions through a [`Notifier`], which the bot layer implements
//! on top of Discord replies and buttons.

use crate::errors::Result;
use async_trait::async_trait;

/// Transient messages and confirmation prompts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows a short, transient status message.
    async fn toast(&self, message: &str) -> Result<()>;

    /// Asks a yes/no question. Declining and timing out both return `false`.
    async fn confirm(&self, message: &str) -> Result<bool>;

    /// Shows a detailed error message. Defaults to a toast.
    async fn alert(&self, message: &str) -> Result<()> {
        self.toast(message).await
    }
}
