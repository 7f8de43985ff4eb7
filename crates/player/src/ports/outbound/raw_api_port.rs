//! Raw API Port - Object-safe HTTP boundary
//!
//! Services hold an `Arc<dyn RawApiPort>`; the typed wrapper in
//! `application::api` does the serde conversions on top.

use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// `path` is either relative to the API base URL or absolute.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}
