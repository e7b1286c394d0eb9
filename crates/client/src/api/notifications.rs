//! Notifications

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_notifications(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "notifications/");
        self.execute(request).await
    }

    /// Mark a notification as read. The backend returns no body.
    pub async fn mark_notification_read(&self, id: u64) -> Result<(), ApiError> {
        let request = self.request(Method::POST, &format!("notifications/{id}/read/"));
        self.execute_unit(request).await
    }
}
