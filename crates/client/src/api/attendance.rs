//! Attendance check-ins and history

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Today's attendance records.
    pub async fn list_attendance(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "attendance/");
        self.execute(request).await
    }

    pub async fn attendance_history(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "attendance/history/");
        self.execute(request).await
    }

    /// Record a check-in.
    pub async fn check_in(&self, entry: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, "attendance/").json(entry);
        self.execute(request).await
    }
}
