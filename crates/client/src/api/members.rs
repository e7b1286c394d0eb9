//! Member records and registration

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_members(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "members/");
        self.execute(request).await
    }

    pub async fn get_member(&self, id: u64) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &format!("members/{id}/"));
        self.execute(request).await
    }

    /// Register a new member.
    pub async fn create_member(&self, member: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, "members/").json(member);
        self.execute(request).await
    }
}
