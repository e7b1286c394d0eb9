//! Trainer roster

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_trainers(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "trainers/");
        self.execute(request).await
    }

    pub async fn get_trainer(&self, id: u64) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &format!("trainers/{id}/"));
        self.execute(request).await
    }
}
