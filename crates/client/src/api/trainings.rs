//! Training sessions

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_trainings(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "trainings/");
        self.execute(request).await
    }

    pub async fn get_training(&self, id: u64) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &format!("trainings/{id}/"));
        self.execute(request).await
    }
}
