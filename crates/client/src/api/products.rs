//! Shop products

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_products(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "products/");
        self.execute(request).await
    }

    pub async fn get_product(&self, id: u64) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &format!("products/{id}/"));
        self.execute(request).await
    }
}
