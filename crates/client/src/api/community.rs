//! Community posts

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_posts(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "community/posts/");
        self.execute(request).await
    }

    pub async fn get_post(&self, id: u64) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &format!("community/posts/{id}/"));
        self.execute(request).await
    }

    pub async fn create_post(&self, post: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, "community/posts/").json(post);
        self.execute(request).await
    }
}
