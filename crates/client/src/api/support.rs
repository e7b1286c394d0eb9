//! Support tickets

use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_tickets(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "support/tickets/");
        self.execute(request).await
    }

    pub async fn create_ticket(&self, ticket: &Value) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, "support/tickets/").json(ticket);
        self.execute(request).await
    }
}
