use reqwest::Method;

use super::ApiClient;
use crate::{
    dto::{LoginRequest, RegisterRequest, TokenResponse},
    error::ClientResult,
};

/// `/auth` endpoints
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        let builder = self
            .client
            .request(Method::POST, &["auth", "login"])
            .json(request);
        self.client.send(builder).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<TokenResponse> {
        let builder = self
            .client
            .request(Method::POST, &["auth", "register"])
            .json(request);
        self.client.send(builder).await
    }
}
