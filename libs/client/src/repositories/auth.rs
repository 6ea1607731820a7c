use std::sync::Arc;
use tracing::info;

use crate::{
    api::AuthApi,
    dto::{LoginRequest, RegisterRequest},
    error::ClientResult,
    token_store::TokenStore,
};

#[derive(Clone)]
pub struct AuthRepository {
    api: AuthApi,
    store: Arc<TokenStore>,
}

impl AuthRepository {
    pub fn new(api: AuthApi, store: Arc<TokenStore>) -> Self {
        Self { api, store }
    }

    /// Log in and persist the returned token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        let response = self
            .api
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.store.save_token(&response.token).await?;
        info!("Logged in as {}", email);
        Ok(())
    }

    /// Create an account and persist the returned token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        let response = self
            .api
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.store.save_token(&response.token).await?;
        info!("Registered {}", email);
        Ok(())
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.store.clear_token().await
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.is_logged_in()
    }
}
