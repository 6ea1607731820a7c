//! Attaches the stored bearer token to outgoing requests

use reqwest::RequestBuilder;
use std::sync::Arc;

use crate::token_store::TokenStore;

/// Routes that must be called without credentials
pub const PUBLIC_PATHS: [&str; 2] = ["/auth/login", "/auth/register"];

/// Whether `path` is one of the public routes, ignoring any base path prefix
pub fn is_public_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PUBLIC_PATHS.iter().any(|public| path.ends_with(public))
}

#[derive(Clone)]
pub struct AuthInterceptor {
    store: Arc<TokenStore>,
}

impl AuthInterceptor {
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    /// Add `Authorization: Bearer <token>` unless the route is public or there is no session
    pub fn apply(&self, path: &str, request: RequestBuilder) -> RequestBuilder {
        if is_public_path(path) {
            return request;
        }

        match self.store.get_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    async fn interceptor_with_token(token: Option<&str>) -> (AuthInterceptor, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::open(dir.path().join("auth.json")).await.unwrap();
        if let Some(token) = token {
            store.save_token(token).await.unwrap();
        }
        (AuthInterceptor::new(Arc::new(store)), dir)
    }

    fn authorization(interceptor: &AuthInterceptor, path: &str) -> Option<String> {
        let client = reqwest::Client::new();
        let request = interceptor
            .apply(path, client.get(format!("http://localhost{}", path)))
            .build()
            .unwrap();
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/auth/register/"));
        assert!(is_public_path("/api/v1/auth/login"));
        assert!(!is_public_path("/groups"));
        assert!(!is_public_path("/auth/login/extra"));
    }

    #[tokio::test]
    async fn test_adds_bearer_to_protected_routes() {
        let (interceptor, _dir) = interceptor_with_token(Some("abc.def.ghi")).await;

        assert_eq!(
            authorization(&interceptor, "/groups"),
            Some("Bearer abc.def.ghi".to_string())
        );
        assert_eq!(authorization(&interceptor, "/auth/login"), None);
        assert_eq!(authorization(&interceptor, "/auth/register"), None);
    }

    #[tokio::test]
    async fn test_no_header_without_session() {
        let (interceptor, _dir) = interceptor_with_token(None).await;
        assert_eq!(authorization(&interceptor, "/posts"), None);
    }
}
