//! HTTP clients, one per API resource
//!
//! Each client maps a method to a verb, a path and a body. They share one
//! [`ApiClient`], which builds URLs, runs the [`AuthInterceptor`] and turns
//! non-success responses into [`ClientError::Http`].

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    dto::ErrorBody,
    error::{ClientError, ClientResult},
    interceptor::AuthInterceptor,
};

pub mod auth;
pub mod groups;
pub mod posts;
pub mod storage;
pub mod users;

pub use auth::AuthApi;
pub use groups::GroupApi;
pub use posts::PostApi;
pub use storage::StorageApi;
pub use users::UserApi;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    pub fn new(base_url: &str, interceptor: AuthInterceptor) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Transport(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "Invalid base URL {}",
                base_url
            )));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            interceptor,
        })
    }

    /// Base URL extended with percent-encoded path segments
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        let path = url.path().to_string();
        debug!("{} {}", method, path);
        self.interceptor.apply(&path, self.http.request(method, url))
    }

    /// Send and decode a JSON response
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send and hand back the successful response as is
    pub(crate) async fn send_raw(&self, request: RequestBuilder) -> ClientResult<Response> {
        Self::check(request.send().await?).await
    }

    /// Send and discard the response body
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        warn!("Request failed with {}: {}", status, message);
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
