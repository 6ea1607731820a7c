//! Screen-level state holders
//!
//! Each user action owns an [`Action`]: a watch channel carrying a
//! [`UiState`] that a UI renders. Running an action publishes `Loading`, then
//! `Success` or `Error` with the failure's message.

use std::future::Future;
use tokio::sync::watch;

use crate::error::ClientResult;

pub mod feed;
pub mod groups;
pub mod login;
pub mod post;
pub mod profile;
pub mod register;

pub use feed::FeedViewModel;
pub use groups::GroupsViewModel;
pub use login::LoginViewModel;
pub use post::{PostDetail, PostViewModel};
pub use profile::ProfileViewModel;
pub use register::RegisterViewModel;

#[derive(Debug, Clone, PartialEq)]
pub enum UiState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            UiState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Observable state of one user action
pub struct Action<T> {
    state: watch::Sender<UiState<T>>,
}

impl<T: Clone> Action<T> {
    pub fn new() -> Self {
        Self::starting_at(UiState::Idle)
    }

    /// For screens that start loading as soon as they open
    pub fn loading() -> Self {
        Self::starting_at(UiState::Loading)
    }

    fn starting_at(initial: UiState<T>) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<T>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> UiState<T> {
        self.state.borrow().clone()
    }

    /// Publish `Loading`, await `work`, then publish its outcome
    pub async fn run<F>(&self, work: F) -> UiState<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.state.send_replace(UiState::Loading);

        let outcome = match work.await {
            Ok(value) => UiState::Success(value),
            Err(e) => UiState::Error(e.to_string()),
        };

        self.state.send_replace(outcome.clone());
        outcome
    }

    /// Publish a value obtained elsewhere, e.g. the result of an edit
    pub fn succeed(&self, value: T) {
        self.state.send_replace(UiState::Success(value));
    }

    /// Publish an error without doing any work, e.g. for failed input checks
    pub fn fail(&self, message: impl Into<String>) -> UiState<T> {
        let state = UiState::Error(message.into());
        self.state.send_replace(state.clone());
        state
    }

    pub fn reset(&self) {
        self.state.send_replace(UiState::Idle);
    }
}

impl<T: Clone> Default for Action<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An image picked for upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}
