use crate::repositories::AuthRepository;

use super::{Action, UiState};

pub struct LoginViewModel {
    auth: AuthRepository,
    pub login_state: Action<()>,
}

impl LoginViewModel {
    pub fn new(auth: AuthRepository) -> Self {
        Self {
            auth,
            login_state: Action::new(),
        }
    }

    /// Log in; on success the token is already persisted
    pub async fn login(&self, email: &str, password: &str) -> UiState<()> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return self.login_state.fail("Email and password are required");
        }

        self.login_state
            .run(self.auth.login(email, password))
            .await
    }

    pub fn reset_state(&self) {
        self.login_state.reset();
    }
}
