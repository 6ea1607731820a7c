use crate::repositories::AuthRepository;

use super::{Action, UiState};

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct RegisterViewModel {
    auth: AuthRepository,
    pub register_state: Action<()>,
}

impl RegisterViewModel {
    pub fn new(auth: AuthRepository) -> Self {
        Self {
            auth,
            register_state: Action::new(),
        }
    }

    /// Create the account and keep the session
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> UiState<()> {
        let (name, email) = (name.trim(), email.trim());

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return self.register_state.fail("All fields are required");
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return self.register_state.fail(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ));
        }
        if password != confirm_password {
            return self.register_state.fail("Passwords do not match");
        }

        self.register_state
            .run(self.auth.register(name, email, password))
            .await
    }

    pub fn reset_state(&self) {
        self.register_state.reset();
    }
}
