use crate::{
    dto::{UpdateUserRequest, User},
    repositories::{AuthRepository, StorageRepository, UserRepository},
};

use super::{Action, ImageUpload, UiState};

pub struct ProfileViewModel {
    users: UserRepository,
    auth: AuthRepository,
    storage: StorageRepository,
    pub profile_state: Action<User>,
    pub update_state: Action<User>,
    pub logout_state: Action<()>,
}

impl ProfileViewModel {
    pub fn new(users: UserRepository, auth: AuthRepository, storage: StorageRepository) -> Self {
        Self {
            users,
            auth,
            storage,
            profile_state: Action::loading(),
            update_state: Action::new(),
            logout_state: Action::new(),
        }
    }

    pub async fn load_profile(&self) -> UiState<User> {
        self.profile_state.run(self.users.get_current_user()).await
    }

    /// Change name and email; blank values are left untouched
    pub async fn update_profile(&self, name: &str, email: &str) -> UiState<User> {
        let changes = UpdateUserRequest {
            name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
            email: Some(email.trim().to_string()).filter(|e| !e.is_empty()),
            avatar_url: None,
        };
        self.apply(changes).await
    }

    /// Upload a new profile photo and point the profile at it
    pub async fn update_avatar(&self, image: ImageUpload) -> UiState<User> {
        let state = self
            .update_state
            .run(async {
                let url = self
                    .storage
                    .upload_image(image.bytes, &image.filename, &image.content_type)
                    .await?;
                self.users
                    .update_current_user(&UpdateUserRequest {
                        avatar_url: Some(Some(url)),
                        ..Default::default()
                    })
                    .await
            })
            .await;
        self.refresh_from(&state);
        state
    }

    /// Remove the profile photo
    pub async fn remove_avatar(&self) -> UiState<User> {
        self.apply(UpdateUserRequest {
            avatar_url: Some(None),
            ..Default::default()
        })
        .await
    }

    async fn apply(&self, changes: UpdateUserRequest) -> UiState<User> {
        let state = self
            .update_state
            .run(self.users.update_current_user(&changes))
            .await;
        self.refresh_from(&state);
        state
    }

    fn refresh_from(&self, state: &UiState<User>) {
        if let UiState::Success(user) = state {
            self.profile_state.succeed(user.clone());
        }
    }

    pub async fn logout(&self) -> UiState<()> {
        self.logout_state.run(self.auth.logout()).await
    }

    /// Delete the account; the session ends with it
    pub async fn delete_account(&self) -> UiState<()> {
        self.logout_state.run(self.users.delete_current_user()).await
    }

    pub fn reset_update_state(&self) {
        self.update_state.reset();
    }

    pub fn reset_logout_state(&self) {
        self.logout_state.reset();
    }
}

/// Up to two uppercase initials, e.g. "Ana Souza" -> "AS"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ana Souza"), "AS");
        assert_eq!(initials("maria da silva"), "MD");
        assert_eq!(initials("  élio  "), "É");
        assert_eq!(initials(""), "");
    }
}
