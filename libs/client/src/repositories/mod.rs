//! Repositories: the calls a screen needs, with session handling folded in
//!
//! Every method returns `Result<T, ClientError>`. Calls that act on "the
//! current user" read the id from the token store and fail with
//! [`ClientError::Unauthenticated`] when there is no session.

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{ClientError, ClientResult},
    token_store::TokenStore,
};

pub mod auth;
pub mod groups;
pub mod posts;
pub mod storage;
pub mod users;

pub use auth::AuthRepository;
pub use groups::GroupsRepository;
pub use posts::PostsRepository;
pub use storage::StorageRepository;
pub use users::UserRepository;

pub(crate) fn current_user_id(store: &Arc<TokenStore>) -> ClientResult<Uuid> {
    store.get_user_id().ok_or(ClientError::Unauthenticated)
}
