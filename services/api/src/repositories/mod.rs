//! Repositories for database operations

pub mod group;
pub mod post;
pub mod user;

pub use group::GroupRepository;
pub use post::PostRepository;
pub use user::UserRepository;

/// Build an ILIKE pattern matching `term` anywhere, with wildcards in `term` escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
