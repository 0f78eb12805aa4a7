pub mod access_tokens;
pub mod users;
