/// Server configuration

use crate::domain::UserId;

/// Settings the server is started with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerConfig {
    /// User every request acts on behalf of, until real authentication exists
    pub user_id: UserId,
}

impl ServerConfig {
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id: UserId(user_id),
        }
    }
}
