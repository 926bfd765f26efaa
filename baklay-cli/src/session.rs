use baklay_core::{User, UserType};

/// The logged-in user, handed to each dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i64,
    pub name: String,
    pub role: UserType,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            role: user.user_type,
        }
    }
}
