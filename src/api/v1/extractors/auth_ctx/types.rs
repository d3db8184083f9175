use crate::services::auth::AppRole;

/// Verified caller identity, built by the access middleware from token
/// claims. Handlers read it; nothing here touches the database.
#[derive(Clone, Debug)]
pub struct AuthCtx {
    pub user_id: i64,
    pub user_number: i64,
    pub email: String,
    pub role: AppRole,
    pub academy_number: Option<i64>,
}

impl AuthCtx {
    pub fn new(
        user_id: i64,
        user_number: i64,
        email: String,
        role: AppRole,
        academy_number: Option<i64>,
    ) -> Self {
        Self {
            user_id,
            user_number,
            email,
            role,
            academy_number,
        }
    }
}
