use super::AccessToken;
use crate::model::id::UserId;

pub struct CreateToken {
    pub user_id: UserId,
    pub access_token: AccessToken,
}

impl CreateToken {
    /// Issues a fresh random token for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        let access_token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        Self {
            user_id,
            access_token,
        }
    }
}
