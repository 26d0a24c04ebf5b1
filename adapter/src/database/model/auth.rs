use std::str::FromStr;

use kernel::model::{
    auth::{command::CreateToken, AccessToken},
    id::UserId,
};
use shared::error::AppError;

use crate::redis::model::{RedisKey, RedisValue};

pub struct AuthorizationKey(String);

pub struct AuthorizedUserId(UserId);

pub fn token_entry(event: CreateToken) -> (AuthorizationKey, AuthorizedUserId) {
    (
        AuthorizationKey(event.access_token.0),
        AuthorizedUserId(event.user_id),
    )
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        Self(key.0)
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("access_token:{}", self.0)
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        UserId::from_str(&s)
            .map(Self)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}
