use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{command::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::{
    database::{
        model::{
            auth::{token_entry, AuthorizationKey},
            user::UserCredentialRow,
        },
        ConnectionPool,
    },
    password,
    redis::RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(|user_id| user_id.into_inner()))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row = self
            .db
            .run(
                sqlx::query_as::<_, UserCredentialRow>(
                    r#"
                        SELECT user_id, password_hash
                        FROM users
                        WHERE email = $1
                    "#,
                )
                .bind(email)
                .fetch_optional(self.db.inner_ref()),
            )
            .await?;

        let Some(UserCredentialRow {
            user_id,
            password_hash,
        }) = row
        else {
            return Err(AppError::UnauthenticatedError);
        };

        if !password::verify(password, password_hash).await? {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = token_entry(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = (&access_token).into();
        self.kv.delete(&key).await
    }
}
