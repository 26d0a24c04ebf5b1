use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{command::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::{
    database::{is_unique_violation, model::user::UserRow, ConnectionPool},
    password,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let password_hash = password::hash(&event.password).await?;
        let res = self
            .db
            .deadline(
                sqlx::query_as::<_, UserRow>(
                    r#"
                        INSERT INTO users (name, email, password_hash)
                        VALUES ($1, $2, $3)
                        RETURNING user_id, name, email
                    "#,
                )
                .bind(&event.name)
                .bind(&event.email)
                .bind(password_hash)
                .fetch_one(self.db.inner_ref()),
            )
            .await?;

        match res {
            Ok(row) => Ok(User::from(row)),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(
                "Email is already registered".into(),
            )),
            Err(e) => Err(AppError::SpecificOperationError(e)),
        }
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = self
            .db
            .run(
                sqlx::query_as::<_, UserRow>(
                    r#"
                        SELECT user_id, name, email
                        FROM users
                        WHERE user_id = $1
                    "#,
                )
                .bind(user_id)
                .fetch_optional(self.db.inner_ref()),
            )
            .await?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL instance in DATABASE_URL"]
    async fn test_register_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo
            .create(CreateUser::new(
                "Alice".into(),
                "alice@example.com".into(),
                "password123".into(),
            ))
            .await?;
        assert_eq!(repo.find_by_id(user.id).await?, Some(user));

        let dup = repo
            .create(CreateUser::new(
                "Alice again".into(),
                "alice@example.com".into(),
                "password456".into(),
            ))
            .await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
        Ok(())
    }
}
