use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    attendee::AttendeeRepositoryImpl, auth::AuthRepositoryImpl, event::EventRepositoryImpl,
    health::HealthCheckRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::repository::{
    attendee::AttendeeRepository, auth::AuthRepository, event::EventRepository,
    health::HealthCheckRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    attendee_repository: Arc<dyn AttendeeRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: &AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let attendee_repository = Arc::new(AttendeeRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        Self::from_repositories(
            health_check_repository,
            event_repository,
            attendee_repository,
            user_repository,
            auth_repository,
        )
    }

    // Lets callers swap in their own implementations, e.g. in-memory stores.
    pub fn from_repositories(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        event_repository: Arc<dyn EventRepository>,
        attendee_repository: Arc<dyn AttendeeRepository>,
        user_repository: Arc<dyn UserRepository>,
        auth_repository: Arc<dyn AuthRepository>,
    ) -> Self {
        Self {
            health_check_repository,
            event_repository,
            attendee_repository,
            user_repository,
            auth_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn attendee_repository(&self) -> Arc<dyn AttendeeRepository> {
        self.attendee_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }
}
