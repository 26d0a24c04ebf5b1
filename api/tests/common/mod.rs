#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, AtomicI64, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use kernel::{
    model::{
        attendee::{
            command::{CreateAttendee, DeleteAttendee},
            Attendee,
        },
        auth::{command::CreateToken, AccessToken},
        event::{command::CreateEvent, Event},
        id::{AttendeeId, EventId, UserId},
        user::{command::CreateUser, User},
    },
    repository::{
        attendee::AttendeeRepository, auth::AuthRepository, event::EventRepository,
        health::HealthCheckRepository, user::UserRepository,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use tower::ServiceExt;

pub const OWNER_TOKEN: &str = "token-1";
pub const OTHER_TOKEN: &str = "token-2";

#[derive(Default)]
pub struct InMemoryStore {
    next_id: AtomicI64,
    fail: AtomicBool,
    users: Mutex<BTreeMap<UserId, (User, String)>>,
    events: Mutex<BTreeMap<EventId, Event>>,
    attendees: Mutex<Vec<Attendee>>,
    tokens: Mutex<HashMap<String, UserId>>,
}

impl InMemoryStore {
    /// Users 1 and 2 are logged in with `OWNER_TOKEN` and `OTHER_TOKEN`,
    /// user 3 exists without a session.
    pub fn seeded() -> Arc<Self> {
        let store = Arc::new(Self::default());
        for (name, token) in [
            ("alice", Some(OWNER_TOKEN)),
            ("bob", Some(OTHER_TOKEN)),
            ("carol", None),
        ] {
            let id = UserId::new(store.next());
            let user = User {
                id,
                name: name.into(),
                email: format!("{name}@example.com"),
            };
            store
                .users
                .lock()
                .unwrap()
                .insert(id, (user, "password123".into()));
            if let Some(token) = token {
                store.tokens.lock().unwrap().insert(token.into(), id);
            }
        }
        store
    }

    pub fn fail_store_calls(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn event(&self, id: i64) -> Option<Event> {
        self.events.lock().unwrap().get(&EventId::new(id)).cloned()
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.lock().unwrap().len()
    }

    fn next(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::SpecificOperationError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        self.check()?;
        let created = Event {
            id: EventId::new(self.next()),
            owner_id: event.owner_id,
            name: event.name,
            description: event.description,
            date: event.date,
            location: event.location,
        };
        self.events
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        self.check()?;
        Ok(self.events.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        self.check()?;
        Ok(self.events.lock().unwrap().get(&event_id).cloned())
    }

    async fn find_by_attendee(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        self.check()?;
        let attendees = self.attendees.lock().unwrap();
        let events = self.events.lock().unwrap();
        Ok(attendees
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| events.get(&a.event_id).cloned())
            .collect())
    }

    async fn update(&self, event: &Event) -> AppResult<()> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        let stored = events
            .get_mut(&event.id)
            .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))?;
        stored.name = event.name.clone();
        stored.description = event.description.clone();
        stored.date = event.date;
        stored.location = event.location.clone();
        Ok(())
    }

    async fn delete(&self, event_id: EventId) -> AppResult<()> {
        self.check()?;
        self.events
            .lock()
            .unwrap()
            .remove(&event_id)
            .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))?;
        self.attendees
            .lock()
            .unwrap()
            .retain(|a| a.event_id != event_id);
        Ok(())
    }
}

#[async_trait]
impl AttendeeRepository for InMemoryStore {
    async fn create(&self, event: CreateAttendee) -> AppResult<Attendee> {
        self.check()?;
        let mut attendees = self.attendees.lock().unwrap();
        if attendees
            .iter()
            .any(|a| a.event_id == event.event_id && a.user_id == event.user_id)
        {
            return Err(AppError::Conflict("Attendee already exists".into()));
        }
        let attendee = Attendee {
            id: AttendeeId::new(self.next()),
            event_id: event.event_id,
            user_id: event.user_id,
        };
        attendees.push(attendee.clone());
        Ok(attendee)
    }

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> AppResult<Option<Attendee>> {
        self.check()?;
        Ok(self
            .attendees
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.event_id == event_id && a.user_id == user_id)
            .cloned())
    }

    async fn find_users_by_event(&self, event_id: EventId) -> AppResult<Vec<User>> {
        self.check()?;
        let attendees = self.attendees.lock().unwrap();
        let users = self.users.lock().unwrap();
        Ok(attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .filter_map(|a| users.get(&a.user_id).map(|(u, _)| u.clone()))
            .collect())
    }

    async fn delete(&self, event: DeleteAttendee) -> AppResult<()> {
        self.check()?;
        self.attendees
            .lock()
            .unwrap()
            .retain(|a| !(a.event_id == event.event_id && a.user_id == event.user_id));
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|(u, _)| u.email == event.email) {
            return Err(AppError::Conflict("Email is already registered".into()));
        }
        let user = User {
            id: UserId::new(self.next()),
            name: event.name,
            email: event.email,
        };
        users.insert(user.id, (user.clone(), event.password));
        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|(u, _)| u.clone()))
    }
}

#[async_trait]
impl AuthRepository for InMemoryStore {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(access_token.as_str())
            .copied())
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.id)
            .ok_or(AppError::UnauthenticatedError)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        self.tokens
            .lock()
            .unwrap()
            .insert(event.access_token.0.clone(), event.user_id);
        Ok(event.access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.tokens.lock().unwrap().remove(access_token.as_str());
        Ok(())
    }
}

#[async_trait]
impl HealthCheckRepository for InMemoryStore {
    async fn check_db(&self) -> bool {
        !self.fail.load(Ordering::SeqCst)
    }
}

pub fn app(store: Arc<InMemoryStore>) -> Router {
    let registry = AppRegistry::from_repositories(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store,
    );
    api::route::v1::routes().with_state(registry)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn meetup() -> serde_json::Value {
    serde_json::json!({
        "name": "Meetup",
        "description": "Monthly get-together",
        "date": "2025-06-26",
        "location": "Downtown",
    })
}

/// Creates the meetup event as user 1 and returns its id.
pub async fn create_meetup(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/events",
        Some(OWNER_TOKEN),
        Some(meetup()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}
