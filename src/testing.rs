//! In-memory collaborators and request helpers for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use axum::{
    async_trait,
    body::Body,
    http::{header, Request, Response},
};
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::dto::SignupRequest;
use crate::auth::password::{generate_token, hash_password};
use crate::auth::repo_types::{NewUser, User};
use crate::auth::UserStore;
use crate::diet::{DietType, NOT_SET};
use crate::mail::{Email, Mailer};
use crate::preferences::{RestrictionStore, UserRestriction};
use crate::recipes::dto::{ExtendedIngredient, RecipeInformation, SearchHit, SearchQuery};
use crate::recipes::RecipeClient;
use crate::sessions::{self, Session, SessionStore};
use crate::state::{test_config, AppState};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    sessions: Mutex<HashMap<String, Session>>,
    restrictions: Mutex<HashMap<Uuid, UserRestriction>>,
    fail_diet_save: AtomicBool,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Make the next diet save fail before anything is written.
    pub fn fail_next_diet_save(&self) {
        self.fail_diet_save.store(true, Ordering::SeqCst);
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.user_by_email(email))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            is_verified: false,
            verification_token: Some(new_user.verification_token),
            consumed_token: None,
            diet_preference: new_user.diet_preference.map(|d| d.as_str().to_string()),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn verify_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users
            .values_mut()
            .find(|u| u.verification_token.as_deref() == Some(token))
        else {
            return Ok(None);
        };
        user.is_verified = true;
        user.consumed_token = user.verification_token.take();
        Ok(Some(user.clone()))
    }

    async fn find_by_consumed_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.is_verified && u.consumed_token.as_deref() == Some(token))
            .cloned())
    }

    async fn delete_unverified(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut users = self.users.lock().unwrap();
        if users.get(&id).is_some_and(|u| !u.is_verified) {
            users.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: Session) -> anyhow::Result<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn find(&self, id: &str) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.sessions.lock().unwrap().remove(id).is_some())
    }

    async fn set_diet_type(&self, id: &str, diet_type: Option<&str>) -> anyhow::Result<()> {
        if let Some(s) = self.sessions.lock().unwrap().get_mut(id) {
            s.diet_type = diet_type.map(str::to_string);
        }
        Ok(())
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> anyhow::Result<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl RestrictionStore for MemoryStore {
    async fn save_diet(
        &self,
        user_id: Uuid,
        diet: Option<DietType>,
    ) -> anyhow::Result<Option<UserRestriction>> {
        if self.fail_diet_save.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("restriction upsert failed"));
        }
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(None);
        };
        user.diet_preference = diet.map(|d| d.as_str().to_string());
        let row = UserRestriction {
            user_id,
            restriction_name: diet.map(DietType::as_str).unwrap_or(NOT_SET).to_string(),
            updated_at: OffsetDateTime::now_utc(),
        };
        self.restrictions
            .lock()
            .unwrap()
            .insert(user_id, row.clone());
        Ok(Some(row))
    }

    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<UserRestriction>> {
        Ok(self.restrictions.lock().unwrap().get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    fail_next: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("smtp unavailable"));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Recipe API double that serves a fixed list and records what it was asked.
#[derive(Default)]
pub struct ScriptedRecipes {
    recipes: Mutex<Vec<RecipeInformation>>,
    last_query: Mutex<Option<SearchQuery>>,
    calls: AtomicUsize,
    fail_search: AtomicBool,
    fail_information: Mutex<Option<u64>>,
}

impl ScriptedRecipes {
    pub fn with_recipes(recipes: Vec<RecipeInformation>) -> Self {
        let client = Self::default();
        client.set_recipes(recipes);
        client
    }

    pub fn set_recipes(&self, recipes: Vec<RecipeInformation>) {
        *self.recipes.lock().unwrap() = recipes;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn fail_search(&self) {
        self.fail_search.store(true, Ordering::SeqCst);
    }

    pub fn fail_information(&self, id: u64) {
        *self.fail_information.lock().unwrap() = Some(id);
    }
}

#[async_trait]
impl RecipeClient for ScriptedRecipes {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(anyhow!("search returned 502"));
        }
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .map(|r| SearchHit {
                id: r.id,
                title: r.title.clone(),
            })
            .collect())
    }

    async fn information(&self, id: u64) -> anyhow::Result<RecipeInformation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_information.lock().unwrap() == Some(id) {
            return Err(anyhow!("information {id} timed out"));
        }
        self.recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("recipe {id} not found"))
    }
}

pub struct FakeParts {
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub recipes: Arc<ScriptedRecipes>,
}

pub fn fake_parts() -> (AppState, FakeParts) {
    let store = Arc::new(MemoryStore::default());
    let mailer = Arc::new(RecordingMailer::default());
    let recipes = Arc::new(ScriptedRecipes::default());
    let state = AppState::from_parts(
        Arc::new(test_config()),
        store.clone(),
        store.clone(),
        store.clone(),
        mailer.clone(),
        recipes.clone(),
    );
    (
        state,
        FakeParts {
            store,
            mailer,
            recipes,
        },
    )
}

pub fn signup_request(email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        full_name: "Test User".into(),
        email: email.into(),
        password: password.into(),
        food_preferences: None,
    }
}

/// Insert a user that has already confirmed their email.
pub async fn verified_user(state: &AppState, email: &str, password: &str) -> User {
    let token = generate_token();
    state
        .users
        .create(NewUser {
            email: email.to_string(),
            full_name: "Test User".into(),
            password_hash: hash_password(password).unwrap(),
            verification_token: token.clone(),
            diet_preference: None,
        })
        .await
        .unwrap()
        .expect("email not taken");
    state.users.verify_by_token(&token).await.unwrap().unwrap()
}

/// `name=value` cookie pair for a fresh session of a new verified user.
pub async fn logged_in_cookie(state: &AppState, email: &str) -> String {
    let user = verified_user(state, email, "password123").await;
    let session = sessions::start(state, &user).await.unwrap();
    format!("{}={}", state.config.session.cookie_name, session.id)
}

pub fn information(id: u64, title: &str, ingredients: &[&str]) -> RecipeInformation {
    RecipeInformation {
        id,
        title: title.into(),
        ready_in_minutes: Some(30),
        instructions: Some("Cook it.".into()),
        extended_ingredients: ingredients
            .iter()
            .map(|n| ExtendedIngredient {
                name: n.to_string(),
            })
            .collect(),
    }
}

pub fn post_json(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

/// The `name=value` part of the first non-empty Set-Cookie header.
pub fn cookie_pair(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.split_once('=').is_some_and(|(_, value)| !value.is_empty()))
        .map(str::to_string)
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(res: Response<Body>) -> T {
    serde_json::from_str(&body_text(res).await).unwrap()
}
