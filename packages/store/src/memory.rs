use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewUser, Secret, User};
use crate::repo::{SecretRepository, StoreResult, UserRepository};

/// In-memory store for tests and database-less local runs.
///
/// All tables sit behind one lock, so find-or-create and username uniqueness
/// are atomic just like their SQL counterparts.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    secrets: HashMap<Uuid, Secret>,
    last_tick: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing timestamps, so ordering by `updated_at` is stable
    /// even when the wall clock does not advance between two writes.
    fn tick(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_tick {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_tick = Some(now);
        now
    }

    fn insert_user(&mut self, new: NewUser) -> StoreResult<User> {
        if self.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::UsernameTaken(new.username));
        }
        let now = self.tick();
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            password_hash: new.password_hash,
            google_id: new.google_id,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn touch_user(&mut self, user_id: Uuid) -> StoreResult<()> {
        let now = self.tick();
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        user.updated_at = now;
        Ok(())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SecretRepository for MemoryStore {
    async fn create_secret(&self, body: &str) -> StoreResult<Secret> {
        let mut tables = self.lock();
        let now = tables.tick();
        let secret = Secret {
            id: Uuid::new_v4(),
            body: body.to_string(),
            owner_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.secrets.insert(secret.id, secret.clone());
        Ok(secret)
    }

    async fn list_secrets(&self) -> StoreResult<Vec<Secret>> {
        Ok(self.lock().secrets.values().cloned().collect())
    }

    async fn find_secret(&self, id: Uuid) -> StoreResult<Option<Secret>> {
        Ok(self.lock().secrets.get(&id).cloned())
    }

    async fn update_secret_body(&self, id: Uuid, body: &str) -> StoreResult<Option<Secret>> {
        let mut tables = self.lock();
        let now = tables.tick();
        Ok(tables.secrets.get_mut(&id).map(|secret| {
            secret.body = body.to_string();
            secret.updated_at = now;
            secret.clone()
        }))
    }

    async fn delete_secret(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.lock().secrets.remove(&id).is_some())
    }
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        self.lock().insert_user(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_with_secrets(&self, id: Uuid) -> StoreResult<Option<(User, Vec<Secret>)>> {
        let tables = self.lock();
        let Some(user) = tables.users.get(&id).cloned() else {
            return Ok(None);
        };
        let mut secrets: Vec<Secret> = tables
            .secrets
            .values()
            .filter(|s| s.is_owned_by(id))
            .cloned()
            .collect();
        secrets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(Some((user, secrets)))
    }

    async fn find_or_create_by_google_id(&self, google_id: &str, username: &str) -> StoreResult<User> {
        let mut tables = self.lock();
        if let Some(user) = tables
            .users
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
        {
            return Ok(user.clone());
        }
        tables.insert_user(NewUser::google(username, google_id))
    }

    async fn add_secret_ref(&self, user_id: Uuid, secret_id: Uuid) -> StoreResult<()> {
        let mut tables = self.lock();
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        let secret = tables
            .secrets
            .get_mut(&secret_id)
            .ok_or(StoreError::SecretNotFound(secret_id))?;
        match secret.owner_id {
            Some(owner) if owner != user_id => return Err(StoreError::AlreadyOwned { secret_id }),
            _ => secret.owner_id = Some(user_id),
        }
        tables.touch_user(user_id)
    }

    async fn delete_secret_for_user(&self, user_id: Uuid, secret_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.lock();
        if tables.secrets.remove(&secret_id).is_none() {
            return Ok(false);
        }
        if tables.users.contains_key(&user_id) {
            tables.touch_user(user_id)?;
        }
        Ok(true)
    }
}
