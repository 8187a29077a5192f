//! # Repository traits: the storage seam between routes and backends
//!
//! Handlers never talk to a database directly. Everything goes through the two
//! async traits below, so the same route code runs against [`crate::PgStore`] in
//! production and [`crate::MemoryStore`] in tests.
//!
//! ## [`SecretRepository`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create_secret`](SecretRepository::create_secret) | Inserts an unowned secret. |
//! | [`list_secrets`](SecretRepository::list_secrets) | Every secret of every user, in no particular order. |
//! | [`find_secret`](SecretRepository::find_secret) | Lookup by id. |
//! | [`update_secret_body`](SecretRepository::update_secret_body) | Replaces the body and bumps `updated_at`; `None` for an unknown id. |
//! | [`delete_secret`](SecretRepository::delete_secret) | Removes the record; `false` for an unknown id. |
//!
//! ## [`UserRepository`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create_user`](UserRepository::create_user) | Inserts a user; fails with [`StoreError::UsernameTaken`] on a duplicate username. |
//! | [`find_user`](UserRepository::find_user) / [`find_user_by_username`](UserRepository::find_user_by_username) | Lookups. |
//! | [`find_user_with_secrets`](UserRepository::find_user_with_secrets) | The user plus their owned secrets as full records. |
//! | [`find_or_create_by_google_id`](UserRepository::find_or_create_by_google_id) | Atomic lookup-or-insert keyed by the Google subject id. |
//! | [`add_secret_ref`](UserRepository::add_secret_ref) | Links an unowned secret to a user. |
//! | [`delete_secret_for_user`](UserRepository::delete_secret_for_user) | Deletes a secret by id and pulls it from the acting user's set in one step; `false` for an unknown id. |
//!
//! Both operations bump the user's `updated_at`.

use std::future::Future;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewUser, Secret, User};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for secret records.
pub trait SecretRepository {
    fn create_secret(&self, body: &str) -> impl Future<Output = StoreResult<Secret>> + Send;

    fn list_secrets(&self) -> impl Future<Output = StoreResult<Vec<Secret>>> + Send;

    fn find_secret(&self, id: Uuid) -> impl Future<Output = StoreResult<Option<Secret>>> + Send;

    fn update_secret_body(
        &self,
        id: Uuid,
        body: &str,
    ) -> impl Future<Output = StoreResult<Option<Secret>>> + Send;

    fn delete_secret(&self, id: Uuid) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Storage for user records and their secret ownership.
pub trait UserRepository {
    fn create_user(&self, user: NewUser) -> impl Future<Output = StoreResult<User>> + Send;

    fn find_user(&self, id: Uuid) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn find_user_with_secrets(
        &self,
        id: Uuid,
    ) -> impl Future<Output = StoreResult<Option<(User, Vec<Secret>)>>> + Send;

    fn find_or_create_by_google_id(
        &self,
        google_id: &str,
        username: &str,
    ) -> impl Future<Output = StoreResult<User>> + Send;

    fn add_secret_ref(
        &self,
        user_id: Uuid,
        secret_id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Deletes the secret whoever owns it. The record and the acting user's
    /// timestamp change together or not at all.
    fn delete_secret_for_user(
        &self,
        user_id: Uuid,
        secret_id: Uuid,
    ) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// A complete backend, cheap to clone into router state.
pub trait Store: SecretRepository + UserRepository + Clone + Send + Sync + 'static {}

impl<T> Store for T where T: SecretRepository + UserRepository + Clone + Send + Sync + 'static {}
