//! In-memory mock implementations of the core ports
//!
//! Deterministic stand-ins for the remote document store, the identity
//! service and durable credential storage, so store tests run without any
//! network or filesystem dependency. Mocks record every call for
//! assertions and hand out sequential server keys.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use onewun_core::expenses::ports::{ExpenseGateway, WorkoutGateway};
use onewun_core::session::ports::{CredentialStore, IdentityGateway};
use onewun_core::vows::ports::{ProgressionGateway, VowGateway};
use onewun_core::SessionService;
use onewun_domain::{
    AuthTokens, Expense, ExpenseFields, OneWunError, Progression, ProgressionFields,
    RefreshedTokens, Result, UserScope, Vow, VowFields, Workout, WorkoutFields,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
});

/// Install the test log subscriber once per process.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// In-memory `CredentialStore`.
#[derive(Default, Clone)]
pub struct MockCredentialStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one entry before a test runs.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        self
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Identity gateway mock. `refresh` succeeds only when a rotated pair was
/// seeded; sign-up/sign-in succeed only when an account response was seeded.
#[derive(Default, Clone)]
pub struct MockIdentityGateway {
    account_response: Arc<Mutex<Option<AuthTokens>>>,
    refresh_response: Arc<Mutex<Option<RefreshedTokens>>>,
    refresh_calls: Arc<AtomicUsize>,
}

impl MockIdentityGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, tokens: AuthTokens) -> Self {
        *self.account_response.lock().unwrap() = Some(tokens);
        self
    }

    pub fn with_refresh(self, tokens: RefreshedTokens) -> Self {
        *self.refresh_response.lock().unwrap() = Some(tokens);
        self
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityGateway for MockIdentityGateway {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<AuthTokens> {
        self.account_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OneWunError::Auth("EMAIL_EXISTS".to_string()))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthTokens> {
        self.account_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OneWunError::Auth("INVALID_PASSWORD".to_string()))
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<RefreshedTokens> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OneWunError::Auth("TOKEN_EXPIRED".to_string()))
    }
}

/// Expense gateway mock with sequential `exp-N` keys.
#[derive(Default, Clone)]
pub struct MockExpenseGateway {
    seq: Arc<AtomicUsize>,
    pub remote: Arc<Mutex<Vec<Expense>>>,
    pub created: Arc<Mutex<Vec<ExpenseFields>>>,
    pub updated: Arc<Mutex<Vec<(String, ExpenseFields)>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
    pub scopes: Arc<Mutex<Vec<UserScope>>>,
}

impl MockExpenseGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(self, list: Vec<Expense>) -> Self {
        *self.remote.lock().unwrap() = list;
        self
    }
}

#[async_trait]
impl ExpenseGateway for MockExpenseGateway {
    async fn create(&self, scope: &UserScope, fields: &ExpenseFields) -> Result<String> {
        self.scopes.lock().unwrap().push(scope.clone());
        self.created.lock().unwrap().push(fields.clone());
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("exp-{n}"))
    }

    async fn fetch_all(&self, scope: &UserScope) -> Result<Vec<Expense>> {
        self.scopes.lock().unwrap().push(scope.clone());
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn update(&self, scope: &UserScope, id: &str, fields: &ExpenseFields) -> Result<()> {
        self.scopes.lock().unwrap().push(scope.clone());
        self.updated.lock().unwrap().push((id.to_string(), fields.clone()));
        Ok(())
    }

    async fn delete(&self, scope: &UserScope, id: &str) -> Result<()> {
        self.scopes.lock().unwrap().push(scope.clone());
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Workout gateway mock; `fail_creates` makes every create reject, for the
/// partial-failure path.
#[derive(Default, Clone)]
pub struct MockWorkoutGateway {
    seq: Arc<AtomicUsize>,
    fail_creates: Arc<AtomicBool>,
    pub remote: Arc<Mutex<HashMap<String, Vec<Workout>>>>,
    pub created: Arc<Mutex<Vec<(String, WorkoutFields)>>>,
    pub updated: Arc<Mutex<Vec<(String, String, WorkoutFields)>>>,
    pub deleted: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockWorkoutGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(self, expense_id: &str, workouts: Vec<Workout>) -> Self {
        self.remote.lock().unwrap().insert(expense_id.to_string(), workouts);
        self
    }

    pub fn failing_creates(self) -> Self {
        self.fail_creates.store(true, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl WorkoutGateway for MockWorkoutGateway {
    async fn create(
        &self,
        _scope: &UserScope,
        expense_id: &str,
        fields: &WorkoutFields,
    ) -> Result<String> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(OneWunError::Network("connection reset".to_string()));
        }
        self.created.lock().unwrap().push((expense_id.to_string(), fields.clone()));
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("wk-{n}"))
    }

    async fn fetch_all(&self, _scope: &UserScope, expense_id: &str) -> Result<Vec<Workout>> {
        Ok(self.remote.lock().unwrap().get(expense_id).cloned().unwrap_or_default())
    }

    async fn update(
        &self,
        _scope: &UserScope,
        expense_id: &str,
        workout_id: &str,
        fields: &WorkoutFields,
    ) -> Result<()> {
        self.updated.lock().unwrap().push((
            expense_id.to_string(),
            workout_id.to_string(),
            fields.clone(),
        ));
        Ok(())
    }

    async fn delete(&self, _scope: &UserScope, expense_id: &str, workout_id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push((expense_id.to_string(), workout_id.to_string()));
        Ok(())
    }
}

/// Vow gateway mock with sequential `vow-N` keys.
#[derive(Default, Clone)]
pub struct MockVowGateway {
    seq: Arc<AtomicUsize>,
    pub remote: Arc<Mutex<Vec<Vow>>>,
    pub created: Arc<Mutex<Vec<VowFields>>>,
    pub updated: Arc<Mutex<Vec<(String, VowFields)>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
}

impl MockVowGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VowGateway for MockVowGateway {
    async fn create(&self, _scope: &UserScope, fields: &VowFields) -> Result<String> {
        self.created.lock().unwrap().push(fields.clone());
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("vow-{n}"))
    }

    async fn fetch_all(&self, _scope: &UserScope) -> Result<Vec<Vow>> {
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn update(&self, _scope: &UserScope, id: &str, fields: &VowFields) -> Result<()> {
        self.updated.lock().unwrap().push((id.to_string(), fields.clone()));
        Ok(())
    }

    async fn delete(&self, _scope: &UserScope, id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

/// Progression gateway mock with sequential `prog-N` keys.
#[derive(Default, Clone)]
pub struct MockProgressionGateway {
    seq: Arc<AtomicUsize>,
    pub remote: Arc<Mutex<HashMap<String, Vec<Progression>>>>,
    pub created: Arc<Mutex<Vec<(String, ProgressionFields)>>>,
    pub updated: Arc<Mutex<Vec<(String, String, ProgressionFields)>>>,
    pub deleted: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProgressionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(self, vow_id: &str, list: Vec<Progression>) -> Self {
        self.remote.lock().unwrap().insert(vow_id.to_string(), list);
        self
    }

    pub fn update_count(&self) -> usize {
        self.updated.lock().unwrap().len()
    }
}

#[async_trait]
impl ProgressionGateway for MockProgressionGateway {
    async fn create(
        &self,
        _scope: &UserScope,
        vow_id: &str,
        fields: &ProgressionFields,
    ) -> Result<String> {
        self.created.lock().unwrap().push((vow_id.to_string(), fields.clone()));
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("prog-{n}"))
    }

    async fn fetch_all(&self, _scope: &UserScope, vow_id: &str) -> Result<Vec<Progression>> {
        Ok(self.remote.lock().unwrap().get(vow_id).cloned().unwrap_or_default())
    }

    async fn update(
        &self,
        _scope: &UserScope,
        vow_id: &str,
        progression_id: &str,
        fields: &ProgressionFields,
    ) -> Result<()> {
        self.updated.lock().unwrap().push((
            vow_id.to_string(),
            progression_id.to_string(),
            fields.clone(),
        ));
        Ok(())
    }

    async fn delete(&self, _scope: &UserScope, vow_id: &str, progression_id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push((vow_id.to_string(), progression_id.to_string()));
        Ok(())
    }
}

/// A session supervisor over fresh mocks, already authenticated as `u1`.
pub async fn authenticated_session() -> Arc<SessionService> {
    let session = anonymous_session();
    session.authenticate("t1", "u1").await;
    session
}

/// A session supervisor over fresh mocks, not authenticated.
pub fn anonymous_session() -> Arc<SessionService> {
    init_tracing();
    Arc::new(SessionService::new(
        Arc::new(MockCredentialStore::new()),
        Arc::new(MockIdentityGateway::new()),
    ))
}

/// Await a condition that a spawned background task will establish.
pub async fn eventually(description: &str, condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for: {description}");
}
