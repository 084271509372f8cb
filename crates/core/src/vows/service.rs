//! Vow store - vows plus per-vow pending/completed progression collections

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use onewun_domain::validation::validate_vow_draft;
use onewun_domain::{Progression, ProgressionFields, Result, UserScope, Vow, VowDraft, VowFields};
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::ports::{ProgressionGateway, VowGateway};
use crate::session::SessionService;

/// Vow store.
///
/// Owns the vow collection (insertion order, unlike the expense store's
/// newest-first order) and, per vow, two parallel progression collections:
/// pending and completed. A progression is in exactly one of the two.
/// Transitions between them are LIFO in both directions - completing
/// archives the most recently added pending entry and undo restores the
/// most recently archived one, so undo always reverses the latest action.
pub struct VowService {
    vows: RwLock<Vec<Vow>>,
    pending: RwLock<HashMap<String, Vec<Progression>>>,
    completed: RwLock<HashMap<String, Vec<Progression>>>,
    gateway: Arc<dyn VowGateway>,
    progressions: Arc<dyn ProgressionGateway>,
    session: Arc<SessionService>,
}

impl VowService {
    /// Create a new vow store with empty collections.
    pub fn new(
        gateway: Arc<dyn VowGateway>,
        progressions: Arc<dyn ProgressionGateway>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            vows: RwLock::new(Vec::new()),
            pending: RwLock::new(HashMap::new()),
            completed: RwLock::new(HashMap::new()),
            gateway,
            progressions,
            session,
        }
    }

    /// Snapshot of the vow collection, insertion order.
    pub async fn vows(&self) -> Vec<Vow> {
        self.vows.read().await.clone()
    }

    /// Snapshot of the pending progressions for one vow.
    pub async fn pending(&self, vow_id: &str) -> Vec<Progression> {
        self.pending.read().await.get(vow_id).cloned().unwrap_or_default()
    }

    /// Snapshot of the completed progressions for one vow.
    pub async fn completed(&self, vow_id: &str) -> Vec<Progression> {
        self.completed.read().await.get(vow_id).cloned().unwrap_or_default()
    }

    /// Fetch the remote vow collection and replace local state with it.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn reload(&self) -> Result<()> {
        let scope = self.session.scope().await?;
        let list = self.gateway.fetch_all(&scope).await?;
        debug!(count = list.len(), "fetched vows");
        let mut state = self.vows.write().await;
        *state = list;
        Ok(())
    }

    /// Create a vow. The draft is validated (field presence, future target,
    /// kind window) before any remote call; `start_date` is stamped with
    /// the call-time instant and never mutated afterwards.
    ///
    /// # Errors
    /// `Validation` for a rejected draft, `Auth` when unauthenticated, or
    /// whatever the gateway surfaces.
    pub async fn add_vow(&self, draft: VowDraft) -> Result<String> {
        let now = Utc::now();
        validate_vow_draft(&draft, now)?;
        let scope = self.session.scope().await?;

        let fields = draft.into_fields(now);
        let id = self.gateway.create(&scope, &fields).await?;
        debug!(id = %id, "stored vow");

        let mut state = self.vows.write().await;
        state.push(Vow::from_fields(id.clone(), fields));
        Ok(id)
    }

    /// Replace a vow wholesale: remote full-record PUT, then the local
    /// record becomes exactly `fields` - prior values are discarded, not
    /// merged. (The expense store merges; the divergence is deliberate.)
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn update_vow(&self, id: &str, fields: VowFields) -> Result<()> {
        let scope = self.session.scope().await?;
        self.gateway.update(&scope, id, &fields).await?;

        let mut state = self.vows.write().await;
        if let Some(existing) = state.iter_mut().find(|vow| vow.id == id) {
            *existing = Vow::from_fields(id.to_string(), fields);
        }
        Ok(())
    }

    /// Delete a vow remotely, then drop it from local state. Progression
    /// collections for the vow are left in place, matching the historical
    /// behavior.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn delete_vow(&self, id: &str) -> Result<()> {
        let scope = self.session.scope().await?;
        self.gateway.delete(&scope, id).await?;

        let mut state = self.vows.write().await;
        state.retain(|vow| vow.id != id);
        Ok(())
    }

    /// Add a pending progression for a vow.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn add_progression(&self, vow_id: &str, text: &str) -> Result<String> {
        let scope = self.session.scope().await?;
        let fields = ProgressionFields { text: text.to_string(), completed_date: None };
        let id = self.progressions.create(&scope, vow_id, &fields).await?;

        let mut pending = self.pending.write().await;
        pending
            .entry(vow_id.to_string())
            .or_default()
            .push(Progression::from_fields(id.clone(), fields));
        Ok(id)
    }

    /// Fetch a vow's remote progression collection and replace the pending
    /// collection wholesale. The completed collection is untouched.
    ///
    /// # Errors
    /// `Auth` when unauthenticated, or whatever the gateway surfaces.
    pub async fn load_progressions(&self, vow_id: &str) -> Result<()> {
        let scope = self.session.scope().await?;
        let list = self.progressions.fetch_all(&scope, vow_id).await?;

        let mut pending = self.pending.write().await;
        pending.insert(vow_id.to_string(), list);
        Ok(())
    }

    /// Archive the most recently added pending progression.
    ///
    /// No-op (no state change, no remote call) when the vow has no pending
    /// entries. Otherwise the last pending entry moves to the completed
    /// collection with a completion timestamp, and the remote update is
    /// issued fire-and-forget: the local transition is already applied when
    /// this returns, and a failed update is logged, never rolled back.
    ///
    /// # Errors
    /// `Auth` when unauthenticated and a transition would have happened.
    pub async fn complete_progression(&self, vow_id: &str) -> Result<()> {
        {
            let pending = self.pending.read().await;
            if pending.get(vow_id).map_or(true, Vec::is_empty) {
                return Ok(());
            }
        }
        let scope = self.session.scope().await?;

        let archived = {
            let mut pending = self.pending.write().await;
            let Some(mut progression) = pending.get_mut(vow_id).and_then(Vec::pop) else {
                return Ok(());
            };
            progression.completed_date = Some(Utc::now());
            progression
        };

        {
            let mut completed = self.completed.write().await;
            completed.entry(vow_id.to_string()).or_default().push(archived.clone());
        }

        self.spawn_progression_sync(scope, vow_id.to_string(), archived);
        Ok(())
    }

    /// Restore the most recently archived progression to pending, clearing
    /// its completion timestamp. Exact inverse of
    /// [`complete_progression`](Self::complete_progression), with the same
    /// no-op and fire-and-forget semantics.
    ///
    /// # Errors
    /// `Auth` when unauthenticated and a transition would have happened.
    pub async fn undo_completion(&self, vow_id: &str) -> Result<()> {
        {
            let completed = self.completed.read().await;
            if completed.get(vow_id).map_or(true, Vec::is_empty) {
                return Ok(());
            }
        }
        let scope = self.session.scope().await?;

        let restored = {
            let mut completed = self.completed.write().await;
            let Some(mut progression) = completed.get_mut(vow_id).and_then(Vec::pop) else {
                return Ok(());
            };
            progression.completed_date = None;
            progression
        };

        {
            let mut pending = self.pending.write().await;
            pending.entry(vow_id.to_string()).or_default().push(restored.clone());
        }

        self.spawn_progression_sync(scope, vow_id.to_string(), restored);
        Ok(())
    }

    fn spawn_progression_sync(&self, scope: UserScope, vow_id: String, progression: Progression) {
        let gateway = Arc::clone(&self.progressions);
        tokio::spawn(async move {
            if let Err(err) =
                gateway.update(&scope, &vow_id, &progression.id, &progression.fields()).await
            {
                error!(
                    error = %err,
                    vow_id = %vow_id,
                    progression_id = %progression.id,
                    "failed to sync progression transition"
                );
            }
        });
    }
}
