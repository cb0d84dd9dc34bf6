//! In-memory analysis sessions.
//!
//! One session holds one analyzed document and the user's decisions on it.
//! Nothing is persisted; a restart drops every session, and sessions older
//! than the store's TTL are evicted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::resume::analysis::ResumeAnalysis;
use crate::resume::score::ResumeScore;
use crate::suggestions::markup::ParsedDocument;
use crate::suggestions::reconcile::{final_text, reconstruct, set_decision};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub analyzed_text: String,
    pub document: ParsedDocument,
    pub score: ResumeScore,
    pub created_at: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new(analysis: ResumeAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            analyzed_text: analysis.analyzed_text,
            document: analysis.document,
            score: analysis.score,
            created_at: Utc::now(),
        }
    }

    /// Records an accept/reject decision. Returns false if the suggestion id is unknown.
    pub fn decide(&mut self, suggestion_id: &str, accept: bool) -> bool {
        let known = self.document.suggestions.contains_key(suggestion_id);
        let suggestions = std::mem::take(&mut self.document.suggestions);
        self.document.suggestions = set_decision(suggestions, suggestion_id, accept);
        known
    }

    /// The text the user currently means, falling back to the raw analyzed
    /// text when the reconstruction is blank. `None` when there is nothing at all.
    pub fn current_text(&self) -> Option<String> {
        let reconstructed = reconstruct(&self.document.segments, &self.document.suggestions);
        final_text(reconstructed, Some(&self.analyzed_text))
    }
}

/// Shared store of live analysis sessions.
#[derive(Clone)]
pub struct AnalysisStore {
    sessions: Arc<RwLock<HashMap<Uuid, AnalysisSession>>>,
    ttl: Duration,
}

impl AnalysisStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    /// Inserts the session after evicting every expired one.
    pub async fn insert(&self, session: AnalysisSession) -> Uuid {
        let id = session.id;
        let mut sessions = self.sessions.write().await;
        evict(&mut sessions, Utc::now() - self.ttl);
        sessions.insert(id, session);
        id
    }

    /// Drops sessions created before `now - ttl`. Returns how many were dropped.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        evict(&mut *self.sessions.write().await, now - self.ttl)
    }

    pub async fn get(&self, id: Uuid) -> Option<AnalysisSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Applies `f` to the session under the write lock and returns its result.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut AnalysisSession) -> R) -> Option<R> {
        self.sessions.write().await.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> Option<AnalysisSession> {
        self.sessions.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict(sessions: &mut HashMap<Uuid, AnalysisSession>, cutoff: DateTime<Utc>) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| s.created_at > cutoff);
    let evicted = before - sessions.len();
    if evicted > 0 {
        debug!("Evicted {} expired analysis sessions", evicted);
    }
    evicted
}
