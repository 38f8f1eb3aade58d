use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::dialogue::Conversation;
use super::domain::Stage;
use super::export;
use super::repository::{ApplicationStore, StoredApplication};
use super::service::{IntakeService, IntakeServiceError};

/// Identifier wrapper for server-held conversations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

/// Session map for conversations opened over HTTP. Owned by the router
/// state; deliberately not a process-wide singleton so independent routers
/// (and tests) get independent sessions.
#[derive(Default)]
pub struct ConversationRegistry {
    sequence: AtomicU64,
    sessions: Mutex<HashMap<ConversationId, Conversation>>,
}

impl ConversationRegistry {
    pub fn open(&self) -> ConversationId {
        let id = ConversationId(format!(
            "conv-{:06}",
            self.sequence.fetch_add(1, Ordering::Relaxed) + 1
        ));
        self.sessions
            .lock()
            .expect("registry mutex poisoned")
            .insert(id.clone(), Conversation::new());
        id
    }

    /// Run a closure against one conversation while holding its slot. Turns
    /// are fully processed before the next is accepted.
    pub fn with_conversation<T>(
        &self,
        id: &ConversationId,
        apply: impl FnOnce(&mut Conversation) -> T,
    ) -> Option<T> {
        let mut guard = self.sessions.lock().expect("registry mutex poisoned");
        guard.get_mut(id).map(apply)
    }
}

/// Shared state behind the intake routes.
pub struct IntakeRouterState<S> {
    pub service: Arc<IntakeService<S>>,
    pub registry: Arc<ConversationRegistry>,
}

impl<S> Clone for IntakeRouterState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            registry: Arc::clone(&self.registry),
        }
    }
}

/// Router builder exposing the conversational intake and the admin listing.
pub fn intake_router<S>(service: Arc<IntakeService<S>>) -> Router
where
    S: ApplicationStore + 'static,
{
    let state = IntakeRouterState {
        service,
        registry: Arc::new(ConversationRegistry::default()),
    };

    Router::new()
        .route("/api/v1/intake/conversations", post(open_handler::<S>))
        .route(
            "/api/v1/intake/conversations/:conversation_id/messages",
            post(message_handler::<S>),
        )
        .route(
            "/api/v1/intake/conversations/:conversation_id/reset",
            post(reset_handler::<S>),
        )
        .route("/api/v1/intake/applicants", get(applicants_handler::<S>))
        .route(
            "/api/v1/intake/applicants/export",
            get(export_handler::<S>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageRequest {
    pub(crate) text: String,
}

pub(crate) async fn open_handler<S>(State(state): State<IntakeRouterState<S>>) -> Response
where
    S: ApplicationStore + 'static,
{
    let id = state.registry.open();
    let payload = json!({
        "conversation_id": id.0,
        "stage": Stage::Greeting.label(),
    });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn message_handler<S>(
    State(state): State<IntakeRouterState<S>>,
    Path(conversation_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let id = ConversationId(conversation_id);
    let outcome = state.registry.with_conversation(&id, |conversation| {
        state.service.process_turn(conversation, &request.text)
    });

    match outcome {
        None => unknown_conversation(&id),
        Some(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Some(Err(err @ IntakeServiceError::Store(_))) => {
            let payload = json!({
                "error": err.to_string(),
                "stage": Stage::AskCover.label(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Some(Err(other)) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn reset_handler<S>(
    State(state): State<IntakeRouterState<S>>,
    Path(conversation_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let id = ConversationId(conversation_id);
    match state
        .registry
        .with_conversation(&id, |conversation| conversation.reset())
    {
        Some(()) => {
            let payload = json!({
                "conversation_id": id.0,
                "stage": Stage::Greeting.label(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        None => unknown_conversation(&id),
    }
}

pub(crate) async fn applicants_handler<S>(State(state): State<IntakeRouterState<S>>) -> Response
where
    S: ApplicationStore + 'static,
{
    match state.service.applicants() {
        Ok(records) => {
            let applicants: Vec<_> = records.iter().map(StoredApplication::view).collect();
            let payload = json!({
                "total": applicants.len(),
                "applicants": applicants,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => storage_unavailable(err.to_string()),
    }
}

pub(crate) async fn export_handler<S>(State(state): State<IntakeRouterState<S>>) -> Response
where
    S: ApplicationStore + 'static,
{
    let records = match state.service.applicants() {
        Ok(records) => records,
        Err(err) => return storage_unavailable(err.to_string()),
    };

    match export::applicants_csv(&records) {
        Ok(rendered) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"applicants.csv\"",
                ),
            ],
            rendered,
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn unknown_conversation(id: &ConversationId) -> Response {
    let payload = json!({
        "error": "unknown conversation",
        "conversation_id": id.0,
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn storage_unavailable(detail: String) -> Response {
    let payload = json!({ "error": detail });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
