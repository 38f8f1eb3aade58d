use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::dialogue::{Conversation, TurnDisposition};
use super::domain::{FinalizeError, Stage, TranscriptEntry};
use super::prompts;
use super::repository::{ApplicationStore, StoreError, StoredApplication};

/// Drives conversations against a storage backend. The conversation value is
/// owned by the caller and passed in on every turn; the service itself holds
/// nothing but the store handle.
pub struct IntakeService<S> {
    store: Arc<S>,
}

impl<S> IntakeService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Process one user turn: append the user entry, run the stage logic,
    /// and, when the cover note arrives, persist the completed record.
    ///
    /// Storage failure is the one hard error of the dialogue: the stage
    /// stays at `ask_cover`, a failure notice (worded unlike the
    /// clarification re-prompts) is appended for display, and the error
    /// propagates so the caller never sees a phantom submission.
    pub fn process_turn(
        &self,
        conversation: &mut Conversation,
        input: &str,
    ) -> Result<TurnReport, IntakeServiceError> {
        let text = input.trim();
        let mark = conversation.transcript_len();
        conversation.push_user(text);

        let mut submitted = false;
        match conversation.advance(text) {
            TurnDisposition::Continue => {}
            TurnDisposition::Finalize { cover } => {
                let record = conversation.draft().finalize(cover, Utc::now())?;
                if let Err(err) = self.store.insert(&record) {
                    conversation.push_bot(prompts::storage_failure());
                    return Err(IntakeServiceError::Store(err));
                }
                conversation.complete_submission();
                submitted = true;
            }
        }

        Ok(TurnReport {
            stage: conversation.stage(),
            new_entries: conversation.entries_since(mark),
            submitted,
        })
    }

    /// Stored applications for the admin listing, newest first.
    pub fn applicants(&self) -> Result<Vec<StoredApplication>, StoreError> {
        self.store.list()
    }
}

/// What one processed turn produced, for the presentation layer: the settled
/// stage, the transcript entries appended during the turn (user entry
/// included), and whether the application was persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub stage: Stage,
    pub new_entries: Vec<TranscriptEntry>,
    pub submitted: bool,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Finalize(#[from] FinalizeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
