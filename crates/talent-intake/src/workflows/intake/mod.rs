//! Conversational applicant intake: staged dialogue, field extraction, and
//! the storage contract for completed applications.
//!
//! The dialogue is a fixed linear sequence of stages; each stage elicits one
//! slot of the application via a pattern-matching extractor. Extraction
//! failure is a normal branch (the bot re-prompts), never an error. The only
//! fatal condition is a storage failure at finalization, which keeps the
//! conversation resumable and propagates to the caller.

pub mod dialogue;
pub mod domain;
pub mod export;
pub mod extract;
mod prompts;
pub mod repository;
pub mod router;
pub mod service;

pub use dialogue::Conversation;
pub use domain::{
    ApplicationDraft, CompletedApplication, FinalizeError, JobRole, Sender, Stage, TranscriptEntry,
};
pub use export::{applicants_csv, ExportError};
pub use repository::{ApplicantView, ApplicationStore, StoreError, StoredApplication};
pub use router::{intake_router, ConversationId, ConversationRegistry};
pub use service::{IntakeService, IntakeServiceError, TurnReport};
