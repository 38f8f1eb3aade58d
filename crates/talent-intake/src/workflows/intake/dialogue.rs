use serde::Serialize;

use super::domain::{ApplicationDraft, Sender, Stage, TranscriptEntry};
use super::{extract, prompts};

/// Caller-owned conversation state: the current stage, the draft being
/// filled, and the display transcript. One instance per applicant session;
/// nothing here is shared or global.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Conversation {
    stage: Stage,
    draft: ApplicationDraft,
    transcript: Vec<TranscriptEntry>,
}

/// What a processed turn asks of the service layer.
pub(crate) enum TurnDisposition {
    /// Replies are in the transcript and the stage is settled.
    Continue,
    /// The cover note arrived; the record must be stored before the
    /// conversation may advance to its terminal stage.
    Finalize { cover: String },
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Discard all progress and return to the greeting stage.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn transcript_len(&self) -> usize {
        self.transcript.len()
    }

    pub(crate) fn entries_since(&self, mark: usize) -> Vec<TranscriptEntry> {
        self.transcript[mark..].to_vec()
    }

    pub(crate) fn push_user(&mut self, text: &str) {
        self.transcript.push(TranscriptEntry {
            sender: Sender::User,
            text: text.to_string(),
        });
    }

    pub(crate) fn push_bot(&mut self, text: String) {
        self.transcript.push(TranscriptEntry {
            sender: Sender::Bot,
            text,
        });
    }

    /// Run the current stage's extraction and transition logic over one user
    /// turn. The user entry must already be on the transcript. Every stage
    /// except `ask_cover` settles here; the cover stage defers to the
    /// service so storage failure can veto the final transition.
    pub(crate) fn advance(&mut self, text: &str) -> TurnDisposition {
        match self.stage {
            Stage::Greeting => self.greeting_turn(text),
            Stage::AskRole => self.role_turn(text),
            Stage::AskExperience => self.experience_turn(text),
            Stage::AskQualification => self.qualification_turn(text),
            Stage::AskContact => self.contact_turn(text),
            Stage::AskCover => {
                return TurnDisposition::Finalize {
                    cover: text.to_string(),
                }
            }
            // Terminal: the entry stays on the transcript, nothing replies.
            Stage::Submitted => {}
        }
        TurnDisposition::Continue
    }

    /// Close out a successfully stored application.
    pub(crate) fn complete_submission(&mut self) {
        self.push_bot(prompts::closing());
        self.stage = Stage::Submitted;
    }

    /// Name is cosmetic: the conversation moves on to the role question
    /// whether or not one was extracted.
    fn greeting_turn(&mut self, text: &str) {
        match extract::name(text) {
            Some(name) => {
                self.push_bot(prompts::greeting_known(&name));
                self.draft.name = Some(name);
            }
            None => self.push_bot(prompts::greeting_unknown()),
        }
        self.stage = Stage::AskRole;
    }

    fn role_turn(&mut self, text: &str) {
        match extract::job_role(text) {
            Some(role) => {
                self.draft.job_role = Some(role);
                self.push_bot(prompts::experience_prompt(role));
                self.stage = Stage::AskExperience;
            }
            None => self.push_bot(prompts::role_reprompt()),
        }
    }

    fn experience_turn(&mut self, text: &str) {
        match extract::experience_years(text) {
            Some(years) => {
                self.draft.experience_years = Some(years);
                self.push_bot(prompts::qualification_prompt());
                self.stage = Stage::AskQualification;
            }
            None => self.push_bot(prompts::experience_reprompt()),
        }
    }

    fn qualification_turn(&mut self, text: &str) {
        match extract::qualification(text) {
            Some(qualification) => {
                self.draft.qualification = Some(qualification);
                self.push_bot(prompts::contact_prompt());
                self.stage = Stage::AskContact;
            }
            None => self.push_bot(prompts::qualification_reprompt()),
        }
    }

    /// Email and phone are attempted independently; whichever matches is
    /// kept, so a retry only needs to supply what is still missing.
    fn contact_turn(&mut self, text: &str) {
        if let Some(email) = extract::email(text) {
            self.draft.email = Some(email);
        }
        if let Some(phone) = extract::phone(text) {
            self.draft.phone = Some(phone);
        }

        if self.draft.email.is_some() && self.draft.phone.is_some() {
            self.push_bot(prompts::cover_prompt(
                self.draft.name.as_deref(),
                self.draft.job_role,
            ));
            self.stage = Stage::AskCover;
            return;
        }

        let mut missing = Vec::new();
        if self.draft.email.is_none() {
            missing.push("email");
        }
        if self.draft.phone.is_none() {
            missing.push("phone");
        }
        self.push_bot(prompts::contact_reprompt(&missing));
    }
}
