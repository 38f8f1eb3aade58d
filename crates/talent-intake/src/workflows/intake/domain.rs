use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One state in the conversation's fixed linear sequence. Each non-terminal
/// stage determines which slot is currently being elicited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    AskRole,
    AskExperience,
    AskQualification,
    AskContact,
    AskCover,
    Submitted,
}

impl Stage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Greeting,
            Self::AskRole,
            Self::AskExperience,
            Self::AskQualification,
            Self::AskContact,
            Self::AskCover,
            Self::Submitted,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::AskRole => "ask_role",
            Self::AskExperience => "ask_experience",
            Self::AskQualification => "ask_qualification",
            Self::AskContact => "ask_contact",
            Self::AskCover => "ask_cover",
            Self::Submitted => "submitted",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Greeting
    }
}

/// The fixed set of advertised roles an applicant can apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobRole {
    FullStackDeveloper,
    SoftwareEngineer,
    AiMlEngineer,
    UiUxDesigner,
    DataAnalyst,
}

impl JobRole {
    /// Enumeration order doubles as match priority in the role extractor.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::FullStackDeveloper,
            Self::SoftwareEngineer,
            Self::AiMlEngineer,
            Self::UiUxDesigner,
            Self::DataAnalyst,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullStackDeveloper => "Full Stack Developer",
            Self::SoftwareEngineer => "Software Engineer",
            Self::AiMlEngineer => "AI/ML Engineer",
            Self::UiUxDesigner => "UI/UX Designer",
            Self::DataAnalyst => "Data Analyst",
        }
    }

    /// Lower-cased form used for substring membership checks.
    pub(crate) const fn canonical(self) -> &'static str {
        match self {
            Self::FullStackDeveloper => "full stack developer",
            Self::SoftwareEngineer => "software engineer",
            Self::AiMlEngineer => "ai/ml engineer",
            Self::UiUxDesigner => "ui/ux designer",
            Self::DataAnalyst => "data analyst",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

impl Sender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::User => "user",
        }
    }
}

/// One exchanged message, kept for display only; extraction never reads the
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
}

/// Slot accumulator for one in-progress application. Every slot stays empty
/// until its stage extracts a value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub name: Option<String>,
    pub job_role: Option<JobRole>,
    pub experience_years: Option<u32>,
    pub qualification: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ApplicationDraft {
    /// Freeze the draft into a submittable record.
    ///
    /// The name slot is cosmetic: a conversation may reach finalization
    /// without one, in which case the record carries an empty string. All
    /// other slots must have been filled by their stages.
    pub fn finalize(
        &self,
        cover: String,
        submitted_at: DateTime<Utc>,
    ) -> Result<CompletedApplication, FinalizeError> {
        Ok(CompletedApplication {
            name: self.name.clone().unwrap_or_default(),
            job_role: self.job_role.ok_or(FinalizeError::MissingSlot("job_role"))?,
            experience_years: self
                .experience_years
                .ok_or(FinalizeError::MissingSlot("experience_years"))?,
            qualification: self
                .qualification
                .clone()
                .ok_or(FinalizeError::MissingSlot("qualification"))?,
            email: self.email.clone().ok_or(FinalizeError::MissingSlot("email"))?,
            phone: self.phone.clone().ok_or(FinalizeError::MissingSlot("phone"))?,
            cover,
            submitted_at,
        })
    }
}

/// Raised when finalization is attempted before a required slot was filled.
/// The stage machine fills slots in order, so this only fires on misuse of
/// the draft outside a conversation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinalizeError {
    #[error("required slot `{0}` has not been filled")]
    MissingSlot(&'static str),
}

/// A finalized application, handed to the store exactly once. The cover note
/// may be empty; every other field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedApplication {
    pub name: String,
    pub job_role: JobRole,
    pub experience_years: u32,
    pub qualification: String,
    pub email: String,
    pub phone: String,
    pub cover: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled_draft() -> ApplicationDraft {
        ApplicationDraft {
            name: Some("Riya".to_string()),
            job_role: Some(JobRole::DataAnalyst),
            experience_years: Some(3),
            qualification: Some("B.Tech".to_string()),
            email: Some("riya@example.com".to_string()),
            phone: Some("+919876543210".to_string()),
        }
    }

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 3, 9, 30, 0).unwrap()
    }

    #[test]
    fn finalize_produces_full_record() {
        let record = filled_draft()
            .finalize("Portfolio: example.dev/riya".to_string(), submitted_at())
            .expect("all required slots filled");
        assert_eq!(record.name, "Riya");
        assert_eq!(record.job_role, JobRole::DataAnalyst);
        assert_eq!(record.cover, "Portfolio: example.dev/riya");
        assert_eq!(record.submitted_at, submitted_at());
    }

    #[test]
    fn finalize_tolerates_missing_name() {
        let mut draft = filled_draft();
        draft.name = None;
        let record = draft
            .finalize(String::new(), submitted_at())
            .expect("name is optional");
        assert_eq!(record.name, "");
        assert_eq!(record.cover, "");
    }

    #[test]
    fn finalize_rejects_missing_required_slot() {
        let mut draft = filled_draft();
        draft.phone = None;
        assert_eq!(
            draft.finalize(String::new(), submitted_at()),
            Err(FinalizeError::MissingSlot("phone"))
        );
    }

    #[test]
    fn stage_order_matches_elicitation_sequence() {
        let stages = Stage::ordered();
        assert_eq!(stages[0], Stage::Greeting);
        assert_eq!(stages[6], Stage::Submitted);
        assert!(Stage::Submitted.is_terminal());
        assert!(!Stage::AskCover.is_terminal());
    }

    #[test]
    fn job_role_label_round_trips() {
        for role in JobRole::ordered() {
            assert_eq!(JobRole::from_label(role.label()), Some(role));
        }
        assert_eq!(JobRole::from_label("data analyst"), Some(JobRole::DataAnalyst));
        assert_eq!(JobRole::from_label("Astronaut"), None);
    }
}
