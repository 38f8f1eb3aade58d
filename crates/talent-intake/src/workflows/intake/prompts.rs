//! Bot reply templates, one per transition in the stage table.
//!
//! Clarification re-prompts repeat the expectations of the current stage;
//! [`storage_failure`] is deliberately worded unlike any re-prompt so a
//! failed submission cannot be mistaken for unparsable input.

use super::domain::JobRole;

fn role_options() -> String {
    JobRole::ordered()
        .iter()
        .map(|role| role.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn greeting_known(name: &str) -> String {
    format!(
        "Nice to meet you, {name}! Which role are you applying for? Options: {}",
        role_options()
    )
}

pub(crate) fn greeting_unknown() -> String {
    "Hi! Welcome to the careers team. I'm here to guide you through the application. \
     Which role are you applying for? (e.g., Data Analyst, UI/UX Designer)"
        .to_string()
}

pub(crate) fn experience_prompt(role: JobRole) -> String {
    format!(
        "Perfect choice. How many years of experience do you have in {}?",
        role.label()
    )
}

pub(crate) fn role_reprompt() -> String {
    format!("I didn't catch that. Please choose from: {}.", role_options())
}

pub(crate) fn qualification_prompt() -> String {
    "Thanks! Could you also share your highest qualification? (e.g., B.Tech, M.Tech, MBA)"
        .to_string()
}

pub(crate) fn experience_reprompt() -> String {
    "Could you tell me how many years of experience you have? (e.g., 2 years, 5)".to_string()
}

pub(crate) fn contact_prompt() -> String {
    "Great. Please provide your email and phone number so we can contact you.".to_string()
}

pub(crate) fn qualification_reprompt() -> String {
    "Please state your highest qualification (B.Tech, M.Tech, MBA, B.Sc etc).".to_string()
}

pub(crate) fn cover_prompt(name: Option<&str>, role: Option<JobRole>) -> String {
    let thanks = match name {
        Some(name) if !name.is_empty() => format!("Thank you, {name}!"),
        _ => "Thank you!".to_string(),
    };
    let role = match role {
        Some(role) => format!("the {} role", role.label()),
        None => "the role".to_string(),
    };
    format!(
        "{thanks} Your application for {role} has been recorded. \
         Would you like to add a short cover note or portfolio link?"
    )
}

pub(crate) fn contact_reprompt(missing: &[&str]) -> String {
    format!(
        "I couldn't find your {}. Please provide both email and phone number \
         (e.g., riya@example.com +919876543210).",
        missing.join(" and ")
    )
}

pub(crate) fn closing() -> String {
    "Your application has been submitted. Our HR team will reach out to you soon. Good luck!"
        .to_string()
}

pub(crate) fn storage_failure() -> String {
    "Something went wrong while saving your application. Nothing was lost; \
     please send your cover note again in a moment."
        .to_string()
}
