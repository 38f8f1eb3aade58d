//! Pure field extractors backing the dialogue stages.
//!
//! Each extractor maps raw user text to a candidate value for exactly one
//! slot, or `None` when the text contains no match. Extractors are stateless,
//! never panic on malformed input, and perform literal pattern matching only;
//! a stronger NLU backend can replace any of them behind the same signature.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::JobRole;

static EMAIL: OnceLock<Regex> = OnceLock::new();
static PHONE: OnceLock<Regex> = OnceLock::new();
static YEARS: OnceLock<Regex> = OnceLock::new();
static NAME_INTRO: OnceLock<Regex> = OnceLock::new();
static NAME_CAPITALIZED: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("hard-coded pattern compiles"))
}

/// First `local@domain.tld`-shaped substring, returned verbatim.
pub fn email(text: &str) -> Option<String> {
    pattern(&EMAIL, r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+")
        .find(text)
        .map(|matched| matched.as_str().to_string())
}

/// First run of at least nine digits/spaces/hyphens bounded by digits, with
/// an optional leading `+`. Normalized to digits plus that leading `+`.
pub fn phone(text: &str) -> Option<String> {
    let matched = pattern(&PHONE, r"\+?\d[\d -]{7,}\d").find(text)?;
    let raw = matched.as_str();
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if raw.starts_with('+') {
        Some(format!("+{digits}"))
    } else {
        Some(digits)
    }
}

/// First integer token, optionally suffixed with `+`/`plus` and a unit word
/// (`years`, `yrs`, `y`). A bare number is accepted too, which is knowingly
/// permissive: stray digits (say, a phone number typed early) also match.
pub fn experience_years(text: &str) -> Option<u32> {
    let captures = pattern(&YEARS, r"(\d+)\s*(?:\+|plus)?\s*(?:years|yrs|y)?").captures(text)?;
    captures[1].parse().ok()
}

/// Membership check against the advertised roles, lower-cased substring
/// first in enumeration order, then keyword-pair heuristics. The fixed-set
/// check always outranks the heuristics; do not reorder.
pub fn job_role(text: &str) -> Option<JobRole> {
    let lowered = text.to_lowercase();
    for role in JobRole::ordered() {
        if lowered.contains(role.canonical()) {
            return Some(role);
        }
    }

    if lowered.contains("full") && lowered.contains("stack") {
        return Some(JobRole::FullStackDeveloper);
    }
    if lowered.contains("software") && lowered.contains("engineer") {
        return Some(JobRole::SoftwareEngineer);
    }
    if lowered.contains("ai") || lowered.contains("ml") {
        return Some(JobRole::AiMlEngineer);
    }
    if lowered.contains("ui") || lowered.contains("ux") {
        return Some(JobRole::UiUxDesigner);
    }
    if lowered.contains("data") && lowered.contains("analyst") {
        return Some(JobRole::DataAnalyst);
    }

    None
}

const QUALIFICATIONS: &[&str] = &[
    "b.tech", "m.tech", "bsc", "msc", "mba", "phd", "bachelor", "master", "diploma",
];

/// Membership check against the qualification vocabulary, first entry in
/// enumeration order wins. Short tokens (≤ 4 chars) render upper-cased,
/// longer ones title-cased.
pub fn qualification(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    QUALIFICATIONS
        .iter()
        .copied()
        .find(|entry| lowered.contains(entry))
        .map(|entry| {
            if entry.len() <= 4 {
                entry.to_ascii_uppercase()
            } else {
                title_case(entry)
            }
        })
}

/// Self-introduction phrases ("I'm Riya", "i am Riya") capturing one
/// capitalized word; falls back to the first capitalized token of at least
/// two letters anywhere in the text.
pub fn name(text: &str) -> Option<String> {
    let intro = pattern(&NAME_INTRO, r"\b[Ii](?:'m| am|`m)\s+([A-Z][a-z]+)");
    if let Some(captures) = intro.captures(text) {
        return Some(captures[1].to_string());
    }

    pattern(&NAME_CAPITALIZED, r"[A-Z][a-z]+")
        .find(text)
        .map(|matched| matched.as_str().to_string())
}

fn title_case(token: &str) -> String {
    let mut rendered = String::with_capacity(token.len());
    let mut at_boundary = true;
    for ch in token.chars() {
        if ch.is_ascii_alphabetic() {
            if at_boundary {
                rendered.push(ch.to_ascii_uppercase());
            } else {
                rendered.push(ch.to_ascii_lowercase());
            }
            at_boundary = false;
        } else {
            rendered.push(ch);
            at_boundary = true;
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_returns_first_match_verbatim() {
        assert_eq!(
            email("reach me at riya@example.com or riya@backup.org"),
            Some("riya@example.com".to_string())
        );
        assert_eq!(
            email("odd.local+tag-1@sub-domain.example.co"),
            Some("odd.local+tag-1@sub-domain.example.co".to_string())
        );
        assert_eq!(email("no address here"), None);
        assert_eq!(email(""), None);
    }

    #[test]
    fn phone_normalizes_to_digits_and_leading_plus() {
        assert_eq!(phone("+91 98765 43210"), Some("+919876543210".to_string()));
        assert_eq!(phone("call 0712-345-678 today"), Some("0712345678".to_string()));
        assert_eq!(phone("12345"), None, "too short to be a phone number");
        assert_eq!(phone(""), None);
    }

    #[test]
    fn phone_found_next_to_email() {
        assert_eq!(
            phone("riya@example.com +91 98765 43210"),
            Some("+919876543210".to_string())
        );
    }

    #[test]
    fn experience_years_accepts_unit_variants_and_bare_numbers() {
        assert_eq!(experience_years("3 years"), Some(3));
        assert_eq!(experience_years("about 2 yrs"), Some(2));
        assert_eq!(experience_years("7+ years"), Some(7));
        assert_eq!(experience_years("5"), Some(5));
        assert_eq!(experience_years("none yet"), None);
    }

    #[test]
    fn job_role_matches_canonical_names_case_insensitively() {
        for role in JobRole::ordered() {
            let text = format!("I want to apply as a {}", role.label().to_uppercase());
            assert_eq!(job_role(&text), Some(role));
        }
    }

    #[test]
    fn job_role_keyword_fallbacks_fire_in_order() {
        assert_eq!(job_role("full-stack, mostly backend"), Some(JobRole::FullStackDeveloper));
        assert_eq!(job_role("engineer, software side"), Some(JobRole::SoftwareEngineer));
        assert_eq!(job_role("ml research"), Some(JobRole::AiMlEngineer));
        assert_eq!(job_role("ux above all"), Some(JobRole::UiUxDesigner));
        assert_eq!(job_role("analyst for data teams"), Some(JobRole::DataAnalyst));
        assert_eq!(job_role("plumber"), None);
    }

    #[test]
    fn job_role_fixed_set_outranks_heuristics() {
        // Mentions "data" and "analyst" too, but the canonical substring for
        // software engineer appears and the fixed-set pass runs first.
        assert_eq!(
            job_role("software engineer with data analyst experience"),
            Some(JobRole::SoftwareEngineer)
        );
    }

    #[test]
    fn qualification_rendering_follows_token_length() {
        assert_eq!(qualification("I hold a B.Tech"), Some("B.Tech".to_string()));
        assert_eq!(qualification("finished my msc last year"), Some("MSC".to_string()));
        assert_eq!(qualification("MBA, 2019"), Some("MBA".to_string()));
        assert_eq!(qualification("bachelor of arts"), Some("Bachelor".to_string()));
        assert_eq!(qualification("self taught"), None);
    }

    #[test]
    fn qualification_is_case_insensitive() {
        for input in ["phd in physics", "PHD IN PHYSICS", "PhD in Physics"] {
            assert_eq!(qualification(input), Some("PHD".to_string()));
        }
    }

    #[test]
    fn qualification_first_vocabulary_entry_wins() {
        // "b.tech" precedes "bachelor" in the vocabulary.
        assert_eq!(
            qualification("bachelor via b.tech program"),
            Some("B.Tech".to_string())
        );
    }

    #[test]
    fn name_prefers_introduction_phrase() {
        assert_eq!(name("Hi, I'm Riya"), Some("Riya".to_string()));
        assert_eq!(name("hello, i am Dev from Pune"), Some("Dev".to_string()));
    }

    #[test]
    fn name_falls_back_to_first_capitalized_token() {
        assert_eq!(name("Riya here"), Some("Riya".to_string()));
        assert_eq!(name("no capitals at all"), None);
        assert_eq!(name(""), None);
    }
}
