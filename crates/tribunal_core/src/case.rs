//! Case domain types
//!
//! Verdicts, evidence kinds and the fielded payloads collected from the
//! request, defense and verdict forms.

use serde::{Deserialize, Serialize};

/// Outcome a steward records for a case.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The complaint was found valid.
    Upheld,
    /// The complaint was examined and found invalid.
    Rejected,
    /// The complaint was not admitted for review.
    Dismissed,
}

impl Verdict {
    /// Human-readable title used in verdict summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Upheld => "Upheld",
            Verdict::Rejected => "Rejected",
            Verdict::Dismissed => "Dismissed",
        }
    }

    /// Stable token used inside component custom ids.
    pub fn token(&self) -> &'static str {
        match self {
            Verdict::Upheld => "upheld",
            Verdict::Rejected => "rejected",
            Verdict::Dismissed => "dismissed",
        }
    }

    /// Parse the token form back into a verdict.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "upheld" => Some(Verdict::Upheld),
            "rejected" => Some(Verdict::Rejected),
            "dismissed" => Some(Verdict::Dismissed),
            _ => None,
        }
    }
}

/// Which form a pending attachment-capture window belongs to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Request,
    Defense,
    Verdict,
}

impl EvidenceKind {
    /// Noun used when describing the capture window to the user.
    pub fn noun(&self) -> &'static str {
        match self {
            EvidenceKind::Request => "request",
            EvidenceKind::Defense => "defense",
            EvidenceKind::Verdict => "ruling",
        }
    }
}

/// Fields collected by the request form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RequestFields {
    /// Optional link to footage of the incident.
    pub video_link: Option<String>,
    /// What kind of damage or infraction is being reported.
    pub damage_type: String,
    /// The requester's argument.
    pub argument: String,
}

/// Fields collected by the defense form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DefenseFields {
    pub video_link: Option<String>,
    pub argument: String,
}

/// Fields collected by the verdict form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VerdictFields {
    /// Regulation article the ruling rests on.
    pub regulation: String,
    /// Sanction applied, if any.
    pub sanction: String,
    /// The panel's reasoning.
    pub rationale: String,
}

/// Upper bound on generated surface names, in characters.
pub const SURFACE_NAME_MAX: usize = 90;

/// Build the discussion-surface name for a case, bounded to
/// [`SURFACE_NAME_MAX`] characters.
pub fn case_surface_name(requester: &str, respondent: &str) -> String {
    let name = format!("review {} vs {}", requester, respondent);
    if name.chars().count() <= SURFACE_NAME_MAX {
        name
    } else {
        name.chars().take(SURFACE_NAME_MAX).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_token_round_trip() {
        for verdict in [Verdict::Upheld, Verdict::Rejected, Verdict::Dismissed] {
            assert_eq!(Verdict::from_token(verdict.token()), Some(verdict));
        }
        assert_eq!(Verdict::from_token("guilty"), None);
    }

    #[test]
    fn test_surface_name_is_bounded() {
        let short = case_surface_name("Ana", "Bruno");
        assert_eq!(short, "review Ana vs Bruno");

        let long = "x".repeat(200);
        let name = case_surface_name(&long, &long);
        assert_eq!(name.chars().count(), SURFACE_NAME_MAX);
    }

    #[test]
    fn test_surface_name_truncates_on_char_boundary() {
        // Multi-byte names must not split a codepoint.
        let name = case_surface_name(&"á".repeat(100), "João");
        assert_eq!(name.chars().count(), SURFACE_NAME_MAX);
        assert!(name.starts_with("review á"));
    }
}
