//! Case lifecycle states
//!
//! The pre-surface steps of a case (picking a respondent, filling the
//! request form) live in the session store. Once a surface exists, its
//! review lifecycle is tracked here.

use serde::{Deserialize, Serialize};
use tribunal_core::Verdict;

/// Review lifecycle of a case surface.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseState {
    /// Open, awaiting a defense or a ruling.
    UnderReview,

    /// At least one defense has been posted.
    DefenseSubmitted,

    /// A ruling was recorded. Terminal for the label lifecycle; the
    /// surface itself stays writable for participants and staff.
    Judged { verdict: Verdict },
}

/// Events that drive the case lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseEvent {
    DefensePosted,
    VerdictRecorded { verdict: Verdict },
}

impl CaseState {
    /// Compute the state after an event. A defense never reopens a judged
    /// case; a later ruling replaces the earlier one.
    pub fn apply(&self, event: &CaseEvent) -> CaseState {
        use CaseEvent::*;
        use CaseState::*;

        match (self, event) {
            (UnderReview, DefensePosted) => DefenseSubmitted,
            (DefenseSubmitted, DefensePosted) => DefenseSubmitted,
            (Judged { verdict }, DefensePosted) => Judged {
                verdict: *verdict,
            },
            (_, VerdictRecorded { verdict }) => Judged { verdict: *verdict },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_advances_review() {
        let next = CaseState::UnderReview.apply(&CaseEvent::DefensePosted);
        assert_eq!(next, CaseState::DefenseSubmitted);

        // A second defense is allowed and changes nothing.
        let again = next.apply(&CaseEvent::DefensePosted);
        assert_eq!(again, CaseState::DefenseSubmitted);
    }

    #[test]
    fn test_verdict_is_reachable_from_any_state() {
        let verdict = CaseEvent::VerdictRecorded {
            verdict: Verdict::Upheld,
        };
        let judged = CaseState::Judged {
            verdict: Verdict::Upheld,
        };

        assert_eq!(CaseState::UnderReview.apply(&verdict), judged);
        assert_eq!(CaseState::DefenseSubmitted.apply(&verdict), judged);
    }

    #[test]
    fn test_late_defense_does_not_reopen_a_judged_case() {
        let judged = CaseState::Judged {
            verdict: Verdict::Rejected,
        };
        assert_eq!(judged.apply(&CaseEvent::DefensePosted), judged);
    }

    #[test]
    fn test_rejudgment_replaces_the_verdict() {
        let judged = CaseState::Judged {
            verdict: Verdict::Rejected,
        };
        let next = judged.apply(&CaseEvent::VerdictRecorded {
            verdict: Verdict::Upheld,
        });
        assert_eq!(
            next,
            CaseState::Judged {
                verdict: Verdict::Upheld
            }
        );
    }
}
