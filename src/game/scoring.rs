//! Round scoring
//!
//! A crime is matched correctly when the mugshot pinned on it carries the same
//! id. Scoring refuses to run until every crime holds a mugshot.

use serde::{Deserialize, Serialize};

use super::feedback::{Feedback, Haptic, Toast, ToastVariant};
use super::inmate::Inmate;
use super::matching::MatchState;
use crate::ledger::PointsLedger;
use crate::round_percent;
use crate::storage::KeyValueStore;

/// Final numbers for a submitted round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResults {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub submitted: bool,
    /// Crime ids matched correctly, in crime display order
    pub correct_matches: Vec<i64>,
    pub points_earned: u64,
}

impl RoundResults {
    /// Every crime matched correctly
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

/// What happened when the player hit submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Some crimes still have no mugshot; nothing was scored
    Incomplete { unmatched: usize },
    /// Round scored and points awarded
    Scored(RoundResults),
}

impl SubmitOutcome {
    pub fn results(&self) -> Option<&RoundResults> {
        match self {
            SubmitOutcome::Scored(results) => Some(results),
            SubmitOutcome::Incomplete { .. } => None,
        }
    }

    /// Toast and haptic cue for this outcome
    pub fn feedback(&self) -> Feedback {
        match self {
            SubmitOutcome::Incomplete { .. } => Feedback {
                toast: Toast {
                    title: "Incomplete Matches".to_string(),
                    description: "Please match all images before submitting.".to_string(),
                    variant: ToastVariant::Destructive,
                },
                haptic: None,
            },
            SubmitOutcome::Scored(results) => {
                let perfect = results.is_perfect();
                let mut description = format!("You got {}% correct!", results.percentage);
                if results.points_earned > 0 {
                    description.push_str(&format!(" +{} points!", results.points_earned));
                }
                Feedback {
                    toast: Toast {
                        title: format!("Your Score: {}/{}", results.score, results.total),
                        description,
                        variant: if perfect {
                            ToastVariant::Default
                        } else {
                            ToastVariant::Destructive
                        },
                    },
                    haptic: Some(if perfect { Haptic::Success } else { Haptic::Error }),
                }
            }
        }
    }
}

/// Score `matches` against `crimes`, crediting the ledger when complete
pub fn score_matches<S: KeyValueStore>(
    matches: &MatchState,
    crimes: &[Inmate],
    ledger: &mut PointsLedger<S>,
) -> SubmitOutcome {
    let unmatched = matches.unmatched(crimes).len();
    if unmatched > 0 {
        return SubmitOutcome::Incomplete { unmatched };
    }

    let correct_matches: Vec<i64> = crimes
        .iter()
        .filter(|crime| {
            let key = crime.key();
            matches.matched_mugshot(&key) == Some(key.as_str())
        })
        .map(|crime| crime.id)
        .collect();

    let score = correct_matches.len();
    let total = crimes.len();
    let points_earned = ledger.add_points(score);

    SubmitOutcome::Scored(RoundResults {
        score,
        total,
        percentage: round_percent(score, total),
        submitted: true,
        correct_matches,
        points_earned,
    })
}
