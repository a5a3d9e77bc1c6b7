//! Deterministic round logic
//!
//! Everything the player can do to a round lives here. This module must stay
//! free of platform dependencies:
//! - Seeded RNG only (card shuffles)
//! - Ids compared as strings, in stable (sorted) order
//! - Side effects are returned as `Feedback` values, never performed

pub mod feedback;
pub mod inmate;
pub mod matching;
pub mod round;
pub mod scoring;

pub use feedback::{Feedback, Haptic, Toast, ToastVariant};
pub use inmate::{Inmate, InmatesPayload, placeholder_inmates};
pub use matching::{MatchState, Role};
pub use round::{Round, RoundPhase};
pub use scoring::{RoundResults, SubmitOutcome, score_matches};
