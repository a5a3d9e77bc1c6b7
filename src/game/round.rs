//! Round lifecycle
//!
//! `Loading -> Ready -> Matching* -> Submitted -> Ready (reset)`, with `Error`
//! entered when the roster fetch fails. A failed fetch still installs the
//! placeholder roster so the round stays playable while the retry is offered.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::inmate::{Inmate, placeholder_inmates};
use super::matching::{MatchState, Role};
use super::scoring::{RoundResults, SubmitOutcome, score_matches};
use crate::consts::LOAD_ERROR_MESSAGE;
use crate::ledger::PointsLedger;
use crate::source::{InmateSource, SourceError};
use crate::storage::KeyValueStore;
use crate::{format_elapsed, round_percent};

/// Where the round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Roster fetch in flight
    Loading,
    /// Cards shuffled, nothing matched yet
    Ready,
    /// At least one match committed
    Matching,
    /// Results fixed until reset
    Submitted,
    /// Roster fetch failed; placeholder roster in play
    Error,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Loading => "loading",
            RoundPhase::Ready => "ready",
            RoundPhase::Matching => "matching",
            RoundPhase::Submitted => "submitted",
            RoundPhase::Error => "error",
        }
    }
}

/// One play-through over a shuffled roster
#[derive(Debug, Clone)]
pub struct Round {
    phase: RoundPhase,
    inmates: Vec<Inmate>,
    mugshot_order: Vec<Inmate>,
    crime_order: Vec<Inmate>,
    matches: MatchState,
    results: Option<RoundResults>,
    load_error: Option<String>,
    /// Mugshot id the mobile crime picker is open for
    picker: Option<String>,
    /// Wall clock (ms) when the cards were last shuffled
    started_at_ms: f64,
    rng: Pcg32,
}

impl Round {
    /// Create an empty round waiting for its roster
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RoundPhase::Loading,
            inmates: Vec::new(),
            mugshot_order: Vec::new(),
            crime_order: Vec::new(),
            matches: MatchState::new(),
            results: None,
            load_error: None,
            picker: None,
            started_at_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Enter `Loading` (initial load and retry). Clears any load error.
    pub fn begin_load(&mut self) {
        self.phase = RoundPhase::Loading;
        self.load_error = None;
        self.picker = None;
        self.matches.clear_selection();
        log::info!("Loading inmate roster...");
    }

    /// Install the fetched roster, or the placeholder roster on failure.
    /// An empty roster counts as a failure. Starts the clock at `now_ms`.
    pub fn finish_load(&mut self, fetched: Result<Vec<Inmate>, SourceError>, now_ms: f64) {
        let fetched = fetched.and_then(|inmates| {
            if inmates.is_empty() {
                Err(SourceError::EmptyRoster)
            } else {
                Ok(inmates)
            }
        });
        match fetched {
            Ok(inmates) => {
                log::info!("Loaded {} inmates", inmates.len());
                self.inmates = inmates;
                self.load_error = None;
                self.reset(now_ms);
            }
            Err(e) => {
                log::error!("Error fetching inmate data: {}", e);
                self.inmates = placeholder_inmates();
                self.reset(now_ms);
                self.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.phase = RoundPhase::Error;
            }
        }
    }

    /// Fetch the roster from `source` and install it. Also serves as retry.
    pub async fn load_from<S: InmateSource>(&mut self, source: &S, now_ms: f64) {
        self.begin_load();
        let fetched = source.fetch_inmates().await;
        self.finish_load(fetched, now_ms);
    }

    /// Re-shuffle both card columns, clear matches, attempts and results,
    /// and restart the clock at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        if self.inmates.is_empty() {
            return;
        }

        self.mugshot_order = self.inmates.clone();
        self.mugshot_order.shuffle(&mut self.rng);
        self.crime_order = self.inmates.clone();
        self.crime_order.shuffle(&mut self.rng);

        self.matches.clear();
        self.results = None;
        self.picker = None;
        self.started_at_ms = now_ms;
        self.phase = RoundPhase::Ready;
        log::info!("Round shuffled ({} inmates)", self.inmates.len());
    }

    /// Whether selections and submission are accepted
    pub fn is_playable(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::Ready | RoundPhase::Matching | RoundPhase::Error
        )
    }

    /// Record a card click. Returns the `(crime, mugshot)` pair if it
    /// completed a match.
    pub fn select(&mut self, role: Role, id: impl Into<String>) -> Option<(String, String)> {
        if !self.is_playable() {
            return None;
        }
        let committed = self.matches.select(role, id);
        if committed.is_some() {
            self.phase = RoundPhase::Matching;
        }
        committed
    }

    /// Pin a mugshot on a crime directly
    pub fn assign(&mut self, mugshot: &str, crime: &str) -> bool {
        if !self.is_playable() {
            return false;
        }
        self.matches.assign(mugshot, crime);
        self.phase = RoundPhase::Matching;
        true
    }

    /// Open the mobile crime picker for a mugshot
    pub fn open_crime_picker(&mut self, mugshot: impl Into<String>) {
        if self.is_playable() {
            self.picker = Some(mugshot.into());
        }
    }

    /// Pick a crime in the mobile picker; assigns and closes it
    pub fn pick_crime(&mut self, crime: &str) -> bool {
        let Some(mugshot) = self.picker.take() else {
            return false;
        };
        self.assign(&mugshot, crime)
    }

    pub fn close_crime_picker(&mut self) {
        self.picker = None;
    }

    /// Mugshot the crime picker is open for
    pub fn crime_picker(&self) -> Option<&Inmate> {
        self.picker.as_deref().and_then(|id| self.inmate(id))
    }

    /// Score the round. `None` when the round is not accepting submissions.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        ledger: &mut PointsLedger<S>,
    ) -> Option<SubmitOutcome> {
        if !self.is_playable() {
            return None;
        }

        let outcome = score_matches(&self.matches, &self.crime_order, ledger);
        match &outcome {
            SubmitOutcome::Incomplete { unmatched } => {
                log::info!("Submit rejected: {} crimes unmatched", unmatched);
            }
            SubmitOutcome::Scored(results) => {
                log::info!(
                    "Round scored {}/{} ({}%), +{} points",
                    results.score,
                    results.total,
                    results.percentage,
                    results.points_earned
                );
                self.results = Some(results.clone());
                self.picker = None;
                self.matches.clear_selection();
                self.phase = RoundPhase::Submitted;
            }
        }
        Some(outcome)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Mugshot column, in display order
    pub fn mugshots(&self) -> &[Inmate] {
        &self.mugshot_order
    }

    /// Crime column, in display order
    pub fn crimes(&self) -> &[Inmate] {
        &self.crime_order
    }

    pub fn matches(&self) -> &MatchState {
        &self.matches
    }

    pub fn results(&self) -> Option<&RoundResults> {
        self.results.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Look up an inmate by id
    pub fn inmate(&self, id: &str) -> Option<&Inmate> {
        let id: i64 = id.trim().parse().ok()?;
        self.inmates.iter().find(|i| i.id == id)
    }

    pub fn matched_count(&self) -> usize {
        self.matches.matched_count()
    }

    pub fn total(&self) -> usize {
        self.crime_order.len()
    }

    /// Share of crimes holding a mugshot, 0-100
    pub fn progress_percent(&self) -> u32 {
        round_percent(self.matched_count(), self.total())
    }

    /// Wall clock (ms) when the current shuffle was dealt
    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    /// Time on the clock as `m:ss`
    pub fn elapsed(&self, now_ms: f64) -> String {
        format_elapsed(now_ms - self.started_at_ms)
    }
}
