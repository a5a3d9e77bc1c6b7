//! Match state: which mugshot the player pinned on which crime
//!
//! Keys and values are inmate ids rendered as strings. A mugshot can sit on at
//! most one crime; assigning it elsewhere clears the old crime's slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::inmate::Inmate;

/// Which card column a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Mugshot,
    Crime,
}

/// Crime-to-mugshot assignments plus pending selections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    /// crime id -> mugshot id (`None` once a reassignment cleared it)
    matches: BTreeMap<String, Option<String>>,
    /// crime id -> number of times a mugshot was assigned to it
    attempts: BTreeMap<String, u32>,
    selected_mugshot: Option<String>,
    selected_crime: Option<String>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending selection. Once both a mugshot and a crime are
    /// pending they are committed as a match, returned as `(crime, mugshot)`.
    pub fn select(&mut self, role: Role, id: impl Into<String>) -> Option<(String, String)> {
        let id = id.into();
        match role {
            Role::Mugshot => self.selected_mugshot = Some(id),
            Role::Crime => self.selected_crime = Some(id),
        }

        if self.selected_mugshot.is_some() && self.selected_crime.is_some() {
            let mugshot = self.selected_mugshot.take()?;
            let crime = self.selected_crime.take()?;
            self.assign(&mugshot, &crime);
            return Some((crime, mugshot));
        }
        None
    }

    /// Pin `mugshot` on `crime` directly, clearing pending selections
    pub fn assign(&mut self, mugshot: &str, crime: &str) {
        for slot in self.matches.values_mut() {
            if slot.as_deref() == Some(mugshot) {
                *slot = None;
            }
        }
        self.matches
            .insert(crime.to_string(), Some(mugshot.to_string()));
        *self.attempts.entry(crime.to_string()).or_insert(0) += 1;

        self.selected_mugshot = None;
        self.selected_crime = None;
    }

    /// Drop pending selections without committing
    pub fn clear_selection(&mut self) {
        self.selected_mugshot = None;
        self.selected_crime = None;
    }

    /// Forget everything (new round)
    pub fn clear(&mut self) {
        self.matches.clear();
        self.attempts.clear();
        self.clear_selection();
    }

    pub fn selected(&self, role: Role) -> Option<&str> {
        match role {
            Role::Mugshot => self.selected_mugshot.as_deref(),
            Role::Crime => self.selected_crime.as_deref(),
        }
    }

    /// Mugshot currently pinned on `crime`
    pub fn matched_mugshot(&self, crime: &str) -> Option<&str> {
        self.matches.get(crime).and_then(|m| m.as_deref())
    }

    /// Crime a mugshot is currently pinned on
    pub fn crime_for_mugshot(&self, mugshot: &str) -> Option<&str> {
        self.matches
            .iter()
            .find(|(_, m)| m.as_deref() == Some(mugshot))
            .map(|(crime, _)| crime.as_str())
    }

    /// Number of crimes holding a mugshot
    pub fn matched_count(&self) -> usize {
        self.matches.values().filter(|m| m.is_some()).count()
    }

    /// How many times a mugshot has been assigned to `crime`
    pub fn attempts(&self, crime: &str) -> u32 {
        self.attempts.get(crime).copied().unwrap_or(0)
    }

    /// Entries of `crimes` with no mugshot yet
    pub fn unmatched<'a>(&self, crimes: &'a [Inmate]) -> Vec<&'a Inmate> {
        crimes
            .iter()
            .filter(|c| self.matched_mugshot(&c.key()).is_none())
            .collect()
    }

    /// Whether every crime in `crimes` holds a mugshot
    pub fn is_complete(&self, crimes: &[Inmate]) -> bool {
        crimes
            .iter()
            .all(|c| self.matched_mugshot(&c.key()).is_some())
    }

    /// All (crime, mugshot) pairs, sorted by crime id
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.matches
            .iter()
            .filter_map(|(crime, m)| m.as_deref().map(|m| (crime.as_str(), m)))
    }
}
