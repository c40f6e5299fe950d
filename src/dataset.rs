use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::listing;
use crate::model::{ListingFilter, Team};
use crate::normalize::normalize_teams;

const BUNDLED_TEAMS: &str = include_str!("../assets/data/teams.json");

/// A normalized listing held in memory for the lifetime of a render,
/// ordered most recent first.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    teams: Vec<Team>,
}

impl Dataset {
    pub fn from_teams(mut teams: Vec<Team>) -> Self {
        listing::sort_by_recency(&mut teams);
        Self { teams }
    }

    pub fn from_value(raw: &Value) -> Self {
        Self::from_teams(normalize_teams(raw))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&raw))
    }

    /// The sample listing shipped with the crate.
    pub fn bundled() -> Result<Self> {
        let dataset = Self::from_json_str(BUNDLED_TEAMS)?;
        debug!(count = dataset.len(), "loaded bundled dataset");
        Ok(dataset)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn tags(&self) -> Vec<String> {
        listing::collect_tags(&self.teams)
    }

    pub fn sectors(&self) -> Vec<String> {
        listing::collect_sectors(&self.teams)
    }

    pub fn kinds(&self) -> Vec<String> {
        listing::collect_kinds(&self.teams)
    }

    pub fn filter(&self, filter: &ListingFilter) -> Vec<&Team> {
        filter.apply(&self.teams)
    }

    /// Look up a detail page target by id or slug.
    pub fn find(&self, segment: &str) -> Result<&Team> {
        listing::find_by_route(&self.teams, segment)
    }

    pub fn related(&self, current: &Team, count: usize) -> Vec<&Team> {
        listing::related(&self.teams, current, count)
    }
}
