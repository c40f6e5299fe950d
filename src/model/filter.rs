use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Team;

/// A single-choice filter control: either the "all" sentinel or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    /// `"all"`, `"todos"` and blank input select everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("todos") {
            Ok(Selection::All)
        } else {
            Ok(Selection::Only(s.to_string()))
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(selection) => selection,
            Err(never) => match never {},
        }
    }
}

/// Gallery filter state: sector and kind selectors plus AND-combined tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub sector: Selection,
    pub kind: Selection,
    pub tags: Vec<String>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sector(mut self, sector: impl Into<Selection>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<Selection>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Quick-filter behavior: activate the tag, or deactivate it if already active.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sector == Selection::All && self.kind == Selection::All && self.tags.is_empty()
    }

    pub fn matches(&self, team: &Team) -> bool {
        self.sector.matches(&team.sector)
            && self.kind.matches(&team.kind)
            && self.tags.iter().all(|tag| team.has_tag(tag))
    }

    pub fn apply<'a>(&self, teams: impl IntoIterator<Item = &'a Team>) -> Vec<&'a Team> {
        teams.into_iter().filter(|t| self.matches(t)).collect()
    }
}
