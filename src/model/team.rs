use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{defaults, metric, slugify};

/// A normalized team/project record as shown in the showcase gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub company: String,
    pub description: String,
    pub cover_url: String,
    pub sector: String,
    pub kind: String,
    pub tags: Vec<String>,
    pub date: Option<NaiveDate>,
    pub members: Vec<Member>,
    pub metrics: Vec<Metric>,
}

/// A member of a team, with the performance counters shown on detail pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: String,
    pub country: String,
    pub avatar_url: String,
    pub hours: f64,
    pub deliverables: f64,
    pub reviews: f64,
    pub rating: f64,
    pub simulations: f64,
}

/// A labeled statistic attached to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub sublabel: Option<String>,
}

impl Team {
    /// Slug of the display name, used for routing and identity checks.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Name slug usable as an identity: `None` when the name is the
    /// placeholder or slugs to nothing.
    pub fn name_slug(&self) -> Option<String> {
        if self.name == defaults::TEAM_NAME {
            return None;
        }
        Some(self.slug()).filter(|slug| !slug.is_empty())
    }

    /// Ordering key for listings: the record date as epoch milliseconds when
    /// known, otherwise the numeric id, otherwise 0.
    pub fn sort_key(&self) -> i64 {
        if let Some(millis) = self
            .date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
        {
            return millis;
        }
        let id = self.id.trim();
        id.parse::<i64>()
            .ok()
            .or_else(|| {
                id.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n as i64)
            })
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// First metric whose label contains any of `needles`, ignoring case.
    pub fn metric(&self, needles: &[&str]) -> Option<&Metric> {
        metric::find_metric(&self.metrics, needles)
    }

    /// Integer count extracted from the matching metric, formatted for display.
    pub fn metric_count(&self, needles: &[&str]) -> String {
        metric::metric_count(&self.metrics, needles)
    }

    pub fn total_hours(&self) -> f64 {
        self.members.iter().map(|m| m.hours).sum()
    }

    pub fn total_deliverables(&self) -> f64 {
        self.members.iter().map(|m| m.deliverables).sum()
    }

    /// Mean member rating; 0 for a team without members.
    pub fn average_rating(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.rating).sum::<f64>() / self.members.len() as f64
    }
}
