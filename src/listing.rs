//! Sorting, exclusion, sampling and lookup over normalized listings.

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{Result, ShowcaseError};
use crate::model::Team;
use crate::normalize::slugify;

/// Most recent (or highest id) first. Equal keys keep their input order.
pub fn sort_by_recency(teams: &mut [Team]) {
    teams.sort_by_key(|team| std::cmp::Reverse(team.sort_key()));
}

/// Whether `candidate` is the same record as `current`, by id or by name slug.
/// Unnamed records only ever match by id.
pub fn is_same_record(candidate: &Team, current: &Team) -> bool {
    if candidate.id == current.id {
        return true;
    }
    match (candidate.name_slug(), current.name_slug()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Candidate pool for "related" widgets: everything except `current`.
pub fn exclude_current<'a>(
    teams: impl IntoIterator<Item = &'a Team>,
    current: &Team,
) -> Vec<&'a Team> {
    teams
        .into_iter()
        .filter(|team| !is_same_record(team, current))
        .collect()
}

/// Uniform random selection of up to `count` items from `pool`.
pub fn sample<T, R: Rng + ?Sized>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Up to `count` random records other than `current`, reshuffled on every call.
pub fn related<'a>(teams: &'a [Team], current: &Team, count: usize) -> Vec<&'a Team> {
    related_with(teams, current, count, &mut rand::rng())
}

pub fn related_with<'a, R: Rng + ?Sized>(
    teams: &'a [Team],
    current: &Team,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Team> {
    let pool = exclude_current(teams, current);
    let picked = sample(pool, count, rng);
    debug!(current = %current.id, count = picked.len(), "sampled related teams");
    picked
}

/// Every distinct tag across `teams`, in first-seen order.
pub fn collect_tags(teams: &[Team]) -> Vec<String> {
    teams
        .iter()
        .flat_map(|team| team.tags.iter())
        .unique()
        .cloned()
        .collect()
}

pub fn collect_sectors(teams: &[Team]) -> Vec<String> {
    teams
        .iter()
        .map(|team| team.sector.clone())
        .unique()
        .collect()
}

pub fn collect_kinds(teams: &[Team]) -> Vec<String> {
    teams.iter().map(|team| team.kind.clone()).unique().collect()
}

/// Resolve a detail-page path segment to a record by id or by name slug.
pub fn find_by_route<'a>(teams: &'a [Team], segment: &str) -> Result<&'a Team> {
    let segment = segment.trim();
    let slug = slugify(segment);
    teams
        .iter()
        .find(|team| team.id == segment)
        .or_else(|| {
            teams
                .iter()
                .find(|team| {
                    !slug.is_empty()
                        && (team.id == slug || team.name_slug().as_deref() == Some(slug.as_str()))
                })
        })
        .ok_or_else(|| ShowcaseError::NotFound {
            id: segment.to_string(),
        })
}
