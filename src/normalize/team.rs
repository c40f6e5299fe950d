use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::Team;
use crate::normalize::{
    dedupe_ids, defaults, normalize_member, normalize_metric, parse_date, raw_str, resolve_image,
    slugify, text,
};

/// Object keys under which an API may wrap a list of records.
const ENVELOPE_KEYS: [&str; 5] = ["data", "projects", "teams", "items", "results"];

pub fn normalize_team(raw: &Value) -> Team {
    let name = text(raw, &["name", "title"]).unwrap_or_else(|| defaults::TEAM_NAME.to_string());
    let id = text(raw, &["id"])
        .or_else(|| {
            text(raw, &["name", "title"])
                .map(|n| slugify(&n))
                .filter(|slug| !slug.is_empty())
        })
        .unwrap_or_else(|| defaults::TEAM_ID.to_string());

    let tags: Vec<String> = array(raw, "tags")
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unique()
        .collect();

    let kind = text(raw, &["kind", "tipo"])
        .or_else(|| tags.first().cloned())
        .unwrap_or_else(|| defaults::KIND.to_string());

    let mut members = array(raw, "members")
        .iter()
        .enumerate()
        .map(|(i, m)| normalize_member(m, i))
        .collect_vec();
    dedupe_ids(members.iter_mut().map(|member| &mut member.id));

    Team {
        id,
        name,
        company: text(raw, &["company"]).unwrap_or_else(|| defaults::COMPANY.to_string()),
        description: text(raw, &["description"]).unwrap_or_default(),
        cover_url: resolve_image(
            raw_str(raw, &["cover", "portada"]),
            defaults::COVER_PLACEHOLDER,
        ),
        sector: text(raw, &["sector"]).unwrap_or_else(|| defaults::SECTOR.to_string()),
        kind,
        date: raw_str(raw, &["dataTime"]).and_then(parse_date),
        members,
        metrics: array(raw, "metrics").iter().map(normalize_metric).collect(),
        tags,
    }
}

/// Normalize a listing: either a bare array or an object wrapping one.
/// Duplicate ids get numeric suffixes so every id in the result is unique.
pub fn normalize_teams(raw: &Value) -> Vec<Team> {
    let mut teams = records(raw).iter().map(normalize_team).collect_vec();
    dedupe_ids(teams.iter_mut().map(|team| &mut team.id));
    debug!(count = teams.len(), "normalized team listing");
    teams
}

fn records(raw: &Value) -> &[Value] {
    if let Some(items) = raw.as_array() {
        return items;
    }
    match ENVELOPE_KEYS
        .iter()
        .find_map(|key| raw.get(key).and_then(Value::as_array))
    {
        Some(items) => items,
        None => {
            warn!("listing payload holds no record array");
            &[]
        }
    }
}

fn array<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_team_full() {
        let team = normalize_team(&json!({
            "id": 12,
            "name": "Acme",
            "company": "Acme Corp",
            "description": "Pagos",
            "portada": "/public/covers/acme.png",
            "tags": ["Fintech", "AI", " ", "AI", 3],
            "sector": "Finanzas",
            "dataTime": "01/03/2024",
            "members": [{ "name": "Ana" }, {}],
            "metrics": [{ "label": "Entregables", "value": "7 pzs" }]
        }));
        assert_eq!(team.id, "12");
        assert_eq!(team.name, "Acme");
        assert_eq!(team.company, "Acme Corp");
        assert_eq!(team.cover_url, "/covers/acme.png");
        assert_eq!(team.tags, vec!["Fintech", "AI"]);
        assert_eq!(team.sector, "Finanzas");
        assert_eq!(team.kind, "Fintech");
        assert_eq!(team.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(team.members.len(), 2);
        assert_eq!(team.members[1].name, "Miembro 2");
        assert_eq!(team.metric_count(&["entregables", "deliverable"]), "7");
    }

    #[test]
    fn test_normalize_team_defaults() {
        let team = normalize_team(&json!({}));
        assert_eq!(team.id, defaults::TEAM_ID);
        assert_eq!(team.name, defaults::TEAM_NAME);
        assert_eq!(team.company, defaults::COMPANY);
        assert_eq!(team.description, "");
        assert_eq!(team.cover_url, defaults::COVER_PLACEHOLDER);
        assert_eq!(team.sector, "Otro");
        assert_eq!(team.kind, "Otro");
        assert!(team.date.is_none());
        assert!(team.members.is_empty());
        assert!(team.metrics.is_empty());
    }

    #[test]
    fn test_missing_id_uses_name_slug() {
        for name in ["Équipe Niño", "  --Data & IA--  ", "Proyecto 9"] {
            let team = normalize_team(&json!({ "name": name }));
            assert_eq!(team.id, slugify(name));
            assert!(!team.id.is_empty());
            assert!(!team.id.starts_with('-') && !team.id.ends_with('-'));
            assert_eq!(team.id, team.id.to_lowercase());
            assert!(team.id.is_ascii());
        }
        assert_eq!(normalize_team(&json!({ "title": "Data & IA" })).id, "data-ia");
    }

    #[test]
    fn test_invalid_covers_use_placeholder() {
        for cover in [json!(""), json!("-"), json!("—"), json!(null), json!("cover.png")] {
            let team = normalize_team(&json!({ "name": "X", "cover": cover }));
            assert_eq!(team.cover_url, defaults::COVER_PLACEHOLDER);
        }
    }

    #[test]
    fn test_explicit_kind_wins_over_tags() {
        let team = normalize_team(&json!({ "tipo": "Reto", "tags": ["AI"] }));
        assert_eq!(team.kind, "Reto");
    }

    #[test]
    fn test_normalize_teams_envelope_and_dedupe() {
        let teams = normalize_teams(&json!({
            "data": [
                { "id": "a" },
                { "id": "a" },
                { "id": "a-2" },
                { "name": "A" }
            ]
        }));
        let ids = teams.iter().map(|t| t.id.as_str()).collect_vec();
        assert_eq!(ids, vec!["a", "a-3", "a-2", "a-4"]);
    }

    #[test]
    fn test_member_ids_unique_within_team() {
        let team = normalize_team(&json!({
            "name": "Equipo",
            "members": [{ "name": "Ana" }, { "name": "Ana" }, { "id": "ana-2" }, {}]
        }));
        let ids = team.members.iter().map(|m| m.id.as_str()).collect_vec();
        assert_eq!(ids, vec!["ana", "ana-3", "ana-2", "miembro-4"]);
    }

    #[test]
    fn test_float_id_renders_as_integer() {
        assert_eq!(normalize_team(&json!({ "id": 12.0 })).id, "12");
        assert_eq!(normalize_team(&json!({ "id": 7.5 })).id, "7.5");
    }

    #[test]
    fn test_normalize_teams_unusable_payload() {
        assert!(normalize_teams(&json!({ "error": "nope" })).is_empty());
        assert!(normalize_teams(&json!(null)).is_empty());
    }
}
