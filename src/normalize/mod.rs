//! Coercion of loosely-typed team/project JSON into the strict [`crate::model`] shapes.
//!
//! Every function here is total: missing or malformed input resolves to a
//! documented default instead of an error.

pub(crate) mod member;
pub(crate) mod metric;
pub(crate) mod team;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub use member::normalize_member;
pub use metric::{find_metric, metric_count, normalize_metric};
pub use team::{normalize_team, normalize_teams};

/// Placeholder values substituted for missing fields.
pub mod defaults {
    pub const TEAM_NAME: &str = "Proyecto sin nombre";
    pub const COMPANY: &str = "Empresa confidencial";
    pub const SECTOR: &str = "Otro";
    pub const KIND: &str = "Otro";
    pub const TEAM_ID: &str = "sin-id";
    pub const MEMBER_ROLE: &str = "Talento";
    pub const COVER_PLACEHOLDER: &str = "/images/placeholder-project.png";
    pub const AVATAR_PLACEHOLDER: &str = "/images/placeholder-avatar.png";
}

pub(crate) const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

const PUBLIC_PREFIX: &str = "/public/";

/// Lowercase, hyphenated, diacritic-free identifier for `input`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Whether `candidate` can be used as an image reference as-is.
pub fn is_valid_image(candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty()
        && !matches!(candidate, "-" | "—" | "–")
        && (candidate.starts_with('/') || candidate.starts_with("http"))
}

/// Validate an image reference, falling back to `placeholder`, and strip the
/// `/public/` build prefix.
pub fn resolve_image(candidate: Option<&str>, placeholder: &str) -> String {
    match candidate.map(str::trim).filter(|c| is_valid_image(c)) {
        Some(path) => match path.strip_prefix(PUBLIC_PREFIX) {
            Some(rest) => format!("/{rest}"),
            None => path.to_string(),
        },
        None => placeholder.to_string(),
    }
}

/// Finite number from a JSON number or numeric string; 0 otherwise.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or_default()
}

/// Parse a `DD/MM/YYYY` or `DD-MM-YYYY` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// First of `keys` present on `raw` with a non-null value.
pub(crate) fn field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find(|value| !value.is_null())
}

/// First of `keys` holding a non-blank string (or a number, stringified).
pub(crate) fn text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|key| raw.get(key)).find_map(|value| {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => number_text(n),
            _ => return None,
        };
        Some(text).filter(|s| !s.is_empty())
    })
}

/// Display form of a JSON number; whole floats drop their fraction (`12.0` → `12`).
fn number_text(n: &serde_json::Number) -> String {
    match (n.as_i64(), n.as_u64(), n.as_f64()) {
        (Some(i), _, _) => i.to_string(),
        (_, Some(u), _) => u.to_string(),
        (_, _, Some(f)) => f.to_string(),
        _ => n.to_string(),
    }
}

/// Give repeated ids the lowest free `-N` suffix (N ≥ 2), keeping the first
/// occurrence unchanged.
pub(crate) fn dedupe_ids<'a>(ids: impl IntoIterator<Item = &'a mut String>) {
    let mut ids: Vec<&mut String> = ids.into_iter().collect();
    let mut taken: HashSet<String> = ids.iter().map(|id| (**id).clone()).collect();
    let mut seen = HashSet::new();
    for id in ids.iter_mut() {
        if seen.insert((**id).clone()) {
            continue;
        }
        let base = (**id).clone();
        let next = (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| base.clone());
        debug!(from = %base, to = %next, "renamed duplicate id");
        taken.insert(next.clone());
        seen.insert(next.clone());
        **id = next;
    }
}

/// First of `keys` holding a string, untrimmed and possibly blank.
pub(crate) fn raw_str<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("  Diseño & Código  "), "diseno-codigo");
        assert_eq!(slugify("--Equipo   Ñandú!!"), "equipo-nandu");
        assert_eq!(slugify("Über Team 2024"), "uber-team-2024");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_is_valid_image() {
        assert!(is_valid_image("/img/a.png"));
        assert!(is_valid_image(" https://cdn.example.com/a.png "));
        assert!(!is_valid_image(""));
        assert!(!is_valid_image("-"));
        assert!(!is_valid_image("—"));
        assert!(!is_valid_image("img/a.png"));
    }

    #[test]
    fn test_resolve_image() {
        let placeholder = defaults::COVER_PLACEHOLDER;
        assert_eq!(resolve_image(Some("/public/img/a.png"), placeholder), "/img/a.png");
        assert_eq!(resolve_image(Some(" /img/a.png "), placeholder), "/img/a.png");
        for invalid in [Some(""), Some("-"), Some("—"), None] {
            assert_eq!(resolve_image(invalid, placeholder), placeholder);
        }
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&json!("12"))), 12.0);
        assert_eq!(coerce_number(Some(&json!(12))), 12.0);
        assert_eq!(coerce_number(Some(&json!("12.5"))), 12.5);
        assert_eq!(coerce_number(Some(&json!(null))), 0.0);
        assert_eq!(coerce_number(Some(&json!("abc"))), 0.0);
        assert_eq!(coerce_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_number(Some(&json!(true))), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_date("01/03/2024"), expected);
        assert_eq!(parse_date("01-03-2024"), expected);
        assert_eq!(parse_date("2024-03-01"), None);
        assert_eq!(parse_date("31/02/2024"), None);
    }

    #[test]
    fn test_text_skips_blank_values() {
        let raw = json!({ "name": "  ", "title": "Acme", "id": 5 });
        assert_eq!(text(&raw, &["name", "title"]), Some("Acme".to_string()));
        assert_eq!(text(&raw, &["id"]), Some("5".to_string()));
        assert_eq!(text(&raw, &["missing"]), None);
    }

    #[test]
    fn test_text_renders_whole_floats_without_fraction() {
        let raw = json!({ "a": 12.0, "b": 12.5, "c": -3.0, "d": 18446744073709551615u64 });
        assert_eq!(text(&raw, &["a"]), Some("12".to_string()));
        assert_eq!(text(&raw, &["b"]), Some("12.5".to_string()));
        assert_eq!(text(&raw, &["c"]), Some("-3".to_string()));
        assert_eq!(text(&raw, &["d"]), Some("18446744073709551615".to_string()));
    }

    #[test]
    fn test_dedupe_ids() {
        let mut ids = vec!["a".to_string(), "a".to_string(), "a-2".to_string(), "a".to_string()];
        dedupe_ids(ids.iter_mut());
        assert_eq!(ids, vec!["a", "a-3", "a-2", "a-4"]);
    }
}
