use serde_json::Value;

use crate::model::Metric;
use crate::normalize::text;

pub fn normalize_metric(raw: &Value) -> Metric {
    Metric {
        label: text(raw, &["label", "nombre"]).unwrap_or_default(),
        value: text(raw, &["value", "valor"]).unwrap_or_default(),
        sublabel: text(raw, &["sublabel", "subtitulo"]),
    }
}

/// First metric whose label contains any of `needles`, case-insensitively.
/// List order breaks ties.
pub fn find_metric<'a>(metrics: &'a [Metric], needles: &[&str]) -> Option<&'a Metric> {
    let needles: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
    metrics.iter().find(|metric| {
        let label = metric.label.to_lowercase();
        needles.iter().any(|needle| label.contains(needle.as_str()))
    })
}

/// Leading integer of the matching metric's value, as a display string.
/// Anything unparseable, or no match at all, yields `"0"`.
pub fn metric_count(metrics: &[Metric], needles: &[&str]) -> String {
    find_metric(metrics, needles)
        .and_then(|metric| {
            let numeric: String = metric
                .value
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
                .collect();
            parse_leading_int(&numeric)
        })
        .unwrap_or_default()
        .to_string()
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}
