use serde_json::Value;

use crate::model::Member;
use crate::normalize::{coerce_number, defaults, field, raw_str, resolve_image, slugify, text};

/// Normalize the member at zero-based `index` of a team's member list.
pub fn normalize_member(raw: &Value, index: usize) -> Member {
    let position = index + 1;
    let name = text(raw, &["name", "nombre"]).unwrap_or_else(|| format!("Miembro {position}"));
    let id = text(raw, &["id"])
        .or_else(|| Some(slugify(&name)).filter(|slug| !slug.is_empty()))
        .unwrap_or_else(|| format!("miembro-{position}"));

    Member {
        id,
        name,
        role: text(raw, &["role", "puesto"]).unwrap_or_else(|| defaults::MEMBER_ROLE.to_string()),
        country: text(raw, &["country", "pais"]).unwrap_or_default(),
        avatar_url: resolve_image(
            raw_str(raw, &["avatarUrl", "avatar"]),
            defaults::AVATAR_PLACEHOLDER,
        ),
        hours: coerce_number(field(raw, &["hours", "horas"])),
        deliverables: coerce_number(field(raw, &["deliverables", "entregables"])),
        reviews: coerce_number(field(raw, &["reviews", "revisiones"])),
        rating: coerce_number(field(raw, &["rating", "calificacion"])),
        simulations: coerce_number(field(raw, &["simulations", "simulaciones"])),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_member_full() {
        let member = normalize_member(
            &json!({
                "id": 44,
                "name": "Lucía Pérez",
                "puesto": "Frontend",
                "pais": "México",
                "avatarUrl": "/public/avatars/lucia.jpg",
                "horas": "120",
                "entregables": 7,
                "rating": "4.5",
                "simulations": "abc"
            }),
            0,
        );
        assert_eq!(member.id, "44");
        assert_eq!(member.role, "Frontend");
        assert_eq!(member.country, "México");
        assert_eq!(member.avatar_url, "/avatars/lucia.jpg");
        assert_eq!(member.hours, 120.0);
        assert_eq!(member.deliverables, 7.0);
        assert_eq!(member.rating, 4.5);
        assert_eq!(member.simulations, 0.0);
        assert_eq!(member.reviews, 0.0);
    }

    #[test]
    fn test_normalize_member_positional_fallbacks() {
        let member = normalize_member(&json!({ "avatarUrl": "—" }), 2);
        assert_eq!(member.name, "Miembro 3");
        assert_eq!(member.id, "miembro-3");
        assert_eq!(member.role, defaults::MEMBER_ROLE);
        assert_eq!(member.avatar_url, defaults::AVATAR_PLACEHOLDER);
    }

    #[test]
    fn test_normalize_member_id_from_name() {
        let member = normalize_member(&json!({ "name": "José Ángel" }), 0);
        assert_eq!(member.id, "jose-angel");
    }

    #[test]
    fn test_normalize_member_non_object() {
        let member = normalize_member(&json!("oops"), 0);
        assert_eq!(member.name, "Miembro 1");
        assert_eq!(member.hours, 0.0);
    }
}
