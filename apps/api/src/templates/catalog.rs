//! Template Catalog: the five resume templates the renderer knows about.
//!
//! The catalog is immutable and rebuilt on every call, so handlers share no state.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A resume template as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<Template>,
    pub total: usize,
}

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

/// Declaration order is the listing order.
static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        id: "modern",
        name: "Modern",
        description: "A clean, contemporary design with a professional look",
    },
    CatalogEntry {
        id: "professional",
        name: "Professional",
        description: "Traditional layout perfect for corporate environments",
    },
    CatalogEntry {
        id: "creative",
        name: "Creative",
        description: "Unique design for creative industries",
    },
    CatalogEntry {
        id: "minimal",
        name: "Minimal",
        description: "Simple, elegant design with focus on content",
    },
    CatalogEntry {
        id: "executive",
        name: "Executive",
        description: "Sophisticated design for senior positions",
    },
];

pub const TEMPLATE_NOT_FOUND: &str = "Template not found";

/// Returns all templates in catalog order together with their count.
pub fn list_templates() -> TemplateList {
    let templates: Vec<Template> = CATALOG
        .iter()
        .map(|entry| Template {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
        })
        .collect();

    TemplateList {
        total: templates.len(),
        templates,
    }
}

/// Looks up a single template by exact (case-sensitive) id.
///
/// The detail view derives its name and description from the id rather than
/// reusing the listing text: `name` is the id with its first character
/// upper-cased, `description` is `"Template description for <name>"`.
pub fn get_template(id: &str) -> Result<Template, AppError> {
    let entry = CATALOG
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| AppError::NotFound(TEMPLATE_NOT_FOUND.to_string()))?;

    let name = capitalize_first(entry.id);
    Ok(Template {
        id: entry.id.to_string(),
        description: format!("Template description for {name}"),
        name,
    })
}

/// Upper-cases the first character only; the rest is kept as is.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 5] = ["modern", "professional", "creative", "minimal", "executive"];

    #[test]
    fn test_list_returns_five_in_fixed_order() {
        let list = list_templates();
        assert_eq!(list.total, 5);
        assert_eq!(list.total, list.templates.len());
        let ids: Vec<&str> = list.templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, IDS);
    }

    #[test]
    fn test_list_is_idempotent() {
        assert_eq!(list_templates(), list_templates());
    }

    #[test]
    fn test_list_uses_catalog_descriptions() {
        let list = list_templates();
        assert_eq!(list.templates[0].name, "Modern");
        assert_eq!(
            list.templates[0].description,
            "A clean, contemporary design with a professional look"
        );
    }

    #[test]
    fn test_get_every_known_id() {
        for id in IDS {
            let t = get_template(id).unwrap();
            assert_eq!(t.id, id);
            let expected_name = format!("{}{}", id[..1].to_uppercase(), &id[1..]);
            assert_eq!(t.name, expected_name);
            assert_eq!(t.description, format!("Template description for {expected_name}"));
        }
    }

    #[test]
    fn test_get_executive() {
        let t = get_template("executive").unwrap();
        assert_eq!(
            t,
            Template {
                id: "executive".into(),
                name: "Executive".into(),
                description: "Template description for Executive".into(),
            }
        );
    }

    #[test]
    fn test_get_unknown_ids_are_not_found() {
        for id in ["bogus", "", "Modern", "EXECUTIVE", " modern", "classic"] {
            match get_template(id) {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, TEMPLATE_NOT_FOUND),
                other => panic!("expected NotFound for {id:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_capitalize_first_leaves_rest_untouched() {
        assert_eq!(capitalize_first("modern"), "Modern");
        assert_eq!(capitalize_first("mODERN"), "MODERN");
        assert_eq!(capitalize_first(""), "");
    }
}
