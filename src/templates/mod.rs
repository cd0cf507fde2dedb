//! Built-in product templates
//!
//! Ships the shop's standard cabinet part lists as embedded YAML so a new
//! job can start from a known-good cut list instead of a blank table.

use rust_embed::Embed;
use serde::Deserialize;

use crate::cutlist::PartRow;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// A built-in cabinet template
#[derive(Debug, Clone)]
pub struct Template {
    /// File-derived slug, e.g. "base-cabinet"
    pub slug: String,

    /// Human-readable title
    pub title: String,

    pub parts: Vec<PartRow>,
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    title: String,
    parts: Vec<PartRow>,
}

/// Slugs of all embedded templates, sorted
pub fn names() -> Vec<String> {
    let mut slugs: Vec<String> = EmbeddedTemplates::iter()
        .filter_map(|f| f.strip_suffix(".yaml").map(str::to_string))
        .collect();
    slugs.sort();
    slugs
}

/// Look up a template by slug
pub fn get(slug: &str) -> Option<Template> {
    let file = EmbeddedTemplates::get(&format!("{}.yaml", slug))?;
    let content = std::str::from_utf8(&file.data).ok()?;
    let parsed: TemplateFile = serde_yml::from_str(content).ok()?;
    Some(Template {
        slug: slug.to_string(),
        title: parsed.title,
        parts: parsed.parts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::validate_rows;

    #[test]
    fn test_all_templates_present() {
        assert_eq!(
            names(),
            vec!["base-cabinet", "bookshelf", "drawer-chest", "wardrobe"]
        );
    }

    #[test]
    fn test_unknown_slug_is_none() {
        assert!(get("credenza").is_none());
    }

    #[test]
    fn test_every_template_validates_cleanly() {
        for slug in names() {
            let template = get(&slug).expect("embedded template parses");
            assert!(!template.title.is_empty());
            let report = validate_rows(&template.parts);
            assert!(
                report.rejected.is_empty(),
                "template {} has invalid rows",
                slug
            );
            assert!(!report.parts.is_empty());
        }
    }

    #[test]
    fn test_wardrobe_contents() {
        let wardrobe = get("wardrobe").unwrap();
        assert_eq!(wardrobe.parts.len(), 3);
        let side = &wardrobe.parts[0];
        assert_eq!(side.name, "Side");
        assert_eq!((side.width, side.height), (600.0, 2400.0));
        assert_eq!(side.quantity, 2);
        assert_eq!(side.edge, "long2");
    }
}
