use crate::constants::{PACKAGE_RELS_NAMESPACE, SLIDE_REL_TYPES};
use crate::Result;
use roxmltree::Document;

/// A single `<Relationship>` of a relationship (`.rels`) part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

impl Relationship {
    pub fn is_slide(&self) -> bool {
        SLIDE_REL_TYPES.contains(&self.rel_type.as_str())
    }

    /// Archive path of the target, resolved against the directory of the part
    /// that owns the relationship.
    ///
    /// ```
    /// // owner "ppt/presentation.xml", target "slides/slide1.xml"
    /// // -> "ppt/slides/slide1.xml"
    /// ```
    pub fn resolve_target(&self, source_part: &str) -> String {
        if let Some(absolute) = self.target.strip_prefix('/') {
            return absolute.to_string();
        }

        let mut segments: Vec<&str> = source_part
            .rsplit_once('/')
            .map(|(dir, _)| dir.split('/').collect())
            .unwrap_or_default();
        for segment in self.target.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

/// Constructs the path of the relationship part belonging to `part`.
///
/// For `ppt/presentation.xml` this is `ppt/_rels/presentation.xml.rels`.
pub fn rels_path_for(part: &str) -> String {
    let mut rels_path = part.to_string();
    match rels_path.rfind('/') {
        Some(pos) => rels_path.insert_str(pos + 1, "_rels/"),
        None => rels_path.insert_str(0, "_rels/"),
    }
    rels_path.push_str(".rels");
    rels_path
}

/// Parses the presentation's relationship part into its relationships, in
/// document order.
///
/// Relationships lacking an `Id`, `Type` or `Target` attribute are left out.
///
/// # Errors
///
/// Returns [`crate::Error::Xml`] if the part is not well-formed XML.
pub fn parse_presentation_rels(xml: &str) -> Result<Vec<Relationship>> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut relationships = Vec::new();
    for rel in root.children().filter(|n| {
        n.is_element()
            && n.tag_name().name() == "Relationship"
            && n.tag_name().namespace().map_or(true, |ns| ns == PACKAGE_RELS_NAMESPACE)
    }) {
        if let (Some(id), Some(rel_type), Some(target)) =
            (rel.attribute("Id"), rel.attribute("Type"), rel.attribute("Target"))
        {
            relationships.push(Relationship {
                id: id.to_string(),
                rel_type: rel_type.to_string(),
                target: target.to_string(),
            });
        }
    }

    Ok(relationships)
}
