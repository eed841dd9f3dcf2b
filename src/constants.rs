/// Part declaring the slide order of a presentation.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Slide parts are named `{SLIDE_PART_PREFIX}{position}{SLIDE_PART_SUFFIX}`.
pub const SLIDE_PART_PREFIX: &str = "ppt/slides/slide";
pub const SLIDE_PART_SUFFIX: &str = ".xml";

pub const MAX_TEXT_SAMPLES: usize = 5;

pub const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const C_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
pub const RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// ISO/IEC 29500 Strict counterparts of the Transitional namespaces above.
pub const P_STRICT_NAMESPACE: &str = "http://purl.oclc.org/ooxml/presentationml/main";
pub const A_STRICT_NAMESPACE: &str = "http://purl.oclc.org/ooxml/drawingml/main";
pub const C_STRICT_NAMESPACE: &str = "http://purl.oclc.org/ooxml/drawingml/chart";
pub const RELS_STRICT_NAMESPACE: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships";

pub const P_NAMESPACES: [&str; 2] = [P_NAMESPACE, P_STRICT_NAMESPACE];
pub const A_NAMESPACES: [&str; 2] = [A_NAMESPACE, A_STRICT_NAMESPACE];
pub const C_NAMESPACES: [&str; 2] = [C_NAMESPACE, C_STRICT_NAMESPACE];
pub const RELS_NAMESPACES: [&str; 2] = [RELS_NAMESPACE, RELS_STRICT_NAMESPACE];

pub const PACKAGE_RELS_NAMESPACE: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const SLIDE_REL_TYPES: [&str; 2] = [
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
    "http://purl.oclc.org/ooxml/officeDocument/relationships/slide",
];
