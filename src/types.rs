use serde::{Serialize, Serializer};

/// One `<p:sldId>` entry of the ordering part, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEntry {
    pub numeric_id: u32,
    pub reference_id: String,
}

/// Text runs found on a slide: how many survived trimming, plus the first few.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextSummary {
    pub count: usize,
    pub samples: Vec<String>,
}

/// Per-slide element counts.
///
/// Every construct is counted at any nesting depth, so a picture placed in a
/// table cell contributes to both `pictures` and `tables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementInventory {
    /// `None` when the slide holds no non-empty text run.
    pub text: Option<TextSummary>,
    pub shapes: usize,
    pub pictures: usize,
    pub charts: usize,
    pub tables: usize,
}

impl ElementInventory {
    pub fn text_count(&self) -> usize {
        self.text.as_ref().map_or(0, |t| t.count)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.shapes == 0
            && self.pictures == 0
            && self.charts == 0
            && self.tables == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideRecord {
    /// 1-based position in the ordering list.
    pub number: usize,
    #[serde(serialize_with = "serialize_as_string")]
    pub id: u32,
    #[serde(rename = "rId")]
    pub r_id: String,
    pub elements: ElementInventory,
    /// Set when the slide's content part was absent from the archive.
    #[serde(skip_serializing_if = "is_false")]
    pub partial: bool,
}

impl SlideRecord {
    pub fn new(number: usize, entry: &RelationshipEntry, elements: ElementInventory) -> Self {
        Self {
            number,
            id: entry.numeric_id,
            r_id: entry.reference_id.clone(),
            elements,
            partial: false,
        }
    }

    pub fn missing(number: usize, entry: &RelationshipEntry) -> Self {
        Self {
            partial: true,
            ..Self::new(number, entry, ElementInventory::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total_slides: usize,
    pub slides: Vec<SlideRecord>,
}

impl AnalysisReport {
    pub fn partial_slides(&self) -> impl Iterator<Item = &SlideRecord> {
        self.slides.iter().filter(|s| s.partial)
    }
}

fn serialize_as_string<S: Serializer>(
    value: &u32,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn is_false(value: &bool) -> bool {
    !*value
}
