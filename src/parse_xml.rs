use crate::constants::{A_NAMESPACES, C_NAMESPACES, MAX_TEXT_SAMPLES, P_NAMESPACES};
use crate::types::{ElementInventory, TextSummary};
use quick_xml::events::Event;
use quick_xml::Reader;
use roxmltree::Document;

/// Extracts the element inventory of a single slide part.
///
/// Walks the whole slide tree and counts, at any nesting depth:
///
/// | Kind | Marker |
/// |------|--------|
/// | text | `<a:t>` runs whose trimmed content is not empty |
/// | shapes | `<p:sp>` |
/// | pictures | `<p:pic>` |
/// | charts | `<c:chart>` |
/// | tables | `<a:tbl>` |
///
/// Kinds are counted independently of each other, so a picture inside a table
/// cell counts once as a picture and once as a table. The first five surviving
/// text runs are kept as samples, in document order.
///
/// # Notes
///
/// Markers are matched by namespace, not by prefix. A slide that is not
/// well-formed XML is scanned token by token instead; everything after the first
/// syntax error contributes nothing. This function never fails.
pub fn extract_inventory(xml: &str) -> ElementInventory {
    extract_inventory_with_limit(xml, MAX_TEXT_SAMPLES)
}

pub(crate) fn extract_inventory_with_limit(xml: &str, max_samples: usize) -> ElementInventory {
    let mut tally = Tally::new(max_samples);
    match Document::parse(xml) {
        Ok(doc) => tally_tree(&doc, &mut tally),
        Err(e) => {
            log::warn!("slide part is not well-formed ({e}), scanning leniently");
            tally_tokens(xml, &mut tally);
        }
    }
    tally.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Text,
    Shape,
    Picture,
    Chart,
    Table,
}

impl Marker {
    /// Transitional and Strict namespaces are treated alike.
    fn from_expanded(namespace: Option<&str>, name: &str) -> Option<Self> {
        let ns = namespace?;
        match name {
            "t" if A_NAMESPACES.contains(&ns) => Some(Marker::Text),
            "sp" if P_NAMESPACES.contains(&ns) => Some(Marker::Shape),
            "pic" if P_NAMESPACES.contains(&ns) => Some(Marker::Picture),
            "chart" if C_NAMESPACES.contains(&ns) => Some(Marker::Chart),
            "tbl" if A_NAMESPACES.contains(&ns) => Some(Marker::Table),
            _ => None,
        }
    }

    fn from_qualified(name: &[u8]) -> Option<Self> {
        match name {
            b"a:t" => Some(Marker::Text),
            b"p:sp" => Some(Marker::Shape),
            b"p:pic" => Some(Marker::Picture),
            b"c:chart" => Some(Marker::Chart),
            b"a:tbl" => Some(Marker::Table),
            _ => None,
        }
    }
}

struct Tally {
    max_samples: usize,
    texts: Vec<String>,
    inventory: ElementInventory,
}

impl Tally {
    fn new(max_samples: usize) -> Self {
        Self { max_samples, texts: Vec::new(), inventory: ElementInventory::default() }
    }

    fn count(&mut self, marker: Marker) {
        match marker {
            Marker::Shape => self.inventory.shapes += 1,
            Marker::Picture => self.inventory.pictures += 1,
            Marker::Chart => self.inventory.charts += 1,
            Marker::Table => self.inventory.tables += 1,
            Marker::Text => {}
        }
    }

    fn push_text(&mut self, raw: &str) {
        let text = raw.trim();
        if !text.is_empty() {
            self.texts.push(text.to_string());
        }
    }

    fn finish(mut self) -> ElementInventory {
        if !self.texts.is_empty() {
            let count = self.texts.len();
            self.texts.truncate(self.max_samples);
            self.inventory.text = Some(TextSummary { count, samples: self.texts });
        }
        self.inventory
    }
}

fn tally_tree(doc: &Document, tally: &mut Tally) {
    for node in doc.descendants().filter(|n| n.is_element()) {
        let tag = node.tag_name();
        match Marker::from_expanded(tag.namespace(), tag.name()) {
            Some(Marker::Text) => {
                let text: String = node
                    .descendants()
                    .filter(|n| n.is_text())
                    .filter_map(|n| n.text())
                    .collect();
                tally.push_text(&text);
            }
            Some(marker) => tally.count(marker),
            None => {}
        }
    }
}

/// Prefix-based scan over the raw token stream.
fn tally_tokens(xml: &str, tally: &mut Tally) {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = false;

    let mut open_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match Marker::from_qualified(e.name().as_ref()) {
                Some(Marker::Text) => open_text = Some(String::new()),
                Some(marker) => tally.count(marker),
                None => {}
            },
            Ok(Event::Empty(ref e)) => {
                if let Some(marker) = Marker::from_qualified(e.name().as_ref()) {
                    tally.count(marker);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"a:t" {
                    if let Some(text) = open_text.take() {
                        tally.push_text(&text);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(text) = open_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(text) = open_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(text) = open_text.as_mut() {
                    if let Some(c) = resolve_entity(&String::from_utf8_lossy(e.as_ref())) {
                        text.push(c);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "slide content unreadable at byte {}: {e}; later elements are not counted",
                    reader.buffer_position()
                );
                break;
            }
            _ => {}
        }
    }
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
