use crate::constants::{P_NAMESPACES, RELS_NAMESPACES};
use crate::types::RelationshipEntry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use roxmltree::{Document, Node};

/// Resolves the slide order declared in the presentation part.
///
/// Locates the `<p:sldIdLst>` block and returns one [`RelationshipEntry`] per
/// `<p:sldId>` child, in document order. Entries are never sorted or
/// de-duplicated: two entries sharing a relationship id both come back.
///
/// # Notes
///
/// - An entry lacking a numeric `id` or an `r:id` of the form `rIdN` is skipped
///   with a warning; its neighbours are unaffected.
/// - A part without any slide list yields an empty sequence, which callers treat
///   as a presentation with zero slides.
/// - If the part is not well-formed XML, a lenient token scan recovers the
///   entries that precede the first syntax error.
pub fn resolve_order(xml: &str) -> Vec<RelationshipEntry> {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("presentation part is not well-formed ({e}), scanning leniently");
            return resolve_order_lenient(xml);
        }
    };

    let Some(list) = doc.descendants().find(|n| is_p_element(n, "sldIdLst")) else {
        log::warn!("no slide references found in presentation part");
        return Vec::new();
    };

    list.children()
        .filter(|n| is_p_element(n, "sldId"))
        .enumerate()
        .filter_map(|(idx, node)| {
            parse_entry(idx, node.attribute("id"), reference_attribute(&node))
        })
        .collect()
}

/// Accepts both the Transitional and the Strict PresentationML namespace.
fn is_p_element(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace().is_some_and(|ns| P_NAMESPACES.contains(&ns))
}

fn reference_attribute<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    RELS_NAMESPACES.iter().find_map(|ns| node.attribute((*ns, "id")))
}

fn parse_entry(idx: usize, id: Option<&str>, rid: Option<&str>) -> Option<RelationshipEntry> {
    let numeric_id = id.and_then(|v| v.trim().parse::<u32>().ok());
    let reference_id = rid.map(str::trim).filter(|v| is_reference_id(v));

    match (numeric_id, reference_id) {
        (Some(numeric_id), Some(reference_id)) => Some(RelationshipEntry {
            numeric_id,
            reference_id: reference_id.to_string(),
        }),
        _ => {
            log::warn!(
                "skipping malformed slide entry #{} (id: {:?}, r:id: {:?})",
                idx + 1,
                id,
                rid
            );
            None
        }
    }
}

/// `rId` followed by at least one ASCII digit.
fn is_reference_id(value: &str) -> bool {
    value
        .strip_prefix("rId")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Token-level scan used when the ordering part cannot be parsed as a tree.
/// Matches the conventional `p:` prefix only.
fn resolve_order_lenient(xml: &str) -> Vec<RelationshipEntry> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = false;

    let mut entries = Vec::new();
    let mut in_list = false;
    let mut idx = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"p:sldIdLst" => in_list = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"p:sldIdLst" => break,
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"p:sldIdLst" => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if in_list && e.name().as_ref() == b"p:sldId" =>
            {
                let (id, rid) = sld_id_attributes(e);
                if let Some(entry) = parse_entry(idx, id.as_deref(), rid.as_deref()) {
                    entries.push(entry);
                }
                idx += 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "presentation part unreadable at byte {}: {e}",
                    reader.buffer_position()
                );
                break;
            }
            _ => {}
        }
    }

    entries
}

fn sld_id_attributes(e: &BytesStart) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut rid = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            b"r:id" => rid = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            _ => {}
        }
    }
    (id, rid)
}
