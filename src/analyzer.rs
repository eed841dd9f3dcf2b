use crate::container::PptxArchive;
use crate::parse_order::resolve_order;
use crate::parse_rels::{parse_presentation_rels, rels_path_for};
use crate::parse_xml::extract_inventory_with_limit;
use crate::parser_config::AnalyzerConfig;
use crate::types::{AnalysisReport, RelationshipEntry, SlideRecord};
use crate::{AnalysisError, AnalysisErrorKind, Error};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Analyzes a presentation held in memory using the default packaging convention.
///
/// See [`analyze_with_config`].
pub fn analyze(bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
    analyze_with_config(bytes, &AnalyzerConfig::default())
}

/// Reads a presentation from disk and analyzes it.
///
/// A file that cannot be read is reported as [`AnalysisErrorKind::CorruptArchive`].
pub fn analyze_file(
    path: &Path,
    config: &AnalyzerConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let archive = PptxArchive::open_path(path).map_err(|e| {
        AnalysisError::new(AnalysisErrorKind::CorruptArchive, format!("{}: {e}", path.display()))
    })?;
    analyze_archive(&archive, config)
}

/// Produces the per-slide inventory report of a presentation container.
///
/// The pipeline runs in four steps:
/// 1. open the archive,
/// 2. resolve the slide order from the ordering part,
/// 3. locate and inventory every slide part by its 1-based position,
/// 4. assemble the records in position order.
///
/// Step 3 runs on the rayon pool when [`AnalyzerConfig::parallel`] is set.
///
/// # Errors
///
/// Only two conditions abort the analysis:
/// - [`AnalysisErrorKind::CorruptArchive`] if the container cannot be read,
/// - [`AnalysisErrorKind::MissingOrderingPart`] if it has no ordering part.
///
/// A slide whose content part is missing is still reported, with an empty
/// inventory and `partial` set, and still counts toward `total_slides`.
pub fn analyze_with_config(
    bytes: &[u8],
    config: &AnalyzerConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let archive = PptxArchive::open(bytes)
        .map_err(|e| AnalysisError::new(AnalysisErrorKind::CorruptArchive, e.to_string()))?;
    analyze_archive(&archive, config)
}

fn analyze_archive(
    archive: &PptxArchive,
    config: &AnalyzerConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let ordering_xml = match archive.lookup_text(&config.ordering_part) {
        Ok(xml) => xml,
        Err(Error::EntryNotFound(_)) => {
            return Err(AnalysisError::new(
                AnalysisErrorKind::MissingOrderingPart,
                format!("{} not found in the archive", config.ordering_part),
            ))
        }
        Err(e) => {
            return Err(AnalysisError::new(AnalysisErrorKind::CorruptArchive, e.to_string()))
        }
    };

    let entries = resolve_order(&ordering_xml);
    log::debug!("found {} slides in the presentation", entries.len());

    check_relationship_targets(archive, config, &entries);

    let mut slides: Vec<SlideRecord> = if config.parallel {
        entries
            .par_iter()
            .enumerate()
            .map(|(idx, entry)| inventory_slide(archive, config, idx + 1, entry))
            .collect()
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| inventory_slide(archive, config, idx + 1, entry))
            .collect()
    };
    slides.sort_by_key(|slide| slide.number);

    Ok(AnalysisReport { total_slides: entries.len(), slides })
}

fn inventory_slide(
    archive: &PptxArchive,
    config: &AnalyzerConfig,
    position: usize,
    entry: &RelationshipEntry,
) -> SlideRecord {
    match archive.locate_slide_part(config, position) {
        Ok(xml) => {
            let elements = extract_inventory_with_limit(&xml, config.max_text_samples);
            SlideRecord::new(position, entry, elements)
        }
        Err(Error::SlidePartMissing { name, .. }) => {
            log::warn!(
                "slide {} (id: {}, rId: {}) not found at {}",
                position,
                entry.numeric_id,
                entry.reference_id,
                name
            );
            SlideRecord::missing(position, entry)
        }
        Err(e) => {
            log::warn!("slide {} could not be read: {}", position, e);
            SlideRecord::missing(position, entry)
        }
    }
}

/// Warns when a slide's relationship points somewhere other than the part the
/// positional naming convention picks. Report output is not affected.
fn check_relationship_targets(
    archive: &PptxArchive,
    config: &AnalyzerConfig,
    entries: &[RelationshipEntry],
) {
    if entries.is_empty() {
        return;
    }

    let rels_path = rels_path_for(&config.ordering_part);
    let parsed = archive.lookup_text(&rels_path).map(|xml| parse_presentation_rels(&xml));
    let relationships = match parsed {
        Ok(Ok(relationships)) => relationships,
        Ok(Err(e)) => {
            log::debug!("ignoring unreadable {}: {}", rels_path, e);
            return;
        }
        Err(_) => {
            log::debug!("no relationship part at {}", rels_path);
            return;
        }
    };

    let slide_targets: HashMap<&str, String> = relationships
        .iter()
        .filter(|rel| rel.is_slide())
        .map(|rel| (rel.id.as_str(), rel.resolve_target(&config.ordering_part)))
        .collect();

    for (idx, entry) in entries.iter().enumerate() {
        let expected = config.slide_part_name(idx + 1);
        match slide_targets.get(entry.reference_id.as_str()) {
            Some(target) if *target != expected => log::warn!(
                "slide {} ({}) targets {} but is read from {}",
                idx + 1,
                entry.reference_id,
                target,
                expected
            ),
            Some(_) => {}
            None => {
                log::debug!("slide {} ({}) has no slide relationship", idx + 1, entry.reference_id)
            }
        }
    }
}
