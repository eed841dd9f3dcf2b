use std::io::{Cursor, Write};

use pptx_inventory::{analyze, analyze_with_config, AnalysisErrorKind, AnalyzerConfig};
use zip::write::SimpleFileOptions;

const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn build_pptx(files: &[(String, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(b"<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>")
        .unwrap();
    for (name, content) in files {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn presentation_xml(entries: &[(u32, &str)]) -> String {
    let ids: String = entries
        .iter()
        .map(|(id, rid)| format!(r#"<p:sldId id="{id}" r:id="{rid}"/>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#
    )
}

fn slide_xml(texts: &[&str]) -> String {
    let runs: String = texts
        .iter()
        .map(|t| format!("<a:r><a:rPr lang=\"en-US\"/><a:t>{t}</a:t></a:r>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p>{runs}</a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
    )
}

fn deck(entries: &[(u32, &str)], slides: &[(usize, String)]) -> Vec<u8> {
    let mut files = vec![("ppt/presentation.xml".to_string(), presentation_xml(entries))];
    for (position, xml) in slides {
        files.push((format!("ppt/slides/slide{position}.xml"), xml.clone()));
    }
    build_pptx(&files)
}

#[test]
fn test_total_slides_counts_ordering_entries() {
    let entries = [(256, "rId2"), (257, "rId3"), (258, "rId4"), (259, "rId5")];
    let bytes = deck(&entries, &[(1, slide_xml(&["only one part"]))]);

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 4);
    assert_eq!(report.slides.len(), 4);
    assert_eq!(report.partial_slides().count(), 3);
}

#[test]
fn test_slides_contiguous_from_one_in_declared_order() {
    let entries: Vec<(u32, String)> =
        (0..40).map(|i| (1000 - i, format!("rId{}", 40 - i))).collect();
    let entry_refs: Vec<(u32, &str)> =
        entries.iter().map(|(id, rid)| (*id, rid.as_str())).collect();
    let slides: Vec<(usize, String)> =
        (1..=40).map(|n| (n, slide_xml(&[&format!("Slide {n}")]))).collect();
    let bytes = deck(&entry_refs, &slides);

    for parallel in [true, false] {
        let config = AnalyzerConfig::builder().parallel(parallel).build();
        let report = analyze_with_config(&bytes, &config).unwrap();

        let numbers: Vec<usize> = report.slides.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=40).collect::<Vec<_>>());
        for (slide, (id, rid)) in report.slides.iter().zip(&entries) {
            assert_eq!(slide.id, *id);
            assert_eq!(&slide.r_id, rid);
            let expected = format!("Slide {}", slide.number);
            assert_eq!(slide.elements.text.as_ref().unwrap().samples, vec![expected]);
        }
    }
}

#[test]
fn test_duplicate_reference_ids_produce_independent_records() {
    let bytes = deck(
        &[(256, "rId2"), (257, "rId2")],
        &[(1, slide_xml(&["first"])), (2, slide_xml(&["second", "extra"]))],
    );

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 2);
    assert_eq!(report.slides[0].r_id, "rId2");
    assert_eq!(report.slides[1].r_id, "rId2");
    assert_eq!(report.slides[0].elements.text_count(), 1);
    assert_eq!(report.slides[1].elements.text_count(), 2);
}

#[test]
fn test_text_samples_for_up_to_five_runs() {
    let bytes = deck(&[(256, "rId2")], &[(1, slide_xml(&["alpha", "  beta ", "gamma"]))]);

    let text = analyze(&bytes).unwrap().slides[0].elements.text.clone().unwrap();
    assert_eq!(text.count, 3);
    assert_eq!(text.samples, vec!["alpha", "beta", "gamma"]);
}

#[test]
fn test_text_samples_truncated_beyond_five_runs() {
    let runs = ["1", "2", "3", "4", "5", "6", "7", "8"];
    let bytes = deck(&[(256, "rId2")], &[(1, slide_xml(&runs))]);

    let text = analyze(&bytes).unwrap().slides[0].elements.text.clone().unwrap();
    assert_eq!(text.count, 8);
    assert_eq!(text.samples, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_missing_slide_part_yields_partial_record_in_place() {
    let bytes = deck(
        &[(256, "rId2"), (257, "rId3"), (258, "rId4")],
        &[(1, slide_xml(&["one"])), (3, slide_xml(&["three"]))],
    );

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 3);

    assert!(!report.slides[0].partial);
    assert_eq!(report.slides[0].elements.text_count(), 1);

    let missing = &report.slides[1];
    assert_eq!(missing.number, 2);
    assert_eq!(missing.id, 257);
    assert_eq!(missing.r_id, "rId3");
    assert!(missing.partial);
    assert!(missing.elements.is_empty());

    assert!(!report.slides[2].partial);
    assert_eq!(report.slides[2].elements.text.as_ref().unwrap().samples, vec!["three"]);
}

#[test]
fn test_missing_ordering_part_fails() {
    let bytes = build_pptx(&[("ppt/slides/slide1.xml".to_string(), slide_xml(&["orphan"]))]);

    let err = analyze(&bytes).unwrap_err();
    assert_eq!(err.kind, AnalysisErrorKind::MissingOrderingPart);
}

#[test]
fn test_corrupt_archive_fails() {
    let mut bytes = deck(&[(256, "rId2")], &[(1, slide_xml(&["x"]))]);
    bytes.truncate(bytes.len() / 2);

    let err = analyze(&bytes).unwrap_err();
    assert_eq!(err.kind, AnalysisErrorKind::CorruptArchive);
}

#[test]
fn test_picture_nested_in_table_is_double_attributed() {
    let slide = format!(
        r#"<p:sld xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:cSld><p:spTree><p:graphicFrame><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblGrid><a:gridCol w="3048000"/></a:tblGrid><a:tr h="370840"><a:tc><p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture 3"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/></p:blipFill><p:spPr/></p:pic></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame></p:spTree></p:cSld></p:sld>"#
    );
    let bytes = deck(&[(256, "rId2")], &[(1, slide)]);

    let elements = &analyze(&bytes).unwrap().slides[0].elements;
    assert_eq!(elements.pictures, 1);
    assert_eq!(elements.tables, 1);
    assert_eq!(elements.shapes, 0);
    assert!(elements.text.is_none());
}

#[test]
fn test_empty_presentation_is_valid() {
    let bytes = deck(&[], &[]);

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 0);
    assert!(report.slides.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json, serde_json::json!({ "totalSlides": 0, "slides": [] }));
}

#[test]
fn test_presentation_without_slide_list_is_empty() {
    let bytes = build_pptx(&[(
        "ppt/presentation.xml".to_string(),
        format!(r#"<p:presentation xmlns:p="{P_NS}"><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#),
    )]);

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 0);
}

#[test]
fn test_malformed_slide_does_not_fail_analysis() {
    let broken = format!(r#"<p:sld xmlns:a="{A_NS}" xmlns:p="{P_NS}"><p:sp><a:t>survivor</a:t></p:sp><p:pic"#);
    let bytes = deck(&[(256, "rId2"), (257, "rId3")], &[(1, broken), (2, slide_xml(&["fine"]))]);

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.slides[0].elements.shapes, 1);
    assert_eq!(report.slides[0].elements.pictures, 0);
    assert_eq!(report.slides[0].elements.text.as_ref().unwrap().samples, vec!["survivor"]);
    assert!(!report.slides[0].partial);
    assert_eq!(report.slides[1].elements.text_count(), 1);
}

#[test]
fn test_report_json_matches_consumer_schema() {
    let bytes = deck(&[(256, "rId2"), (257, "rId3")], &[(1, slide_xml(&["Hello"]))]);

    let json = serde_json::to_value(analyze(&bytes).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "totalSlides": 2,
            "slides": [
                {
                    "number": 1,
                    "id": "256",
                    "rId": "rId2",
                    "elements": {
                        "text": { "count": 1, "samples": ["Hello"] },
                        "shapes": 1,
                        "pictures": 0,
                        "charts": 0,
                        "tables": 0
                    }
                },
                {
                    "number": 2,
                    "id": "257",
                    "rId": "rId3",
                    "elements": {
                        "text": null,
                        "shapes": 0,
                        "pictures": 0,
                        "charts": 0,
                        "tables": 0
                    },
                    "partial": true
                }
            ]
        })
    );
}

#[test]
fn test_strict_conformance_package() {
    let p_ns = "http://purl.oclc.org/ooxml/presentationml/main";
    let a_ns = "http://purl.oclc.org/ooxml/drawingml/main";
    let r_ns = "http://purl.oclc.org/ooxml/officeDocument/relationships";
    let presentation = format!(
        r#"<p:presentation xmlns:a="{a_ns}" xmlns:r="{r_ns}" xmlns:p="{p_ns}" conformance="strict"><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/></p:sldIdLst></p:presentation>"#
    );
    let slide = format!(
        r#"<p:sld xmlns:a="{a_ns}" xmlns:r="{r_ns}" xmlns:p="{p_ns}"><p:cSld><p:spTree><p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp><p:pic/></p:spTree></p:cSld></p:sld>"#
    );
    let bytes = build_pptx(&[
        ("ppt/presentation.xml".to_string(), presentation),
        ("ppt/slides/slide1.xml".to_string(), slide.clone()),
        ("ppt/slides/slide2.xml".to_string(), slide),
    ]);

    let report = analyze(&bytes).unwrap();
    assert_eq!(report.total_slides, 2);
    for record in &report.slides {
        assert!(!record.partial);
        assert_eq!(record.elements.shapes, 1);
        assert_eq!(record.elements.pictures, 1);
        assert_eq!(record.elements.text.as_ref().unwrap().samples, vec!["Hello"]);
    }
}
