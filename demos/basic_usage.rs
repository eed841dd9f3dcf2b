//! Basic usage example for the pptx-inventory crate
//!
//! This example demonstrates how to analyze a PPTX file and print the per-slide
//! inventory as JSON.
//!
//! Run with: cargo run --example basic_usage <path/to/your/presentation.pptx>

use pptx_inventory::{analyze_file, AnalyzerConfig};
use std::env;
use std::path::Path;

fn main() {
    // Get the PPTX file path from command line arguments
    let args: Vec<String> = env::args().collect();
    let pptx_path = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Usage: cargo run --example basic_usage <path/to/presentation.pptx>");
        return;
    };

    println!("Processing PPTX file: {}", pptx_path);

    // Use the config builder to build your config
    let config = AnalyzerConfig::builder().max_text_samples(3).build();

    let report = match analyze_file(Path::new(pptx_path), &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    for slide in &report.slides {
        println!(
            "Slide {} (id {}, {}): {} text runs, {} shapes, {} pictures, {} charts, {} tables{}",
            slide.number,
            slide.id,
            slide.r_id,
            slide.elements.text_count(),
            slide.elements.shapes,
            slide.elements.pictures,
            slide.elements.charts,
            slide.elements.tables,
            if slide.partial { " (content part missing)" } else { "" },
        );
    }

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }
}
