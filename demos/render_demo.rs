//! Demonstration of the Dayline Viewer rendering pipeline.
//!
//! This example shows how to:
//! 1. Load the bundled sample dataset
//! 2. Scan it for reversed or overlapping records
//! 3. Build a timeline for each person
//! 4. Render SVG and HTML charts to a directory
//!
//! Run with: cargo run --example render_demo

use dayline_viewer::{
    dataset::{scan_dataset, Dataset},
    render::{chart_page, TimelineRenderer},
    timeline::{build_timeline, summarize, DEFAULT_DAY_START_HOUR},
    CSV_FORMAT_HELP,
};

fn main() {
    println!("Dayline Viewer - Render Demo");
    println!("============================");
    println!();

    // Display the input format the loader expects
    println!("{CSV_FORMAT_HELP}");
    println!();

    // Load the bundled sample
    let dataset = match Dataset::bundled() {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error loading bundled sample: {e}");
            return;
        }
    };
    println!(
        "Loaded {} records for {} people",
        dataset.record_count(),
        dataset.person_count()
    );
    println!();

    // Scan for data issues before rendering
    let report = scan_dataset(&dataset);
    println!("{}", report.summary());
    println!();

    let output_dir = std::env::temp_dir().join("dayline-demo");
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("Error creating {output_dir:?}: {e}");
        return;
    }

    let renderer = TimelineRenderer::new();

    for person_id in dataset.people() {
        let records = match dataset.schedule(person_id) {
            Some(records) => records,
            None => continue,
        };

        let timeline = match build_timeline(person_id, records, DEFAULT_DAY_START_HOUR) {
            Ok(timeline) => timeline,
            Err(e) => {
                eprintln!("Skipping {person_id}: {e}");
                continue;
            }
        };
        let summary = summarize(&timeline);

        println!("=== {person_id} ===");
        println!(
            "  Window: {} to {}",
            timeline.window.start.format("%Y-%m-%d %H:%M"),
            timeline.window.end.format("%Y-%m-%d %H:%M")
        );
        println!(
            "  {} activities ({} min), {} gaps ({} min)",
            summary.busy_count, summary.busy_minutes, summary.gap_count, summary.gap_minutes
        );
        if summary.longest_gap_minutes > 0 {
            println!("  Longest gap: {} min", summary.longest_gap_minutes);
        }

        let svg_path = output_dir.join(format!("{person_id}.svg"));
        if let Err(e) = std::fs::write(&svg_path, renderer.render_svg(&timeline)) {
            eprintln!("  Error writing SVG: {e}");
            continue;
        }

        let html_path = output_dir.join(format!("{person_id}.html"));
        if let Err(e) = std::fs::write(&html_path, chart_page(&timeline, &summary, &renderer)) {
            eprintln!("  Error writing HTML: {e}");
            continue;
        }

        println!("  Wrote {svg_path:?} and {html_path:?}");
        println!();
    }

    println!("Demo complete!");
}
