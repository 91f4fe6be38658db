//! Compose one page from IIIF annotation lists
//!
//! Reads one or more annotation-list JSON files belonging to the same page,
//! reconstructs lines, composites commentary highlights and prints the result
//! as JSON.
//!
//! Usage:
//!   cargo run --release --bin compose_page -- --width 2000 --height 3000 words.json comments.json
//!   RUST_LOG=debug cargo run --bin compose_page -- --width 2000 --height 3000 --tolerance 12 page.json

use iiif_lines::{AnnotationList, LayoutConfig, PageContext, PagePipeline};
use std::path::PathBuf;
use std::process;

struct ComposeConfig {
    width: u32,
    height: u32,
    tolerance: Option<u32>,
    inputs: Vec<PathBuf>,
}

impl ComposeConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut width = None;
        let mut height = None;
        let mut tolerance = None;
        let mut inputs = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--width" => {
                    i += 1;
                    width = Some(parse_number(&args, i, "--width")?);
                },
                "--height" => {
                    i += 1;
                    height = Some(parse_number(&args, i, "--height")?);
                },
                "--tolerance" => {
                    i += 1;
                    tolerance = Some(parse_number(&args, i, "--tolerance")?);
                },
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown flag {}", flag));
                },
                path => inputs.push(PathBuf::from(path)),
            }
            i += 1;
        }

        if inputs.is_empty() {
            return Err("no annotation files given".to_string());
        }

        Ok(Self {
            width: width.ok_or("--width is required")?,
            height: height.ok_or("--height is required")?,
            tolerance,
            inputs,
        })
    }
}

fn parse_number(args: &[String], i: usize, flag: &str) -> Result<u32, String> {
    let raw = args.get(i).ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|e| format!("{} {:?}: {}", flag, raw, e))
}

fn run(config: &ComposeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let lists = config
        .inputs
        .iter()
        .map(AnnotationList::from_path)
        .collect::<iiif_lines::Result<Vec<_>>>()?;
    let records = AnnotationList::merge_records(&lists);

    let mut layout = LayoutConfig::default();
    if let Some(tolerance) = config.tolerance {
        layout = layout.with_row_tolerance(tolerance);
    }

    let page = PageContext::new(config.width, config.height);
    let result = PagePipeline::with_config(layout).process(page, &records);

    log::info!(
        "Composed {} lines, {} overlays ({} dropped records, {} integrity issues)",
        result.lines.len(),
        result.composition.overlays.len(),
        result.dropped.len(),
        result.composition.issues.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let config = match ComposeConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: compose_page --width W --height H [--tolerance T] FILE...");
            process::exit(2);
        },
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
