use anyhow::{Context, bail};
use dermscan::utils::logging::init_logging;
use dermscan::{BoundaryMethod, CurveAnalyzer, StudyConfig, StudyLoader, SubjectReport};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

const USAGE: &str =
    "usage: dermscan <config.json|-> <instrument_root> <scan_info_root> <subject>...";

fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!(USAGE);
    }

    let config = if args[0] == "-" {
        StudyConfig::default()
    } else {
        StudyConfig::from_json_file(Path::new(&args[0]))
            .with_context(|| format!("loading configuration from {}", args[0]))?
    };
    let instrument_root = Path::new(&args[1]);
    let scan_info_root = Path::new(&args[2]);
    let subjects = &args[3..];

    let start = Instant::now();
    info!(
        "Loading {} subject(s) from {}",
        subjects.len(),
        instrument_root.display()
    );

    let analyzer = CurveAnalyzer::new(config.curve.clone());
    let loader = StudyLoader::new(config, instrument_root, scan_info_root);

    let mut reports = Vec::with_capacity(subjects.len());
    for (id, result) in loader.load_study(subjects) {
        let mut subject = match result {
            Ok(subject) => subject,
            Err(e) => {
                warn!("Skipping subject {id}: {e}");
                continue;
            }
        };

        let analysed: usize = subject
            .visits_mut()
            .map(|visit| visit.analyze_epidermal(&analyzer, BoundaryMethod::SignChange))
            .sum();
        info!("Subject {id}: analysed {analysed} epidermal curve(s)");

        reports.push(SubjectReport::from_subject(&subject));
    }

    let json = serde_json::to_string_pretty(&reports).context("serializing report")?;
    println!("{json}");

    info!(
        "Finished {} of {} subject(s) in {:?}",
        reports.len(),
        subjects.len(),
        start.elapsed()
    );
    Ok(())
}
