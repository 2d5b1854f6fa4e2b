use crate::aggregate::aggregate_genres;
use crate::chart::render_chart;
use crate::config::PipelineConfig;
use crate::data::load_records;
use crate::error::Result;
use crate::fetch::{Provenance, acquire};
use crate::report;
use crate::select::select_latest;
use crate::synth::generate_synthetic;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub provenance: Provenance,
    pub raw_records: usize,
    pub selected_records: usize,
    pub genres: usize,
}

/// Fetch, parse, select, aggregate and render in one pass. Every output file
/// is rewritten from scratch.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    for path in config.output_paths() {
        report::ensure_parent(path)?;
    }

    let start = Instant::now();
    let provenance = acquire(config);
    let records = match &provenance {
        Provenance::Downloaded { .. } => load_records(&config.raw_path)?,
        Provenance::Synthetic { .. } => {
            generate_synthetic(config.seed, config.year(), config.synthetic_count)
        }
    };
    let raw_records = records.len();
    debug!(
        "acquired {raw_records} records in {:.3}s",
        start.elapsed().as_secs_f32()
    );

    let start = Instant::now();
    let selected = select_latest(records, config.limit);
    report::write_selection_csv(&config.subset_path, &selected)?;
    debug!(
        "selected {} records in {:.3}s",
        selected.len(),
        start.elapsed().as_secs_f32()
    );

    let start = Instant::now();
    let summary = aggregate_genres(&selected);
    report::write_summary_csv(&config.summary_path, &summary)?;
    debug!(
        "aggregated {} genres in {:.3}s",
        summary.len(),
        start.elapsed().as_secs_f32()
    );

    let svg = render_chart(&summary, config.limit);
    report::write_chart(&config.chart_path, &svg)?;
    report::write_notes(&config.notes_path, &provenance)?;

    info!("Analysis complete.");
    Ok(RunSummary {
        provenance,
        raw_records,
        selected_records: selected.len(),
        genres: summary.len(),
    })
}
