use chrono::{Datelike, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/PromptCloud/IMDb-Movie-Database/master/IMDbMovies.csv";
pub const RAW_PATH: &str = "data/imdb_movies_raw.csv";
pub const SUBSET_PATH: &str = "data/last_1000_movies_dataset.csv";
pub const SUMMARY_PATH: &str = "data/genre_summary.csv";
pub const CHART_PATH: &str = "images/genre_weighted_score.svg";
pub const NOTES_PATH: &str = "data/README.md";

/// Every knob of a run. The defaults reproduce the fixed layout under the
/// current directory, so running the binary without flags needs no setup.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "genre-rank",
    version,
    about = "Rank movie genres by a popularity-weighted rating"
)]
pub struct PipelineConfig {
    /// CSV dataset to download when no usable cache exists
    #[arg(long, default_value = DATA_URL)]
    pub url: String,

    #[arg(long, default_value = RAW_PATH)]
    pub raw_path: PathBuf,

    #[arg(long, default_value = SUBSET_PATH)]
    pub subset_path: PathBuf,

    #[arg(long, default_value = SUMMARY_PATH)]
    pub summary_path: PathBuf,

    #[arg(long, default_value = CHART_PATH)]
    pub chart_path: PathBuf,

    #[arg(long, default_value = NOTES_PATH)]
    pub notes_path: PathBuf,

    /// Number of most recent titles kept for aggregation
    #[arg(long, default_value_t = 1000)]
    pub limit: usize,

    /// Seed for the synthetic fallback dataset
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = 1200)]
    pub synthetic_count: usize,

    /// Newest release year of the synthetic dataset (defaults to the UTC year)
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Never touch the network
    #[arg(long)]
    pub offline: bool,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = 1)]
    pub polars_threads: usize,

    /// -v for debug output, -vv to also show log targets
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::parse_from(["genre-rank"])
    }
}

impl PipelineConfig {
    /// Default configuration with every file placed under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        PipelineConfig {
            raw_path: root.join(RAW_PATH),
            subset_path: root.join(SUBSET_PATH),
            summary_path: root.join(SUMMARY_PATH),
            chart_path: root.join(CHART_PATH),
            notes_path: root.join(NOTES_PATH),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn output_paths(&self) -> [&Path; 5] {
        [
            self.raw_path.as_path(),
            self.subset_path.as_path(),
            self.summary_path.as_path(),
            self.chart_path.as_path(),
            self.notes_path.as_path(),
        ]
    }
}
