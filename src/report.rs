use crate::data::{GenreAggregate, MovieRecord};
use crate::error::{PipelineError, Result};
use crate::fetch::Provenance;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(PipelineError::io(dir))
        }
        _ => Ok(()),
    }
}

fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    ensure_parent(path)?;
    let mut file = File::create(path).map_err(PipelineError::io(path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_line_terminator("\r\n".into())
        .finish(df)?;
    Ok(())
}

pub fn selection_frame(records: &[MovieRecord]) -> PolarsResult<DataFrame> {
    df!(
        "Title" => records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
        "Year" => records.iter().map(|r| r.year).collect::<Vec<_>>(),
        "Genre" => records.iter().map(|r| r.genre.as_str()).collect::<Vec<_>>(),
        "Rating" => records.iter().map(|r| r.rating).collect::<Vec<_>>(),
        "Votes" => records.iter().map(|r| r.votes).collect::<Vec<_>>()
    )
}

pub fn summary_frame(summary: &[GenreAggregate]) -> PolarsResult<DataFrame> {
    df!(
        "Genre" => summary.iter().map(|g| g.genre.as_str()).collect::<Vec<_>>(),
        "Titles" => summary.iter().map(|g| g.titles as u64).collect::<Vec<_>>(),
        "AvgRating" => summary.iter().map(|g| g.avg_rating).collect::<Vec<_>>(),
        "MedianRating" => summary.iter().map(|g| g.median_rating).collect::<Vec<_>>(),
        "AvgVotes" => summary.iter().map(|g| g.avg_votes).collect::<Vec<_>>(),
        "WeightedScore" => summary.iter().map(|g| g.weighted_score).collect::<Vec<_>>()
    )
}

pub fn write_selection_csv(path: &Path, records: &[MovieRecord]) -> Result<()> {
    write_frame(path, &mut selection_frame(records)?)
}

pub fn write_summary_csv(path: &Path, summary: &[GenreAggregate]) -> Result<()> {
    write_frame(path, &mut summary_frame(summary)?)
}

pub fn write_chart(path: &Path, svg: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, svg).map_err(PipelineError::io(path))
}

pub fn notes_markdown(provenance: &Provenance) -> String {
    format!("# Data Source Notes\n\n{provenance}\n")
}

pub fn write_notes(path: &Path, provenance: &Provenance) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, notes_markdown(provenance)).map_err(PipelineError::io(path))
}

#[cfg(test)]
mod test_report {
    use super::*;

    fn movie(title: &str, genre: &str, votes: Option<i64>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: 2021,
            genre: genre.to_string(),
            rating: Some(7.5),
            votes,
        }
    }

    #[test]
    fn test_selection_csv() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/subset.csv");
        let records = vec![
            movie("Dune", "Action, Sci-Fi", Some(500)),
            movie("Tiny", "Drama", None),
        ];
        write_selection_csv(&path, &records)?;

        // Reading the file back through the raw loader also checks quoting.
        let reread = crate::data::load_records(&path)?;
        assert_eq!(reread, records);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("Title,Year,Genre,Rating,Votes"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Title,Year,Genre,Rating,Votes\r\n"));
        assert!(text.ends_with("\r\n"));
        assert!(!text.replace("\r\n", "").contains('\n'));
        Ok(())
    }

    #[test]
    fn test_summary_csv() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let summary = vec![GenreAggregate {
            genre: "Drama".to_string(),
            titles: 2,
            avg_rating: 7.0,
            median_rating: 7.0,
            avg_votes: 505,
            weighted_score: 18.93,
        }];
        write_summary_csv(&path, &summary)?;

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Genre,Titles,AvgRating,MedianRating,AvgVotes,WeightedScore")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Drama,2,"));
        assert!(row.ends_with(",505,18.93"));
        Ok(())
    }

    #[test]
    fn test_notes() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        let provenance = Provenance::Synthetic {
            reason: "offline mode requested".to_string(),
        };
        write_notes(&path, &provenance)?;

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Data Source Notes\n\nSource: Synthetic dataset"));
        assert!(text.ends_with("available.\n"));
        Ok(())
    }
}
