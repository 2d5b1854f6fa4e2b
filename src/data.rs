use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::path::Path;

// Raw dataset header (PromptCloud IMDb export), only these columns are read:
//     Title    text
//     Year     integer, may be empty or garbage
//     Genre    comma separated tags, e.g. "Action, Sci-Fi"
//     Rating   float, may be empty
//     Votes    integer with thousands separators, e.g. "1,234,567"

#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: Option<f64>,
    pub votes: Option<i64>,
}

impl MovieRecord {
    /// Votes used for ranking, a missing count ranks as zero.
    pub fn votes_or_zero(&self) -> i64 {
        self.votes.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreAggregate {
    pub genre: String,
    pub titles: usize,
    pub avg_rating: f64,
    pub median_rating: f64,
    pub avg_votes: i64,
    pub weighted_score: f64,
}

/// Coerces one raw row. Returns `None` only when the year is unparseable,
/// bad ratings and vote counts are nulled instead.
pub fn parse_row(
    title: Option<&str>,
    year: Option<&str>,
    genre: Option<&str>,
    rating: Option<&str>,
    votes: Option<&str>,
) -> Option<MovieRecord> {
    let year = match year {
        None | Some("") => 0,
        Some(y) => y.trim().parse::<i32>().ok()?,
    };
    let rating = rating
        .filter(|r| !r.is_empty())
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite());
    let votes = votes
        .filter(|v| !v.is_empty())
        .and_then(|v| v.replace(',', "").trim().parse::<i64>().ok());

    Some(MovieRecord {
        title: title.unwrap_or_default().trim().to_string(),
        year,
        genre: genre.unwrap_or_default().trim().to_string(),
        rating,
        votes,
    })
}

/// Reads the whole file with every column as text so that coercion stays in
/// `parse_row` instead of polars' schema inference.
pub fn read_raw_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_truncate_ragged_lines(true)
                .with_encoding(CsvEncoding::LossyUtf8),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> PolarsResult<Vec<Option<&'a str>>> {
    match df.column(name) {
        Ok(column) => Ok(column.str()?.into_iter().collect()),
        Err(_) => Ok(vec![None; df.height()]),
    }
}

pub fn records_from_frame(df: &DataFrame) -> PolarsResult<Vec<MovieRecord>> {
    let titles = text_column(df, "Title")?;
    let years = text_column(df, "Year")?;
    let genres = text_column(df, "Genre")?;
    let ratings = text_column(df, "Rating")?;
    let votes = text_column(df, "Votes")?;

    let records = titles
        .into_iter()
        .zip(years)
        .zip(genres)
        .zip(ratings)
        .zip(votes)
        .filter_map(|((((title, year), genre), rating), votes)| {
            parse_row(title, year, genre, rating, votes)
        })
        .collect();
    Ok(records)
}

pub fn load_records(path: &Path) -> Result<Vec<MovieRecord>> {
    let df = read_raw_frame(path)?;
    Ok(records_from_frame(&df)?)
}

#[cfg(test)]
mod test_data {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_row_coerces_fields() {
        let record = parse_row(
            Some("  Arrival "),
            Some("2016"),
            Some(" Drama, Sci-Fi "),
            Some("7.9"),
            Some("1,234,567"),
        )
        .unwrap();
        assert_eq!(record.title, "Arrival");
        assert_eq!(record.year, 2016);
        assert_eq!(record.genre, "Drama, Sci-Fi");
        assert_eq!(record.rating, Some(7.9));
        assert_eq!(record.votes, Some(1_234_567));
    }

    #[test]
    fn test_parse_row_skips_bad_year() {
        assert!(parse_row(Some("x"), Some("20x6"), None, Some("7.0"), None).is_none());
        assert!(parse_row(Some("x"), Some("2016.0"), None, Some("7.0"), None).is_none());
    }

    #[test]
    fn test_parse_row_empty_year_is_zero() {
        let record = parse_row(Some("x"), None, None, Some("7.0"), None).unwrap();
        assert_eq!(record.year, 0);
        let record = parse_row(Some("x"), Some(""), None, Some("7.0"), None).unwrap();
        assert_eq!(record.year, 0);
    }

    #[test]
    fn test_parse_row_nulls_bad_fields() {
        let record = parse_row(None, Some("1999"), None, Some("n/a"), Some("lots")).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.rating, None);
        assert_eq!(record.votes, None);

        let record = parse_row(None, Some("1999"), None, Some("inf"), Some("")).unwrap();
        assert_eq!(record.rating, None);
        assert_eq!(record.votes, None);
    }

    #[test]
    fn test_load_records() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Title,Year,Genre,Rating,Votes,Runtime").unwrap();
        writeln!(file, "Heat,1995,\"Crime, Drama\",8.3,\"612,345\",170 min").unwrap();
        writeln!(file, "Broken,unknown,Drama,5.0,10,90 min").unwrap();
        writeln!(file, "Upcoming,2026,Horror,,,").unwrap();
        drop(file);

        let records = load_records(&path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Heat");
        assert_eq!(records[0].genre, "Crime, Drama");
        assert_eq!(records[0].votes, Some(612_345));
        assert_eq!(records[1].title, "Upcoming");
        assert_eq!(records[1].rating, None);
        assert_eq!(records[1].votes, None);
        Ok(())
    }

    #[test]
    fn test_missing_columns_read_as_empty() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, "Title,Year\nAlien,1979\n").unwrap();

        let records = load_records(&path)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].genre, "");
        assert_eq!(records[0].rating, None);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_records(Path::new("/nonexistent/raw.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
