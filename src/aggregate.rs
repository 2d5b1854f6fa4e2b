use crate::data::{GenreAggregate, MovieRecord};
use rustc_hash::FxHashMap as HashMap;

pub fn weighted_score(avg_rating: f64, avg_votes: f64) -> f64 {
    avg_rating * (avg_votes + 1.0).log10()
}

pub fn split_genres(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|g| !g.is_empty())
}

/// Rounds the exact decimal value of `value`, not `value * 10^places`,
/// which can land on a spurious .5.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Neumaier-compensated mean. The summation residual is carried into the
/// division instead of being dropped.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len() as f64;
    let (mut sum, mut residual) = (0.0_f64, 0.0_f64);
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            residual += (sum - t) + v;
        } else {
            residual += (v - t) + sum;
        }
        sum = t;
    }
    let q = sum / n;
    let r = (-q).mul_add(n, sum);
    q + (r + residual) / n
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[derive(Default)]
struct GenreStats {
    ratings: Vec<f64>,
    votes: Vec<i64>,
}

/// Per-genre summary, highest weighted score first. A title counts towards
/// every genre it is tagged with; unrated titles contribute nothing.
pub fn aggregate_genres(records: &[MovieRecord]) -> Vec<GenreAggregate> {
    // Genre name -> slot in `stats`, which keeps first-seen order.
    let mut slots: HashMap<&str, usize> = HashMap::default();
    let mut stats: Vec<(&str, GenreStats)> = Vec::new();

    for record in records {
        let Some(rating) = record.rating else {
            continue;
        };
        for genre in split_genres(&record.genre) {
            let slot = *slots.entry(genre).or_insert_with(|| {
                stats.push((genre, GenreStats::default()));
                stats.len() - 1
            });
            let entry = &mut stats[slot].1;
            entry.ratings.push(rating);
            if let Some(votes) = record.votes {
                entry.votes.push(votes);
            }
        }
    }

    let mut summary: Vec<GenreAggregate> = stats
        .into_iter()
        .map(|(genre, mut s)| {
            let avg_rating = mean(s.ratings.iter().copied());
            let median_rating = median(&mut s.ratings);
            let avg_votes = if s.votes.is_empty() {
                0.0
            } else {
                mean(s.votes.iter().map(|&v| v as f64))
            };
            GenreAggregate {
                genre: genre.to_string(),
                titles: s.ratings.len(),
                avg_rating: round_to(avg_rating, 2),
                median_rating: round_to(median_rating, 2),
                avg_votes: avg_votes.round_ties_even() as i64,
                weighted_score: round_to(weighted_score(avg_rating, avg_votes), 2),
            }
        })
        .collect();

    summary.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    summary
}
