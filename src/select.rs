use crate::data::MovieRecord;

/// Keeps rated titles with a known year, newest first and most voted first
/// within a year. The sort is stable, so ties keep their input order.
pub fn select_latest(records: Vec<MovieRecord>, limit: usize) -> Vec<MovieRecord> {
    let mut kept: Vec<MovieRecord> = records
        .into_iter()
        .filter(|r| r.year > 0 && r.rating.is_some())
        .collect();

    kept.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| b.votes_or_zero().cmp(&a.votes_or_zero()))
    });
    kept.truncate(limit);
    kept
}
