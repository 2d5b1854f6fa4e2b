use crate::data::MovieRecord;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

pub const GENRE_POOL: [&str; 13] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Family",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
];

/// Stand-in dataset for runs without network access. Releases span the ten
/// years ending at `current_year`; output depends only on the arguments.
pub fn generate_synthetic(seed: u64, current_year: i32, count: usize) -> Vec<MovieRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|idx| {
            let year = rng.random_range(current_year - 9..=current_year);
            let rating = (rng.random_range(4.5..=8.6_f64) * 10.0).round() / 10.0;
            let votes = rng.random_range(5_000..=450_000_i64);
            let genre_count = rng.random_range(1..=3);
            let genre = index::sample(&mut rng, GENRE_POOL.len(), genre_count)
                .iter()
                .map(|i| GENRE_POOL[i])
                .collect::<Vec<_>>()
                .join(", ");

            MovieRecord {
                title: format!("Synthetic Movie {:04}", idx + 1),
                year,
                genre,
                rating: Some(rating),
                votes: Some(votes),
            }
        })
        .collect()
}
