use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator seeded from a calendar day as `YYYYMMDD`. ChaCha output is
/// fixed for a given seed, so the same day yields the same sequence on
/// every platform and release.
fn rng_for_date(date: NaiveDate) -> ChaCha8Rng {
    let seed = date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64;
    ChaCha8Rng::seed_from_u64(seed)
}

/// Shuffle `items` in an order that depends only on `date`.
pub fn shuffle_for_date<T>(items: &mut [T], date: NaiveDate) {
    items.shuffle(&mut rng_for_date(date));
}
