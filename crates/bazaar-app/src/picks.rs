use rand::Rng;
use rand::seq::IteratorRandom;

use bazaar_types::Listing;

/// Most listings the picks view shows at once.
pub const PICKS_LIMIT: usize = 10;

/// Unordered random sample of up to [`PICKS_LIMIT`] listings. The handler
/// passes a fresh RNG per request, so every visit may show a different
/// subset; tests pass a seeded RNG instead of asserting on identities.
pub fn sample_picks<R: Rng + ?Sized>(listings: &[Listing], rng: &mut R) -> Vec<Listing> {
    listings.iter().cloned().choose_multiple(rng, PICKS_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_types::PLACEHOLDER_IMAGE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn listings(n: usize) -> Vec<Listing> {
        (0..n)
            .map(|i| Listing {
                id: i.to_string(),
                title: format!("Item {i}"),
                description: String::new(),
                price: i as f64,
                email: "seller@example.com".to_string(),
                category: "Hobbies".to_string(),
                image_url: PLACEHOLDER_IMAGE.to_string(),
                location: "Austin".to_string(),
                created_at: None,
            })
            .collect()
    }

    #[test]
    fn sample_size_is_min_of_limit_and_total() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_picks(&listings(0), &mut rng).len(), 0);
        assert_eq!(sample_picks(&listings(4), &mut rng).len(), 4);
        assert_eq!(sample_picks(&listings(10), &mut rng).len(), 10);
        assert_eq!(sample_picks(&listings(25), &mut rng).len(), 10);
    }

    #[test]
    fn every_pick_comes_from_the_input_without_repeats() {
        let all = listings(25);
        let ids: HashSet<&str> = all.iter().map(|l| l.id.as_str()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample_picks(&all, &mut rng);
        let picked_ids: HashSet<&str> = picked.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(picked_ids.len(), picked.len(), "no duplicates");
        assert!(picked_ids.is_subset(&ids), "no invented records");
    }
}
