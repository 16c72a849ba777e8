//! Small random helpers used by the record generators.

use rand::Rng;
use rand::seq::SliceRandom;

/// Picks one element of `pool`, or `""` when the pool is empty.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Uniform integer in `min..=max`.
pub fn int_between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

/// Uniform float in `min..max`.
pub fn float_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}

/// `count` distinct elements of `pool`, in random order. `count` is clamped
/// to the pool size.
pub fn subset<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], count: usize) -> Vec<String> {
    pool.choose_multiple(rng, count.min(pool.len()))
        .map(|item| item.to_string())
        .collect()
}

/// True with probability one half.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Zero-padded numeric code of `digits` length, e.g. `"004271"`.
pub fn numeric_code<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> String {
    let upper = 10u64.pow(digits);
    format!("{:0width$}", rng.gen_range(0..upper), width = digits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const POOL: &[&str] = &["a", "b", "c", "d"];

    #[test]
    fn test_subset_is_distinct_and_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = subset(&mut rng, POOL, 3);
        assert_eq!(picked.len(), 3);

        let mut deduped = picked.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 3);

        assert_eq!(subset(&mut rng, POOL, 10).len(), POOL.len());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let n = int_between(&mut rng, 1, 3);
            assert!((1..=3).contains(&n));
            let f = float_between(&mut rng, 3.5, 5.0);
            assert!((3.5..5.0).contains(&f));
        }
        assert!(POOL.contains(&pick(&mut rng, POOL)));
    }

    #[test]
    fn test_numeric_code_is_padded() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let code = numeric_code(&mut rng, 6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
