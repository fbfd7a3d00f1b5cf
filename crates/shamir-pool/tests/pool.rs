//! End-to-end split/recover behaviour of the pool.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use shamir_pool::{
    encoding, interpolate_at, recover, recover_share, split, split_with_rng, Error, FieldConfig,
    Polynomial, Share, ShareSet,
};

/// All k-element subsets of `items`, in lexicographic order.
fn subsets<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (i, &head) in items.iter().enumerate() {
        for mut tail in subsets(&items[i + 1..], k - 1) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

fn pick(shares: &ShareSet, xs: &[u64]) -> Vec<Share> {
    xs.iter()
        .map(|&x| *shares.get_by_index(x).expect("share present"))
        .collect()
}

#[test]
fn test_concrete_scenario() {
    let field = FieldConfig::new(10007).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1234);
    let shares = split_with_rng(1234, 3, 5, &field, &mut rng).unwrap();
    assert_eq!(shares.len(), 5);

    assert_eq!(recover(&pick(&shares, &[1, 3, 5]), &field).unwrap(), 1234);
    assert_eq!(recover(&pick(&shares, &[2, 4, 5]), &field).unwrap(), 1234);
}

#[test]
fn test_every_threshold_subset_recovers() {
    let field = FieldConfig::default();
    let mut rng = ChaCha20Rng::seed_from_u64(9);

    for k in 1..=6usize {
        let shares = split_with_rng(7000, k, 6, &field, &mut rng).unwrap();
        // recovery needs at least two shares even when k = 1
        let size = k.max(2);
        for subset in subsets(shares.as_slice(), size) {
            assert_eq!(recover(&subset, &field).unwrap(), 7000, "k={} subset={:?}", k, subset);
        }
    }
}

#[test]
fn test_boundary_secret_zero() {
    let field = FieldConfig::default();
    let shares = split(0, 3, 5, &field).unwrap();
    for subset in subsets(shares.as_slice(), 3) {
        assert_eq!(recover(&subset, &field).unwrap(), 0);
    }
}

#[test]
fn test_largest_secret() {
    let field = FieldConfig::default();
    let shares = split(10006, 4, 7, &field).unwrap();
    assert_eq!(recover(&shares[3..], &field).unwrap(), 10006);
}

#[test]
fn test_below_threshold_does_not_determine_secret() {
    let field = FieldConfig::default();
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let shares = split_with_rng(1234, 3, 5, &field, &mut rng).unwrap();
    let partial = &shares[..2];

    // any candidate secret extends the two known points to a degree-2
    // polynomial; each such polynomial gives a different third point
    let mut third_points = Vec::new();
    for candidate in [1234u64, 42] {
        let mut points = partial.to_vec();
        points.push(Share::new(0, candidate));
        let y = interpolate_at(7, &points, &field).unwrap();

        let mut forged = partial.to_vec();
        forged.push(Share::new(7, y));
        assert_eq!(recover(&forged, &field).unwrap(), candidate);
        third_points.push(y);
    }
    assert_ne!(third_points[0], third_points[1]);
}

#[test]
fn test_below_threshold_brute_force_small_field() {
    // every secret in a small field is consistent with k - 1 shares
    let field = FieldConfig::new(31).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let shares = split_with_rng(17, 4, 6, &field, &mut rng).unwrap();
    let partial = &shares[..3];

    let mut consistent = 0;
    for candidate in 0..field.prime() {
        let mut points = partial.to_vec();
        points.push(Share::new(0, candidate));
        let y = interpolate_at(10, &points, &field).unwrap();

        let mut forged = partial.to_vec();
        forged.push(Share::new(10, y));
        if recover(&forged, &field).unwrap() == candidate {
            consistent += 1;
        }
    }
    assert_eq!(consistent, field.prime());
}

#[test]
fn test_duplicate_rejection() {
    let field = FieldConfig::default();
    let result = recover(&[Share::new(2, 5), Share::new(2, 9)], &field);
    assert_eq!(result.unwrap_err(), Error::DuplicateShare(2));
}

#[test]
fn test_threshold_validation() {
    let field = FieldConfig::default();
    let result = split(10, 5, 3, &field);
    assert_eq!(result.unwrap_err(), Error::InvalidThreshold { threshold: 5, total: 3 });
}

#[test]
fn test_mismatched_prime_gives_wrong_secret() {
    let split_field = FieldConfig::new(10007).unwrap();
    let other_field = FieldConfig::new(10009).unwrap();

    // f(x) = 1234 + 5000x wraps modulo 10007 at x = 2
    let poly = Polynomial::from_coefficients(vec![1234, 5000], &split_field);
    let shares: Vec<Share> = (1..=2)
        .map(|x| Share::new(x, poly.evaluate(x, &split_field)))
        .collect();
    assert_eq!(shares, [Share::new(1, 6234), Share::new(2, 1227)]);
    assert_eq!(recover(&shares, &split_field).unwrap(), 1234);

    // no error is raised, the value is just wrong
    let recovered = recover(&shares, &other_field).unwrap();
    assert_ne!(recovered, 1234);
    assert_eq!(recovered, 1232);
}

#[test]
fn test_reissue_lost_share() {
    let field = FieldConfig::default();
    let shares = split(555, 3, 5, &field).unwrap();
    let rebuilt = recover_share(&pick(&shares, &[1, 2, 5]), 4, &field).unwrap();
    assert_eq!(Some(&rebuilt), shares.get_by_index(4));
}

#[test]
fn test_text_format_round_trip_through_recovery() {
    let field = FieldConfig::default();
    let shares = split(3141, 2, 4, &field).unwrap();

    let text = ShareSet::new(pick(&shares, &[2, 4])).to_string();
    let parsed: ShareSet = text.parse().unwrap();
    assert_eq!(recover(&parsed, &field).unwrap(), 3141);
}

#[test]
fn test_diceware_pool() {
    let field = FieldConfig::default();
    let secret = encoding::dice_index_to_secret("35214").unwrap();
    let shares = split(secret, 2, 3, &field).unwrap();

    let recovered = recover(&pick(&shares, &[1, 3]), &field).unwrap();
    assert_eq!(encoding::secret_to_dice_index(recovered).unwrap(), "35214");
}

#[test]
fn test_recovery_code_pool() {
    let field = FieldConfig::default();
    let secret = encoding::recovery_char_to_secret("Q").unwrap();
    let shares = split(secret, 3, 3, &field).unwrap();

    let recovered = recover(&shares, &field).unwrap();
    assert_eq!(encoding::secret_to_recovery_char(recovered).unwrap(), 'Q');
}

proptest! {
    #[test]
    fn prop_any_threshold_subset_recovers(
        secret in 0u64..10007,
        total in 2usize..9,
        threshold_seed in 0usize..100,
        subset_seed in 0usize..1000,
        rng_seed in any::<u64>(),
    ) {
        let field = FieldConfig::default();
        let threshold = 2 + threshold_seed % (total - 1);
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
        let shares = split_with_rng(secret, threshold, total, &field, &mut rng).unwrap();

        let all = subsets(shares.as_slice(), threshold);
        let subset = &all[subset_seed % all.len()];
        prop_assert_eq!(recover(subset, &field).unwrap(), secret);
    }

    #[test]
    fn prop_large_prime_round_trip(
        secret in 0u64..18_446_744_073_709_551_557,
        rng_seed in any::<u64>(),
    ) {
        let field = FieldConfig::new(18_446_744_073_709_551_557).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
        let shares = split_with_rng(secret, 3, 5, &field, &mut rng).unwrap();
        prop_assert_eq!(recover(&shares[2..], &field).unwrap(), secret);
    }
}
