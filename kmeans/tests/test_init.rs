#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use kmeans::{
        init::{distinct_points, pick_distinct_centers},
        ClusteringError,
    };
    use rand::{Rng, SeedableRng};

    fn random_colors(count: usize, seed: u64) -> Vec<[u8; 3]> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..count).map(|_| [rng.gen_range(0..4), rng.gen_range(0..4), 0]).collect()
    }

    #[test]
    fn test_distinct_points_keep_first_appearance_order() {
        let points = vec![[3u8, 3, 3], [1, 1, 1], [3, 3, 3], [2, 2, 2], [1, 1, 1]];
        assert_eq!(
            distinct_points(&points),
            vec![[3u8, 3, 3], [1, 1, 1], [2, 2, 2]]
        );
    }

    #[test]
    fn test_centers_are_distinct_input_values() {
        let points = random_colors(500, 1);
        let available: HashSet<_> = points.iter().cloned().collect();

        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for k in 1..=available.len() {
            let centers = pick_distinct_centers(&points, k, &mut rng).unwrap();
            assert_eq!(centers.len(), k);
            let unique: HashSet<_> = centers.iter().cloned().collect();
            assert_eq!(unique.len(), k);
            assert!(centers.iter().all(|c| available.contains(c)));
        }
    }

    #[test]
    fn test_all_distinct_values_when_k_equals_distinct_count() {
        let points = vec![[0u8, 0, 0], [0, 0, 0], [9, 9, 9], [5, 5, 5]];
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let centers: HashSet<_> = pick_distinct_centers(&points, 3, &mut rng)
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<_> = [[0u8, 0, 0], [9, 9, 9], [5, 5, 5]].into_iter().collect();
        assert_eq!(centers, expected);
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let points = random_colors(1000, 3);
        let first = pick_distinct_centers(&points, 5, &mut rand::rngs::StdRng::seed_from_u64(11))
            .unwrap();
        let second = pick_distinct_centers(&points, 5, &mut rand::rngs::StdRng::seed_from_u64(11))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_not_enough_distinct_points() {
        let points = vec![[7u8, 7, 7]; 4];
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        match pick_distinct_centers(&points, 2, &mut rng) {
            Err(ClusteringError::NotEnoughDistinctPoints {
                requested,
                available,
            }) => {
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_zero_centers() {
        let points = vec![[7u8, 7, 7]];
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        assert!(matches!(
            pick_distinct_centers(&points, 0, &mut rng),
            Err(ClusteringError::ZeroClusters)
        ));
    }
}
