use proptest::prelude::*;

use semantle::similarity::{NearestTable, VectorStore, cosine_similarity};

fn vocabulary() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 3), 2..40)
}

fn store(vectors: Vec<Vec<f32>>) -> VectorStore {
    let pairs = vectors
        .into_iter()
        .enumerate()
        .map(|(i, v)| (format!("w{i}"), v))
        .collect();
    VectorStore::from_pairs(pairs, Vec::new()).unwrap()
}

proptest! {
    #[test]
    fn test_ranks_are_contiguous_and_exclude_secret(vectors in vocabulary(), pick in any::<prop::sample::Index>()) {
        let size = vectors.len();
        let store = store(vectors);
        let secret = format!("w{}", pick.index(size));
        let secret_vector = store.vector_of(&secret).unwrap();

        let table = NearestTable::build(0, 0, &secret, secret_vector, store.vocabulary());
        prop_assert_eq!(table.len(), size - 1);
        for (i, neighbor) in table.iter().enumerate() {
            prop_assert_eq!(neighbor.rank, i + 1);
            prop_assert_ne!(&neighbor.word, &secret);
        }
    }

    #[test]
    fn test_similarity_never_increases_with_rank(vectors in vocabulary(), pick in any::<prop::sample::Index>()) {
        let size = vectors.len();
        let store = store(vectors);
        let secret = format!("w{}", pick.index(size));
        let secret_vector = store.vector_of(&secret).unwrap();

        let table = NearestTable::build(0, 0, &secret, secret_vector, store.vocabulary());
        let similarities: Vec<f64> = table.iter().map(|n| n.similarity).collect();
        for pair in similarities.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
        for neighbor in table.iter() {
            let vector = store.vector_of(&neighbor.word).unwrap();
            prop_assert_eq!(neighbor.similarity, cosine_similarity(secret_vector, vector));
        }
    }

    #[test]
    fn test_cosine_is_bounded_and_symmetric(
        a in prop::collection::vec(-10.0f32..10.0, 4),
        b in prop::collection::vec(-10.0f32..10.0, 4),
    ) {
        let ab = cosine_similarity(&a, &b);
        prop_assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&ab));
        prop_assert!((ab - cosine_similarity(&b, &a)).abs() < 1e-12);
    }
}
