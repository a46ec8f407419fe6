use mixchord_matrix::{build_matrix, CategoryClassifier, WeightMatrix};
use mixchord_traits::Category;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_table(rng: &mut StdRng) -> (usize, String) {
    let n = rng.gen_range(1..12);
    let header: Vec<String> = (0..n).map(|i| format!("ingredient {i}")).collect();
    let mut raw = header.join(",");
    let rows = rng.gen_range(0..n + 3);
    for _ in 0..rows {
        // now and then a row of the wrong width
        let width = if rng.gen_bool(0.15) { n + 1 } else { n };
        let row: Vec<String> = (0..width)
            .map(|_| rng.gen_range(0..20u32).to_string())
            .collect();
        raw.push('\n');
        raw.push_str(&row.join(","));
    }
    (n, raw)
}

#[test]
fn built_matrices_are_square_symmetric_with_empty_diagonal() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let (n, raw) = random_table(&mut rng);
        let built = build_matrix(&raw).expect("unique generated names");
        let w = built.matrix.weights();
        assert_eq!(w.size(), n);
        assert_eq!(built.matrix.categories().len(), n);
        assert!(w.is_symmetric(), "asymmetric result for\n{raw}");
        for i in 0..n {
            assert_eq!(w.get(i, i), 0);
            for j in 0..n {
                assert_eq!(w.get(i, j), w.get(j, i));
            }
        }
    }
}

#[test]
fn symmetrize_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let n = rng.gen_range(0..10);
        let rows: Vec<Vec<u32>> = (0..n)
            .map(|_| (0..n).map(|_| rng.gen_range(0..100)).collect())
            .collect();
        let mut once = WeightMatrix::from_rows(&rows).unwrap();
        once.symmetrize();
        let mut twice = once.clone();
        twice.symmetrize();
        assert_eq!(once, twice);
    }
}

#[test]
fn classification_is_total() {
    let classifier = CategoryClassifier::default();
    let mut rng = StdRng::seed_from_u64(7);
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz -ÉéñÀ'".chars().collect();
    for _ in 0..1000 {
        let len = rng.gen_range(1..24);
        let name: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let category = classifier.classify(&name);
        assert!(Category::PRIORITY.contains(&category));
    }
}
