//! Property tests for the vector codec and distance kernels.

use proptest::prelude::*;

use wikilite_embeddings::codec::*;
use wikilite_embeddings::distance::*;

fn finite_vec(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0e6f32..1.0e6f32, len)
}

proptest! {
    #[test]
    fn prop_f32_bytes_roundtrip_is_bit_exact(
        v in prop::collection::vec(any::<f32>().prop_filter("finite", |f| f.is_finite()), 0..256)
    ) {
        let bytes = f32_to_bytes(&v);
        prop_assert_eq!(bytes.len(), v.len() * 4);
        let back = bytes_to_f32(&bytes).unwrap();
        prop_assert_eq!(back.len(), v.len());
        for (a, b) in v.iter().zip(&back) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn prop_sign_flip_flips_exactly_one_bit(
        v in prop::collection::vec(
            (-100.0f32..100.0).prop_filter("nonzero", |f| *f != 0.0),
            1..200,
        ),
        idx in any::<prop::sample::Index>(),
    ) {
        let i = idx.index(v.len());
        let mut flipped = v.clone();
        flipped[i] = -flipped[i];

        let a = quantize_binary(&v);
        let b = quantize_binary(&flipped);
        prop_assert_eq!(hamming(&a, &b).unwrap(), 1);

        let diff = a[i / 8] ^ b[i / 8];
        prop_assert_eq!(diff, 1u8 << (i % 8));
    }

    #[test]
    fn prop_quantized_length(len in 0usize..2048) {
        let q = quantize_binary(&vec![0.5; len]);
        prop_assert_eq!(q.len(), len.div_ceil(8));
    }

    #[test]
    fn prop_hamming_identity_and_symmetry(
        a in prop::collection::vec(any::<u8>(), 0..128),
        seed in any::<u8>(),
    ) {
        let b: Vec<u8> = a.iter().map(|x| x.wrapping_add(seed)).collect();
        prop_assert_eq!(hamming(&a, &a).unwrap(), 0);
        prop_assert_eq!(hamming(&a, &b).unwrap(), hamming(&b, &a).unwrap());
    }

    #[test]
    fn prop_hamming_rejects_unequal_lengths(
        a in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assert!(hamming(&a, &a[1..]).is_err());
    }

    #[test]
    fn prop_euclidean_metric_axioms(
        (a, b, c) in (1usize..64).prop_flat_map(|n| (finite_vec(n), finite_vec(n), finite_vec(n)))
    ) {
        prop_assert_eq!(euclidean(&a, &a).unwrap(), 0.0);

        let ab = euclidean(&a, &b).unwrap();
        let ba = euclidean(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);

        let ac = euclidean(&a, &c).unwrap();
        let cb = euclidean(&c, &b).unwrap();
        prop_assert!(ab <= ac + cb + 1e-6 * (1.0 + ac + cb));
    }

    #[test]
    fn prop_euclidean_rejects_unequal_lengths(a in finite_vec(8), b in finite_vec(9)) {
        prop_assert!(euclidean(&a, &b).is_err());
    }

    #[test]
    fn prop_levenshtein_properties(s in "\\PC{0,24}", t in "\\PC{0,24}") {
        prop_assert_eq!(levenshtein(&s, &s), 0);
        prop_assert_eq!(levenshtein("", &s), s.chars().count());
        prop_assert_eq!(levenshtein(&s, &t), levenshtein(&t, &s));
    }

    #[test]
    fn prop_normalize_yields_unit_length(
        v in finite_vec(32).prop_filter("nonzero", |v| v.iter().any(|x| x.abs() > 1e-3))
    ) {
        let n = &normalize(&[v])[0];
        let norm: f64 = n.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
        prop_assert!((norm - 1.0).abs() < 1e-4, "norm was {}", norm);
    }

    #[test]
    fn prop_extract_prefix_is_prefix_of_full(
        v in finite_vec(64).prop_filter("nonzero", |v| v.iter().any(|x| x.abs() > 1e-3)),
        size in 1usize..64,
    ) {
        let full = extract_prefix(&v, 0);
        let prefix = extract_prefix(&v, size);
        prop_assert_eq!(prefix.len(), size * 4);
        prop_assert_eq!(&full[..size * 4], &prefix[..]);
    }
}

#[test]
fn normalize_zero_vector_is_all_zeros() {
    let out = normalize(&[vec![0.0; 16]]);
    assert_eq!(out[0], vec![0.0; 16]);
    assert!(out[0].iter().all(|x| !x.is_nan()));
}
