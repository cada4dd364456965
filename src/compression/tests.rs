use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compression::{
    codec, entropy, expected_code_length, Algorithm, FrequencyTable, HuffmanBuilder,
    PrefixCodeBuilder, ShannonFanoBuilder,
};
use crate::error::Error;

fn round_trip(data: &[u8]) {
    for algorithm in Algorithm::ALL {
        let encoded = codec::encode(data, algorithm).unwrap();
        let decoded = codec::decode(&encoded.code.tree, &encoded.payload).unwrap();
        assert_eq!(decoded, data, "{algorithm} on {} bytes", data.len());
        codec::verify(data, &decoded).unwrap();
    }
}

/// Inputs whose byte frequencies follow a steep geometric curve.
fn skewed(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| {
            let mut symbol = 0u8;
            while symbol < 40 && rng.gen_bool(0.45) {
                symbol += 1;
            }
            symbol
        })
        .collect()
}

#[test]
fn test_round_trip_edge_inputs() {
    round_trip(&[]);
    round_trip(&[0]);
    round_trip(&[0xFF; 257]);
    round_trip(&(0..=255u8).collect::<Vec<_>>());
    round_trip(b"ab");
}

#[test]
fn test_round_trip_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for len in [1usize, 7, 8, 9, 100, 1000, 4096] {
        let uniform: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        round_trip(&uniform);
        round_trip(&skewed(&mut rng, len));
    }
}

#[test]
fn test_codebooks_are_prefix_free() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let distinct = rng.gen_range(1..=256usize);
        let table = FrequencyTable::from_counts(
            (0..distinct).map(|s| (s as u8, rng.gen_range(1..10_000u64))),
        );
        for algorithm in Algorithm::ALL {
            let code = algorithm.build(&table);
            assert!(code.codebook.is_prefix_free(), "{algorithm}");
            assert_eq!(code.codebook.len(), distinct);
            assert!(code.codebook.iter().all(|(_, c)| !c.is_empty()));
        }
    }
}

#[test]
fn test_huffman_never_longer_than_shannon_fano() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let data = skewed(&mut rng, 2000);
        let table = FrequencyTable::count(&data);
        let huffman = HuffmanBuilder.build(&table).codebook;
        let shannon_fano = ShannonFanoBuilder.build(&table).codebook;
        assert!(
            expected_code_length(&table, &huffman)
                <= expected_code_length(&table, &shannon_fano) + 1e-12
        );
        // Neither code beats the entropy bound.
        assert!(expected_code_length(&table, &huffman) + 1e-12 >= entropy(&table));
    }
}

#[test]
fn test_repeated_builds_are_identical() {
    let data = b"she sells sea shells by the sea shore";
    let table = FrequencyTable::count(data);
    for algorithm in Algorithm::ALL {
        let first = codec::encode(data, algorithm).unwrap();
        for _ in 0..10 {
            assert_eq!(codec::encode(data, algorithm).unwrap(), first);
        }
        assert_eq!(algorithm.build(&table), first.code);
    }
}

#[test]
fn test_algorithm_selection_by_name() {
    assert_eq!("huffman".parse::<Algorithm>().unwrap(), Algorithm::Huffman);
    assert_eq!("Shannon".parse::<Algorithm>().unwrap(), Algorithm::ShannonFano);
    assert_eq!(
        "shannon-fano".parse::<Algorithm>().unwrap(),
        Algorithm::ShannonFano
    );
    assert!(matches!(
        "lzw".parse::<Algorithm>(),
        Err(Error::Configuration(_))
    ));
    assert_eq!(Algorithm::ShannonFano.to_string(), "shannon-fano");
    assert_eq!(Algorithm::default(), Algorithm::Huffman);
}
