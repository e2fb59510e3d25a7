#![cfg(feature = "parallel")]

use gc_decode::batch::decode_all;
use gc_decode::simulate::{simulate_gc, uniform_sequence};
use gc_decode::{Decoder, Model, ObservedSequence, Strategy};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn simulated_batch(count: usize, len: usize) -> Vec<ObservedSequence> {
    (0..count as u64)
        .map(|seed| simulate_gc(0.02, len, seed).unwrap().observed)
        .collect()
}

#[test]
fn batch_matches_sequential_for_every_strategy() {
    let model = Model::gc_content(0.02).unwrap();
    let seqs = simulated_batch(24, 400);
    for strategy in Strategy::ALL {
        let parallel = decode_all(&strategy, &model, &seqs);
        assert_eq!(parallel.len(), seqs.len());
        for (obs, res) in seqs.iter().zip(parallel) {
            assert_eq!(res.unwrap(), strategy.decode(obs, &model).unwrap(), "{strategy}");
        }
    }
}

#[test]
fn errors_stay_in_their_slot() {
    let model = Model::gc_content(0.1).unwrap();
    let mut seqs = simulated_batch(8, 200);
    let mut rng = StdRng::seed_from_u64(9);
    seqs.push(uniform_sequence(&mut rng, 5_000).unwrap());
    let decoder = Strategy::Dijkstra.decoder(Some(1_000));
    let results = decode_all(decoder.as_ref(), &model, &seqs);
    assert!(results[..8].iter().all(Result::is_ok));
    assert!(results[8].is_err());
}

proptest! {
    #[test]
    fn batch_order_is_input_order(seqs in prop::collection::vec("[ACGT]{1,30}", 1..12)) {
        let model = Model::gc_content(0.05).unwrap();
        let seqs: Vec<_> = seqs
            .iter()
            .map(|s| ObservedSequence::from_bytes(s.as_bytes()).unwrap())
            .collect();
        let results = decode_all(&Strategy::Viterbi, &model, &seqs);
        for (obs, res) in seqs.iter().zip(&results) {
            let d = res.as_ref().unwrap();
            prop_assert_eq!(d.path().len(), obs.len());
        }
    }
}
