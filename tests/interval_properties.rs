use gc_decode::intervals::{expand_intervals, extract_intervals};
use gc_decode::{Decoder, Model, ObservedSequence, State, Strategy as DecodeStrategy};
use proptest::prelude::*;

fn states(max_len: usize) -> impl Strategy<Value = Vec<State>> {
    prop::collection::vec(prop_oneof![Just(State::Rich), Just(State::Poor)], 0..max_len)
}

proptest! {
    #[test]
    fn expand_reproduces_path(path in states(200)) {
        let ivs = extract_intervals(&path);
        prop_assert_eq!(expand_intervals(&ivs, path.len()), path);
    }

    #[test]
    fn intervals_are_maximal_and_ordered(path in states(200)) {
        let ivs = extract_intervals(&path);
        for iv in &ivs {
            prop_assert!(iv.start >= 1 && iv.start <= iv.end && iv.end <= path.len());
            prop_assert!(path[iv.start - 1..iv.end].iter().all(|&s| s == State::Rich));
            if iv.start > 1 {
                prop_assert_eq!(path[iv.start - 2], State::Poor);
            }
            if iv.end < path.len() {
                prop_assert_eq!(path[iv.end], State::Poor);
            }
        }
        for w in ivs.windows(2) {
            prop_assert!(w[0].end + 1 < w[1].start);
        }
        let covered: usize = ivs.iter().map(|iv| iv.len()).sum();
        prop_assert_eq!(covered, path.iter().filter(|&&s| s == State::Rich).count());
    }

    #[test]
    fn decoded_paths_round_trip(seq in "[ACGT]{1,60}") {
        let model = Model::gc_content(0.1).unwrap();
        let obs = ObservedSequence::from_bytes(seq.as_bytes()).unwrap();
        for strategy in DecodeStrategy::ALL {
            let d = strategy.decode(&obs, &model).unwrap();
            let ivs = extract_intervals(d.path());
            prop_assert_eq!(expand_intervals(&ivs, obs.len()), d.path().to_vec());
        }
    }
}
