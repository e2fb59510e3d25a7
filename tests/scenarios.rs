use gc_decode::{extract_intervals, Model, ObservedSequence, State, Strategy};

fn intervals_for(strategy: Strategy, seq: &[u8], mu: f64) -> Vec<(usize, usize)> {
    let model = Model::gc_content(mu).unwrap();
    let obs = ObservedSequence::from_bytes(seq).unwrap();
    let decoding = gc_decode::Decoder::decode(&strategy, &obs, &model).unwrap();
    assert_eq!(decoding.path().len(), seq.len());
    extract_intervals(decoding.path())
        .into_iter()
        .map(Into::into)
        .collect()
}

#[test]
fn all_c_is_one_rich_interval() {
    for strategy in Strategy::ALL {
        assert_eq!(intervals_for(strategy, &[b'C'; 10], 0.01), vec![(1, 10)], "{strategy}");
    }
}

#[test]
fn all_a_has_no_intervals() {
    for strategy in Strategy::ALL {
        assert!(intervals_for(strategy, &[b'A'; 10], 0.01).is_empty(), "{strategy}");
    }
}

#[test]
fn flanked_gc_core_is_found() {
    // With frequent switching the four-base core is worth two switches.
    for strategy in Strategy::ALL {
        assert_eq!(intervals_for(strategy, b"AAAACCCCAAAA", 0.4), vec![(5, 8)], "{strategy}");
    }
}

#[test]
fn short_core_is_absorbed_when_switching_is_rare() {
    // Four C's gain ~2.9 nats; two switches at mu = 0.01 cost ~9.2.
    for strategy in Strategy::ALL {
        assert!(intervals_for(strategy, b"AAAACCCCAAAA", 0.01).is_empty(), "{strategy}");
    }
    let long_core = [&[b'A'; 8][..], &[b'C'; 16], &[b'A'; 8]].concat();
    for strategy in Strategy::ALL {
        assert_eq!(intervals_for(strategy, &long_core, 0.01), vec![(9, 24)], "{strategy}");
    }
}

#[test]
fn single_position_boundary() {
    for strategy in Strategy::ALL {
        for sym in [b'C', b'G'] {
            assert_eq!(intervals_for(strategy, &[sym], 0.01), vec![(1, 1)], "{strategy}");
        }
        for sym in [b'A', b'T'] {
            assert!(intervals_for(strategy, &[sym], 0.01).is_empty(), "{strategy}");
        }
    }
}

#[test]
fn decoded_score_matches_path_rescoring() {
    let model = Model::gc_content(0.1).unwrap();
    let obs = ObservedSequence::from_bytes(b"ATATGCGCGGCCATTA").unwrap();
    for strategy in Strategy::ALL {
        let d = gc_decode::Decoder::decode(&strategy, &obs, &model).unwrap();
        let rescored = model.path_log_probability(&obs, d.path()).unwrap();
        assert!((rescored - d.log_prob()).abs() < 1e-9, "{strategy}");
        assert!(d.path().iter().any(|&s| s == State::Rich));
    }
}
