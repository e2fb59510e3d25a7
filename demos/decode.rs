//! Example: decode a short sequence with every strategy.
//!
//! Run with:
//! `cargo run --example decode`

use gc_decode::{extract_intervals, Decoder, Model, ObservedSequence, Strategy};

fn main() {
    // An AT-rich flank, a GC-rich core, and another AT-rich flank.
    let obs = ObservedSequence::from_bytes(b"ATTATAAGCGCCGGCGCATATTA").unwrap();
    let model = Model::gc_content(0.1).unwrap();

    for strategy in Strategy::ALL {
        let decoding = strategy.decode(&obs, &model).unwrap();
        let labels: String = decoding.path().iter().map(|s| s.as_char()).collect();
        println!("{:<22} {labels}  logp={:.4}", strategy.name(), decoding.log_prob());
        for iv in extract_intervals(decoding.path()) {
            println!("{:<22} rich {iv}", "");
        }
    }
}
