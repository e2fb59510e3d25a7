use gc_decode::io::{
    read_hidden_path, read_sequence, write_fasta, write_hidden_path, write_intervals_file,
};
use gc_decode::simulate::simulate_gc;
use gc_decode::{extract_intervals, Decoder, IoError, Model, Strategy};
use std::env;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("gc_decode_it_{}_{name}", std::process::id()))
}

#[test]
fn simulate_write_read_decode() {
    let fasta = temp_path("pipeline.fa");
    let hidden = temp_path("pipeline.hidden");
    let out = temp_path("pipeline.intervals");

    let sim = simulate_gc(0.01, 2_000, 5).unwrap();
    write_fasta(&fasta, "sim", &sim.observed).unwrap();
    write_hidden_path(&hidden, &sim.hidden).unwrap();

    let obs = read_sequence(&fasta).unwrap();
    assert_eq!(obs, sim.observed);
    assert_eq!(read_hidden_path(&hidden).unwrap(), sim.hidden);

    let model = Model::gc_content(0.01).unwrap();
    let decoding = Strategy::Viterbi.decode(&obs, &model).unwrap();
    let intervals = extract_intervals(decoding.path());
    write_intervals_file(&out, &intervals).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), intervals.len());
    for (line, iv) in text.lines().zip(&intervals) {
        assert_eq!(line, format!("{},{}", iv.start, iv.end));
    }

    for p in [fasta, hidden, out] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn empty_interval_list_writes_empty_file() {
    let out = temp_path("empty.intervals");
    write_intervals_file(&out, &[]).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
    let _ = fs::remove_file(out);
}

#[test]
fn bad_hidden_symbol_is_reported() {
    let path = temp_path("bad.hidden");
    fs::write(&path, "hhlx\n").unwrap();
    assert!(matches!(
        read_hidden_path(&path),
        Err(IoError::InvalidHiddenState {
            position: 3,
            symbol: 'x'
        })
    ));
    let _ = fs::remove_file(path);
}

#[test]
fn header_only_fasta_has_no_sequence() {
    let path = temp_path("header_only.fa");
    fs::write(&path, ">nothing here\n").unwrap();
    assert!(read_sequence(&path).is_err());
    let _ = fs::remove_file(path);
}
