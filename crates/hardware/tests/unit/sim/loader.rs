use std::io::Write;

use pretty_assertions::assert_eq;
use rvooo_core::common::{LoadError, SimError};
use rvooo_core::config::Config;
use rvooo_core::sim::loader::{load_program, parse_program};
use rvooo_core::Simulator;
use tempfile::NamedTempFile;

fn hex_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write program");
    file
}

#[test]
fn test_load_and_run_program_file() {
    let file = hex_file(
        "# Simple Add\n\
         00500093 // addi x1, x0, 5\n\
         0x00300113\n\
         \n\
         002081b3\n",
    );
    let words = load_program(file.path()).unwrap();
    assert_eq!(words, vec![0x00500093, 0x00300113, 0x002081b3]);

    let mut sim = Simulator::new(&Config::default(), &words).unwrap();
    let _ = sim.run().unwrap();
    assert_eq!(sim.reg(3), 8);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.hex");
    match load_program(&path) {
        Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_word_wider_than_32_bits_is_rejected() {
    assert!(matches!(
        parse_program("1_0000_0000\n"),
        Err(LoadError::BadWord { line: 1, .. })
    ));
}

#[test]
fn test_empty_program_finishes_immediately() {
    let words = parse_program("# nothing here\n\n").unwrap();
    assert!(words.is_empty());
    let mut sim = Simulator::new(&Config::default(), &words).unwrap();
    assert!(sim.is_finished());
    let _ = sim.run().unwrap();
    assert_eq!(sim.stats.cycles, 0);
}

#[test]
fn test_unsupported_word_fails_at_load() {
    let words = parse_program("00500093\n00012083\n").unwrap();
    assert!(matches!(
        Simulator::new(&Config::default(), &words),
        Err(SimError::Decode { pc: 4, .. })
    ));
}
