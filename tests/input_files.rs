//! Input files and settings on disk.

use banditsim::{run, BanditError, InputGenerator, Settings, SimulationInput};
use std::fs;

#[test]
fn input_file_drives_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "3\n25\n0.2\n").unwrap();

    let input = SimulationInput::from_file(&path).unwrap();
    let report = run(input.to_config(4)).unwrap();
    assert_eq!(report.true_means.len(), 3);
    assert!(report.traces.iter().all(|t| t.metrics.len() == 25));
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("INPUT.TXT");
    fs::write(&path, "2\n10\n0\n").unwrap();
    assert!(SimulationInput::from_file(&path).is_ok());
}

#[test]
fn non_txt_file_is_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.csv");
    let err = SimulationInput::from_file(&path).unwrap_err();
    assert!(matches!(err, BanditError::InputFormat(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SimulationInput::from_file(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, BanditError::Io(_)));
}

#[test]
fn structurally_valid_but_out_of_domain_input_fails_at_run() {
    let input = SimulationInput::parse("1\n100\n0.1\n").unwrap();
    assert!(matches!(
        run(input.to_config(0)),
        Err(BanditError::InvalidParameter { name: "arm_count", .. })
    ));
}

#[test]
fn generator_writes_numbered_files_that_parse() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("input");
    let paths = InputGenerator::new(4, 9).generate(&out).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["input1.txt", "input2.txt", "input3.txt", "input4.txt"]);
    for p in &paths {
        let input = SimulationInput::from_file(p).unwrap();
        assert!(input.to_config(0).validate().is_ok());
    }
}

#[test]
fn generator_is_deterministic_per_seed() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let pa = InputGenerator::new(3, 1).generate(a.path()).unwrap();
    let pb = InputGenerator::new(3, 1).generate(b.path()).unwrap();
    for (x, y) in pa.iter().zip(&pb) {
        assert_eq!(fs::read_to_string(x).unwrap(), fs::read_to_string(y).unwrap());
    }
}

#[test]
fn settings_file_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banditsim.toml");
    fs::write(
        &path,
        "[simulation]\narm_count = 6\nround_count = 300\nexploration_rate = 0.05\nseed = 11\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();
    let s = Settings::from_file(&path).unwrap();
    assert_eq!(s.simulation.arm_count, 6);
    assert_eq!(s.simulation.round_count, 300);
    assert_eq!(s.simulation.exploration_rate, 0.05);
    assert_eq!(s.simulation.seed, 11);
    assert_eq!(s.logging.level, "debug");

    let text = toml::to_string(&s).unwrap();
    assert_eq!(Settings::from_toml(&text).unwrap(), s);
}

#[test]
fn missing_settings_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, BanditError::Config(_)));
}
