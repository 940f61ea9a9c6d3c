//! Validates the end-to-end figure pipeline against the default readings

use clap::Parser;
use glucofit::io::cli::{Cli, FigureKind, FigureProcessor, load_samples};
use tempfile::tempdir;

#[test]
fn test_renders_all_figures() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("figures");

    let cli = Cli::parse_from([
        "glucofit",
        output.to_str().unwrap(),
        "--quiet",
        "--iterations",
        "50",
    ]);
    let mut processor = FigureProcessor::new(cli);
    processor.process().unwrap();

    for figure in FigureKind::ALL {
        let path = output.join(figure.file_name());
        assert!(path.exists(), "missing figure: {}", path.display());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_existing_outputs_are_skipped() {
    let dir = tempdir().unwrap();
    let output = dir.path();
    let target = output.join(FigureKind::FittedCurve.file_name());
    std::fs::write(&target, b"placeholder").unwrap();

    let cli = Cli::parse_from([
        "glucofit",
        output.to_str().unwrap(),
        "--quiet",
        "--figure",
        "fitted-curve",
    ]);
    let mut processor = FigureProcessor::new(cli);
    processor.process().unwrap();

    // Untouched: skip-existing is the default
    assert_eq!(std::fs::read(&target).unwrap(), b"placeholder");

    let cli = Cli::parse_from([
        "glucofit",
        output.to_str().unwrap(),
        "--quiet",
        "--no-skip",
        "--figure",
        "fitted-curve",
    ]);
    let mut processor = FigureProcessor::new(cli);
    processor.process().unwrap();

    assert_ne!(std::fs::read(&target).unwrap(), b"placeholder");
}

#[test]
fn test_samples_can_be_loaded_from_a_file() {
    let dir = tempdir().unwrap();
    let sample_file = dir.path().join("readings.txt");
    std::fs::write(&sample_file, "168 170\n171 169 173\n166\n").unwrap();

    let samples = load_samples(&sample_file).unwrap();
    assert_eq!(samples, vec![168.0, 170.0, 171.0, 169.0, 173.0, 166.0]);

    let output = dir.path().join("figures");
    let cli = Cli::parse_from([
        "glucofit",
        output.to_str().unwrap(),
        "--quiet",
        "--figure",
        "fitted-curve",
        "--samples",
        sample_file.to_str().unwrap(),
    ]);
    let mut processor = FigureProcessor::new(cli);
    processor.process().unwrap();

    assert!(output.join(FigureKind::FittedCurve.file_name()).exists());
}

#[test]
fn test_malformed_sample_files_are_rejected() {
    let dir = tempdir().unwrap();
    let sample_file = dir.path().join("readings.txt");
    std::fs::write(&sample_file, "168 170\n17x\n").unwrap();

    let err = load_samples(&sample_file).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("17x"));
    assert!(rendered.contains(":2"));
}

#[test]
fn test_visualize_exports_search_animation() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("figures");

    let cli = Cli::parse_from([
        "glucofit",
        output.to_str().unwrap(),
        "--quiet",
        "--visualize",
        "--iterations",
        "30",
        "--figure",
        "likelihood-search",
    ]);
    let mut processor = FigureProcessor::new(cli);
    processor.process().unwrap();

    assert!(output.join("likelihood_search.png").exists());
    assert!(output.join("likelihood_search.gif").exists());
}

#[test]
fn test_degenerate_sample_files_fail_cleanly() {
    let dir = tempdir().unwrap();
    let sample_file = dir.path().join("readings.txt");
    std::fs::write(&sample_file, "170 170 170\n").unwrap();

    let cli = Cli::parse_from([
        "glucofit",
        dir.path().join("figures").to_str().unwrap(),
        "--quiet",
        "--samples",
        sample_file.to_str().unwrap(),
    ]);
    let mut processor = FigureProcessor::new(cli);
    assert!(processor.process().is_err());
}
