//! End-to-end pipeline tests over temporary review files.
//!
//! These exercise the whole run: TSV ingestion, cleaning, vectorization,
//! selection, training, blending, and submission output.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use sentir::pipeline::{self, PipelineConfig};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).expect("create fixture");
    file.write_all(content.as_bytes()).expect("write fixture");
    path
}

fn fixture_config(dir: &TempDir) -> PipelineConfig {
    let train = write_file(
        dir,
        "labeled.tsv",
        concat!(
            "id\tsentiment\treview\n",
            "p1\t1\tGreat movie, wonderful acting!\n",
            "p2\t1\tWonderful and great fun.\n",
            "p3\t1\tAmazing film, great acting.\n",
            "p4\t1\tWonderful amazing fun movie.\n",
            "n1\t0\tAwful movie, boring acting.\n",
            "n2\t0\tBoring and terrible film.\n",
            "n3\t0\tTerrible awful plot.\n",
            "n4\t0\tAwful boring terrible mess.\n",
        ),
    );
    let unlabeled = write_file(
        dir,
        "unlabeled.tsv",
        concat!(
            "id\treview\n",
            "u1\tGreat wonderful stuff.\n",
            "u2\tTerrible boring stuff.\n",
            "u3\tAmazing fun film.\n",
            "u4\tAwful terrible mess.\n",
        ),
    );
    let test = write_file(
        dir,
        "test.tsv",
        concat!(
            "id\treview\n",
            "t1\tGreat wonderful acting!\n",
            "t2\tAwful boring mess.\n",
            "t3\tAmazing great fun!\n",
            "t4\tTerrible boring film.\n",
        ),
    );

    PipelineConfig {
        train,
        unlabeled,
        test,
        output: dir.path().join("submission.csv"),
    }
}

#[test]
fn test_full_pipeline_writes_ordered_submission() {
    let dir = TempDir::new().expect("temp dir");
    let config = fixture_config(&dir);

    pipeline::run(&config).expect("pipeline should complete");

    let content = std::fs::read_to_string(&config.output).expect("submission exists");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "id,sentiment");
    assert_eq!(lines.len(), 5, "header plus one row per test review");

    let mut scores = Vec::new();
    for (line, expected_id) in lines[1..].iter().zip(["t1", "t2", "t3", "t4"]) {
        let (id, score) = line.split_once(',').expect("two fields");
        assert_eq!(id, expected_id, "ids keep test-set order");
        let score: f32 = score.parse().expect("numeric score");
        assert!(
            (0.0..=1.2).contains(&score),
            "blended score in [0, 1.2], got {score}"
        );
        scores.push(score);
    }

    // Positive-language reviews outscore negative-language ones.
    assert!(scores[0] > scores[1]);
    assert!(scores[2] > scores[3]);
}

#[test]
fn test_pipeline_is_deterministic() {
    let dir = TempDir::new().expect("temp dir");
    let config = fixture_config(&dir);

    pipeline::run(&config).expect("pipeline should complete");
    let first = std::fs::read_to_string(&config.output).expect("submission exists");

    pipeline::run(&config).expect("pipeline should complete");
    let second = std::fs::read_to_string(&config.output).expect("submission exists");

    assert_eq!(first, second);
}

#[test]
fn test_pipeline_fails_on_missing_input() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = fixture_config(&dir);
    config.test = dir.path().join("nope.tsv");

    let err = pipeline::run(&config).expect_err("missing test file");
    assert!(err.to_string().contains("nope.tsv"));
}

#[test]
fn test_pipeline_fails_on_unlabeled_train_file() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = fixture_config(&dir);
    // Point the labeled slot at a file with no sentiment column.
    config.train = config.unlabeled.clone();

    let err = pipeline::run(&config).expect_err("sentiment column required");
    assert!(err.to_string().contains("sentiment"));
}
