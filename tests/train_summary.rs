use clap::Parser;
use tictac::cli::commands::train::{TrainArgs, execute};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "tictac-train",
        "--games",
        "5",
        "--opponent",
        "random",
        "--summary",
        summary_stem.to_str().unwrap(),
        "--eval-games",
        "0",
        "--seed",
        "3",
        "--no-progress",
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 5);
    assert_eq!(parsed["evaluation"]["total_games"], 0);
    assert_eq!(parsed["opponent_strategy"], "random");
    assert_eq!(parsed["opponent_seed"], 4);
    assert_eq!(parsed["learner"]["seed"], 3);
    assert_eq!(parsed["learner"]["update_rule"], "temporal-difference");
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "tictac-train",
        "--games",
        "3",
        "--opponent",
        "blocker",
        "--summary",
        &summary_arg,
        "--eval-games",
        "2",
        "--no-progress",
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 3);
    assert_eq!(parsed["evaluation"]["total_games"], 2);
    assert_eq!(parsed["opponent_strategy"], "winner-blocker");
}

#[test]
fn records_and_observations_are_written() {
    let tmp = tempdir().unwrap();
    let records = tmp.path().join("logs").join("games.csv");
    let observations = tmp.path().join("games.jsonl");

    let args = parse_args([
        "tictac-train",
        "-g",
        "7",
        "--eval-games",
        "0",
        "--player",
        "o",
        "--update-rule",
        "monte-carlo",
        "--symmetry",
        "reflections",
        "--records",
        records.to_str().unwrap(),
        "--observations",
        observations.to_str().unwrap(),
        "--seed",
        "11",
        "--no-progress",
    ]);

    execute(args).expect("training with logs should succeed");

    let mut reader = csv::Reader::from_path(&records).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["game", "outcome", "played_first"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|row| ["w", "d", "l"].contains(&&row[1])));

    let lines = std::fs::read_to_string(&observations).unwrap();
    assert_eq!(lines.lines().count(), 7);
}

#[test]
fn invalid_epsilon_is_rejected() {
    let args = parse_args(["tictac-train", "-g", "1", "--epsilon", "1.5", "--no-progress"]);
    let err = execute(args).unwrap_err();
    assert!(err.to_string().contains("epsilon"));
}
