use super::fixtures::{list_files, write};
use filemop::config::Config;
use filemop::journal::{read_log, CsvSink, MemorySink, Tee};
use filemop::pipeline::Orchestrator;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_csv_log_records_every_action() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "a.txt", b"same");
    write(&root, "b.txt", b"same");
    write(&root, "z.txt", b"");
    let log_path = dir.path().join("log.csv");

    let sink = CsvSink::open(&log_path).unwrap();
    let mut orchestrator = Orchestrator::new(Config::default(), sink);
    let result = orchestrator.run(&root).unwrap();
    assert_eq!(result.counts.total(), 3);

    let text = fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        text.lines().next().unwrap(),
        "Timestamp,Action,File Type,File Name"
    );

    let rows = read_log(&log_path).unwrap();
    let summary: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.action.as_str(), r.category.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("Deleted", "Duplicate"), ("Deleted", "Empty"), ("Moved", "txt")]
    );
    assert!(rows[0].path.ends_with("b.txt"));
    assert!(rows[2].path.ends_with("a.txt"));
}

#[test]
fn test_log_inside_root_is_left_alone() {
    let dir = tempdir().unwrap();
    write(dir.path(), "data.json", b"{}");
    let log_path = dir.path().join("actions.csv");

    let sink = Tee::new(Some(CsvSink::open(&log_path).unwrap()), MemorySink::new());
    let mut orchestrator = Orchestrator::new(Config::default(), sink);
    orchestrator.run(dir.path()).unwrap();
    orchestrator.run(dir.path()).unwrap();

    assert_eq!(list_files(dir.path()), vec!["actions.csv", "json/data.json"]);
    assert_eq!(orchestrator.sink().second.len(), 1);

    let rows = read_log(&log_path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "json");
}

#[test]
fn test_log_appends_across_runs() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("log.csv");

    for name in ["one.md", "two.rs"] {
        let root = dir.path().join(name.replace('.', "_"));
        write(&root, name, b"content");
        let sink = CsvSink::open(&log_path).unwrap();
        Orchestrator::new(Config::default(), sink).run(&root).unwrap();
    }

    let text = fs::read_to_string(&log_path).unwrap();
    assert_eq!(text.matches("Timestamp,Action").count(), 1);
    let rows = read_log(&log_path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].category, "rs");
}
