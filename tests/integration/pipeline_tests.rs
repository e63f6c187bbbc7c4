use super::fixtures::{
    cjk_pdf, list_files, minimal_pdf, small_image, small_png, write, IMAGE_FORMATS,
};
use filemop::config::Config;
use filemop::error::{CleanError, ExitCode};
use filemop::journal::{Action, Category};
use filemop::pipeline::{Orchestrator, Stage};
use filemop::journal::MemorySink;
use filemop::progress::ProgressCallback;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert!(actions.is_empty());
    assert_eq!(result.counts.total(), 0);
    assert_eq!(result.exit_code(), ExitCode::Success);
}

#[test]
fn test_first_occurrence_wins() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"hello");
    write(dir.path(), "sub/b.txt", b"hello");

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert_eq!(result.counts.duplicates_deleted, 1);
    assert_eq!(actions[0].action(), Action::Deleted);
    assert_eq!(actions[0].category(), &Category::Duplicate);
    assert_eq!(actions[0].path(), result.root.join("sub/b.txt"));
    assert_eq!(list_files(dir.path()), vec!["txt/a.txt"]);
    assert_eq!(fs::read(dir.path().join("txt/a.txt")).unwrap(), b"hello");
}

#[test]
fn test_duplicate_sets_keep_one_copy_each() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x1.dat", b"alpha");
    write(dir.path(), "x2.dat", b"alpha");
    write(dir.path(), "deep/x3.dat", b"alpha");
    write(dir.path(), "y1.log", b"beta");
    write(dir.path(), "deep/y2.log", b"beta");

    let (result, _) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert_eq!(result.counts.duplicates_deleted, 3);
    assert_eq!(list_files(dir.path()), vec!["dat/x1.dat", "log/y1.log"]);
}

#[test]
fn test_no_empty_files_remain() {
    let dir = tempdir().unwrap();
    write(dir.path(), "e1", b"");
    write(dir.path(), "e2", b"");
    write(dir.path(), "sub/e3", b"");

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    // The duplicate pass sees three identical empty files first
    assert_eq!(result.counts.duplicates_deleted, 2);
    assert_eq!(result.counts.empty_deleted, 1);
    assert_eq!(actions.len(), 3);
    let last = actions.last().unwrap();
    assert_eq!(last.category(), &Category::Empty);
    assert_eq!(last.path(), result.root.join("e1"));
    assert!(list_files(dir.path()).is_empty());
    // Directories are not removed
    assert!(dir.path().join("sub").is_dir());
}

#[test]
fn test_corrupted_files_are_deleted() {
    let dir = tempdir().unwrap();
    write(dir.path(), "good.pdf", &minimal_pdf());
    write(dir.path(), "bad.pdf", b"%PDF-1.");
    write(dir.path(), "photo.png", &small_png());
    write(dir.path(), "broken.png", b"not an image at all");
    write(dir.path(), "notes.txt", b"plain text");
    write(dir.path(), "latin1.txt", &[0x63, 0x61, 0x66, 0xe9]);

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert_eq!(result.counts.corrupted_deleted, 3);
    let corrupted: Vec<_> = actions
        .iter()
        .filter(|a| a.category() == &Category::Corrupted)
        .map(|a| a.path().file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(corrupted, vec!["bad.pdf", "broken.png", "latin1.txt"]);
    assert_eq!(
        list_files(dir.path()),
        vec!["pdf/good.pdf", "png/photo.png", "txt/notes.txt"]
    );
}

#[test]
fn test_pdf_with_cjk_font_is_kept() {
    let dir = tempdir().unwrap();
    write(dir.path(), "japanese.pdf", &cjk_pdf());

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert_eq!(result.counts.corrupted_deleted, 0);
    assert!(actions.iter().all(|a| a.category() != &Category::Corrupted));
    assert_eq!(list_files(dir.path()), vec!["pdf/japanese.pdf"]);
}

#[test]
fn test_every_image_format_is_checked() {
    // One root per extension: jpg and jpeg encode to identical bytes
    for (ext, format) in IMAGE_FORMATS {
        let dir = tempdir().unwrap();
        let bytes = small_image(format);
        write(dir.path(), &format!("whole.{ext}"), &bytes);
        write(dir.path(), &format!("cut.{ext}"), &bytes[..10]);

        let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

        assert_eq!(result.counts.corrupted_deleted, 1, "{ext}");
        assert_eq!(actions[0].path(), result.root.join(format!("cut.{ext}")));
        assert_eq!(list_files(dir.path()), vec![format!("{ext}/whole.{ext}")]);
    }
}

#[test]
fn test_unknown_extension_is_organized_not_checked() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x.foo", &[0xff, 0xfe, 0x00]);
    write(dir.path(), "Makefile", b"all:");

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert_eq!(result.counts.corrupted_deleted, 0);
    assert_eq!(result.counts.moved, 1);
    assert_eq!(actions[0].category(), &Category::Extension("foo".to_string()));
    assert_eq!(list_files(dir.path()), vec!["Makefile", "foo/x.foo"]);
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"one");
    write(dir.path(), "b.txt", b"one");
    write(dir.path(), "c.md", b"two");
    write(dir.path(), "nested/d.csv", b"x,y");
    write(dir.path(), "empty.txt", b"");

    let config = Config::default();
    let (first, _) = filemop::run(dir.path(), &config).unwrap();
    assert!(first.counts.total() > 0);
    let after_first = list_files(dir.path());

    let (second, actions) = filemop::run(dir.path(), &config).unwrap();

    assert!(actions.is_empty());
    assert_eq!(second.counts.total(), 0);
    assert!(second.errors.is_empty());
    assert_eq!(list_files(dir.path()), after_first);
}

#[test]
fn test_missing_target_is_rejected() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = filemop::run(&missing, &Config::default()).unwrap_err();

    assert!(matches!(err, CleanError::NotFound(_)));
    assert_eq!(err.exit_code(), ExitCode::InvalidTarget);
    assert!(!missing.exists());
}

#[test]
fn test_file_target_is_untouched() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "single.txt", b"");

    let err = filemop::run(&file, &Config::default()).unwrap_err();

    assert!(matches!(err, CleanError::NotADirectory(_)));
    assert!(file.exists());
}

#[test]
fn test_collision_is_reported_and_skipped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "txt/a.txt", b"already sorted");
    write(dir.path(), "sub/a.txt", b"different content");

    let (result, actions) = filemop::run(dir.path(), &Config::default()).unwrap();

    assert!(actions.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.exit_code(), ExitCode::PartialSuccess);
    assert!(dir.path().join("sub/a.txt").exists());
    assert_eq!(
        fs::read(dir.path().join("txt/a.txt")).unwrap(),
        b"already sorted"
    );
}

#[test]
fn test_collision_rename_policy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "txt/a.txt", b"already sorted");
    write(dir.path(), "sub/a.txt", b"different content");

    let config = Config {
        collision: filemop::actions::CollisionPolicy::Rename,
        ..Config::default()
    };
    let (result, _) = filemop::run(dir.path(), &config).unwrap();

    assert_eq!(result.counts.moved, 1);
    assert!(result.errors.is_empty());
    assert_eq!(list_files(dir.path()), vec!["txt/a (1).txt", "txt/a.txt"]);
}

#[derive(Default)]
struct StageRecorder {
    events: Mutex<Vec<String>>,
}

impl ProgressCallback for StageRecorder {
    fn on_stage_start(&self, stage: Stage, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {stage} {total}"));
    }

    fn on_progress(&self, _current: usize, _path: &Path) {}

    fn on_stage_end(&self, stage: Stage) {
        self.events.lock().unwrap().push(format!("end {stage}"));
    }
}

#[test]
fn test_stages_run_in_order_on_fresh_walks() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"dup");
    write(dir.path(), "b.txt", b"dup");
    write(dir.path(), "c.txt", b"");

    let progress = Arc::new(StageRecorder::default());
    let mut orchestrator =
        Orchestrator::new(Config::default(), MemorySink::new()).with_progress(progress.clone());
    orchestrator.run(dir.path()).unwrap();

    let events = progress.events.lock().unwrap().clone();
    let labels: Vec<String> = Stage::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        events,
        vec![
            format!("start {} 3", labels[0]),
            format!("end {}", labels[0]),
            // b.txt is gone by the time the empty sweep walks
            format!("start {} 2", labels[1]),
            format!("end {}", labels[1]),
            // c.txt is gone by the time the integrity check walks
            format!("start {} 1", labels[2]),
            format!("end {}", labels[2]),
            format!("start {} 1", labels[3]),
            format!("end {}", labels[3]),
        ]
    );
}
