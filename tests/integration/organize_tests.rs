use super::fixtures::{list_files, write};
use filemop::actions::{CollisionPolicy, Recorder};
use filemop::journal::{Action, MemorySink};
use filemop::organizer::Organizer;
use filemop::scanner::{Walker, WalkerConfig};
use tempfile::tempdir;

#[test]
fn test_extensions_are_lowercased() {
    let dir = tempdir().unwrap();
    write(dir.path(), "IMG_001.JPG", b"jpeg-ish");
    write(dir.path(), "Report.Txt", b"words");

    let (files, _) = Walker::new(dir.path(), WalkerConfig::default()).collect_files();
    let organizer = Organizer::new(dir.path(), CollisionPolicy::Skip);
    let mut sink = MemorySink::new();
    let mut recorder = Recorder::new(&mut sink);
    let moved = organizer.organize(&files, &mut recorder, None);

    assert_eq!(moved, 2);
    assert!(recorder.errors().is_empty());
    assert_eq!(list_files(dir.path()), vec!["jpg/IMG_001.JPG", "txt/Report.Txt"]);
    assert!(sink.entries().iter().all(|e| e.action() == Action::Moved));
}

#[test]
fn test_nested_files_move_to_root_folder() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/b/c/deep.md", b"# title");

    let (files, _) = Walker::new(dir.path(), WalkerConfig::default()).collect_files();
    let organizer = Organizer::new(dir.path(), CollisionPolicy::Skip);
    let mut sink = MemorySink::new();
    let mut recorder = Recorder::new(&mut sink);
    organizer.organize(&files, &mut recorder, None);

    assert_eq!(list_files(dir.path()), vec!["md/deep.md"]);
    // Emptied folders stay behind
    assert!(dir.path().join("a/b/c").is_dir());
}

#[test]
fn test_hidden_files_skipped_when_configured() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".env.local", b"KEY=1");
    write(dir.path(), "visible.toml", b"a = 1");

    let (files, _) = Walker::new(dir.path(), WalkerConfig::new(false, true)).collect_files();
    let organizer = Organizer::new(dir.path(), CollisionPolicy::Skip);
    let mut sink = MemorySink::new();
    let mut recorder = Recorder::new(&mut sink);
    organizer.organize(&files, &mut recorder, None);

    assert_eq!(list_files(dir.path()), vec![".env.local", "toml/visible.toml"]);
}

#[test]
fn test_rename_picks_next_free_suffix() {
    let dir = tempdir().unwrap();
    write(dir.path(), "txt/note.txt", b"1");
    write(dir.path(), "txt/note (1).txt", b"2");
    write(dir.path(), "inbox/note.txt", b"3");

    let (files, _) = Walker::new(dir.path(), WalkerConfig::default()).collect_files();
    let organizer = Organizer::new(dir.path(), CollisionPolicy::Rename);
    let mut sink = MemorySink::new();
    let mut recorder = Recorder::new(&mut sink);
    organizer.organize(&files, &mut recorder, None);

    assert_eq!(
        list_files(dir.path()),
        vec!["txt/note (1).txt", "txt/note (2).txt", "txt/note.txt"]
    );
}
