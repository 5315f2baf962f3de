use std::{
    fs,
    path::{Path, PathBuf},
};

use spotgrab::management::{LibraryManager, ResultFileManager, move_file};
use spotgrab::tools::{DownloadError, Downloader, Encoder};
use spotgrab::types::{OutputFormat, ResolvedEntry};
use tempfile::TempDir;

const DESTINATION: &str = "15-Oct-2026";

// Helper function to create a file including its parent folders
fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().to_string()
}

struct Fixture {
    _temp_dir: TempDir,
    work_dir: PathBuf,
    destination: PathBuf,
    tools_dir: PathBuf,
}

// Lays out a working directory the way the downloader leaves it behind
fn fixture() -> Fixture {
    let temp_dir = tempfile::tempdir().unwrap();
    let work_dir = temp_dir.path().join("work");
    let destination = temp_dir.path().join("music").join(DESTINATION);
    let tools_dir = temp_dir.path().join("tools");
    fs::create_dir_all(&tools_dir).unwrap();

    write_file(&work_dir.join("Queen/A Night at the Opera/01 Bohemian Rhapsody.m4a"), "m4a-data");
    write_file(&work_dir.join("Queen/A Night at the Opera/cover.png"), "png");
    write_file(&work_dir.join("node_modules/some-pkg/sample.m4a"), "fixture");
    write_file(&work_dir.join("src/cli.js"), "code");
    write_file(&work_dir.join("media/logo.png"), "png");
    write_file(&work_dir.join("cli.js"), "code");

    Fixture {
        _temp_dir: temp_dir,
        work_dir,
        destination,
        tools_dir,
    }
}

#[tokio::test]
async fn test_result_file_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("spotify-urls.txt");
    let entries = vec![
        ResolvedEntry::Found {
            url: "https://open.spotify.com/track/a".to_string(),
        },
        ResolvedEntry::NotFound {
            query: "Some Song".to_string(),
        },
        ResolvedEntry::Found {
            url: "https://open.spotify.com/track/b".to_string(),
        },
    ];

    ResultFileManager::new(path.clone(), entries.clone())
        .persist()
        .await
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(!content.ends_with('\n'));

    let loaded = ResultFileManager::load(path).await.unwrap();
    assert_eq!(loaded.entries(), &entries);
    assert_eq!(loaded.found_count(), 2);
}

#[tokio::test]
async fn test_result_file_without_entries() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested/spotify-urls.txt");

    ResultFileManager::new(path.clone(), Vec::new())
        .persist()
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    let loaded = ResultFileManager::load(path).await.unwrap();
    assert!(loaded.entries().is_empty());
}

#[tokio::test]
async fn test_result_file_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = ResultFileManager::load(temp_dir.path().join("missing.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_prepare_destination_is_idempotent() {
    let f = fixture();
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.destination.clone(),
        OutputFormat::M4a,
        Encoder::new("unused".to_string()),
    );

    library.prepare_destination().await.unwrap();
    write_file(&f.destination.join("existing.m4a"), "keep");
    library.prepare_destination().await.unwrap();

    assert!(f.destination.is_dir());
    assert!(f.destination.join("existing.m4a").is_file());
}

#[tokio::test]
async fn test_scan_skips_dependency_cache_and_destination() {
    let f = fixture();
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.work_dir.join(DESTINATION),
        OutputFormat::M4a,
        Encoder::new("unused".to_string()),
    );
    write_file(&f.work_dir.join(DESTINATION).join("old.m4a"), "old");

    let files = library.scan();

    assert_eq!(
        files,
        vec![f.work_dir.join("Queen/A Night at the Opera/01 Bohemian Rhapsody.m4a")]
    );
}

#[tokio::test]
async fn test_organize_moves_files_as_m4a() {
    let f = fixture();
    // The encoder must not be touched for m4a output
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.destination.clone(),
        OutputFormat::M4a,
        Encoder::new("/nonexistent/encoder".to_string()),
    );
    library.prepare_destination().await.unwrap();

    let report = library.organize().await;

    assert_eq!(report.moved, 1);
    assert_eq!(report.converted, 0);
    assert_eq!(
        fs::read_to_string(f.destination.join("01 Bohemian Rhapsody.m4a")).unwrap(),
        "m4a-data"
    );
    assert_eq!(report.removed_dirs, vec![f.work_dir.join("Queen")]);
    assert!(!f.work_dir.join("Queen").exists());
}

#[tokio::test]
async fn test_cleanup_keeps_allow_listed_folders() {
    let f = fixture();
    let destination = f.work_dir.join(DESTINATION);
    fs::create_dir_all(f.work_dir.join(".git")).unwrap();
    fs::create_dir_all(f.work_dir.join(".github")).unwrap();
    fs::create_dir_all(f.work_dir.join("test")).unwrap();
    fs::create_dir_all(f.work_dir.join("Another Artist/Album")).unwrap();
    fs::create_dir_all(&destination).unwrap();

    let library = LibraryManager::new(
        f.work_dir.clone(),
        destination.clone(),
        OutputFormat::M4a,
        Encoder::new("unused".to_string()),
    );

    let mut removed = library.cleanup().await;
    removed.sort();

    assert_eq!(
        removed,
        vec![f.work_dir.join("Another Artist"), f.work_dir.join("Queen")]
    );
    for kept in ["node_modules", ".git", ".github", "src", "test", "media", DESTINATION] {
        assert!(f.work_dir.join(kept).is_dir(), "{} was removed", kept);
    }
    // Plain files at the top level are left alone
    assert!(f.work_dir.join("cli.js").is_file());
}

#[tokio::test]
async fn test_cleanup_keeps_folder_holding_nested_destination() {
    let f = fixture();
    let destination = f.work_dir.join("Music").join(DESTINATION);
    let library = LibraryManager::new(
        f.work_dir.clone(),
        destination.clone(),
        OutputFormat::M4a,
        Encoder::new("unused".to_string()),
    );
    library.prepare_destination().await.unwrap();

    let report = library.organize().await;

    assert_eq!(report.moved, 1);
    assert_eq!(report.removed_dirs, vec![f.work_dir.join("Queen")]);
    assert_eq!(
        fs::read_to_string(destination.join("01 Bohemian Rhapsody.m4a")).unwrap(),
        "m4a-data"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_organize_converts_to_mp3() {
    let f = fixture();
    let encoder = write_script(
        &f.tools_dir,
        "fake-ffmpeg",
        "for last; do :; done\nprintf 'mp3-data' > \"$last\"",
    );
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.destination.clone(),
        OutputFormat::Mp3,
        Encoder::new(encoder),
    );
    library.prepare_destination().await.unwrap();
    // Top-level files survive cleanup, so this one is only gone if the
    // conversion removed it
    write_file(&f.work_dir.join("loose.m4a"), "m4a-data");

    let report = library.organize().await;

    assert_eq!(report.converted, 2);
    assert_eq!(report.moved, 0);
    assert_eq!(
        fs::read_to_string(f.destination.join("01 Bohemian Rhapsody.mp3")).unwrap(),
        "mp3-data"
    );
    assert!(f.destination.join("loose.mp3").is_file());
    assert!(!f.work_dir.join("loose.m4a").exists());
    assert!(!f.destination.join("loose.m4a").exists());
    assert!(!f.destination.join("01 Bohemian Rhapsody.m4a").exists());
    assert!(!f.work_dir.join("Queen").exists());
    // Files in the dependency cache are never converted
    assert!(f.work_dir.join("node_modules/some-pkg/sample.m4a").is_file());
}

#[cfg(unix)]
#[tokio::test]
async fn test_organize_falls_back_to_move_when_conversion_fails() {
    let f = fixture();
    let encoder = write_script(&f.tools_dir, "broken-ffmpeg", "echo 'codec error' >&2\nexit 1");
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.destination.clone(),
        OutputFormat::Mp3,
        Encoder::new(encoder),
    );
    library.prepare_destination().await.unwrap();

    let report = library.organize().await;

    assert_eq!(report.converted, 0);
    assert_eq!(report.moved, 1);
    assert_eq!(
        fs::read_to_string(f.destination.join("01 Bohemian Rhapsody.m4a")).unwrap(),
        "m4a-data"
    );
    assert!(!f.destination.join("01 Bohemian Rhapsody.mp3").exists());
}

#[tokio::test]
async fn test_organize_falls_back_when_encoder_is_missing() {
    let f = fixture();
    let library = LibraryManager::new(
        f.work_dir.clone(),
        f.destination.clone(),
        OutputFormat::Mp3,
        Encoder::new("/nonexistent/encoder".to_string()),
    );
    library.prepare_destination().await.unwrap();

    let report = library.organize().await;

    assert_eq!(report.converted, 0);
    assert_eq!(report.moved, 1);
    assert!(f.destination.join("01 Bohemian Rhapsody.m4a").is_file());
}

#[tokio::test]
async fn test_move_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let from = temp_dir.path().join("a/song.m4a");
    let to = temp_dir.path().join("b/song.m4a");
    write_file(&from, "data");
    fs::create_dir_all(to.parent().unwrap()).unwrap();

    move_file(&from, &to).await.unwrap();

    assert!(!from.exists());
    assert_eq!(fs::read_to_string(&to).unwrap(), "data");
}

#[cfg(unix)]
#[tokio::test]
async fn test_downloader_receives_result_file_and_work_dir() {
    let f = fixture();
    let downloader = write_script(&f.tools_dir, "fake-freyr", "echo \"$@\" > \"$5/args.txt\"");
    let result_file = f.tools_dir.join("spotify-urls.txt");
    fs::write(&result_file, "https://open.spotify.com/track/abc").unwrap();

    Downloader::new(downloader)
        .download(&result_file, &f.work_dir)
        .await
        .unwrap();

    let args = fs::read_to_string(f.work_dir.join("args.txt")).unwrap();
    assert_eq!(
        args.trim(),
        format!("get -i {} -d {}", result_file.display(), f.work_dir.display())
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_downloader_failure_is_reported() {
    let f = fixture();
    let downloader = write_script(&f.tools_dir, "failing-freyr", "exit 3");

    let err = Downloader::new(downloader)
        .download(Path::new("spotify-urls.txt"), &f.work_dir)
        .await
        .unwrap_err();

    match err {
        DownloadError::Incomplete(status) => assert_eq!(status.code(), Some(3)),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_downloader_missing_program() {
    let f = fixture();

    let err = Downloader::new("/nonexistent/freyr".to_string())
        .download(Path::new("spotify-urls.txt"), &f.work_dir)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Spawn(_)));
}
