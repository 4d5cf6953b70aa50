//! File enumeration integration tests.

mod common;

use std::{fs, path::PathBuf};

use stridecut::{ExtensionSet, StrideError, enumerate_files};

use common::write_png;

fn relative_paths(root: &std::path::Path, extensions: &ExtensionSet) -> Vec<PathBuf> {
    enumerate_files(root, extensions)
        .expect("enumerate")
        .into_iter()
        .map(|entry| entry.relative_path)
        .collect()
}

#[test]
fn matches_extensions_case_insensitively() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_png(&dir.path().join("a.png"), 4, 4);
    write_png(&dir.path().join("sub/b.PNG"), 4, 4);
    fs::write(dir.path().join("c.txt"), b"not an image").unwrap();

    let found = relative_paths(dir.path(), &ExtensionSet::images());
    assert_eq!(
        found,
        vec![PathBuf::from("a.png"), PathBuf::from("sub").join("b.PNG")]
    );
}

#[test]
fn entry_path_joins_root() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("nested/deeper/x.jpg"), 2, 2);

    let entries = enumerate_files(dir.path(), &ExtensionSet::images()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, dir.path().join(&entries[0].relative_path));
    assert!(entries[0].path.is_file());
}

#[test]
fn order_is_sorted_and_stable() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["m.png", "b/z.png", "a.png", "b/a.png", "z.gif", "B.bmp"] {
        fs::create_dir_all(dir.path().join(name).parent().unwrap()).unwrap();
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    let first = relative_paths(dir.path(), &ExtensionSet::images());
    let second = relative_paths(dir.path(), &ExtensionSet::images());
    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort_by_key(|path| path.to_string_lossy().into_owned());
    assert_eq!(first, sorted);
    assert_eq!(first.len(), 6);
}

#[test]
fn files_without_extension_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("png"), b"x").unwrap();
    fs::write(dir.path().join(".png"), b"x").unwrap();

    assert!(relative_paths(dir.path(), &ExtensionSet::images()).is_empty());
}

#[test]
fn custom_extension_set() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("clip.MP4"), b"x").unwrap();
    fs::write(dir.path().join("photo.webp"), b"x").unwrap();

    let videos = relative_paths(dir.path(), &ExtensionSet::videos());
    assert_eq!(videos, vec![PathBuf::from("clip.MP4")]);

    let webp = relative_paths(dir.path(), &ExtensionSet::new([".WEBP"]));
    assert_eq!(webp, vec![PathBuf::from("photo.webp")]);
}

#[test]
fn empty_directory_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(relative_paths(dir.path(), &ExtensionSet::images()).is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    match enumerate_files(&missing, &ExtensionSet::images()) {
        Err(StrideError::DirectoryNotFound { path }) => assert_eq!(path, missing),
        other => panic!("Expected DirectoryNotFound, got: {other:?}"),
    }
}

#[test]
fn file_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.png");
    fs::write(&file, b"x").unwrap();

    assert!(matches!(
        enumerate_files(&file, &ExtensionSet::images()),
        Err(StrideError::NotADirectory { .. })
    ));
}

#[test]
fn extension_set_normalizes_entries() {
    let set = ExtensionSet::new([".JPG", "png", " Tif ", ""]);
    assert_eq!(set.len(), 3);
    assert!(set.contains("jpg"));
    assert!(set.contains(".PNG"));
    assert!(set.contains("tif"));
    assert_eq!(set.to_string(), ".jpg .png .tif");
}

#[cfg(unix)]
#[test]
fn file_symlinks_are_listed_directory_symlinks_are_not_descended() {
    use std::os::unix::fs::symlink;

    let elsewhere = tempfile::tempdir().unwrap();
    write_png(&elsewhere.path().join("real.png"), 4, 4);
    write_png(&elsewhere.path().join("folder/inner.png"), 4, 4);

    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 4, 4);
    symlink(elsewhere.path().join("real.png"), dir.path().join("b.png")).unwrap();
    symlink(elsewhere.path().join("folder"), dir.path().join("linked")).unwrap();
    symlink(elsewhere.path().join("gone.png"), dir.path().join("dangling.png")).unwrap();

    let found = relative_paths(dir.path(), &ExtensionSet::images());
    assert_eq!(found, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
}
