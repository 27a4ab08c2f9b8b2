#![cfg(all(unix, feature = "git"))]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use git2::Repository;
use scanscope_scan::{BuildConfig, BuildError, IncludePaths, IncludePathsBuilder};
use tempfile::TempDir;

fn chmod(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

fn make_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::write(&path, contents).unwrap();
    chmod(&path, 0o644);

    let mut dir = parent.to_path_buf();
    while dir != root {
        chmod(&dir, 0o755);
        dir.pop();
    }
}

fn repository() -> TempDir {
    let temp = TempDir::new().unwrap();
    chmod(temp.path(), 0o755);
    Repository::init(temp.path()).unwrap();
    temp
}

fn build(root: &Path, excludes: &[&str]) -> Result<IncludePaths, BuildError> {
    let config = BuildConfig::builder()
        .root(root)
        .exclude_patterns(excludes.iter().map(|p| p.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap();
    IncludePathsBuilder::detect(config)?.build()
}

fn with_siblings(temp: &TempDir) {
    make_file(temp.path(), "trackable.rb", "");
    make_file(temp.path(), "subdir/subdir_trackable.rb", "");
}

fn assert_siblings_kept(paths: &IncludePaths) {
    for sibling in ["subdir/", "trackable.rb"] {
        assert!(paths.contains(sibling), "missing {sibling} in {paths:?}");
    }
}

#[test]
fn test_tracked_or_trackable_tree_is_root() {
    let temp = repository();
    make_file(temp.path(), "root_file.rb", "");
    make_file(temp.path(), "subdir/subdir_file.rb", "");

    let paths = build(temp.path(), &[]).unwrap();
    assert_eq!(paths.to_strings(), vec!["./"]);
}

#[test]
fn test_gitignored_file_is_excluded() {
    let temp = repository();
    make_file(temp.path(), "untrackable.rb", "");
    make_file(temp.path(), ".gitignore", "untrackable.rb\n");
    with_siblings(&temp);

    let paths = build(temp.path(), &[]).unwrap();
    assert!(!paths.contains("untrackable.rb"));
    assert!(!paths.is_whole_tree());
    assert!(paths.contains(".gitignore"));
    assert_siblings_kept(&paths);
}

#[test]
fn test_gitignored_directory_is_excluded() {
    let temp = repository();
    make_file(temp.path(), "ignored/secret.rb", "");
    make_file(temp.path(), ".gitignore", "ignored\n");
    with_siblings(&temp);

    let paths = build(temp.path(), &[]).unwrap();
    assert!(!paths.contains("ignored/secret.rb"));
    assert!(!paths.contains("ignored/"));
    assert_siblings_kept(&paths);
}

#[test]
fn test_unreadable_directory_in_gitignore() {
    let temp = repository();
    make_file(temp.path(), "unreadable_subdir/secret.rb", "");
    make_file(temp.path(), ".gitignore", "unreadable_subdir\n");
    with_siblings(&temp);
    chmod(&temp.path().join("unreadable_subdir"), 0o700);

    let paths = build(temp.path(), &[]).unwrap();
    assert!(!paths.contains("unreadable_subdir/"));
    assert!(!paths.contains("unreadable_subdir/secret.rb"));
    assert_siblings_kept(&paths);
}

#[test]
fn test_unreadable_directory_in_excludes() {
    let temp = repository();
    make_file(temp.path(), "unreadable_subdir/secret.rb", "");
    with_siblings(&temp);
    chmod(&temp.path().join("unreadable_subdir"), 0o700);

    let paths = build(temp.path(), &["unreadable_subdir/*"]).unwrap();
    assert!(!paths.contains("unreadable_subdir/"));
    assert!(!paths.contains("unreadable_subdir/secret.rb"));
    assert_siblings_kept(&paths);
}

#[test]
fn test_unreadable_directory_not_excluded_raises() {
    let temp = repository();
    make_file(temp.path(), "unreadable_subdir/secret.rb", "");
    with_siblings(&temp);
    chmod(&temp.path().join("unreadable_subdir"), 0o700);

    let err = build(temp.path(), &[]).unwrap_err();
    assert!(err.is_unreadable());
    assert_eq!(err.unreadable_path().unwrap().as_str(), "unreadable_subdir");
}

#[test]
fn test_unreadable_file_in_gitignore() {
    let temp = repository();
    make_file(temp.path(), "unreadable.rb", "");
    make_file(temp.path(), ".gitignore", "unreadable.rb\n");
    with_siblings(&temp);
    chmod(&temp.path().join("unreadable.rb"), 0o600);

    let paths = build(temp.path(), &[]).unwrap();
    assert!(!paths.contains("./"));
    assert!(!paths.contains("unreadable.rb"));
    assert_siblings_kept(&paths);
}

#[test]
fn test_unreadable_file_not_excluded_raises() {
    let temp = repository();
    make_file(temp.path(), "subdir/unreadable.rb", "");
    with_siblings(&temp);
    chmod(&temp.path().join("subdir/unreadable.rb"), 0o600);

    let err = build(temp.path(), &[]).unwrap_err();
    match err {
        BuildError::UnreadableFile { path } => assert_eq!(path.as_str(), "subdir/unreadable.rb"),
        other => panic!("expected UnreadableFile, got {other}"),
    }
}

#[test]
fn test_use_vcs_false_ignores_gitignore() {
    let temp = repository();
    make_file(temp.path(), "untrackable.rb", "");
    make_file(temp.path(), ".gitignore", "untrackable.rb\n");
    with_siblings(&temp);

    let config = BuildConfig::builder()
        .root(temp.path())
        .use_vcs(false)
        .build()
        .unwrap();
    let paths = IncludePathsBuilder::detect(config).unwrap().build().unwrap();
    assert!(paths.is_whole_tree());
}
