//! Integration tests for base-name exclusion

use dirdigest::ignore::ExclusionSet;
use dirdigest::tree::builder::TreeBuilder;
use dirdigest::tree::build_tree;
use std::fs;
use tempfile::TempDir;

/// Test that default exclusions are skipped at every depth and leave no trace
#[test]
fn test_default_exclusions_at_depth() {
    let with_junk = TempDir::new().unwrap();
    let clean = TempDir::new().unwrap();

    for root in [with_junk.path(), clean.path()] {
        fs::create_dir_all(root.join("photos").join("2023")).unwrap();
        fs::write(root.join("photos").join("2023").join("img.jpg"), "jpeg").unwrap();
        fs::write(root.join("readme.md"), "# readme").unwrap();
    }

    let junk = with_junk.path();
    fs::write(junk.join(".DS_Store"), "finder").unwrap();
    fs::write(junk.join("photos").join("2023").join(".DS_Store"), "finder").unwrap();
    fs::create_dir(junk.join("photos").join("@eaDir")).unwrap();
    fs::write(junk.join("photos").join("@eaDir").join("thumb.jpg"), "thumb").unwrap();

    let dirty_tree = build_tree(junk).unwrap();
    let clean_tree = build_tree(clean.path()).unwrap();

    assert_eq!(dirty_tree.digest(), clean_tree.digest());
    assert_eq!(dirty_tree.size(), clean_tree.size());
    assert_eq!(dirty_tree.node_count(), clean_tree.node_count());
    assert!(dirty_tree.find(&junk.join(".DS_Store")).is_none());
    assert!(dirty_tree.find(&junk.join("photos").join("@eaDir")).is_none());
}

/// Test that custom glob patterns replace the defaults
#[test]
fn test_custom_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("keep.txt"), "keep").unwrap();
    fs::write(root.join("scratch.tmp"), "scratch").unwrap();
    fs::create_dir(root.join("cache")).unwrap();
    fs::write(root.join("cache").join("blob"), "blob").unwrap();
    fs::write(root.join(".DS_Store"), "finder").unwrap();

    let exclusions = ExclusionSet::new(["*.tmp", "cache"]).unwrap();
    let tree = TreeBuilder::new(root)
        .with_exclusions(exclusions)
        .build()
        .unwrap();

    let names: Vec<_> = tree.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec![".DS_Store", "keep.txt"]);
    assert_eq!(tree.size(), 10);
}

/// Test that an excluded root child never has its content read
#[cfg(unix)]
#[test]
fn test_excluded_entries_are_not_opened() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let locked = root.join("locked.tmp");
    fs::write(&locked, "secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    fs::write(root.join("open.txt"), "open").unwrap();

    let exclusions = ExclusionSet::new(["*.tmp"]).unwrap();
    let result = TreeBuilder::new(root).with_exclusions(exclusions).build();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    let tree = result.unwrap();
    assert_eq!(tree.children().len(), 1);
}

/// Test that an empty exclusion set keeps everything
#[test]
fn test_empty_exclusion_set_keeps_everything() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".DS_Store"), "finder").unwrap();

    let tree = TreeBuilder::new(root)
        .with_exclusions(ExclusionSet::empty())
        .build()
        .unwrap();

    assert_eq!(tree.children().len(), 1);
    assert_eq!(tree.size(), 6);
}
