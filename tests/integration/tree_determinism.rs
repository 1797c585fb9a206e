//! Integration tests for tree building determinism

use dirdigest::tree::builder::TreeBuilder;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn populate(root: &Path) {
    fs::write(root.join("file1.txt"), "content1").unwrap();
    fs::write(root.join("file2.txt"), "content2").unwrap();
    fs::create_dir(root.join("dir1")).unwrap();
    fs::write(root.join("dir1").join("file3.txt"), "content3").unwrap();
    fs::create_dir_all(root.join("dir1").join("nested").join("deeper")).unwrap();
    fs::write(
        root.join("dir1").join("nested").join("deeper").join("file4.txt"),
        "content4",
    )
    .unwrap();
}

/// Test that the same filesystem produces the same root digest
#[test]
fn test_same_filesystem_same_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    populate(&root);

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();
    let root2 = builder.compute_root().unwrap();

    assert_eq!(root1, root2);
}

/// Test that two separately created copies of a tree agree
#[test]
fn test_identical_trees_in_different_locations() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    populate(first.path());
    populate(second.path());

    let root1 = TreeBuilder::new(first.path()).compute_root().unwrap();
    let root2 = TreeBuilder::new(second.path()).compute_root().unwrap();

    assert_eq!(root1, root2);
}

/// Test that creation order does not influence the digest
#[test]
fn test_creation_order_irrelevant() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for name in ["a", "b", "c", "d"] {
        fs::write(first.path().join(name), name).unwrap();
    }
    for name in ["d", "c", "b", "a"] {
        fs::write(second.path().join(name), name).unwrap();
    }

    assert_eq!(
        TreeBuilder::new(first.path()).compute_root().unwrap(),
        TreeBuilder::new(second.path()).compute_root().unwrap()
    );
}

/// Test that file content changes produce different root digests
#[test]
fn test_file_content_change_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("test.txt"), "content1").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();

    fs::write(root.join("test.txt"), "content2").unwrap();

    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Test that a deep change alters only the nodes on its path to the root
#[test]
fn test_change_propagates_along_ancestors_only() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    populate(root);
    fs::create_dir(root.join("dir2")).unwrap();
    fs::write(root.join("dir2").join("other.txt"), "other").unwrap();

    let builder = TreeBuilder::new(root);
    let before = builder.build().unwrap();

    let deep = root.join("dir1").join("nested").join("deeper").join("file4.txt");
    fs::write(&deep, "changed").unwrap();
    let after = builder.build().unwrap();

    let changed = [
        root.to_path_buf(),
        root.join("dir1"),
        root.join("dir1").join("nested"),
        root.join("dir1").join("nested").join("deeper"),
        deep.clone(),
    ];
    for path in &changed {
        assert_ne!(
            before.find(path).unwrap().digest(),
            after.find(path).unwrap().digest(),
            "{} should change",
            path.display()
        );
    }

    let unchanged = [
        root.join("file1.txt"),
        root.join("file2.txt"),
        root.join("dir1").join("file3.txt"),
        root.join("dir2"),
        root.join("dir2").join("other.txt"),
    ];
    for path in &unchanged {
        assert_eq!(
            before.find(path).unwrap().digest(),
            after.find(path).unwrap().digest(),
            "{} should not change",
            path.display()
        );
    }
}

/// Test that file addition produces a different root digest
#[test]
fn test_file_addition_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();

    fs::write(root.join("file2.txt"), "content").unwrap();

    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Test that adding an empty directory changes the parent digest
#[test]
fn test_empty_directory_addition_different_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();

    fs::write(root.join("file1.txt"), "content").unwrap();

    let builder = TreeBuilder::new(root.clone());
    let root1 = builder.compute_root().unwrap();

    fs::create_dir(root.join("empty")).unwrap();

    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Test that modification times never affect digests
#[test]
fn test_mtime_does_not_affect_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    populate(root);

    let builder = TreeBuilder::new(root);
    let before = builder.build().unwrap();

    let old = FileTime::from_unix_time(1_000_000_000, 0);
    set_file_mtime(root.join("file1.txt"), old).unwrap();
    set_file_mtime(root.join("dir1"), old).unwrap();

    let after = builder.build().unwrap();

    assert_eq!(before.digest(), after.digest());
    assert_ne!(
        before.find(&root.join("file1.txt")).unwrap().mod_time(),
        after.find(&root.join("file1.txt")).unwrap().mod_time()
    );
}

/// Test that permission bits never affect digests
#[cfg(unix)]
#[test]
fn test_permissions_do_not_affect_digest() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let file = root.join("script.sh");
    fs::write(&file, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

    let builder = TreeBuilder::new(root);
    let before = builder.build().unwrap();

    fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
    let after = builder.build().unwrap();

    assert_eq!(before.digest(), after.digest());
    assert_ne!(
        before.find(&file).unwrap().mode(),
        after.find(&file).unwrap().mode()
    );
}

/// Test that renaming a file changes the root even with identical content
#[test]
fn test_rename_changes_order_sensitive_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "first").unwrap();
    fs::write(root.join("b.txt"), "second").unwrap();

    let builder = TreeBuilder::new(root);
    let root1 = builder.compute_root().unwrap();

    // Swapping names swaps the children's order in the aggregate
    fs::rename(root.join("a.txt"), root.join("c.txt")).unwrap();
    let root2 = builder.compute_root().unwrap();

    assert_ne!(root1, root2);
}

/// Test that parallel and sequential builds agree on every node
#[test]
fn test_parallel_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    populate(root);
    for i in 0..32 {
        fs::write(root.join(format!("bulk-{:02}.bin", i)), vec![i as u8; 1024 * i]).unwrap();
    }

    let sequential = TreeBuilder::new(root).with_parallelism(1).build().unwrap();
    let parallel = TreeBuilder::new(root).with_parallelism(4).build().unwrap();
    let all_cores = TreeBuilder::new(root).with_parallelism(0).build().unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, all_cores);
}
