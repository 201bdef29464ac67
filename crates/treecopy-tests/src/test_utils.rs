//! Tree builders and comparison helpers for tests and benchmarks

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test data generation patterns
#[derive(Debug, Clone, Copy)]
pub enum TestDataPattern {
    /// All zeros
    Zeros,
    /// Deterministic pseudo-random bytes
    Random,
    /// Realistic file pattern similar to actual files
    Realistic,
}

/// Generate test data with specified pattern
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Random => {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};

            // Deterministic so benchmark runs are comparable
            let mut data = Vec::with_capacity(size);
            let mut hasher = DefaultHasher::new();

            for i in 0..size {
                i.hash(&mut hasher);
                data.push((hasher.finish() % 256) as u8);
            }
            data
        }
        TestDataPattern::Realistic => (0..size).map(|i| ((i * 7 + 13) % 256) as u8).collect(),
    }
}

/// One entry of a snapshotted tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// A directory
    Directory,
    /// A file and its full content
    File(Vec<u8>),
}

/// Create `dirs` (recursively) and `files` with their content under `root`.
///
/// Paths use `/` separators and are relative to `root`.
pub fn create_tree(root: &Path, dirs: &[&str], files: &[(&str, &[u8])]) -> io::Result<()> {
    fs::create_dir_all(root)?;
    for dir in dirs {
        fs::create_dir_all(root.join(dir))?;
    }
    for (file, content) in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

/// The standard fixture: `src/a.txt` = "hello", `src/sub/b.txt` = "world",
/// plus an empty `dst/`. Returns `(source, destination_parent)`.
pub fn create_sample_tree(temp_dir: &TempDir) -> io::Result<(PathBuf, PathBuf)> {
    let source = temp_dir.path().join("src");
    let destination = temp_dir.path().join("dst");
    create_tree(
        &source,
        &[],
        &[("a.txt", b"hello"), ("sub/b.txt", b"world")],
    )?;
    fs::create_dir(&destination)?;
    Ok((source, destination))
}

/// Build a tree `depth` levels deep with `breadth` subdirectories per level
/// and `files_per_dir` files of `file_size` bytes in every directory.
///
/// Returns the number of files written.
pub fn create_wide_tree(
    root: &Path,
    depth: usize,
    breadth: usize,
    files_per_dir: usize,
    file_size: usize,
) -> io::Result<usize> {
    let data = generate_test_data(file_size, TestDataPattern::Realistic);
    let mut written = 0;
    let mut level = vec![root.to_path_buf()];
    fs::create_dir_all(root)?;

    for current_depth in 0..=depth {
        let mut next = Vec::new();
        for dir in &level {
            for i in 0..files_per_dir {
                fs::write(dir.join(format!("file_{}.dat", i)), &data)?;
                written += 1;
            }
            if current_depth < depth {
                for i in 0..breadth {
                    let child = dir.join(format!("dir_{}", i));
                    fs::create_dir(&child)?;
                    next.push(child);
                }
            }
        }
        level = next;
    }

    Ok(written)
}

/// Every entry under `root`, keyed by its `/`-separated relative path
pub fn snapshot_tree(root: &Path) -> io::Result<BTreeMap<String, TreeEntry>> {
    let mut entries = BTreeMap::new();
    let mut pending = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, prefix)) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{}/{}", prefix, name)
            };

            if entry.path().is_dir() {
                entries.insert(relative.clone(), TreeEntry::Directory);
                pending.push((entry.path(), relative));
            } else {
                entries.insert(relative, TreeEntry::File(fs::read(entry.path())?));
            }
        }
    }

    Ok(entries)
}

/// Panic unless both trees have the same directories, file names and bytes
pub fn assert_trees_equal(expected: &Path, actual: &Path) {
    let expected_tree = snapshot_tree(expected).expect("Failed to read expected tree");
    let actual_tree = snapshot_tree(actual).expect("Failed to read actual tree");
    assert_eq!(
        expected_tree,
        actual_tree,
        "tree at {} differs from {}",
        actual.display(),
        expected.display()
    );
}

/// Names of the immediate entries of `dir`, sorted
pub fn list_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_test_data_patterns() {
        let size = 1024;

        let zeros = generate_test_data(size, TestDataPattern::Zeros);
        assert_eq!(zeros.len(), size);
        assert!(zeros.iter().all(|&b| b == 0));

        let random = generate_test_data(size, TestDataPattern::Random);
        assert_eq!(random, generate_test_data(size, TestDataPattern::Random));

        let realistic = generate_test_data(size, TestDataPattern::Realistic);
        assert_eq!(realistic.len(), size);
    }

    #[test]
    fn test_snapshot_sees_nested_entries() {
        let temp_dir = TempDir::new().unwrap();
        let (source, _) = create_sample_tree(&temp_dir).unwrap();

        let tree = snapshot_tree(&source).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree["sub"], TreeEntry::Directory);
        assert_eq!(tree["sub/b.txt"], TreeEntry::File(b"world".to_vec()));
    }

    #[test]
    fn test_create_wide_tree_counts_files() {
        let temp_dir = TempDir::new().unwrap();
        let written = create_wide_tree(&temp_dir.path().join("wide"), 2, 2, 3, 16).unwrap();
        // 1 + 2 + 4 directories, 3 files each
        assert_eq!(written, 21);
    }
}
