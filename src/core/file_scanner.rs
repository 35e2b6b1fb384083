use std::{
    fs,
    path::{self, Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Paths skipped during enumeration.
///
/// Literal entries exclude the path itself and everything beneath it. A
/// relative literal is resolved against the source root unless it already
/// starts with the root (`templates/vendor` when scanning `templates`). An
/// absolute literal inside the root is rewritten to the form the walker
/// yields, so it applies whether the root is relative or absolute.
/// Entries containing `*` or `?` are glob patterns matched against both the
/// walked path and its absolute form. A single entry may hold several
/// comma-separated paths.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    root: PathBuf,
    absolute_root: PathBuf,
    literal_paths: Vec<PathBuf>,
    glob_patterns: Vec<Pattern>,
}

impl ExclusionSet {
    pub fn new(root: &Path, entries: &[String], verbose: bool) -> Self {
        let absolute_root = path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let mut set = Self {
            root: root.to_path_buf(),
            absolute_root,
            ..Self::default()
        };

        for entry in entries
            .iter()
            .flat_map(|e| e.split(','))
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            if is_glob_pattern(entry) {
                match Pattern::new(entry) {
                    Ok(pattern) => set.glob_patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid exclude pattern '{}': {}",
                                "warning:".bold().yellow(),
                                entry,
                                e
                            );
                        }
                    }
                }
                continue;
            }

            let path = Path::new(entry);
            if path.is_absolute() {
                let walked = set.walked_form(path);
                set.literal_paths.push(walked);
            } else if path.starts_with(root) {
                set.literal_paths.push(path.to_path_buf());
            } else {
                set.literal_paths.push(root.join(path));
            }
        }

        set
    }

    /// Map an absolute path under the root onto the path the walker yields.
    /// Paths outside the root are kept as given.
    fn walked_form(&self, path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix(&self.absolute_root) {
            return self.root.join(rest);
        }
        // Symlinked prefixes, e.g. a temp directory reached through a link.
        if let (Ok(real_path), Ok(real_root)) =
            (fs::canonicalize(path), fs::canonicalize(&self.root))
            && let Ok(rest) = real_path.strip_prefix(&real_root)
        {
            return self.root.join(rest);
        }
        path.to_path_buf()
    }

    pub fn is_empty(&self) -> bool {
        self.literal_paths.is_empty() && self.glob_patterns.is_empty()
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self
            .literal_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }

        if self.glob_patterns.is_empty() {
            return false;
        }
        let path_str = path.to_string_lossy();
        if self.glob_patterns.iter().any(|p| p.matches(&path_str)) {
            return true;
        }
        match path.strip_prefix(&self.root) {
            Ok(rest) if path.is_relative() => {
                let absolute = self.absolute_root.join(rest);
                let absolute_str = absolute.to_string_lossy();
                self.glob_patterns.iter().any(|p| p.matches(&absolute_str))
            }
            _ => false,
        }
    }
}

/// Result of scanning files.
pub struct ScanResult {
    /// Regular files in lexical path order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Recursively list every regular file under `root`.
///
/// Excluded directories are pruned without descending into them. Symlinks are
/// followed; a link pointing back at one of its ancestors is reported as a
/// skipped path instead of being walked again.
pub fn scan_files(root: &Path, exclusions: &ExclusionSet, verbose: bool) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !exclusions.is_excluded(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}
