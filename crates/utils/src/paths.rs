//! Path and glob utilities shared by the built-in plugins

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use stepwise_core::{Error, Result};
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// A file matched by a pattern list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Path relative to the base directory, always `/`-separated
    pub relative: String,
    /// Path on disk
    pub path: PathBuf,
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Whether a pattern contains glob syntax
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Expand an ordered pattern list against `base`.
///
/// Patterns are applied in order: a plain pattern appends its matches
/// (sorted by full relative path, first occurrence wins) and a
/// `!`-prefixed pattern removes everything matched so far. Patterns
/// without glob syntax name a single file and are kept only if it exists.
pub fn expand_patterns<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Vec<MatchedFile>> {
    let mut matched: Vec<MatchedFile> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if let Some(negated) = pattern.strip_prefix('!') {
            let matcher = compile(negated)?;
            matched.retain(|file| {
                let keep = !matcher.is_match(&file.relative);
                if !keep {
                    seen.remove(&file.relative);
                }
                keep
            });
            continue;
        }

        for file in expand_one(base, pattern)? {
            if seen.insert(file.relative.clone()) {
                matched.push(file);
            }
        }
    }

    Ok(matched)
}

fn expand_one(base: &Path, pattern: &str) -> Result<Vec<MatchedFile>> {
    let pattern = normalize(pattern);
    if !is_glob(&pattern) {
        let path = base.join(&pattern);
        return Ok(if path.is_file() {
            vec![MatchedFile {
                relative: pattern,
                path,
            }]
        } else {
            Vec::new()
        });
    }

    let (prefix, rest) = split_literal_prefix(&pattern);
    let root = base.join(&prefix);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let matcher = compile(&rest)?;
    let mut found = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            Error::file_system(path, "walk", e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        let relative = to_slash(relative);
        if matcher.is_match(&relative) {
            let relative = if prefix.is_empty() {
                relative
            } else {
                format!("{prefix}/{relative}")
            };
            found.push(MatchedFile {
                relative,
                path: entry.path().to_path_buf(),
            });
        }
    }

    // Whole-path order: `src/a.js` before `src/a/x.js`
    found.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(found)
}

/// Split `pattern` into its leading literal directories and the glob part
fn split_literal_prefix(pattern: &str) -> (String, String) {
    let parts: Vec<&str> = pattern.split('/').collect();
    let literal = parts
        .iter()
        .take(parts.len().saturating_sub(1))
        .take_while(|part| !is_glob(part))
        .count();

    (parts[..literal].join("/"), parts[literal..].join("/"))
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let glob: Glob = GlobBuilder::new(&normalize(pattern))
        .literal_separator(true)
        .build()
        .map_err(|e| Error::pattern(pattern, e))?;
    Ok(glob.compile_matcher())
}

/// Drop `.` components and leading `./` so patterns compare against
/// walk output. A leading `/` is kept.
fn normalize(pattern: &str) -> String {
    let joined = pattern
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/");
    if pattern.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Compile a single glob pattern with `/`-aware wildcards
pub fn matcher(pattern: &str) -> Result<GlobMatcher> {
    compile(pattern)
}

/// Include/exclude filter over `/`-separated relative paths.
///
/// A path matches when some plain pattern matches it and no `!` pattern
/// does.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let (builder, glob) = match pattern.strip_prefix('!') {
                Some(negated) => (&mut exclude, negated),
                None => (&mut include, pattern),
            };
            let glob = GlobBuilder::new(&normalize(glob))
                .literal_separator(true)
                .build()
                .map_err(|e| Error::pattern(pattern, e))?;
            builder.add(glob);
        }

        Ok(Self {
            include: include.build()?,
            exclude: exclude.build()?,
        })
    }

    pub fn is_match(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

/// Resolve `.` and `..` components without touching the file system
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_parent = matches!(
                    normalized.components().next_back(),
                    Some(Component::ParentDir)
                );
                if at_parent || !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Render a relative path with `/` separators
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip the first `count` components from a `/`-separated path
pub fn strip_components(relative: &str, count: usize) -> String {
    relative
        .split('/')
        .skip(count)
        .collect::<Vec<_>>()
        .join("/")
}

/// Create the parent directory of `path` if needed
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::file_system(parent, "create directory", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    fn relatives(files: &[MatchedFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative.as_str()).collect()
    }

    #[test]
    fn test_recursive_glob_with_exclusion() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/axiom/b.js");
        touch(dir.path(), "lib/axiom/a.js");
        touch(dir.path(), "lib/axiom/a.test.js");
        touch(dir.path(), "lib/axiom/nested/c.js");

        let files = expand_patterns(dir.path(), &["lib/axiom/**/*.js", "!lib/axiom/**/*.test.js"])
            .unwrap();

        assert_eq!(
            relatives(&files),
            vec!["lib/axiom/a.js", "lib/axiom/b.js", "lib/axiom/nested/c.js"]
        );
    }

    #[test]
    fn test_pattern_order_is_preserved_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "loader/amd.js");
        touch(dir.path(), "src/x.js");

        let files = expand_patterns(dir.path(), &["loader/amd.js", "**/*.js"]).unwrap();

        assert_eq!(relatives(&files), vec!["loader/amd.js", "src/x.js"]);
    }

    #[test]
    fn test_dot_slash_globs_share_identity_with_plain_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/a.js");
        touch(dir.path(), "lib/b.test.js");

        let files = expand_patterns(dir.path(), &["./lib/*.js", "!lib/*.test.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["lib/a.js"]);

        let files = expand_patterns(dir.path(), &["lib/a.js", "./lib/*.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["lib/a.js", "lib/b.test.js"]);

        let files = expand_patterns(dir.path(), &["./lib/./a.js", "lib/*.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["lib/a.js", "lib/b.test.js"]);
    }

    #[test]
    fn test_matches_sort_by_whole_path() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/a/x.js");
        touch(dir.path(), "src/a.js");
        touch(dir.path(), "src/b.js");

        let files = expand_patterns(dir.path(), &["src/**/*.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["src/a.js", "src/a/x.js", "src/b.js"]);
    }

    #[test]
    fn test_excluded_file_can_be_added_back() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/a.js");
        touch(dir.path(), "lib/b.js");

        let files = expand_patterns(dir.path(), &["lib/*.js", "!lib/a.js", "lib/a.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["lib/b.js", "lib/a.js"]);
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "js/a.js");
        touch(dir.path(), "js/boot/startup.js");

        let files = expand_patterns(dir.path(), &["js/*.js"]).unwrap();
        assert_eq!(relatives(&files), vec!["js/a.js"]);
    }

    #[test]
    fn test_missing_literal_and_directory_yield_nothing() {
        let dir = TempDir::new().unwrap();
        let files = expand_patterns(dir.path(), &["nope.js", "missing/**/*.js"]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.js");
        let err = expand_patterns(dir.path(), &["[a.js"]).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_split_literal_prefix() {
        assert_eq!(
            split_literal_prefix("tmp/amd/lib/**/*.js"),
            ("tmp/amd/lib".to_string(), "**/*.js".to_string())
        );
        assert_eq!(
            split_literal_prefix("*.css"),
            (String::new(), "*.css".to_string())
        );
    }

    #[test]
    fn test_pattern_filter() {
        let filter = PatternFilter::new(&["lib/**/*.js", "test/**/*.js", "!**/*.gen.js"]).unwrap();
        assert!(filter.is_match("lib/wash/exe/cat.js"));
        assert!(filter.is_match("test/a.js"));
        assert!(!filter.is_match("lib/a.gen.js"));
        assert!(!filter.is_match("tmp/a.js"));
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/p/lib/../tmp/./x")),
            PathBuf::from("/p/tmp/x")
        );
        assert_eq!(lexical_normalize(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn test_strip_components() {
        assert_eq!(strip_components("wash/exe/cat.js", 2), "cat.js");
        assert_eq!(strip_components("a.js", 3), "");
    }
}
