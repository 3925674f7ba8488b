/// Composer autoload support.
///
/// This module reads the PSR-4 section of a project's `composer.json` and
/// uses it in two directions: resolving a fully-qualified class name to the
/// file that declares it, and listing the source directories the annotator
/// walks when no explicit paths are given.
///
/// # PSR-4 Resolution
///
/// Given a mapping like `"App\\" => "src/"`, a class name like
/// `App\Models\User` is resolved by:
///   1. Stripping the matching prefix (`App\`) from the class name
///   2. Converting remaining namespace separators to directory separators
///   3. Appending `.php`
///   4. Prepending the mapped base directory
///
/// Result: `<workspace>/src/Models/User.php`
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// A single PSR-4 namespace-to-directory mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psr4Mapping {
    /// The namespace prefix, ending with `\` unless it is the empty
    /// fallback prefix (e.g. `"App\"`).
    pub prefix: String,
    /// The base directory relative to the workspace root, using `/` and
    /// ending with `/` (e.g. `"src/"`).
    pub base_path: String,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    autoload: Autoload,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: Autoload,
}

#[derive(Debug, Default, Deserialize)]
struct Autoload {
    #[serde(default, rename = "psr-4")]
    psr4: BTreeMap<String, Psr4Paths>,
}

/// A PSR-4 value is either one directory or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Psr4Paths {
    One(String),
    Many(Vec<String>),
}

impl Psr4Paths {
    fn into_vec(self) -> Vec<String> {
        match self {
            Psr4Paths::One(path) => vec![path],
            Psr4Paths::Many(paths) => paths,
        }
    }
}

/// Parse `composer.json` at the workspace root and extract the PSR-4
/// mappings from both `autoload` and `autoload-dev`.
///
/// Returns an empty `Vec` when the file is missing, unreadable, not valid
/// JSON, or has no PSR-4 section.  Mappings are sorted longest prefix
/// first.
pub fn parse_composer_json(workspace_root: &Path) -> Vec<Psr4Mapping> {
    let composer_path = workspace_root.join("composer.json");
    let Ok(content) = std::fs::read_to_string(&composer_path) else {
        return Vec::new();
    };

    let composer: ComposerJson = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %composer_path.display(), "ignoring invalid composer.json: {}", e);
            return Vec::new();
        }
    };

    let mut mappings: Vec<Psr4Mapping> = [composer.autoload, composer.autoload_dev]
        .into_iter()
        .flat_map(|section| section.psr4)
        .flat_map(|(prefix, paths)| {
            let prefix = normalise_prefix(&prefix);
            paths.into_vec().into_iter().map(move |path| Psr4Mapping {
                prefix: prefix.clone(),
                base_path: normalise_path(&path),
            })
        })
        .collect();

    mappings.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    mappings
}

/// Ensure a non-empty prefix ends with `\`.
fn normalise_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('\\') {
        prefix.to_string()
    } else {
        format!("{}\\", prefix)
    }
}

/// Normalise a directory path: forward slashes, trailing `/`.
pub fn normalise_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    if p.ends_with('/') || p.is_empty() {
        p
    } else {
        format!("{}/", p)
    }
}

/// Resolve a namespace-qualified class name to an existing file.
///
/// A leading `\` on `class_name` is ignored.  Mappings are tried in order
/// (longest prefix first); the first candidate path that exists wins.
pub fn resolve_class_path(
    mappings: &[Psr4Mapping],
    workspace_root: &Path,
    class_name: &str,
) -> Option<PathBuf> {
    let name = class_name.strip_prefix('\\').unwrap_or(class_name);

    mappings.iter().find_map(|mapping| {
        let relative = name.strip_prefix(mapping.prefix.as_str())?;
        if relative.is_empty() {
            return None;
        }
        let file_path = workspace_root
            .join(&mapping.base_path)
            .join(format!("{}.php", relative.replace('\\', "/")));
        file_path.is_file().then_some(file_path)
    })
}

/// The distinct existing source directories named by `mappings`, in
/// mapping order.
pub fn source_directories(mappings: &[Psr4Mapping], workspace_root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for mapping in mappings {
        let dir = workspace_root.join(&mapping.base_path);
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}
