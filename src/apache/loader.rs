// Configuration loader - Resolve an Apache configuration and all its includes

use crate::apache::directives::{Directive, resolve_path};
use crate::error::AuditError;
use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Every configuration file reached from the root, keyed by path as written
///
/// A path appears once no matter how many `Include` directives name it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    files: BTreeMap<PathBuf, String>,
}

impl ConfigSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Iterate `(path, content)` pairs, ordered by path
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    fn insert(&mut self, path: PathBuf, content: String) {
        self.files.insert(path, content);
    }
}

/// Load `root` plus every file it transitively includes
///
/// Breadth-first over the include graph. Each path is read at most once, so
/// circular includes terminate. Missing or unreadable includes are logged and
/// skipped; only an unreadable root is an error.
pub fn resolve(root: &Path, install_root: &Path) -> Result<ConfigSet, AuditError> {
    let root_content = read_config(root).map_err(|source| AuditError::RootConfigUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut config_set = ConfigSet::default();
    let mut pending: VecDeque<PathBuf> = VecDeque::new();

    enqueue_includes(&root_content, install_root, &mut pending);
    config_set.insert(root.to_path_buf(), root_content);

    while let Some(path) = pending.pop_front() {
        if config_set.contains(&path) {
            debug!("Already loaded {}, skipping", path.display());
            continue;
        }

        if !path.exists() {
            warn!("Skipping {} as it does not exist in the filesystem", path.display());
            continue;
        }

        let content = match read_config(&path) {
            Ok(content) => content,
            Err(source) => {
                let err = AuditError::FileSystemError {
                    path: path.clone(),
                    source,
                };
                warn!("Skipping included file: {}", err);
                continue;
            }
        };

        enqueue_includes(&content, install_root, &mut pending);
        debug!("Loaded configuration file {}", path.display());
        config_set.insert(path, content);
    }

    Ok(config_set)
}

/// Read a configuration file; bytes that are not UTF-8 are replaced, never rejected
fn read_config(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn enqueue_includes(content: &str, install_root: &Path, pending: &mut VecDeque<PathBuf>) {
    for value in Directive::Include.find_all(content) {
        pending.push_back(resolve_path(value, install_root));
    }
}
