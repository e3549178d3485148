use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Collapse `.` / `..` lexically while ensuring the path never escapes the sandbox root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path attempted to escape sandbox via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not allowed in sandbox".into()),
                });
            },
        }
    }

    Ok(out)
}

/// Safely joins a path to the root and ensures it doesn't escape the sandbox.
///
/// Existing targets are canonicalized and verified; targets that do not exist
/// yet are verified through their first existing ancestor, which guards
/// against symlinked parents pointing outside the root.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();

    if path.is_absolute() {
        return Err(StorageError::PathTraversalAttempt {
            message: format!("Absolute paths are not allowed in sandbox {}", path.display()).into(),
            context: None,
        });
    }

    let joined = root.join(normalize_relative(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(StorageError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Path attempted to escape sandbox via .. sequences".into()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => verify_ancestors(root, &joined),
        Err(e) => Err(StorageError::Io { source: e, context: None }),
    }
}

/// Validates a path that doesn't exist yet by finding and verifying its first
/// existing ancestor on disk.
fn verify_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    let mut current = Some(joined);

    while let Some(path) = current {
        if path == root {
            return Ok(joined.to_path_buf());
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
                Ok(canonical) => Err(StorageError::PathTraversalAttempt {
                    message: canonical.display().to_string().into(),
                    context: Some("Existing parent directory is a symlink outside sandbox".into()),
                }),
                Err(e) => Err(StorageError::Io {
                    source: e,
                    context: Some("Failed to verify parent directory".into()),
                }),
            };
        }

        current = path.parent();
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("No valid parent directory found within sandbox".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_paths() {
        let err = resolve_path(Path::new("/srv/static"), "/etc/passwd").unwrap_err();
        assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
    }

    #[test]
    fn rejects_escaping_parent_segments() {
        let err = resolve_path(Path::new("/srv/static"), "../outside.txt").unwrap_err();
        assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
    }

    #[test]
    fn allows_balanced_parent_segments() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().canonicalize().expect("canonical root");
        let resolved = resolve_path(&root, "uploads/../uploads/photo.jpg").expect("resolvable");
        assert!(resolved.starts_with(&root));
        assert!(resolved.ends_with("uploads/photo.jpg"));
    }
}
