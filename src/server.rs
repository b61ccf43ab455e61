//! Working-directory provisioning for embedded search-engine instances.
//!
//! An embedded engine needs a writable home directory seeded with a
//! configuration template. [`ServerHome`] provisions one per instance:
//! isolated from every other instance, populated by a recursive copy of the
//! template tree, and removed in full on [`close`](ServerHome::close) (or on
//! drop), including files the engine created after startup.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use uuid::Uuid;

use crate::error::Result;

/// An isolated, disposable working directory for one embedded engine
/// instance.
#[derive(Debug)]
pub struct ServerHome {
    id: Uuid,
    dir: TempDir,
}

impl ServerHome {
    /// Provision a fresh working directory seeded from a template tree.
    ///
    /// A missing or unreadable template root is fatal. A file inside the
    /// template that cannot be copied is skipped and logged; the rest of the
    /// tree is copied regardless.
    pub fn provision(template: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("sedge-home-").tempdir()?;
        copy_tree(template, dir.path())?;

        let id = Uuid::new_v4();
        tracing::debug!(%id, path = %dir.path().display(), "provisioned server home");

        Ok(ServerHome { id, dir })
    }

    /// The instance id, for diagnostics.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The root of the working directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the working directory and everything in it.
    ///
    /// Dropping a `ServerHome` removes the directory as well; `close`
    /// additionally reports removal errors.
    pub fn close(self) -> Result<()> {
        tracing::debug!(id = %self.id, "closing server home");
        self.dir.close()?;
        Ok(())
    }
}

fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(error) => {
                tracing::warn!(path = %from.display(), %error, "skipping unreadable entry");
                continue;
            }
        };

        if file_type.is_dir() {
            if let Err(error) = fs::create_dir_all(&to) {
                tracing::warn!(path = %to.display(), %error, "skipping subtree: cannot create directory");
                continue;
            }
            if let Err(error) = copy_tree(&from, &to) {
                tracing::warn!(path = %from.display(), %error, "skipping unreadable subtree");
            }
        } else if let Err(error) = fs::copy(&from, &to) {
            tracing::warn!(path = %from.display(), %error, "skipping file");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn template() -> (tempfile::TempDir, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().to_path_buf();
        fs::write(path.join("engine.xml"), "<engine/>").unwrap();
        fs::create_dir_all(path.join("core/conf")).unwrap();
        fs::write(path.join("core/conf/schema.xml"), "<schema/>").unwrap();
        (root, path)
    }

    #[test]
    fn test_provision_copies_template_tree() {
        let (_root, template) = template();
        let home = ServerHome::provision(&template).unwrap();

        assert_eq!(
            fs::read_to_string(home.path().join("engine.xml")).unwrap(),
            "<engine/>"
        );
        assert_eq!(
            fs::read_to_string(home.path().join("core/conf/schema.xml")).unwrap(),
            "<schema/>"
        );
    }

    #[test]
    fn test_instances_are_isolated() {
        let (_root, template) = template();
        let first = ServerHome::provision(&template).unwrap();
        let second = ServerHome::provision(&template).unwrap();

        assert_ne!(first.path(), second.path());
        assert_ne!(first.id(), second.id());

        // Writing into one home must not leak into the other.
        fs::write(first.path().join("write.lock"), "x").unwrap();
        assert!(!second.path().join("write.lock").exists());
    }

    #[test]
    fn test_close_removes_files_added_after_startup() {
        let (_root, template) = template();
        let home = ServerHome::provision(&template).unwrap();
        let path = home.path().to_path_buf();

        fs::write(path.join("segments_1"), "data").unwrap();
        fs::create_dir_all(path.join("core/data/index")).unwrap();

        home.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_the_directory() {
        let (_root, template) = template();
        let path = {
            let home = ServerHome::provision(&template).unwrap();
            home.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let missing = Path::new("/nonexistent/sedge-template");
        assert!(ServerHome::provision(missing).is_err());
    }
}
