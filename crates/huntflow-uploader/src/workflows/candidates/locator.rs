use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::normalizer::normalize_text;

#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("résumé not found: position directory {} does not exist", directory.display())]
    MissingDirectory { directory: PathBuf },
    #[error("résumé not found: nothing in {} matches '{full_name}'", directory.display())]
    NoMatch {
        directory: PathBuf,
        full_name: String,
    },
    #[error("résumé not found: unable to list {}: {source}", directory.display())]
    Unreadable {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Finds résumés stored as `<root>/<position>/<file containing the candidate's name>`.
#[derive(Debug, Clone)]
pub struct ResumeLocator {
    root: PathBuf,
}

impl ResumeLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the file whose normalized name contains the normalized full name.
    /// When several files match, the last one in directory-listing order is returned.
    pub fn locate(&self, position: &str, full_name: &str) -> Result<PathBuf, LocatorError> {
        let directory = self.root.join(position);
        let directory = fs::canonicalize(&directory)
            .map_err(|_| LocatorError::MissingDirectory {
                directory: directory.clone(),
            })?;
        if !directory.is_dir() {
            return Err(LocatorError::MissingDirectory { directory });
        }

        let needle = normalize_text(full_name);
        let unreadable = |source| LocatorError::Unreadable {
            directory: directory.clone(),
            source,
        };

        let mut matches = Vec::new();
        for entry in fs::read_dir(&directory).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name();
            if !needle.is_empty() && normalize_text(&name.to_string_lossy()).contains(&needle) {
                matches.push(path);
            }
        }

        match matches.len() {
            0 => Err(LocatorError::NoMatch {
                directory,
                full_name: full_name.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => {
                let chosen = matches.remove(count - 1);
                warn!(
                    full_name,
                    count,
                    chosen = %chosen.display(),
                    "several résumés match this candidate, using the last listed"
                );
                debug!(?matches, "other matching résumés");
                Ok(chosen)
            }
        }
    }
}
