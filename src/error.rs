//! Errors raised while loading content.

use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::schema::Issue;

pub type Result<T> = std::result::Result<T, ContentError>;

/// Failure of a single content file.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Opening fence without a matching closing one.
    #[error("Frontmatter in {path} is not terminated by '{fence}'")]
    UnterminatedFrontmatter { path: PathBuf, fence: &'static str },

    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("{path} does not match the schema: {}", IssueList(.issues))]
    Schema { path: PathBuf, issues: Vec<Issue> },
}

impl ContentError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter { path: path.into(), message: message.into() }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ContentError::Io { path, .. } => path,
            ContentError::UnterminatedFrontmatter { path, .. } => path,
            ContentError::Frontmatter { path, .. } => path,
            ContentError::Schema { path, .. } => path,
        }
    }
}

/// Every file of a collection that failed to load.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Error reading collection '{collection}' from {dir}: {source}")]
    Read {
        collection: String,
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} invalid entr{} in collection '{collection}'", .errors.len(), plural_suffix(.errors.len()))]
    Invalid {
        collection: String,
        errors: Vec<ContentError>,
    },
}

fn plural_suffix(count: usize) -> &'static str {
    if count == 1 { "y" } else { "ies" }
}

struct IssueList<'a>(&'a [Issue]);

impl Display for IssueList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}
