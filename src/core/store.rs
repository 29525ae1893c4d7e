//! # Post Store
//!
//! One directory, one `.txt` file per post. The store is a value holding its
//! root path and nothing else; every call goes straight to the file system.
//!
//! There is no locking. Two appends to the same post may interleave, and two
//! creates with the same title leave whichever wrote last.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};
use regex::RegexBuilder;

use crate::core::post::{self, CONTENT_TYPE, Draft, POST_EXTENSION, Stamp};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Pattern(regex::Error),
    InvalidName(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "post I/O error: {e}"),
            StoreError::Pattern(e) => write!(f, "invalid search pattern: {e}"),
            StoreError::InvalidName(name) => write!(f, "invalid post name: {name:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Pattern(e) => Some(e),
            StoreError::InvalidName(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

// ============================================================================
// Download
// ============================================================================

/// Raw bytes of a post, ready to hand to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested filename (the post's own name).
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone)]
pub struct PostStore {
    root: PathBuf,
}

impl PostStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bare filename inside the root. Anything that could name a
    /// different directory is refused.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, StoreError> {
        let invalid = || StoreError::InvalidName(filename.to_string());
        if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
            return Err(invalid());
        }
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(invalid()),
        }
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).is_ok_and(|p| p.is_file())
    }

    /// Write a new post, replacing any post with the same derived filename.
    pub fn create(&self, draft: &Draft, stamp: &Stamp) -> Result<PathBuf, StoreError> {
        let filename = draft.filename();
        let path = self.path_for(&filename)?;
        fs::create_dir_all(&self.root)?;

        if path.exists() {
            warn!("Overwriting existing post {}", path.display());
        }

        let mut file = File::create(&path)?;
        file.write_all(post::render_document(draft).as_bytes())?;
        info!("Created post {} ({stamp})", path.display());
        Ok(path)
    }

    /// Add a dated entry to the end of a post. Opens in append mode without
    /// checking that the post exists; a missing post becomes a header-less file.
    pub fn append(
        &self,
        filename: &str,
        content: &str,
        stamp: &Stamp,
    ) -> Result<PathBuf, StoreError> {
        let path = self.path_for(filename)?;
        if !path.exists() {
            warn!("Appending to missing post {}; it will have no header", path.display());
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(post::render_entry(content, stamp).as_bytes())?;
        info!("Appended {} bytes to {} ({stamp})", content.len(), path.display());
        Ok(path)
    }

    pub fn load(&self, filename: &str) -> Result<String, StoreError> {
        let path = self.path_for(filename)?;
        let content = fs::read_to_string(&path)?;
        debug!("Loaded {} ({} bytes)", path.display(), content.len());
        Ok(content)
    }

    /// Post filenames, sorted. A non-empty `query` is a case-insensitive regex
    /// matched anywhere in the filename. A missing directory lists as empty.
    pub fn list(&self, query: Option<&str>) -> Result<Vec<String>, StoreError> {
        let pattern = match query {
            Some(q) if !q.is_empty() => Some(
                RegexBuilder::new(q)
                    .case_insensitive(true)
                    .build()
                    .map_err(StoreError::Pattern)?,
            ),
            _ => None,
        };

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Post directory {} does not exist yet", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                debug!("Skipping non UTF-8 file name in {}", self.root.display());
                continue;
            };
            if name.ends_with(POST_EXTENSION) {
                names.push(name);
            }
        }
        names.sort();

        if let Some(re) = pattern {
            names.retain(|name| re.is_match(name));
        }
        debug!("Listed {} posts (query: {:?})", names.len(), query);
        Ok(names)
    }

    pub fn download(&self, filename: &str) -> Result<Download, StoreError> {
        let path = self.path_for(filename)?;
        let bytes = fs::read(&path)?;
        Ok(Download {
            file_name: filename.to_string(),
            content_type: CONTENT_TYPE,
            bytes,
        })
    }

    /// Deliver a download into `dest_dir`, keeping the post's filename.
    pub fn export(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf, StoreError> {
        let download = self.download(filename)?;
        fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(&download.file_name);
        fs::write(&dest, &download.bytes)?;
        info!("Exported {} to {}", filename, dest.display());
        Ok(dest)
    }
}
