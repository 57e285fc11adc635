//! Maps a free-text document key to one file in the assets directory.
//!
//! Lookup is a cascade, stopping at the first hit:
//! 1. exact alias from the configured table (target must exist on disk)
//! 2. first file whose lowercased name contains the key
//! 3. first file containing one of the fallback keywords, tried in order
//! 4. the first file in the listing
//!
//! An unknown or empty key therefore still yields a document whenever the
//! directory holds at least one allowed file. Only a missing or empty
//! directory is reported as not found.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::errors::ResolveError;

/// Extensions served from the assets directory, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// A file chosen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub path: PathBuf,
    pub file_name: String,
}

impl ResolvedDocument {
    fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(ResolvedDocument { path, file_name })
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    assets_dir: PathBuf,
    aliases: HashMap<String, String>,
    fallback_keywords: Vec<String>,
}

impl Resolver {
    pub fn new(
        assets_dir: impl Into<PathBuf>,
        aliases: impl IntoIterator<Item = (String, String)>,
        fallback_keywords: Vec<String>,
    ) -> Self {
        Resolver {
            assets_dir: assets_dir.into(),
            aliases: aliases
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect(),
            fallback_keywords: fallback_keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Resolver::new(
            config.assets_dir.clone(),
            config.aliases.iter().cloned(),
            config.fallback_keywords.clone(),
        )
    }

    /// Resolve `key` to a document. `NotFound` only when no allowed file exists;
    /// an assets path that exists but cannot be listed is an `Io` error.
    pub fn resolve(&self, key: Option<&str>) -> Result<ResolvedDocument, ResolveError> {
        let files = self.list_documents()?;
        if files.is_empty() {
            log::warn!("No PDF files found in {}", self.assets_dir.display());
            return Err(ResolveError::NotFound);
        }

        let wanted = key.unwrap_or("").trim().to_lowercase();

        if !wanted.is_empty() {
            if let Some(doc) = self.lookup_alias(&wanted) {
                return Ok(doc);
            }
            if let Some(doc) = first_containing(&files, &wanted) {
                return Ok(doc.clone());
            }
        }

        for keyword in &self.fallback_keywords {
            if let Some(doc) = first_containing(&files, keyword) {
                log::debug!("Key {wanted:?} fell back to keyword {keyword:?}");
                return Ok(doc.clone());
            }
        }

        log::debug!("Key {wanted:?} fell back to first available document");
        files.into_iter().next().ok_or(ResolveError::NotFound)
    }

    /// Allowed files directly under the assets directory, sorted by name.
    /// A missing directory lists as empty.
    pub fn list_documents(&self) -> io::Result<Vec<ResolvedDocument>> {
        let entries = match std::fs::read_dir(&self.assets_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::error!("Assets directory {} does not exist", self.assets_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut docs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !has_allowed_extension(&path) {
                continue;
            }
            if let Some(doc) = ResolvedDocument::from_path(path) {
                docs.push(doc);
            }
        }
        docs.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(docs)
    }

    fn lookup_alias(&self, wanted: &str) -> Option<ResolvedDocument> {
        let mapped = self.aliases.get(wanted)?;
        let candidate = self.assets_dir.join(mapped);
        if candidate.is_file() && has_allowed_extension(&candidate) {
            return ResolvedDocument::from_path(candidate);
        }
        log::debug!("Alias {wanted:?} points at missing file {mapped:?}");
        None
    }
}

fn first_containing<'a>(files: &'a [ResolvedDocument], needle: &str) -> Option<&'a ResolvedDocument> {
    files
        .iter()
        .find(|doc| doc.file_name.to_lowercase().contains(needle))
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}
