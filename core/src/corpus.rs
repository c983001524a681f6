use crate::{QaError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Raw documents keyed by identifier (the file name when loaded from disk).
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: BTreeMap<String, String>,
}

impl Corpus {
    /// Load every regular file directly inside `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> { Self::load_filtered(dir.as_ref(), None) }

    /// Load only files whose extension equals `ext` (without the dot).
    pub fn load_with_extension<P: AsRef<Path>>(dir: P, ext: &str) -> Result<Self> {
        Self::load_filtered(dir.as_ref(), Some(ext))
    }

    fn load_filtered(dir: &Path, ext: Option<&str>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(QaError::CorpusDir(dir.to_path_buf()));
        }
        tracing::info!(dir = %dir.display(), "loading files");
        let mut documents = BTreeMap::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| QaError::Io {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e.into(),
            })?;
            let p = entry.path();
            // follows symlinks, unlike entry.file_type()
            if !p.is_file() { continue; }
            if let Some(ext) = ext {
                if p.extension().and_then(|s| s.to_str()) != Some(ext) { continue; }
            }
            let text = std::fs::read_to_string(p).map_err(|source| QaError::Io { path: p.to_path_buf(), source })?;
            let id = entry.file_name().to_string_lossy().into_owned();
            documents.insert(id, text);
        }
        tracing::info!(num_docs = documents.len(), "corpus loaded");
        Ok(Self { documents })
    }

    pub fn from_documents<I, K, V>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { documents: docs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn get(&self, id: &str) -> Option<&str> { self.documents.get(id).map(String::as_str) }
    pub fn len(&self) -> usize { self.documents.len() }
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Documents in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
