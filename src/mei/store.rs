//! Directory-backed document store
//!
//! Every document is a `<name>.mei` file in one configured directory. Edits
//! run on an in-memory copy and the file is rewritten only when the edit
//! succeeds, via a temporary file renamed over the original.

use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_mei, write_mei, MeiError, MeiResult};
use crate::errors::EditResult;
use crate::models::MeiDocument;

const EXTENSION: &str = "mei";

/// Store settings, passed in explicitly at construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the `.mei` files
    pub mei_directory: PathBuf,
    /// Spaces per nesting level when writing
    pub indent: usize,
}

impl StoreConfig {
    pub fn new(mei_directory: impl Into<PathBuf>) -> Self {
        Self {
            mei_directory: mei_directory.into(),
            indent: 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MeiStore {
    config: StoreConfig,
}

impl MeiStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of a document, rejecting names that would leave the directory
    pub fn path_for(&self, name: &str) -> MeiResult<PathBuf> {
        let stem = name.strip_suffix(".mei").unwrap_or(name);
        if stem.is_empty()
            || stem == "."
            || stem.contains("..")
            || stem.contains('/')
            || stem.contains('\\')
        {
            return Err(MeiError::InvalidName(name.to_string()));
        }
        Ok(self
            .config
            .mei_directory
            .join(format!("{}.{}", stem, EXTENSION)))
    }

    pub fn load(&self, name: &str) -> MeiResult<MeiDocument> {
        let path = self.path_for(name)?;
        let text = fs::read_to_string(&path)?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        parse_mei(&text)
    }

    pub fn save(&self, doc: &MeiDocument, name: &str) -> MeiResult<()> {
        let path = self.path_for(name)?;
        let text = write_mei(doc, self.config.indent)?;
        write_atomically(&path, &text)?;
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Load, apply `edit`, and save only if it returns `Ok`
    pub fn edit<T>(
        &self,
        name: &str,
        edit: impl FnOnce(&mut MeiDocument) -> EditResult<T>,
    ) -> MeiResult<T> {
        let mut doc = self.load(name)?;
        let result = edit(&mut doc)?;
        self.save(&doc, name)?;
        Ok(result)
    }

    /// Names (without extension) of the stored documents, sorted
    pub fn list(&self) -> MeiResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.config.mei_directory)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn write_atomically(path: &Path, text: &str) -> MeiResult<()> {
    let tmp = path.with_extension("mei.tmp");
    fs::write(&tmp, text)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}
