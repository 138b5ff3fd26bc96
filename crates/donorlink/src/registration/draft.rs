//! Unsubmitted form values kept on disk between sessions.
//!
//! One draft per kind of donor, stored as `<dir>/<kind>.json` in the same
//! shape [`FormData::from_json`] reads.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{FormData, RecordKind};

/// Directory of form drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    /// Drafts kept under `dir`, created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the drafts.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the draft for `kind`.
    #[must_use]
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{kind}.json"))
    }

    /// Replace the draft for `kind` with `form`.
    ///
    /// The file is written beside its final name and renamed into place, so
    /// a reader never sees a partial draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self, kind: RecordKind, form: &FormData) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| Error::DirectoryCreate {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(kind);
        let partial = path.with_extension("json.partial");
        tokio::fs::write(&partial, form.to_json()?).await?;
        tokio::fs::rename(&partial, &path).await?;
        debug!(%kind, path = %path.display(), "Draft saved");
        Ok(())
    }

    /// The draft for `kind`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft exists but cannot be read or parsed.
    pub async fn load(&self, kind: RecordKind) -> Result<Option<FormData>> {
        let path = self.path_for(kind);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(%kind, path = %path.display(), "Draft loaded");
                FormData::from_json(&text).map(Some)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the draft for `kind`; a missing draft is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing draft cannot be removed.
    pub async fn clear(&self, kind: RecordKind) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(kind)).await {
            Ok(()) => {
                debug!(%kind, "Draft cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    /// An empty, process-unique drafts directory under the system temp dir.
    pub(crate) fn temp_drafts_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "donorlink_drafts_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::testing::temp_drafts_dir;
    use super::*;
    use crate::record::living_fields as liv;

    #[tokio::test]
    async fn test_load_without_draft() {
        let drafts = DraftStore::new(temp_drafts_dir("none"));
        assert!(drafts.load(RecordKind::Living).await.unwrap().is_none());
        drafts.clear(RecordKind::Living).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = temp_drafts_dir("cycle");
        let drafts = DraftStore::new(&dir);
        let form = FormData::from_pairs([
            (liv::NAME, "Jane Doe"),
            (liv::ORGANS, "kidney"),
            (liv::ORGANS, "liver"),
        ]);

        drafts.save(RecordKind::Living, &form).await.unwrap();
        assert!(drafts.path_for(RecordKind::Living).exists());
        assert!(!drafts
            .path_for(RecordKind::Living)
            .with_extension("json.partial")
            .exists());
        assert_eq!(drafts.load(RecordKind::Living).await.unwrap(), Some(form));

        // Drafts are kept per kind
        assert!(drafts.load(RecordKind::Deceased).await.unwrap().is_none());

        drafts.clear(RecordKind::Living).await.unwrap();
        assert!(drafts.load(RecordKind::Living).await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_draft() {
        let dir = temp_drafts_dir("replace");
        let drafts = DraftStore::new(&dir);

        let first = FormData::from_pairs([(liv::NAME, "First")]);
        let second = FormData::from_pairs([(liv::EMAIL, "second@example.com")]);
        drafts.save(RecordKind::Living, &first).await.unwrap();
        drafts.save(RecordKind::Living, &second).await.unwrap();

        assert_eq!(drafts.load(RecordKind::Living).await.unwrap(), Some(second));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_draft_is_an_error() {
        let dir = temp_drafts_dir("corrupt");
        let drafts = DraftStore::new(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(drafts.path_for(RecordKind::Deceased), "not json").unwrap();

        let err = drafts.load(RecordKind::Deceased).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
