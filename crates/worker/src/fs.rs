//! Filesystem collaborators: estimates as JSON files, artifacts as files
//! under a root directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use engine::CostEstimate;
use uuid::Uuid;

use crate::{ArtifactLocator, ArtifactStore, CostEstimateSource, SourceError, StoreError};

/// Reads estimates from `<dir>/<id>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read(&self, id: Uuid) -> Result<Option<CostEstimate>, SourceError> {
        let bytes = match tokio::fs::read(self.path(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl CostEstimateSource for JsonDirectorySource {
    async fn load(&self, id: Uuid) -> Result<Option<CostEstimate>, SourceError> {
        self.read(id).await
    }

    async fn attach_artifact(&self, id: Uuid, locator: &ArtifactLocator) -> Result<(), SourceError> {
        let mut estimate = self.read(id).await?.ok_or(SourceError::Missing(id))?;
        estimate.artifact = Some(locator.to_string());
        let bytes = serde_json::to_vec_pretty(&estimate)?;
        write_replacing(&self.path(id), bytes).await?;
        Ok(())
    }
}

/// Stores artifacts under `root` and hands out `<base_url><key>` locators.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
    base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.is_empty() && !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            root: root.into(),
            base_url,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for LocalStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<ArtifactLocator, StoreError> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !plain {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let size = bytes.len();
        write_replacing(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size, "artifact written");
        Ok(ArtifactLocator::new(format!("{}{key}", self.base_url)))
    }
}

/// Writes to a sibling temporary file, then renames it over `path`, so
/// readers see either the old or the new content.
///
/// Both steps run in one blocking task: dropping the returned future (on a
/// timeout) cannot stop between them, and the temporary file is removed
/// whenever the replacement fails.
async fn write_replacing(path: &Path, bytes: Vec<u8>) -> io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
        .await
        .map_err(io::Error::other)?
}

fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(format!(".{}.tmp", Uuid::new_v4()));
    let tmp = PathBuf::from(tmp);
    let result = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}
