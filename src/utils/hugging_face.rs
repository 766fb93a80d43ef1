use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use derive_new::new;
use hf_hub::api::tokio::{Api, ApiBuilder};
use log::{debug, info};

/// How far a local model directory is from being usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// The directory does not exist
    Absent,

    /// The directory exists but holds at most one entry
    Incomplete,

    /// The directory is populated
    Ready,
}

/// Inspect a local model directory
pub fn asset_state(path: &Path) -> io::Result<AssetState> {
    if !path.exists() {
        return Ok(AssetState::Absent);
    }

    let entries = std::fs::read_dir(path)?.take(2).count();

    if entries <= 1 {
        Ok(AssetState::Incomplete)
    } else {
        Ok(AssetState::Ready)
    }
}

/// A remote store that model files can be fetched from
#[async_trait]
pub trait AssetSource {
    /// Fetch every file of a remote repository into `dest`, returning the paths written
    async fn fetch(&self, repo_id: &str, dest: &Path) -> anyhow::Result<Vec<PathBuf>>;
}

/// Fetch model repositories from the Hugging Face Hub
pub struct HubSource {
    api: Api,
}

impl HubSource {
    /// Create a Hub client with download progress bars
    pub fn new() -> anyhow::Result<Self> {
        let api = ApiBuilder::new()
            .with_progress(true)
            .build()
            .map_err(|e| anyhow!("Unable to create the Hugging Face Hub client: {}", e))?;

        Ok(Self { api })
    }
}

#[async_trait]
impl AssetSource for HubSource {
    async fn fetch(&self, repo_id: &str, dest: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let repo = self.api.model(repo_id.to_string());

        let info = repo
            .info()
            .await
            .map_err(|e| anyhow!("Unable to list the files of {}: {}", repo_id, e))?;

        tokio::fs::create_dir_all(dest).await?;

        let mut written = Vec::with_capacity(info.siblings.len());

        for sibling in info.siblings {
            let cached = repo.get(&sibling.rfilename).await.map_err(|e| {
                anyhow!(
                    "Failed to download: {} file with name: {} from HuggingFace Hub: {}",
                    repo_id,
                    sibling.rfilename,
                    e
                )
            })?;

            let target = dest.join(&sibling.rfilename);

            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            // The Hub cache holds symlinks into a blob store, copying stores the real file
            tokio::fs::copy(&cached, &target).await?;

            debug!("Stored {}", target.display());

            written.push(target);
        }

        Ok(written)
    }
}

/// What a provisioning call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The directory was already populated, nothing was fetched
    AlreadyPresent,

    /// The given number of files were downloaded
    Downloaded(usize),
}

/// A remote model repository and the local directory it is materialized into
#[derive(Debug, Clone, new)]
pub struct ModelAsset {
    /// Remote repository identifier (e.g., "MirandaBiel/IA_CGDF")
    pub repo_id: String,

    /// Local directory holding the model files
    pub local_dir: PathBuf,
}

impl ModelAsset {
    /// The current state of the local directory
    pub fn state(&self) -> io::Result<AssetState> {
        asset_state(&self.local_dir)
    }

    /// Make sure the local directory holds the model, fetching it when absent or incomplete
    pub async fn provision<S>(&self, source: &S) -> anyhow::Result<Provisioned>
    where
        S: AssetSource + Sync + ?Sized,
    {
        let state = self.state()?;

        if state == AssetState::Ready {
            info!(
                "Model already present at: {}",
                std::path::absolute(&self.local_dir)
                    .unwrap_or_else(|_| self.local_dir.clone())
                    .display()
            );

            return Ok(Provisioned::AlreadyPresent);
        }

        info!(
            "Model directory {:?} at {}, downloading [{}] from the Hugging Face Hub...",
            state,
            self.local_dir.display(),
            self.repo_id
        );

        let files = source.fetch(&self.repo_id, &self.local_dir).await?;

        info!("Download complete: {} files", files.len());

        Ok(Provisioned::Downloaded(files.len()))
    }
}
