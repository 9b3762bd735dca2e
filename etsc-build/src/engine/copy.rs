use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use super::AssetCopier;
use crate::{AssetsSpec, BuildError};

/// Copies every file under the asset base directory selected by the asset
/// patterns, keeping its path relative to the base directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobCopier;

impl GlobCopier {
    /// Files to copy, as `(source, destination)` pairs in walk order.
    fn plan(assets: &AssetsSpec) -> Result<Vec<(PathBuf, PathBuf)>, BuildError> {
        let matcher = assets.matcher()?;
        let base = &assets.base_dir;
        let output = &assets.output_dir;

        let mut plan = Vec::new();
        let walker = WalkDir::new(base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.path() != output);

        for entry in walker {
            let entry = entry.map_err(|err| BuildError::Copy {
                path: err.path().unwrap_or(base).to_path_buf(),
                source: err.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(base) else {
                continue;
            };
            if matcher.is_match(rel) {
                plan.push((entry.path().to_path_buf(), output.join(rel)));
            }
        }

        Ok(plan)
    }
}

#[async_trait]
impl AssetCopier for GlobCopier {
    async fn copy(&self, assets: &AssetsSpec) -> Result<Vec<PathBuf>, BuildError> {
        if !assets.base_dir.is_dir() {
            debug!(base = %assets.base_dir.display(), "no asset directory, nothing to copy");
            return Ok(Vec::new());
        }

        let plan = Self::plan(assets)?;
        debug!(count = plan.len(), "copying assets");

        let mut copied = Vec::with_capacity(plan.len());
        for (from, to) in plan {
            if let Some(parent) = to.parent() {
                create_dir(parent).await?;
            }
            tokio::fs::copy(&from, &to)
                .await
                .map_err(|source| BuildError::Copy {
                    path: from.clone(),
                    source,
                })?;
            copied.push(to);
        }

        Ok(copied)
    }
}

async fn create_dir(dir: &Path) -> Result<(), BuildError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| BuildError::Copy {
            path: dir.to_path_buf(),
            source,
        })
}
