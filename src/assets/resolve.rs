use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::builder::{MediaKind, MediaSource};

/// Turns request references into sources the engine can open.
pub trait AssetResolver: Sync {
    /// Resolve one reference. The returned source is the only one of its role, so its index is
    /// 0; [`resolve_all`] numbers list entries.
    fn resolve(&self, reference: &str, kind: MediaKind) -> ReelResult<MediaSource>;
}

/// Resolve every reference concurrently, preserving request order in the assigned indices.
///
/// The first failing reference (in request order) is returned as the error.
#[tracing::instrument(skip(resolver, references), fields(count = references.len()))]
pub fn resolve_all<R, S>(
    resolver: &R,
    references: &[S],
    kind: MediaKind,
) -> ReelResult<Vec<MediaSource>>
where
    R: AssetResolver + ?Sized,
    S: AsRef<str> + Sync,
{
    let resolved: Vec<ReelResult<MediaSource>> = references
        .par_iter()
        .map(|r| resolver.resolve(r.as_ref(), kind))
        .collect();
    resolved
        .into_iter()
        .enumerate()
        .map(|(index, source)| source.map(|s| MediaSource { index, ..s }))
        .collect()
}

/// Resolves relative references under a root directory and requires the files to exist.
#[derive(Clone, Debug)]
pub struct LocalResolver {
    root: PathBuf,
}

impl LocalResolver {
    /// Resolver rooted at `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>) -> ReelResult<Self> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .with_context(|| format!("asset root '{}' is not accessible", root.display()))?;
        if !root.is_dir() {
            return Err(ReelError::validation(format!(
                "asset root '{}' is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for LocalResolver {
    fn resolve(&self, reference: &str, kind: MediaKind) -> ReelResult<MediaSource> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ReelError::validation(format!("empty {kind:?} reference")));
        }
        if reference.contains("://") {
            return Err(ReelError::validation(format!(
                "'{reference}': remote assets are not fetched; download them under the asset root"
            )));
        }
        let rel = Path::new(reference);
        if rel.is_absolute() || rel.has_root() {
            return Err(ReelError::validation(format!(
                "'{reference}': asset references must be relative to the asset root"
            )));
        }
        if rel
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(ReelError::validation(format!(
                "'{reference}': asset references must not leave the asset root"
            )));
        }

        let path = self.root.join(rel);
        if !path.is_file() {
            return Err(ReelError::validation(format!(
                "{kind:?} asset '{}' not found",
                path.display()
            )));
        }
        let locator = path.to_str().ok_or_else(|| {
            ReelError::validation(format!("path '{}' is not valid UTF-8", path.display()))
        })?;
        Ok(MediaSource::new(0, locator, kind))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
