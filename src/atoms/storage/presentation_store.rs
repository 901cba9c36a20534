use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::Presentation;

/// Create/read/update/delete of presentations keyed by `(owner, slug)`.
pub trait PresentationStore {
    fn create(&self, presentation: &Presentation) -> Result<()>;
    fn read(&self, owner: &str, slug: &str) -> Result<Presentation>;
    fn update(&self, presentation: &Presentation) -> Result<()>;
    fn delete(&self, owner: &str, slug: &str) -> Result<()>;
    fn exists(&self, owner: &str, slug: &str) -> Result<bool>;
    /// Most recently updated first.
    fn list(&self, owner: &str) -> Result<Vec<Presentation>>;
}

/// Stores each presentation as `<base>/presentations/<owner>/<slug>.json`.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    fn owner_dir(&self, owner: &str) -> PathBuf {
        self.base_dir.join("presentations").join(owner)
    }

    fn path_for(&self, owner: &str, slug: &str) -> Result<PathBuf> {
        check_key("owner", owner)?;
        check_key("slug", slug)?;
        Ok(self.owner_dir(owner).join(format!("{}.json", slug)))
    }

    fn write(&self, path: &Path, presentation: &Presentation) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
        let body = serde_json::to_string_pretty(presentation)
            .with_context(|| "Failed to serialize presentation")?;
        fs::write(path, body).with_context(|| format!("Failed to save presentation: {:?}", path))
    }
}

/// Keys become path components, so separators and dot names are rejected.
fn check_key(kind: &str, key: &str) -> Result<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        bail!("Invalid {}: {:?}", kind, key);
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Presentation> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presentation: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse presentation: {:?}", path))
}

impl PresentationStore for FileStore {
    fn create(&self, presentation: &Presentation) -> Result<()> {
        let path = self.path_for(&presentation.owner, &presentation.slug)?;
        if path.exists() {
            bail!(
                "Presentation already exists: {}/{}",
                presentation.owner,
                presentation.slug
            );
        }
        self.write(&path, presentation)?;
        debug!(owner = %presentation.owner, slug = %presentation.slug, "presentation created");
        Ok(())
    }

    fn read(&self, owner: &str, slug: &str) -> Result<Presentation> {
        let path = self.path_for(owner, slug)?;
        if !path.exists() {
            bail!("Presentation not found: {}/{}", owner, slug);
        }
        read_file(&path)
    }

    fn update(&self, presentation: &Presentation) -> Result<()> {
        let path = self.path_for(&presentation.owner, &presentation.slug)?;
        if !path.exists() {
            bail!(
                "Presentation not found: {}/{}",
                presentation.owner,
                presentation.slug
            );
        }
        self.write(&path, presentation)?;
        debug!(owner = %presentation.owner, slug = %presentation.slug, "presentation updated");
        Ok(())
    }

    fn delete(&self, owner: &str, slug: &str) -> Result<()> {
        let path = self.path_for(owner, slug)?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete presentation: {:?}", path))?;
            debug!(owner, slug, "presentation deleted");
        }
        Ok(())
    }

    fn exists(&self, owner: &str, slug: &str) -> Result<bool> {
        Ok(self.path_for(owner, slug)?.exists())
    }

    fn list(&self, owner: &str) -> Result<Vec<Presentation>> {
        check_key("owner", owner)?;
        let dir = self.owner_dir(owner);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut presentations = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match read_file(&path) {
                    Ok(p) => presentations.push(p),
                    Err(e) => warn!("Skipping unreadable presentation {:?}: {:#}", path, e),
                }
            }
        }

        presentations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(presentations)
    }
}
