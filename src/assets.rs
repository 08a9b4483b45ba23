use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Base directory for game assets plus named shortcuts into it.
#[derive(Debug, Clone, Default)]
pub struct AssetPaths {
    base: PathBuf,
    named: HashMap<String, PathBuf>,
}

impl AssetPaths {
    /// Rooted at `base`, with nothing registered.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            named: HashMap::new(),
        }
    }

    /// Rooted at the running executable's directory, or `./` if that
    /// cannot be determined.
    pub fn from_exe_dir() -> Self {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| {
                warn!("could not determine executable directory, using ./");
                PathBuf::from("./")
            });
        Self::new(base)
    }

    /// Base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Registers `path` under `id` if it exists. Relative paths resolve
    /// against the base directory.
    pub fn set_path(&mut self, id: impl Into<String>, path: impl AsRef<Path>) -> bool {
        let full = self.resolve(path);
        if !full.exists() {
            warn!(path = %full.display(), "path does not exist, not registered");
            return false;
        }
        self.named.insert(id.into(), full);
        true
    }

    /// Path registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Path> {
        self.named.get(id).map(PathBuf::as_path)
    }

    /// `relative` joined onto the base directory.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base.join(relative)
    }
}
