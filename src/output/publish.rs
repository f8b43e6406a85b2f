use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    config::WallpaperConfig,
    foundation::error::{HabitError, HabitResult},
    output::store::ArtifactStore,
    output::wallpaper::WallpaperSetter,
    render::surface::Surface,
};

/// Naming scheme of generated files: `{prefix}{unix_seconds}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactNaming {
    pub prefix: String,
    pub extension: String,
    pub legacy: Option<String>,
}

impl ArtifactNaming {
    pub fn from_config(cfg: &WallpaperConfig) -> Self {
        Self {
            prefix: cfg.file_prefix.clone(),
            extension: cfg.file_extension.clone(),
            legacy: cfg.legacy_file_name.clone(),
        }
    }

    pub fn file_name(&self, unix_secs: u64) -> String {
        format!("{}{unix_secs}.{}", self.prefix, self.extension)
    }

    /// Whether `name` looks like a file this tool generated.
    pub fn is_generated(&self, name: &str) -> bool {
        name.strip_prefix(&self.prefix)
            .and_then(|rest| rest.strip_suffix(&self.extension))
            .is_some_and(|rest| rest.ends_with('.'))
    }
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self::from_config(&WallpaperConfig::default())
    }
}

/// Saves surfaces, applies them as wallpaper and keeps only the newest file.
pub struct Publisher<S, W> {
    store: S,
    setter: W,
    naming: ArtifactNaming,
}

impl<S: ArtifactStore, W: WallpaperSetter> Publisher<S, W> {
    pub fn new(store: S, setter: W, naming: ArtifactNaming) -> Self {
        Self {
            store,
            setter,
            naming,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Publish with the current wall-clock time.
    pub fn publish_now(&mut self, surface: &Surface) -> HabitResult<PathBuf> {
        self.publish(surface, SystemTime::now())
    }

    /// Persist `surface` under a name derived from `now`, apply it, then prune older files.
    ///
    /// Only a failed write is an error; wallpaper and cleanup failures are logged.
    #[tracing::instrument(skip_all)]
    pub fn publish(&mut self, surface: &Surface, now: SystemTime) -> HabitResult<PathBuf> {
        let secs = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| HabitError::output("system clock is before the unix epoch"))?
            .as_secs();
        let name = self.naming.file_name(secs);

        let png = surface.encode_png()?;
        self.store.write(&name, &png)?;
        let path = self.store.locate(&name);
        tracing::info!(path = %path.display(), "wallpaper generated");

        if let Err(err) = self.setter.apply(&path) {
            tracing::warn!(%err, "could not apply wallpaper; the file is kept");
        }

        self.prune(&name);
        Ok(path)
    }

    /// Remove every generated file except `keep`, plus the legacy fixed-name file.
    fn prune(&mut self, keep: &str) {
        let names = match self.store.list() {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(%err, "could not list old wallpapers");
                return;
            }
        };

        let stale = names
            .iter()
            .filter(|n| n.as_str() != keep && self.naming.is_generated(n))
            .cloned()
            .collect::<Vec<_>>();
        for name in &stale {
            self.remove_quietly(name, true);
        }

        if let Some(legacy) = self.naming.legacy.clone()
            && legacy != keep
            && names.contains(&legacy)
        {
            self.remove_quietly(&legacy, false);
        }
    }

    fn remove_quietly(&mut self, name: &str, announce: bool) {
        match self.store.remove(name) {
            Ok(()) if announce => tracing::info!(name, "removed old wallpaper"),
            Ok(()) => tracing::debug!(name, "removed legacy wallpaper"),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(name, "old wallpaper already gone");
            }
            Err(err) => tracing::warn!(name, %err, "could not remove old wallpaper"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/publish.rs"]
mod tests;
