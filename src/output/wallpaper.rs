use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{HabitError, HabitResult};

/// Capability to make an image file the desktop wallpaper.
pub trait WallpaperSetter {
    /// Apply the image at `path` (absolute). An error means the OS did not accept it.
    fn apply(&self, path: &Path) -> HabitResult<()>;
}

impl<T: WallpaperSetter + ?Sized> WallpaperSetter for Box<T> {
    fn apply(&self, path: &Path) -> HabitResult<()> {
        (**self).apply(path)
    }
}

/// Runs an external script with the image path as its only argument.
#[derive(Clone, Debug)]
pub struct ScriptWallpaperSetter {
    script: PathBuf,
}

impl ScriptWallpaperSetter {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        let script = script.into();
        let script = std::path::absolute(&script).unwrap_or(script);
        Self { script }
    }

    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl WallpaperSetter for ScriptWallpaperSetter {
    fn apply(&self, path: &Path) -> HabitResult<()> {
        tracing::info!(script = %self.script.display(), image = %path.display(), "applying wallpaper");
        let status = Command::new(&self.script)
            .arg(path)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| {
                HabitError::output(format!("spawn '{}': {e}", self.script.display()))
            })?;

        if !status.success() {
            return Err(HabitError::output(format!(
                "'{}' exited with {status}",
                self.script.display()
            )));
        }
        Ok(())
    }
}

/// Leaves the desktop alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWallpaperSetter;

impl WallpaperSetter for NoopWallpaperSetter {
    fn apply(&self, path: &Path) -> HabitResult<()> {
        tracing::debug!(image = %path.display(), "wallpaper setting disabled");
        Ok(())
    }
}
