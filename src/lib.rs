//! habit-screen renders a habit-tracking card as a desktop wallpaper.
//!
//! # Pipeline overview
//!
//! 1. **Snapshot**: `(title, subtitle, ["YYYY-MM-DD", ...]) -> HabitSnapshot` (malformed dates skipped)
//! 2. **Grid**: `completed dates + reference date -> GridMatrix` (52x7 cells, last cell = reference)
//! 3. **Compose**: background, blurred shadow, card, text and grid -> [`Surface`]
//! 4. **Publish**: PNG `wallpaper_<unix-seconds>.png`, apply as wallpaper, delete older files
//!
//! Rendering is a pure function of its inputs; the reference date is always passed in, and the
//! wallpaper script and output directory sit behind [`WallpaperSetter`] and [`ArtifactStore`].
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod foundation;
mod grid;
mod habits;
mod output;
mod render;
mod shape;

pub use assets::color::Rgba8;
pub use assets::font::{
    FontOrigin, ResolvedFont, TextLayoutEngine, bundled_font, resolve_font,
};
pub use config::WallpaperConfig;
pub use effects::blur::{blur_rgba8_premul, gaussian_blur};
pub use effects::composite::{over, paste_over};
pub use foundation::core::{Canvas, Point, PremulImage, Rect, Rgba8Premul, Vec2};
pub use foundation::error::{HabitError, HabitResult};
pub use grid::mapper::{CELL_COUNT, COLS, Cell, CellState, GridMatrix, ROWS, build_grid};
pub use grid::snapshot::{DATE_FORMAT, HabitSnapshot, parse_dates};
pub use habits::book::{
    DEFAULT_SUBTITLE, HabitBook, HabitEntry, HabitSummary, Tracked, slugify,
};
pub use output::publish::{ArtifactNaming, Publisher};
pub use output::store::{ArtifactStore, DirArtifactStore, MemoryArtifactStore};
pub use output::wallpaper::{NoopWallpaperSetter, ScriptWallpaperSetter, WallpaperSetter};
pub use render::compositor::{CardLayout, render};
pub use render::surface::{RenderStats, Surface};
pub use shape::rounded::{clamp_radius, rounded_rect, shadow};
