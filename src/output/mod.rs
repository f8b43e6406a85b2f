pub mod publish;
pub mod store;
pub mod wallpaper;
