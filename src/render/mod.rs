pub mod compositor;
pub mod surface;
mod text;
