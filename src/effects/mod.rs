pub mod blur;
pub mod composite;
