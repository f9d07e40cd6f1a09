pub mod number;
pub mod render;
pub mod version;
