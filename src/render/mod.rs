pub mod component;
pub mod headless;
pub mod monospace;
pub mod surface;
