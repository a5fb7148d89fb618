pub mod interaction;
pub mod loader;
pub mod model;
pub mod preload;
pub mod repository;
