// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod headless_surface;
pub mod raw_state;
pub mod stove_api;
