// Presentation layer - HTTP glue between the dashboard host and the component
pub mod app_state;
pub mod handlers;
