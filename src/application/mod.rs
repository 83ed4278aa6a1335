// Application layer - Component lifecycle, statistics and control use cases
pub mod chart_model;
pub mod chart_surface;
pub mod control_service;
pub mod shared_component;
pub mod snapshot_adapter;
pub mod stats;
pub mod stove_actuator;
pub mod telemetry_component;
