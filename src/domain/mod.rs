// Domain layer - Stove telemetry models
pub mod dashboard;
pub mod stove;
pub mod telemetry;
