//! Telemetry visualization core for a wood-stove dashboard card.
//!
//! The host pushes raw state snapshots into a [`TelemetryComponent`], which keeps
//! a chart model of the tracked sensors and derives summary statistics for the
//! stats tiles. Burn level changes go out through [`ControlService`].
//!
//! [`TelemetryComponent`]: application::telemetry_component::TelemetryComponent
//! [`ControlService`]: application::control_service::ControlService
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
