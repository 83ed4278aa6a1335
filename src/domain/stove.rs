// Stove domain model
use serde::Serialize;
use thiserror::Error;

pub const MIN_BURN_LEVEL: i64 = 0;
pub const MAX_BURN_LEVEL: i64 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("Burn level must be between 0 and 5, got {0}")]
    InvalidBurnLevel(i64),
}

/// Requested burn intensity, always within 0..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BurnLevel(u8);

impl BurnLevel {
    pub fn new(level: i64) -> Result<Self, ControlError> {
        if !(MIN_BURN_LEVEL..=MAX_BURN_LEVEL).contains(&level) {
            return Err(ControlError::InvalidBurnLevel(level));
        }
        Ok(Self(level as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Fire-and-forget request handed to the actuation collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnLevelCommand {
    pub sensor_id: String,
    pub requested_level: BurnLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StovePhase {
    Ignition,
    StartUp,
    Combustion,
    Embers,
    Standby,
    Unknown,
}

impl StovePhase {
    pub fn from_code(code: Option<f64>) -> Self {
        match code.map(|c| c.round() as i64) {
            Some(1) => StovePhase::Ignition,
            Some(2) => StovePhase::StartUp,
            Some(3) => StovePhase::Combustion,
            Some(4) => StovePhase::Embers,
            Some(5) => StovePhase::Standby,
            _ => StovePhase::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StovePhase::Ignition => "Ignition",
            StovePhase::StartUp => "Start-up",
            StovePhase::Combustion => "Combustion",
            StovePhase::Embers => "Embers",
            StovePhase::Standby => "Standby",
            StovePhase::Unknown => "Unknown",
        }
    }

    /// Phases in which wood is actively burning
    pub fn is_active(self) -> bool {
        matches!(
            self,
            StovePhase::Ignition | StovePhase::StartUp | StovePhase::Combustion
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorState {
    Open,
    Closed,
    Unavailable,
}

impl DoorState {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) if is_open(v) => DoorState::Open,
            Some(_) => DoorState::Closed,
            None => DoorState::Unavailable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DoorState::Open => "Open",
            DoorState::Closed => "Closed",
            DoorState::Unavailable => "N/A",
        }
    }
}

/// Binary sensors are normalized to 1.0 (on) and 0.0 (off)
pub fn is_open(value: f64) -> bool {
    value >= 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_level_bounds() {
        assert_eq!(BurnLevel::new(0).unwrap().value(), 0);
        assert_eq!(BurnLevel::new(5).unwrap().value(), 5);
        assert_eq!(BurnLevel::new(6), Err(ControlError::InvalidBurnLevel(6)));
        assert_eq!(BurnLevel::new(-1), Err(ControlError::InvalidBurnLevel(-1)));
    }

    #[test]
    fn test_phase_from_code() {
        assert_eq!(StovePhase::from_code(Some(3.0)), StovePhase::Combustion);
        assert_eq!(StovePhase::from_code(Some(9.0)), StovePhase::Unknown);
        assert_eq!(StovePhase::from_code(None), StovePhase::Unknown);
        assert!(StovePhase::Ignition.is_active());
        assert!(!StovePhase::Embers.is_active());
    }

    #[test]
    fn test_door_state_labels() {
        assert_eq!(DoorState::from_value(Some(1.0)).label(), "Open");
        assert_eq!(DoorState::from_value(Some(0.0)).label(), "Closed");
        assert_eq!(DoorState::from_value(None).label(), "N/A");
    }
}
