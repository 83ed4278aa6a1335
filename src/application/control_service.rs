// Control service - Fire-and-forget burn level requests
use crate::application::stove_actuator::StoveActuator;
use crate::domain::stove::{BurnLevel, BurnLevelCommand, ControlError};
use std::sync::Arc;

#[derive(Clone)]
pub struct ControlService {
    actuator: Arc<dyn StoveActuator>,
}

impl ControlService {
    pub fn new(actuator: Arc<dyn StoveActuator>) -> Self {
        Self { actuator }
    }

    /// Validates the level, hands the command to the actuator on a background
    /// task and returns without waiting for it. Must be called inside a tokio runtime.
    pub fn request_burn_level(&self, sensor_id: &str, level: i64) -> Result<BurnLevelCommand, ControlError> {
        let command = BurnLevelCommand {
            sensor_id: sensor_id.to_string(),
            requested_level: BurnLevel::new(level)?,
        };

        let actuator = self.actuator.clone();
        let sent = command.clone();
        tokio::spawn(async move {
            match actuator.set_burn_level(&sent).await {
                Ok(()) => tracing::info!(
                    "Burn level {} requested for {}",
                    sent.requested_level.value(),
                    sent.sensor_id
                ),
                Err(e) => tracing::error!("Error setting burn level for {}: {:#}", sent.sensor_id, e),
            }
        });

        Ok(command)
    }
}
