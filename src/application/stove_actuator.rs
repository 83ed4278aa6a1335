// Actuator trait for sending control requests to the stove
use crate::domain::stove::BurnLevelCommand;
use async_trait::async_trait;

#[async_trait]
pub trait StoveActuator: Send + Sync {
    /// Ask the stove to change its burn level. The effect shows up later in a
    /// snapshot; the result only reports whether the request was delivered.
    async fn set_burn_level(&self, command: &BurnLevelCommand) -> anyhow::Result<()>;
}
