use crate::controller::UiController;
use crate::models::RangePreset;
use crate::utils::ChartError;

/// `week`, `month`, `quarter`, `year`
pub async fn execute(controller: &mut UiController, preset: RangePreset) -> Result<(), ChartError> {
    tracing::info!("📅 Showing the last {} days", preset.days());
    controller.select_preset(preset).await
}
