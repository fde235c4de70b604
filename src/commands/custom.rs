use crate::controller::UiController;
use crate::utils::ChartError;

/// `custom`: hide the predefined buttons, reveal the date inputs
pub fn execute_toggle(controller: &mut UiController) -> Result<(), ChartError> {
    controller.show_custom_range();
    println!("Custom range: set `start_date <date>` and `end_date <date>`, then `show`");
    Ok(())
}

pub fn execute_start_input(controller: &mut UiController, value: &str) -> Result<(), ChartError> {
    controller.set_start_input(value);
    Ok(())
}

pub fn execute_end_input(controller: &mut UiController, value: &str) -> Result<(), ChartError> {
    controller.set_end_input(value);
    Ok(())
}

/// `show [start end]`: fill the inputs when given, then redraw from them
pub async fn execute_confirm(
    controller: &mut UiController,
    inputs: Option<(String, String)>,
) -> Result<(), ChartError> {
    if let Some((start, end)) = inputs {
        controller.set_start_input(&start);
        controller.set_end_input(&end);
    }

    tracing::info!(
        "📅 Custom range requested: {:?} .. {:?}",
        controller.page().start_input,
        controller.page().end_input
    );
    controller.confirm_custom_range().await
}
