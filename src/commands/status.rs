use crate::controller::UiController;
use crate::utils::ChartError;

/// Print which control group is visible, the selected range and the live chart
pub async fn execute(controller: &UiController) -> Result<(), ChartError> {
    let page = controller.page();
    let group = if page.custom_range_visible {
        "custom range"
    } else if page.predefined_visible {
        "predefined"
    } else {
        "none"
    };

    let range = controller
        .current_range()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string());

    let chart = match controller.renderer().live_chart().await {
        Some(handle) => format!(
            "{} points from ticket {} (surface generation {})",
            handle.spec.labels.len(),
            handle.ticket,
            handle.generation
        ),
        None => "empty surface".to_string(),
    };

    println!("Visible group: {}", group);
    println!("Selected range: {}", range);
    println!("Chart: {}", chart);
    println!("Surface: {}", controller.renderer().surface_path().await.display());

    Ok(())
}
