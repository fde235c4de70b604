use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::{DateRange, PageState, RangePreset};
use crate::services::{ChartRenderer, RangeSelector, RenderOutcome};
use crate::utils::ChartError;

type RenderTask = JoinHandle<Result<RenderOutcome, ChartError>>;

/// Routes UI triggers to the range selector and the chart renderer
pub struct UiController {
    selector: RangeSelector,
    renderer: Arc<ChartRenderer>,
    page: PageState,
    base_url: String,
    pending: Vec<RenderTask>,
}

impl UiController {
    pub fn new(selector: RangeSelector, renderer: Arc<ChartRenderer>, base_url: String) -> Self {
        Self {
            selector,
            renderer,
            page: PageState::default(),
            base_url,
            pending: Vec::new(),
        }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn current_range(&self) -> Option<&DateRange> {
        self.selector.current()
    }

    pub fn renderer(&self) -> &Arc<ChartRenderer> {
        &self.renderer
    }

    /// Page ready: draw the default week onto the initial surface
    pub fn on_ready(&mut self) {
        info!("Base URL: {}", self.base_url);
        let range = self.selector.select_week();
        let ticket = self.renderer.issue_ticket();
        self.spawn_render(ticket, range);
    }

    /// Predefined range button
    pub async fn select_preset(&mut self, preset: RangePreset) -> Result<(), ChartError> {
        let range = self.selector.select_preset(preset);
        self.redraw(range).await
    }

    /// `custom`: swap the predefined group for the custom range inputs
    pub fn show_custom_range(&mut self) {
        self.page.show_custom_group();
    }

    pub fn set_start_input(&mut self, value: &str) {
        self.page.start_input = value.to_string();
    }

    pub fn set_end_input(&mut self, value: &str) {
        self.page.end_input = value.to_string();
    }

    /// `show`: redraw from the two inputs, then bring the predefined group back
    pub async fn confirm_custom_range(&mut self) -> Result<(), ChartError> {
        let range = self
            .selector
            .select_custom(&self.page.start_input, &self.page.end_input);
        let result = self.redraw(range).await;
        self.page.show_predefined_group();
        result
    }

    /// Await every render still in flight
    pub async fn settle(&mut self) -> Vec<Result<RenderOutcome, ChartError>> {
        let mut results = Vec::with_capacity(self.pending.len());
        for task in self.pending.drain(..) {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => warn!("Render task aborted: {}", e),
            }
        }
        results
    }

    /// Issue a ticket, start from a fresh surface, and render in the background
    async fn redraw(&mut self, range: DateRange) -> Result<(), ChartError> {
        let ticket = self.renderer.issue_ticket();
        self.renderer.recreate_surface().await?;
        self.spawn_render(ticket, range);
        Ok(())
    }

    fn spawn_render(&mut self, ticket: u64, range: DateRange) {
        let renderer = Arc::clone(&self.renderer);
        let template = self.base_url.clone();
        let (start_token, end_token) = range.tokens();

        let task = tokio::spawn(async move {
            let result = renderer
                .render_with_ticket(ticket, &start_token, &end_token, &template)
                .await;
            if let Err(e) = &result {
                warn!("Chart update for {} .. {} dropped: {}", start_token, end_token, e);
            }
            result
        });
        // finished renders already logged their outcome
        self.pending.retain(|t| !t.is_finished());
        self.pending.push(task);
    }
}
