pub mod help;
pub mod range;
pub mod custom;
pub mod status;

use tracing::{debug, info, warn};

use crate::controller::UiController;
use crate::models::RangePreset;
use crate::utils::ChartError;

/// One UI trigger parsed from an input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Preset(RangePreset),
    ShowCustom,
    StartInput(String),
    EndInput(String),
    Confirm(Option<(String, String)>),
    Status,
    Help,
    Quit,
}

/// Parse a trigger line. Unknown or malformed lines yield `None`.
pub fn parse_trigger(line: &str) -> Option<Trigger> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let trigger = match command.to_lowercase().as_str() {
        "week" => Trigger::Preset(RangePreset::Week),
        "month" => Trigger::Preset(RangePreset::Month),
        "quarter" => Trigger::Preset(RangePreset::Quarter),
        "year" => Trigger::Preset(RangePreset::Year),
        "custom" => Trigger::ShowCustom,
        "start_date" => Trigger::StartInput(rest.to_string()),
        "end_date" => Trigger::EndInput(rest.to_string()),
        "show" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            match args.as_slice() {
                [] => Trigger::Confirm(None),
                [start, end] => Trigger::Confirm(Some((start.to_string(), end.to_string()))),
                _ => return None,
            }
        }
        "status" => Trigger::Status,
        "help" => Trigger::Help,
        "quit" | "exit" => Trigger::Quit,
        _ => return None,
    };

    Some(trigger)
}

/// Handle one input line. Returns `false` once the user asked to quit.
pub async fn handle_line(controller: &mut UiController, line: &str) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    let trigger = match parse_trigger(line) {
        Some(trigger) => trigger,
        None => {
            debug!("Ignoring unknown trigger: {:?}", line.trim());
            return true;
        }
    };

    info!("🖱️ Trigger: {:?}", trigger);

    let result: Result<(), ChartError> = match trigger {
        Trigger::Preset(preset) => range::execute(controller, preset).await,
        Trigger::ShowCustom => custom::execute_toggle(controller),
        Trigger::StartInput(value) => custom::execute_start_input(controller, &value),
        Trigger::EndInput(value) => custom::execute_end_input(controller, &value),
        Trigger::Confirm(inputs) => custom::execute_confirm(controller, inputs).await,
        Trigger::Status => status::execute(controller).await,
        Trigger::Help => help::execute(),
        Trigger::Quit => return false,
    };

    // Failures never reach the page, only the logs
    if let Err(e) = result {
        warn!("Trigger failed: {}", e);
    }

    true
}
