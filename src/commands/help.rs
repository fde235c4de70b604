use crate::utils::ChartError;

pub fn execute() -> Result<(), ChartError> {
    println!("📖 Interbank Rate Chart");
    println!();
    println!("Predefined ranges (ending today):");
    println!("  week                 last 7 days");
    println!("  month                last 30 days");
    println!("  quarter              last 90 days");
    println!("  year                 last 365 days");
    println!();
    println!("Custom range:");
    println!("  custom               show the custom range inputs");
    println!("  start_date <date>    set the start input (e.g. 2024-03-01)");
    println!("  end_date <date>      set the end input");
    println!("  show [start end]     draw the custom range and return to the presets");
    println!();
    println!("Other:");
    println!("  status               show the visible group, range and chart");
    println!("  help                 show this message");
    println!("  quit                 wait for pending charts and exit");

    Ok(())
}
