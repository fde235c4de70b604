use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use tracing::warn;

use crate::models::{ChartSpec, Rgba};
use crate::services::chart_service::{Painter, SurfaceTarget};
use crate::utils::ChartError;

/// Paints charts into PNG files with plotters
pub struct PngPainter;

impl Painter for PngPainter {
    fn paint(&self, spec: &ChartSpec, target: &SurfaceTarget) -> Result<(), ChartError> {
        // Labels that do not parse leave a gap
        let points: Vec<(NaiveDate, f64)> = spec
            .labels
            .iter()
            .zip(spec.dataset.data.iter())
            .filter_map(|(label, rate)| {
                NaiveDate::parse_from_str(label, spec.x_axis.parser)
                    .ok()
                    .map(|date| (date, *rate))
            })
            .collect();

        let (x_min, x_max) = x_bounds(&points, spec.requested_window)
            .ok_or_else(|| ChartError::Render("No dates to plot".to_string()))?;
        let (y_min, y_max) = y_bounds(&points)?;

        let backend = BitMapBackend::new(&target.path, (target.width, target.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

        // Text needs a system font; without one the line is still drawn
        let tick_format = spec.x_axis.tick_format;
        if let Err(e) = chart
            .configure_mesh()
            .x_desc(spec.x_axis.title)
            .y_desc(spec.y_axis.title)
            .x_label_formatter(&|date: &NaiveDate| date.format(tick_format).to_string())
            .draw()
        {
            warn!("Failed to draw axes: {}", e);
        }

        let stroke = to_plotters(spec.dataset.border_color).stroke_width(spec.dataset.border_width);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), stroke))
            .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?
            .label(spec.dataset.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));

        let marker = to_plotters(spec.dataset.background_color);
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(date, rate)| Circle::new((date, rate), 3, marker.filled())),
            )
            .map_err(|e| ChartError::Render(format!("Failed to draw point: {}", e)))?;

        if let Err(e) = chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
        {
            warn!("Failed to draw legend: {}", e);
        }

        root.present()
            .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;

        Ok(())
    }
}

fn to_plotters(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.a)
}

/// Day range covering every point, widened so it is never empty
///
/// Falls back to the requested window when nothing parsed. `None` when
/// there is neither.
fn x_bounds(
    points: &[(NaiveDate, f64)],
    requested_window: Option<(NaiveDate, NaiveDate)>,
) -> Option<(NaiveDate, NaiveDate)> {
    let data_window = points
        .iter()
        .map(|(date, _)| *date)
        .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, date| match acc {
            None => Some((date, date)),
            Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
        });

    let (lo, hi) = data_window.or_else(|| requested_window.map(|(a, b)| (a.min(b), a.max(b))))?;

    if lo == hi {
        Some((lo, hi + Duration::days(1)))
    } else {
        Some((lo, hi))
    }
}

/// Rate range padded by 10% of the data span
///
/// Errors when the padded range is not finite and strictly increasing.
fn y_bounds(points: &[(NaiveDate, f64)]) -> Result<(f64, f64), ChartError> {
    if points.is_empty() {
        return Ok((0.0, 1.0));
    }

    let min_rate = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_rate = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let padding = if max_rate > min_rate {
        // halved first, the raw span can overflow
        (max_rate / 2.0 - min_rate / 2.0) * 0.2
    } else {
        // flat series: pad around the single value
        (max_rate.abs() * 0.1).max(1e-3)
    };

    let (lo, hi) = (min_rate - padding, max_rate + padding);
    if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() || hi <= lo {
        return Err(ChartError::Render(format!(
            "Rate range {}..{} cannot be plotted",
            min_rate, max_rate
        )));
    }

    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target(dir: &tempfile::TempDir, width: u32, height: u32) -> SurfaceTarget {
        SurfaceTarget {
            path: dir.path().join("graph.png"),
            width,
            height,
        }
    }

    fn spec(points: &[(&str, f64)], window: Option<(NaiveDate, NaiveDate)>) -> ChartSpec {
        ChartSpec::line(
            points.iter().map(|(d, _)| d.to_string()).collect(),
            points.iter().map(|(_, r)| *r).collect(),
            window,
        )
    }

    /// Width and height from the PNG IHDR chunk
    fn png_size(path: &std::path::Path) -> (u32, u32) {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (width, height)
    }

    #[test]
    fn test_x_bounds_from_data() {
        let points = vec![(ymd(2024, 3, 4), 1.6), (ymd(2024, 3, 3), 1.5)];
        assert_eq!(x_bounds(&points, None), Some((ymd(2024, 3, 3), ymd(2024, 3, 4))));
    }

    #[test]
    fn test_x_bounds_single_day_is_widened() {
        let points = vec![(ymd(2024, 3, 3), 1.5)];
        assert_eq!(x_bounds(&points, None), Some((ymd(2024, 3, 3), ymd(2024, 3, 4))));
    }

    #[test]
    fn test_x_bounds_falls_back_to_requested_window() {
        let window = Some((ymd(2024, 3, 10), ymd(2024, 3, 3)));
        assert_eq!(x_bounds(&[], window), Some((ymd(2024, 3, 3), ymd(2024, 3, 10))));
        assert_eq!(x_bounds(&[], None), None);
    }

    #[test]
    fn test_y_bounds_padding() {
        let points = vec![(ymd(2024, 3, 3), 1.0), (ymd(2024, 3, 4), 2.0)];
        let (lo, hi) = y_bounds(&points).unwrap();
        assert!((lo - 0.9).abs() < 1e-9);
        assert!((hi - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_y_bounds_flat_and_negative() {
        let (lo, hi) = y_bounds(&[(ymd(2024, 3, 3), -0.5)]).unwrap();
        assert!(lo < -0.5 && hi > -0.5);
        assert_eq!(y_bounds(&[]).unwrap(), (0.0, 1.0));
    }

    #[test]
    fn test_y_bounds_rejects_overflowing_rates() {
        let wide = [(ymd(2024, 3, 3), -1e308), (ymd(2024, 3, 4), 1e308)];
        assert!(matches!(y_bounds(&wide), Err(ChartError::Render(_))));

        let flat = [(ymd(2024, 3, 3), 1.7e308)];
        assert!(matches!(y_bounds(&flat), Err(ChartError::Render(_))));
    }

    #[test]
    fn test_paint_extreme_rates_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 400, 200);
        let spec = spec(&[("03-03-2024", -1e308), ("03-04-2024", 1e308)], None);

        let result = PngPainter.paint(&spec, &target);

        assert!(matches!(result, Err(ChartError::Render(_))));
        assert!(!target.path.exists());
    }

    #[test]
    fn test_paint_writes_png_of_surface_size() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 400, 200);
        let spec = spec(&[("03-03-2024", 1.5), ("03-04-2024", 1.6)], None);

        PngPainter.paint(&spec, &target).unwrap();

        assert_eq!(png_size(&target.path), (400, 200));
    }

    #[test]
    fn test_paint_single_point() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 320, 160);

        PngPainter.paint(&spec(&[("03-03-2024", 1.5)], None), &target).unwrap();

        assert_eq!(png_size(&target.path), (320, 160));
    }

    #[test]
    fn test_paint_empty_series_uses_requested_window() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 400, 200);
        let window = Some((ymd(2024, 3, 3), ymd(2024, 3, 10)));

        PngPainter.paint(&spec(&[], window), &target).unwrap();

        assert_eq!(png_size(&target.path), (400, 200));
    }

    #[test]
    fn test_paint_skips_unparseable_labels() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 400, 200);
        let spec = spec(&[("03-03-2024", 1.5), ("not a date", 9.0), ("03-05-2024", 1.7)], None);

        PngPainter.paint(&spec, &target).unwrap();

        assert_eq!(png_size(&target.path), (400, 200));
    }

    #[test]
    fn test_paint_without_any_dates_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, 400, 200);

        let result = PngPainter.paint(&spec(&[("garbage", 1.0)], None), &target);

        assert!(matches!(result, Err(ChartError::Render(_))));
        assert!(!target.path.exists());
    }
}
