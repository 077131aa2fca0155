//! Stacked-area PNG rendering with Plotters.
//!
//! Stacking: column `k` of the smoothed table is drawn as the band between
//! the cumulative sums of columns `0..k` and `0..=k`, so column 0 sits at the
//! bottom of the stack. Bands are painted top-of-stack first (each later,
//! smaller area covers the lower part of the previous one) and separated by a
//! thin white boundary line. Legend entries are registered in paint order,
//! which makes the legend read top-of-stack first.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{ChartStyle, SmoothedTable};
use crate::error::AppError;

/// Fallback palette (8 columns), cycled when the caller supplies none.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#a33a3a", "#ff8c86", "#ffaba4", "#ffcac3", "#acd6ec", "#8db7cc", "#6f99ad", "#2c5769",
];

/// Render the smoothed table as a stacked-area PNG at `path`.
///
/// The table must be non-empty (the pipeline skips rendering for empty
/// results); columns are stacked in the table's current (display) order.
pub fn render_stacked_area(
    table: &SmoothedTable,
    style: &ChartStyle,
    path: &Path,
) -> Result<(), AppError> {
    let Some((&first_sample, &last_sample)) = table.samples.first().zip(table.samples.last())
    else {
        return Err(AppError::new(5, "Cannot render a chart from an empty table."));
    };

    let x_min = style.x_min.unwrap_or(first_sample);
    let x_max = style.x_max.unwrap_or(last_sample);
    if !(x_min < x_max) {
        return Err(AppError::new(
            2,
            format!("Invalid x-axis bounds [{x_min}, {x_max}]."),
        ));
    }

    // Keep a floor so an all-zero table still produces a sane axis.
    let y_max = (table.max_stack() * 1.1).max(1.0);

    let cumulative = cumulative_rows(table);
    let colors = resolve_colors(&style.colors);

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::new(5, format!("Failed to prepare chart canvas: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, ("sans-serif", 28))
        .margin(24)
        .x_label_area_size(46)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| AppError::new(5, format!("Failed to build chart axes: {e}")))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&RGBColor(229, 229, 229))
        .x_desc(&style.x_label)
        .y_desc(&style.y_label)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()
        .map_err(|e| AppError::new(5, format!("Failed to draw chart mesh: {e}")))?;

    // Paint from the top of the stack down.
    for col in (0..table.keywords.len()).rev() {
        let color = colors[col % colors.len()];
        let fill = color.mix(style.alpha);
        let series = table
            .samples
            .iter()
            .zip(&cumulative)
            .map(|(&x, row)| (x, row[col]));

        chart
            .draw_series(AreaSeries::new(series, 0.0, fill.filled()))
            .map_err(|e| AppError::new(5, format!("Failed to draw area series: {e}")))?
            .label(&table.keywords[col])
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });
    }

    // Thin white boundaries between bands, original-stream style.
    for col in 0..table.keywords.len() {
        let series = table
            .samples
            .iter()
            .zip(&cumulative)
            .map(|(&x, row)| (x, row[col]));
        chart
            .draw_series(LineSeries::new(series, WHITE.stroke_width(1)))
            .map_err(|e| AppError::new(5, format!("Failed to draw band boundary: {e}")))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(&RGBColor(200, 200, 200))
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| AppError::new(5, format!("Failed to draw legend: {e}")))?;

    draw_annotations(&root, style)?;

    root.present()
        .map_err(|e| AppError::new(5, format!("Failed to write PNG '{}': {e}", path.display())))?;

    Ok(())
}

/// Subtitle under the title, caption bottom-right.
fn draw_annotations<DB>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    style: &ChartStyle,
) -> Result<(), AppError>
where
    DB: DrawingBackend,
{
    let grey = RGBColor(140, 131, 128);
    let (width, height) = root.dim_in_pixel();

    if let Some(subtitle) = &style.subtitle {
        root.draw(&Text::new(
            subtitle.clone(),
            (width as i32 / 2 - subtitle.len() as i32 * 4, 40),
            ("sans-serif", 16).into_font().color(&grey),
        ))
        .map_err(|e| AppError::new(5, format!("Failed to draw subtitle: {e}")))?;
    }

    if let Some(caption) = &style.caption {
        root.draw(&Text::new(
            caption.clone(),
            (
                width as i32 - caption.len() as i32 * 7 - 12,
                height as i32 - 18,
            ),
            ("sans-serif", 13).into_font().color(&grey),
        ))
        .map_err(|e| AppError::new(5, format!("Failed to draw caption: {e}")))?;
    }

    Ok(())
}

/// Row-wise cumulative sums: `out[row][col] = Σ values[row][0..=col]`.
fn cumulative_rows(table: &SmoothedTable) -> Vec<Vec<f64>> {
    table
        .values
        .iter()
        .map(|row| {
            let mut acc = 0.0;
            row.iter()
                .map(|v| {
                    acc += v;
                    acc
                })
                .collect()
        })
        .collect()
}

/// Resolve the configured hex colors (or the default palette) to RGB.
///
/// Always non-empty; painting cycles when there are more columns than colors.
fn resolve_colors(configured: &[String]) -> Vec<RGBColor> {
    if configured.is_empty() {
        DEFAULT_PALETTE.iter().map(|s| parse_color(s)).collect()
    } else {
        configured.iter().map(|s| parse_color(s)).collect()
    }
}

/// Parse a `#rrggbb` hex string; black on malformed input.
fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}
