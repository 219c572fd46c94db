//! Spending pie chart
//!
//! Renders category totals as an SVG pie chart with plotters.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::debug;

use super::summary::CategoryTotal;
use crate::config::settings::ChartSettings;
use crate::error::{BudgetError, BudgetResult};

/// Image shown in place of a chart when there is nothing to plot
pub const PLACEHOLDER_URL: &str = "https://via.placeholder.com/300?text=No+Data";

const START_ANGLE: f64 = 140.0;

const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// A rendered chart, or the placeholder when there was no data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartImage {
    Placeholder,
    Svg(String),
}

impl ChartImage {
    /// Whether a real chart was drawn
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// A URI that can be used directly as an image source
    pub fn to_data_uri(&self) -> String {
        match self {
            Self::Placeholder => PLACEHOLDER_URL.to_string(),
            Self::Svg(svg) => format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)),
        }
    }

    /// Save the SVG to `path`
    ///
    /// Returns `false` without writing anything for the placeholder.
    pub fn write_to(&self, path: &Path) -> BudgetResult<bool> {
        match self {
            Self::Placeholder => Ok(false),
            Self::Svg(svg) => {
                fs::write(path, svg).map_err(|e| {
                    BudgetError::Io(format!("Failed to write chart {}: {}", path.display(), e))
                })?;
                Ok(true)
            }
        }
    }
}

/// Draw a pie chart of expense totals, one slice per category
///
/// Slices are labelled with the category and its share to one decimal place.
pub fn render_pie_chart(
    totals: &[CategoryTotal],
    settings: &ChartSettings,
) -> BudgetResult<ChartImage> {
    if totals.is_empty() {
        return Ok(ChartImage::Placeholder);
    }

    let sizes: Vec<f64> = totals.iter().map(|t| t.total.as_f64()).collect();
    let labels: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
    let colors: Vec<RGBColor> = (0..totals.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let (width, height) = (settings.width, settings.height);
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 14).into_font().color(&BLACK));

        root.draw(&pie).map_err(chart_error)?;
        root.present().map_err(chart_error)?;
    }

    debug!(slices = totals.len(), bytes = svg.len(), "rendered pie chart");
    Ok(ChartImage::Svg(svg))
}

fn chart_error(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Chart(e.to_string())
}
