//! Drawing a [`LineChart`] with plotters.

use crate::chart::{format_tick, LineChart};
use crate::observation::Observation;
use crate::palette::{parse_color, Palette};
use crate::summary::{append_totals, summarize};
use chrono::{DateTime, Utc};
use cvm_common::{Result, UiError};
use cvm_config::GraphSettings;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

/// Gap between a legend swatch and its label.
const LEGEND_LABEL_GAP: u32 = 10;

/// Line graph renderer for one set of graph settings.
#[derive(Debug, Clone)]
pub struct LineGraphRenderer {
    settings: GraphSettings,
    palette: Palette,
    background: RGBColor,
    axis: RGBColor,
}

impl LineGraphRenderer {
    /// Create a renderer from validated settings.
    pub fn new(settings: GraphSettings) -> Result<Self> {
        settings.validate().map_err(|e| {
            UiError::validation_field(format!("invalid graph settings: {e}"), "graph")
        })?;

        let palette = Palette::from_hex(&settings.palette)?;
        let background = parse_color(&settings.background_color)?;
        let axis = parse_color(&settings.axis_color)?;

        Ok(Self {
            settings,
            palette,
            background,
            axis,
        })
    }

    /// Settings in use.
    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Summarize `data`, append the total series to it, and build the chart.
    ///
    /// `data` is only extended when the chart can be built.
    pub fn prepare(
        &self,
        data: &mut Vec<Observation>,
        y_label: &str,
        y_ticks: &[f64],
    ) -> Result<LineChart> {
        let total_label = &self.settings.total_label;
        let summary = summarize(data, total_label);
        let appended = append_totals(data, &summary, total_label);

        match LineChart::build(data, &summary, y_label, y_ticks, &self.palette) {
            Ok(chart) => {
                debug!(
                    lines = chart.lines.len(),
                    years = chart.year_ticks.len(),
                    legend = chart.legend,
                    "Built line chart"
                );
                Ok(chart)
            }
            Err(e) => {
                data.truncate(data.len() - appended);
                Err(e)
            }
        }
    }

    /// Draw a chart onto a drawing area of the configured size.
    pub fn render_chart<DB: DrawingBackend>(
        &self,
        chart: &LineChart,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        root.fill(&self.background)?;

        let margin = self.settings.margin;
        let mut context = ChartBuilder::on(root)
            .margin_top(margin)
            .margin_right(margin)
            .x_label_area_size(margin)
            .y_label_area_size(margin)
            .build_cartesian_2d(
                chart.time_range.clone().with_key_points(chart.year_ticks.clone()),
                (0f64..chart.value_ceiling).with_key_points(chart.value_ticks.clone()),
            )?;

        let year_label = |x: &DateTime<Utc>| x.format("%Y").to_string();
        let value_label = |y: &f64| format_tick(*y);

        let mut mesh = context.configure_mesh();
        mesh.disable_mesh()
            .axis_style(self.axis.stroke_width(1))
            .set_all_tick_mark_size(self.settings.tick_size)
            .label_style(self.font())
            .axis_desc_style(self.font())
            .x_label_formatter(&year_label)
            .y_label_formatter(&value_label);
        if !chart.y_label.is_empty() {
            mesh.y_desc(chart.y_label.as_str());
        }
        mesh.draw()?;

        let swatch_width = i32::try_from(self.settings.legend_swatch_width).unwrap_or(0);
        let swatch_stroke = self.settings.legend_swatch_stroke;

        for line in &chart.lines {
            let color = line.color;
            let series = context.draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(self.settings.line_width),
            ))?;

            if chart.legend {
                series.label(line.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + swatch_width, y)], color.stroke_width(swatch_stroke))
                });
            }
        }

        if chart.legend {
            context
                .configure_series_labels()
                .position(SeriesLabelPosition::Coordinate(self.settings.legend_offset_x, 0))
                .margin(0)
                .legend_area_size(self.settings.legend_swatch_width + LEGEND_LABEL_GAP)
                .label_font(self.font())
                .background_style(TRANSPARENT)
                .border_style(TRANSPARENT)
                .draw()?;
        }

        Ok(())
    }

    fn font(&self) -> TextStyle<'_> {
        FontDesc::new(
            FontFamily::Name(&self.settings.font_family),
            f64::from(self.settings.font_size),
            FontStyle::Normal,
        )
        .color(&self.axis)
    }

    /// Render to an SVG document.
    ///
    /// The synthesized total observations are appended to `data`.
    pub fn render_to_svg(
        &self,
        data: &mut Vec<Observation>,
        y_label: &str,
        y_ticks: &[f64],
    ) -> Result<String> {
        let chart = self.prepare(data, y_label, y_ticks)?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.render_chart(&chart, &root)?;
            root.present()?;
        }

        info!(
            series = chart.lines.len(),
            observations = data.len(),
            bytes = svg.len(),
            "Rendered line graph"
        );
        Ok(svg)
    }

    /// Render to an SVG file.
    pub fn render_to_file(
        &self,
        data: &mut Vec<Observation>,
        y_label: &str,
        y_ticks: &[f64],
        path: &Path,
    ) -> Result<()> {
        let chart = self.prepare(data, y_label, y_ticks)?;

        let root = SVGBackend::new(path, self.size()).into_drawing_area();
        self.render_chart(&chart, &root)?;
        root.present()?;

        info!("Successfully rendered line graph to {}", path.display());
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.settings.width, self.settings.height)
    }
}
