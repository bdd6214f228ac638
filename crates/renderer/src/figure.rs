//! The composite report figure: a title over three panels in one row.

use image::RgbaImage;
use tracing::debug;

use report_common::ChartRequest;

use crate::bar::{draw_bar_panel, Bar};
use crate::panel::{PanelFrame, Rect};
use crate::pie::draw_pie_panel;
use crate::png::create_png_auto;
use crate::style::ChartTheme;
use crate::text::{draw_text_centered, fonts, text_size};
use crate::trend::{draw_trend_panel, Series};
use crate::RenderError;

/// Figure size in inches.
pub const FIGURE_WIDTH_IN: f32 = 15.0;
pub const FIGURE_HEIGHT_IN: f32 = 4.5;

/// Output resolution.
pub const FIGURE_DPI: u32 = 140;

const SUPTITLE_PT: f32 = 14.0;

/// Owns the pixel buffer for one render. Encoding consumes it.
pub struct Figure {
    canvas: RgbaImage,
    theme: ChartTheme,
    dpi: u32,
}

impl Figure {
    pub fn new(width_in: f32, height_in: f32, dpi: u32, theme: ChartTheme) -> Self {
        let width = (width_in * dpi as f32).round().max(1.0) as u32;
        let height = (height_in * dpi as f32).round().max(1.0) as u32;
        Self {
            canvas: RgbaImage::from_pixel(width, height, theme.background),
            theme,
            dpi,
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Draw the bold figure title and return the area below it.
    pub fn draw_suptitle(&mut self, title: &str) -> Result<Rect, RenderError> {
        let frame = PanelFrame::new(fonts()?, self.theme, self.dpi);
        let style = frame.bold(SUPTITLE_PT);
        let (_, h) = text_size(style.font, style.scale, title);
        let band = h + frame.px(12.0);
        let width = self.width() as i32;
        draw_text_centered(&mut self.canvas, &style, width / 2, band / 2 + frame.px(2.0), title);
        Ok(Rect::new(0, band, width, self.height() as i32 - band))
    }

    /// Split `area` into `count` equal columns with a small gutter.
    pub fn columns(&self, area: Rect, count: usize) -> Vec<Rect> {
        let count = count.max(1) as i32;
        let gutter = (self.dpi as f32 * 0.1).round() as i32;
        let col_w = area.w / count;
        (0..count)
            .map(|i| {
                Rect::new(area.x + i * col_w, area.y, col_w, area.h).inset(gutter, 0, gutter, gutter)
            })
            .collect()
    }

    /// Encode as PNG, releasing the canvas.
    pub fn encode_png(self) -> Result<Vec<u8>, RenderError> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        create_png_auto(self.canvas.as_raw(), w, h, Some(self.dpi)).map_err(RenderError::Encode)
    }
}

/// Title line for a report.
pub fn report_title(request: &ChartRequest) -> String {
    format!("Finance Report ({})", request.period)
}

/// Draw the three report panels for `request` and encode the figure as PNG.
pub fn render_report(request: &ChartRequest) -> Result<Vec<u8>, RenderError> {
    let mut figure = Figure::new(
        FIGURE_WIDTH_IN,
        FIGURE_HEIGHT_IN,
        FIGURE_DPI,
        ChartTheme::default(),
    );
    draw_report(&mut figure, request)?;
    figure.encode_png()
}

/// Compose the report onto an existing figure.
pub fn draw_report(figure: &mut Figure, request: &ChartRequest) -> Result<(), RenderError> {
    let theme = figure.theme;
    let frame = PanelFrame::new(fonts()?, theme, figure.dpi);

    let body = figure.draw_suptitle(&report_title(request))?;
    let columns = figure.columns(body, 3);
    let canvas = &mut figure.canvas;

    draw_bar_panel(
        canvas,
        &frame,
        columns[0],
        &[
            Bar { label: "Income", value: request.income_total, color: theme.income },
            Bar { label: "Expense", value: request.expense_total, color: theme.expense },
        ],
    );

    let labels: Vec<&str> = request
        .category_breakdown
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    let sizes: Vec<f64> = request.category_breakdown.iter().map(|c| c.total).collect();
    draw_pie_panel(canvas, &frame, columns[1], &labels, &sizes);

    let dates: Vec<&str> = request.trend.iter().map(|t| t.date.as_str()).collect();
    let series = [
        Series {
            name: "Income",
            values: request.trend.iter().map(|t| t.income).collect(),
            color: theme.income,
        },
        Series {
            name: "Expense",
            values: request.trend.iter().map(|t| t.expense).collect(),
            color: theme.expense,
        },
    ];
    draw_trend_panel(canvas, &frame, columns[2], &dates, &series);

    debug!(
        period = %request.period,
        categories = labels.len(),
        trend_points = dates.len(),
        "Report figure composed"
    );
    Ok(())
}
