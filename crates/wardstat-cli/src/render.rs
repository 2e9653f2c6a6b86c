//! Terminal bar charts.

use colored::Colorize;
use wardstat::{Chart, ChartRenderer, ChartStyle, Theme};

/// Draws charts as horizontal bars on stdout.
pub struct TerminalRenderer {
    style: ChartStyle,
}

impl TerminalRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Lay out `chart` as text, one bar per (category, series) pair.
    pub fn draw(&self, chart: &Chart) -> String {
        let style = &self.style;
        let mut lines = Vec::new();

        lines.push(chart.title.cyan().bold().to_string());
        lines.push(format!("{} / {}", chart.x_label, chart.y_label).dimmed().to_string());

        let scale = chart.max_magnitude();
        let series_width = chart
            .series
            .iter()
            .filter_map(|s| s.name.as_ref())
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(0);
        let axis = match style.theme {
            Theme::WhiteGrid => '│',
            Theme::Plain => ' ',
        };

        for (c, category) in chart.categories.iter().enumerate() {
            for (s, series) in chart.series.iter().enumerate() {
                let label = if s == 0 {
                    fit(category, style.label_width)
                } else {
                    String::new()
                };
                let hue = match &series.name {
                    Some(name) => format!(" {:<w$}", name, w = series_width),
                    None => String::new(),
                };

                let (bar, value) = match series.values[c] {
                    Some(v) => {
                        let len = bar_len(v, scale, style.width);
                        let glyphs = style.bar_glyph.to_string().repeat(len);
                        let bar = if v < 0.0 { glyphs.red() } else { glyphs.green() };
                        (
                            format!("{}{}", bar, self.grid(style.width - len)),
                            format!("{:.*}", style.precision, v),
                        )
                    }
                    None => (self.grid(style.width), "-".to_string()),
                };

                lines.push(format!(
                    "{:<lw$}{} {}{} {}",
                    label,
                    hue,
                    axis,
                    bar,
                    value,
                    lw = style.label_width
                ));
            }
        }

        if style.theme == Theme::WhiteGrid {
            let indent = style.label_width + if series_width > 0 { series_width + 1 } else { 0 };
            lines.push(format!(
                "{} └{}",
                " ".repeat(indent),
                "─".repeat(style.width)
            ));
            lines.push(format!(
                "{}  0{:>w$}",
                " ".repeat(indent),
                format!("{:.*}", style.precision, scale),
                w = style.width.saturating_sub(1)
            ));
        }

        lines.join("\n")
    }

    /// Padding after a bar: dotted guide under the white-grid theme.
    fn grid(&self, len: usize) -> String {
        match self.style.theme {
            Theme::WhiteGrid => "·".repeat(len).dimmed().to_string(),
            Theme::Plain => " ".repeat(len),
        }
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, chart: &Chart) -> wardstat::Result<()> {
        println!("{}", self.draw(chart));
        println!();
        Ok(())
    }
}

fn bar_len(value: f64, scale: f64, width: usize) -> usize {
    if scale == 0.0 {
        return 0;
    }
    ((value.abs() / scale) * width as f64).round() as usize
}

/// Truncate to `width` characters, marking the cut.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
