//! Chart descriptions handed to the presentation layer.
//!
//! Analyzers never draw anything. They describe a grouped bar chart (categories
//! along the x axis, one series per hue value) and a [`ChartRenderer`] decides
//! how to show it. Styling lives in [`ChartStyle`], which a renderer receives
//! when it is constructed.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WardstatError};
use crate::input::Value;

/// How bar heights were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Number of rows in the group.
    Count,
    /// Mean of the non-missing values in the group.
    Mean,
}

/// One hue level: a value per category, aligned with [`Chart::categories`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Hue label, `None` for an unsegmented chart.
    pub name: Option<String>,
    /// `None` where the group had no observations.
    pub values: Vec<Option<f64>>,
}

/// A grouped bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub aggregate: Aggregate,
    /// Categories in first-seen order.
    pub categories: Vec<String>,
    /// Series in first-seen order.
    pub series: Vec<Series>,
}

impl Chart {
    /// Largest bar magnitude, used to scale rendering. Negative bars count
    /// by their absolute value; 0 for a chart with no bars.
    pub fn max_magnitude(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Bar for `category` in the series named `series`.
    pub fn value(&self, category: &str, series: Option<&str>) -> Option<f64> {
        let c = self.categories.iter().position(|x| x == category)?;
        self.series
            .iter()
            .find(|s| s.name.as_deref() == series)
            .and_then(|s| s.values[c])
    }
}

/// Accumulates (category, hue, value) observations into a [`Chart`].
pub struct ChartBuilder {
    title: String,
    x_label: String,
    y_label: String,
    aggregate: Aggregate,
    categories: IndexSet<String>,
    series: IndexSet<Option<String>>,
    cells: HashMap<(usize, usize), (f64, usize)>,
}

impl ChartBuilder {
    pub fn new(title: impl Into<String>, aggregate: Aggregate) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            aggregate,
            categories: IndexSet::new(),
            series: IndexSet::new(),
            cells: HashMap::new(),
        }
    }

    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Record one row.
    ///
    /// Rows with a missing category or hue are dropped. For [`Aggregate::Mean`]
    /// a missing value still registers the category but contributes no bar.
    pub fn observe(&mut self, category: &Value, hue: Option<&Value>, value: &Value) {
        let Some(category) = category.as_category() else {
            return;
        };
        let hue = match hue {
            Some(h) => match h.as_category() {
                Some(h) => Some(h),
                None => return,
            },
            None => None,
        };

        let (c, _) = self.categories.insert_full(category);
        let (s, _) = self.series.insert_full(hue);
        let cell = self.cells.entry((c, s));

        match self.aggregate {
            Aggregate::Count => {
                let acc = cell.or_insert((0.0, 0));
                acc.0 += 1.0;
                acc.1 += 1;
            }
            Aggregate::Mean => {
                if let Some(v) = value.as_number() {
                    let acc = cell.or_insert((0.0, 0));
                    acc.0 += v;
                    acc.1 += 1;
                }
            }
        }
    }

    pub fn build(self) -> Chart {
        let series = self
            .series
            .iter()
            .enumerate()
            .map(|(s, name)| Series {
                name: name.clone(),
                values: (0..self.categories.len())
                    .map(|c| {
                        self.cells.get(&(c, s)).map(|&(sum, n)| match self.aggregate {
                            Aggregate::Count => sum,
                            Aggregate::Mean => sum / n as f64,
                        })
                    })
                    .collect(),
            })
            .collect();

        Chart {
            title: self.title,
            x_label: self.x_label,
            y_label: self.y_label,
            aggregate: self.aggregate,
            categories: self.categories.into_iter().collect(),
            series,
        }
    }
}

/// Overall look of rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light grid lines behind the bars.
    #[default]
    WhiteGrid,
    /// Bars only.
    Plain,
}

/// Style handed to a renderer at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub theme: Theme,
    /// Width of the longest bar, in terminal columns.
    pub width: usize,
    /// Glyph repeated to draw a bar.
    pub bar_glyph: char,
    /// Decimal places for printed values.
    pub precision: usize,
    /// Column reserved for category labels.
    pub label_width: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            theme: Theme::WhiteGrid,
            width: 40,
            bar_glyph: '█',
            precision: 2,
            label_width: 18,
        }
    }
}

impl ChartStyle {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(WardstatError::Config("chart width must be at least 1".to_string()));
        }
        if self.bar_glyph.is_whitespace() {
            return Err(WardstatError::Config("chart bar_glyph must be visible".to_string()));
        }
        Ok(())
    }
}

/// The presentation collaborator.
pub trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

/// Keeps every chart it is given. Useful for tests and for deferred output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<Chart>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}
