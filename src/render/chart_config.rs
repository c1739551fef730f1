use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

/// Axis carrying the category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    #[default]
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Per-dataset type override for mixed charts (a line over bars).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    pub data: Vec<f64>,
    /// One color for the whole series, or one per data point.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background_colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl ChartDataset {
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            label: None,
            kind: None,
            data,
            background_colors: Vec::new(),
            border_color: None,
            border_width: None,
            bar_percentage: None,
            fill: None,
            tension: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_colors = vec![color];
        self
    }

    #[must_use]
    pub fn with_backgrounds(mut self, colors: Vec<Color>) -> Self {
        self.background_colors = colors;
        self
    }

    #[must_use]
    pub fn with_border(mut self, color: Color, width: f64) -> Self {
        self.border_color = Some(color);
        self.border_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_bar_percentage(mut self, bar_percentage: f64) -> Self {
        self.bar_percentage = Some(bar_percentage);
        self
    }

    /// Draws this series as an unfilled line on top of the chart's base type.
    #[must_use]
    pub fn as_line(mut self, tension: f64) -> Self {
        self.kind = Some(ChartKind::Line);
        self.fill = Some(false);
        self.tension = Some(tension);
        self
    }

    fn validate(&self, index: usize, label_count: usize) -> DeckResult<()> {
        if self.data.is_empty() {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} must contain at least one value"
            )));
        }
        if label_count > 0 && self.data.len() != label_count {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} has {} values for {label_count} labels",
                self.data.len()
            )));
        }
        if self.data.iter().any(|value| !value.is_finite()) {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} values must be finite"
            )));
        }
        if self.background_colors.len() > 1 && self.background_colors.len() != self.data.len() {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} needs one background color or one per value"
            )));
        }
        for color in self.background_colors.iter().chain(self.border_color.iter()) {
            color.validate()?;
        }
        if self
            .border_width
            .is_some_and(|width| !width.is_finite() || width < 0.0)
        {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} border width must be finite and >= 0"
            )));
        }
        if self
            .bar_percentage
            .is_some_and(|bar| !bar.is_finite() || bar <= 0.0 || bar > 1.0)
        {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} bar percentage must be in (0, 1]"
            )));
        }
        if self
            .tension
            .is_some_and(|tension| !tension.is_finite() || !(0.0..=1.0).contains(&tension))
        {
            return Err(DeckError::InvalidData(format!(
                "dataset {index} line tension must be in [0, 1]"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AxisOptions {
    #[serde(default)]
    pub begin_at_zero: bool,
    #[serde(default)]
    pub stacked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
    #[serde(default)]
    pub position: LegendPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<Color>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: LegendPosition::Top,
            label_color: None,
        }
    }
}

impl LegendOptions {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            display: false,
            ..Self::default()
        }
    }
}

/// Display options handed to the chart backend unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(default)]
    pub index_axis: IndexAxis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisOptions>,
    #[serde(default)]
    pub legend: LegendOptions,
    #[serde(default = "default_tooltip_enabled")]
    pub tooltip_enabled: bool,
    /// Doughnut hole size as a percentage of the radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutout_percent: Option<f64>,
}

fn default_tooltip_enabled() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            index_axis: IndexAxis::X,
            x_axis: None,
            y_axis: None,
            legend: LegendOptions::default(),
            tooltip_enabled: true,
            cutout_percent: None,
        }
    }
}

/// Everything a backend needs to create one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    #[serde(default)]
    pub options: ChartOptions,
}

/// Configuration identity: chart type plus the type and length of each series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartShape {
    pub kind: ChartKind,
    pub datasets: Vec<(ChartKind, usize)>,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind, labels: Vec<String>) -> Self {
        Self {
            kind,
            labels,
            datasets: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: ChartDataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Shape check only; the business meaning of values is not inspected.
    pub fn validate(&self) -> DeckResult<()> {
        if self.datasets.is_empty() {
            return Err(DeckError::InvalidData(
                "chart needs at least one dataset".to_owned(),
            ));
        }
        for (index, dataset) in self.datasets.iter().enumerate() {
            dataset.validate(index, self.labels.len())?;
        }
        if self
            .options
            .cutout_percent
            .is_some_and(|cutout| !cutout.is_finite() || !(0.0..100.0).contains(&cutout))
        {
            return Err(DeckError::InvalidData(
                "doughnut cutout must be in [0, 100)".to_owned(),
            ));
        }
        if let Some(color) = self.options.legend.label_color {
            color.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn shape(&self) -> ChartShape {
        ChartShape {
            kind: self.kind,
            datasets: self
                .datasets
                .iter()
                .map(|dataset| (dataset.kind.unwrap_or(self.kind), dataset.data.len()))
                .collect(),
        }
    }
}
