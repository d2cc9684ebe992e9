//! Dashboard control model.
//!
//! Describes the page controls (site dropdown and payload slider) that feed
//! the aggregators. The page script and the CLI both read it.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::record::{PayloadRange, ALL_SITES};
use crate::table::LaunchTable;

/// Everything the page needs to draw its controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    /// Page heading.
    pub title: String,
    /// Dropdown entries, `All Sites` first.
    pub site_options: Vec<SiteOption>,
    /// Initially selected dropdown value.
    pub default_site: String,
    /// Payload range slider.
    pub slider: PayloadSlider,
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    /// Text shown to the user.
    pub label: String,
    /// Value passed to the aggregators.
    pub value: String,
}

/// Payload range slider settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSlider {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Step between selectable values.
    pub step: f64,
    /// Labelled marks.
    pub marks: Vec<SliderMark>,
    /// Initial selection.
    pub value: PayloadRange,
}

/// A labelled slider tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    /// Position on the slider.
    pub value: f64,
    /// Text under the tick.
    pub label: String,
}

impl SiteOption {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl DashboardLayout {
    /// Build the layout for a loaded table.
    ///
    /// The slider starts on the observed payload range; an empty table starts
    /// on the full slider span instead.
    #[must_use]
    pub fn new(config: &DashboardConfig, table: &LaunchTable) -> Self {
        let site_options = std::iter::once(SiteOption::new("All Sites", ALL_SITES))
            .chain(table.sites().iter().map(|site| SiteOption::new(site, site)))
            .collect();

        let marks = slider_marks(config);

        let value = table
            .payload_range()
            .unwrap_or_else(|| PayloadRange::new(config.slider_min, config.slider_max));

        Self {
            title: config.title.clone(),
            site_options,
            default_site: ALL_SITES.to_string(),
            slider: PayloadSlider {
                min: config.slider_min,
                max: config.slider_max,
                step: config.slider_step,
                marks,
                value,
            },
        }
    }

    /// The payload range the page starts with.
    #[must_use]
    pub fn initial_range(&self) -> PayloadRange {
        self.slider.value
    }
}

/// Marks at `slider_min + i * mark_interval`, empty when the config cannot
/// produce a bounded set.
#[allow(clippy::cast_precision_loss)]
fn slider_marks(config: &DashboardConfig) -> Vec<SliderMark> {
    let count = config.mark_count().unwrap_or(0);
    (0..count)
        .map(|i| {
            let value = config.slider_min + i as f64 * config.mark_interval;
            SliderMark {
                value,
                label: format!("{value}"),
            }
        })
        .collect()
}
