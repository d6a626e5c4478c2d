//! Layout host: render region, adaptive scaling, and pass options.

use geom::{Measure, Size};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Scales authored pixel values to the render size.
///
/// With an ideal width, pixel values are multiplied by
/// `render width / ideal width`; likewise for height. When both are set and
/// `use_smallest_ideal` is true, the smaller factor wins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveScaling {
    /// Width the UI was authored for.
    pub ideal_width: Option<f32>,
    /// Height the UI was authored for.
    pub ideal_height: Option<f32>,
    /// Use the smaller of the two factors.
    pub use_smallest_ideal: bool,
}

impl AdaptiveScaling {
    /// Scale factor for a render size, or `None` when scaling is off.
    pub fn factor(&self, size: Size) -> Option<f32> {
        let w = self.ideal_width.filter(|w| *w > 0.0).map(|w| size.width / w);
        let h = self.ideal_height.filter(|h| *h > 0.0).map(|h| size.height / h);
        match (w, h) {
            (Some(w), Some(h)) if self.use_smallest_ideal => Some(w.min(h)),
            (Some(w), _) => Some(w),
            (None, h) => h,
        }
    }
}

/// Options for the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Maximum measure iterations per control and pass.
    pub max_layout_cycle: usize,
    /// Log an error when a control exhausts its iterations.
    pub log_layout_cycle_errors: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_layout_cycle: 3,
            log_layout_cycle_errors: true,
        }
    }
}

impl LayoutOptions {
    /// Check option ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_layout_cycle == 0 {
            return Err(Error::Config("max_layout_cycle must be at least 1".into()));
        }
        Ok(())
    }
}

/// Serializable host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Adaptive scaling settings.
    pub scaling: AdaptiveScaling,
    /// Layout pass options.
    pub layout: LayoutOptions,
}

impl HostConfig {
    /// Load and validate a configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.layout.validate()?;
        Ok(config)
    }
}

/// The surface a tree is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Host {
    /// Render size in pixels.
    pub size: Size,
    /// Adaptive scaling settings.
    pub scaling: AdaptiveScaling,
    /// Layout pass options.
    pub options: LayoutOptions,
}

impl Host {
    /// A host of the given size with default settings.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// A host of the given size configured from `config`.
    pub fn from_config(size: Size, config: HostConfig) -> Self {
        Self {
            size,
            scaling: config.scaling,
            options: config.layout,
        }
    }

    /// Builder: set adaptive scaling.
    pub fn with_scaling(mut self, scaling: AdaptiveScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Builder: set layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Current adaptive scale factor.
    pub fn scale(&self) -> Option<f32> {
        self.scaling.factor(self.size)
    }

    /// The region handed to the root control.
    pub fn region(&self) -> Measure {
        self.size.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_variants() {
        let size = Size::new(1000.0, 400.0);
        assert_eq!(AdaptiveScaling::default().factor(size), None);
        let both = AdaptiveScaling {
            ideal_width: Some(500.0),
            ideal_height: Some(400.0),
            use_smallest_ideal: false,
        };
        assert_eq!(both.factor(size), Some(2.0));
        let smallest = AdaptiveScaling {
            use_smallest_ideal: true,
            ..both
        };
        assert_eq!(smallest.factor(size), Some(1.0));
        let height_only = AdaptiveScaling {
            ideal_height: Some(200.0),
            ..AdaptiveScaling::default()
        };
        assert_eq!(height_only.factor(size), Some(2.0));
    }

    #[test]
    fn config_from_json() -> Result<()> {
        let config = HostConfig::from_json(
            r#"{"scaling": {"ideal_width": 800.0}, "layout": {"max_layout_cycle": 5}}"#,
        )?;
        assert_eq!(config.scaling.ideal_width, Some(800.0));
        assert_eq!(config.layout.max_layout_cycle, 5);
        assert!(config.layout.log_layout_cycle_errors);
        assert_eq!(HostConfig::from_json("{}")?, HostConfig::default());

        let host = Host::from_config(Size::new(1600.0, 900.0), config);
        assert_eq!(host.scale(), Some(2.0));
        assert_eq!(host.options.max_layout_cycle, 5);
        Ok(())
    }

    #[test]
    fn config_rejects_zero_cycles() {
        let err = HostConfig::from_json(r#"{"layout": {"max_layout_cycle": 0}}"#);
        assert!(matches!(err, Err(Error::Config(_))));
        assert!(matches!(
            HostConfig::from_json("not json"),
            Err(Error::Config(_))
        ));
    }
}
