use crate::constants::{MAX_TEXT_SAMPLES, PRESENTATION_PART, SLIDE_PART_PREFIX, SLIDE_PART_SUFFIX};

/// Configuration options for the analyzer.
///
/// Use [`AnalyzerConfig::builder()`] to create a configuration instance.
/// This allows you to customize only the desired fields while falling back to the
/// packaging convention of PowerPoint for the rest.
///
/// # Configuration Options
///
/// | Parameter | Type | Default | Description |
/// |-----------|------|---------|-------------|
/// | `ordering_part` | `String` | `ppt/presentation.xml` | Part holding the slide order |
/// | `slide_part_prefix` | `String` | `ppt/slides/slide` | Slide part name before the position |
/// | `slide_part_suffix` | `String` | `.xml` | Slide part name after the position |
/// | `max_text_samples` | `usize` | `5` | Text samples kept per slide |
/// | `parallel` | `bool` | `true` | Whether slides are inventoried on the rayon pool |
///
/// # Example
///
/// ```
/// use pptx_inventory::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .parallel(false)
///     .build();
/// assert_eq!(config.slide_part_name(3), "ppt/slides/slide3.xml");
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub ordering_part: String,
    pub slide_part_prefix: String,
    pub slide_part_suffix: String,
    pub max_text_samples: usize,
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfigBuilder::default().build()
    }
}

impl AnalyzerConfig {
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Name of the content part expected for the slide at the 1-based `position`.
    pub fn slide_part_name(&self, position: usize) -> String {
        format!("{}{}{}", self.slide_part_prefix, position, self.slide_part_suffix)
    }
}

/// Builder for [`AnalyzerConfig`].
///
/// Allows setting individual configuration fields while falling back to defaults
/// for any unspecified values.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    ordering_part: Option<String>,
    slide_part_prefix: Option<String>,
    slide_part_suffix: Option<String>,
    max_text_samples: Option<usize>,
    parallel: Option<bool>,
}

impl AnalyzerConfigBuilder {
    pub fn ordering_part(mut self, value: impl Into<String>) -> Self {
        self.ordering_part = Some(value.into());
        self
    }

    /// Sets the naming template of slide parts: `{prefix}{position}{suffix}`.
    pub fn slide_part_template(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.slide_part_prefix = Some(prefix.into());
        self.slide_part_suffix = Some(suffix.into());
        self
    }

    pub fn max_text_samples(mut self, value: usize) -> Self {
        self.max_text_samples = Some(value);
        self
    }

    /// Sets whether slides are inventoried in parallel.
    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = Some(value);
        self
    }

    /// Builds the final [`AnalyzerConfig`] instance, applying default values for
    /// any fields that were not set.
    pub fn build(self) -> AnalyzerConfig {
        AnalyzerConfig {
            ordering_part: self.ordering_part.unwrap_or_else(|| PRESENTATION_PART.to_string()),
            slide_part_prefix: self
                .slide_part_prefix
                .unwrap_or_else(|| SLIDE_PART_PREFIX.to_string()),
            slide_part_suffix: self
                .slide_part_suffix
                .unwrap_or_else(|| SLIDE_PART_SUFFIX.to_string()),
            max_text_samples: self.max_text_samples.unwrap_or(MAX_TEXT_SAMPLES),
            parallel: self.parallel.unwrap_or(true),
        }
    }
}
