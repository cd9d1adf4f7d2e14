use std::time::Duration;
use url::Url;

pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:8080/fractal";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Per-notch zoom for a wheel roll towards the user (`delta_y > 0`).
pub const DEFAULT_WHEEL_ZOOM_FACTOR: f64 = 0.5;
pub const DEFAULT_DOUBLE_CLICK_ZOOM_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub generator_url: Url,
    pub debounce: Duration,
    pub wheel_zoom_factor: f64,
    pub double_click_zoom_factor: f64,
}

impl ExplorerConfig {
    #[must_use]
    pub fn new(generator_url: Url) -> Self {
        Self {
            generator_url,
            debounce: DEFAULT_DEBOUNCE,
            wheel_zoom_factor: DEFAULT_WHEEL_ZOOM_FACTOR,
            double_click_zoom_factor: DEFAULT_DOUBLE_CLICK_ZOOM_FACTOR,
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let generator_url =
            Url::parse(DEFAULT_GENERATOR_URL).expect("default generator url is valid");

        Self::new(generator_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_documented_values() {
        let config = ExplorerConfig::default();

        assert_eq!(config.generator_url.as_str(), DEFAULT_GENERATOR_URL);
        assert_eq!(config.debounce, Duration::from_millis(100));
        assert_eq!(config.wheel_zoom_factor, 0.5);
        assert_eq!(config.double_click_zoom_factor, 0.5);
    }

    #[test]
    fn test_with_debounce_overrides_only_the_delay() {
        let config = ExplorerConfig::default().with_debounce(Duration::from_millis(5));

        assert_eq!(config.debounce, Duration::from_millis(5));
        assert_eq!(config.wheel_zoom_factor, DEFAULT_WHEEL_ZOOM_FACTOR);
    }
}
