use crate::controllers::interactive::config::{DEFAULT_GENERATOR_URL, ExplorerConfig};
use clap::Args;
use std::time::Duration;
use url::Url;

/// Generator and view options shared by every binary.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Base URL of the fractal generator
    #[arg(long, env = "FRACTAL_GENERATOR_URL", default_value = DEFAULT_GENERATOR_URL)]
    pub generator_url: Url,

    /// Quiet period after the last change before an image is requested
    #[arg(long, env = "FRACTAL_DEBOUNCE_MS", default_value_t = 100)]
    pub debounce_ms: u64,

    /// Seconds to wait for the generator before giving up on a load
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Bookmarked view, e.g. "x=-0.75&y=0.1&size=0.5&maxiter=500"
    #[arg(long, default_value = "")]
    pub query: String,
}

impl GeneratorArgs {
    #[must_use]
    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig::new(self.generator_url.clone())
            .with_debounce(Duration::from_millis(self.debounce_ms))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        generator: GeneratorArgs,
    }

    #[test]
    fn test_explicit_flags_build_config() {
        let cli = TestCli::parse_from([
            "test",
            "--generator-url",
            "https://fractals.example/api",
            "--debounce-ms",
            "250",
            "--query",
            "maxiter=50",
        ]);

        let config = cli.generator.explorer_config();

        assert_eq!(config.generator_url.as_str(), "https://fractals.example/api");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(cli.generator.query, "maxiter=50");
        assert_eq!(cli.generator.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let result = TestCli::try_parse_from(["test", "--generator-url", "not a url"]);

        assert!(result.is_err());
    }
}
