///! Logging configuration module
///! Structured logging through tracing-subscriber, to stdout natively or to
///! any line writer (the browser console in sigil-ui)

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String, // log level (trace, debug, info, warn, error)
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber. Fails if one is already set.
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        if self.json_format {
            registry
                .with(fmt::layer().with_target(true).json())
                .try_init()?;
        } else {
            registry
                .with(fmt::layer().with_target(true).with_ansi(true))
                .try_init()?;
        }

        tracing::info!("Logging initialized - level: {}", self.level);
        Ok(())
    }

    /// Subscriber writing one event per writer, without timestamps or colour.
    ///
    /// Suitable for targets without a system clock or environment, such as
    /// wasm32, so only the configured level applies.
    pub fn subscriber_with_writer<W>(&self, make_writer: W) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry().with(EnvFilter::new(&self.level));
        let layer = fmt::layer()
            .with_writer(make_writer)
            .with_target(true)
            .with_ansi(false)
            .without_time();

        if self.json_format {
            Box::new(registry.with(layer.json()))
        } else {
            Box::new(registry.with(layer))
        }
    }

    /// Install `subscriber_with_writer` as the global subscriber
    pub fn init_with_writer<W>(&self, make_writer: W) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        tracing::subscriber::set_global_default(self.subscriber_with_writer(make_writer))?;
        tracing::info!("Logging initialized - level: {}", self.level);
        Ok(())
    }

    /// Initialize with default settings
    pub fn init_default() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::default().init()
    }
}

/// In-memory writer for asserting on log output
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        pub(crate) fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::Captured;
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        let _ = config.init();
        assert!(config.init().is_err());
    }

    #[test]
    fn test_writer_subscriber_honours_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };

        let subscriber = config.subscriber_with_writer(move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("login succeeded");
            tracing::warn!(username = "admin", "login failed: credential mismatch");
        });

        let output = captured.text();
        assert!(output.contains("login failed: credential mismatch"));
        assert!(output.contains("username=\"admin\""));
        assert!(!output.contains("login succeeded"));
    }
}
