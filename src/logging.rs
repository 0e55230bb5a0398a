use crate::pipeline::PipelineResult;
use crate::utils::truncate_str;
use std::fmt::Display;
use tracing::{error, info};

#[cfg(feature = "logging")]
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_appender::rolling::{RollingFileAppender, Rotation};
#[cfg(feature = "logging")]
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[cfg(feature = "logging")]
#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

#[cfg(feature = "logging")]
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: false,
        }
    }
}

fn create_separator(width: usize, ch: char) -> String {
    std::iter::repeat_n(ch, width).collect()
}

fn wrap_text(text: &str, width: usize) -> String {
    let mut wrapped = String::new();
    let mut line_length = 0;

    for word in text.split_whitespace() {
        if line_length + word.len() + 1 > width {
            wrapped.push('\n');
            wrapped.push_str("  ");
            wrapped.push_str(word);
            line_length = word.len() + 2;
        } else {
            if line_length > 0 {
                wrapped.push(' ');
                line_length += 1;
            }
            wrapped.push_str(word);
            line_length += word.len();
        }
    }
    wrapped
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Human-readable summary of a pipeline run
pub fn log_pipeline_card(result: &PipelineResult) {
    const CARD_WIDTH: usize = 80;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 2;

    let meta = &result.meta;
    let sources = [
        ("scraped", meta.sources.scraped),
        ("llm", meta.sources.llm),
        ("ai", meta.sources.ai_generated),
    ]
    .into_iter()
    .filter(|(_, used)| *used)
    .map(|(name, _)| name.to_string())
    .collect::<Vec<_>>();

    let horizontal_line = "═".repeat(CARD_WIDTH - 2);

    info!(
        "\n╔{}╗\n\
         Name: {}\n\
         Type: {}\n\
         Headline: {}\n\
         Sources: {}\n\
         Confidence: {}\n\
         Missing: {}\n\
         Generated: {}\n\
         Warnings: {}\n\
         Took: {} ms\n\
         ╚{}╝",
        horizontal_line,
        truncate_str(&result.data.brand.name, CONTENT_WIDTH - 6),
        result.data.brand.business_type,
        wrap_text(&result.data.hero.headline, CONTENT_WIDTH - 10),
        or_none(&sources),
        meta.confidence.as_str(),
        wrap_text(&or_none(&meta.missing_fields), CONTENT_WIDTH - 9),
        wrap_text(&or_none(&meta.generated_fields), CONTENT_WIDTH - 11),
        wrap_text(&or_none(&result.warnings), CONTENT_WIDTH - 10),
        meta.processing_time_ms,
        horizontal_line,
    );
}

pub fn log_error_card<E: Display + std::error::Error>(url: &str, error: &E) {
    const CARD_WIDTH: usize = 70;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 8;

    let top_bottom = create_separator(CARD_WIDTH - 2, '═');
    let middle = create_separator(CARD_WIDTH - 2, '─');

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (caused by: {source})");
    }

    error!(
        "\n╔═{}═╗\n\
         ║ URL: {:<width$} ║\n\
         ║{}║\n\
         ║ Error: {:<width$} ║\n\
         ╚═{}═╝",
        top_bottom,
        truncate_str(url, CONTENT_WIDTH),
        middle,
        truncate_str(&error_details, CONTENT_WIDTH),
        top_bottom,
        width = CONTENT_WIDTH
    );
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides `config.log_level`.
#[cfg(feature = "logging")]
pub fn setup_logging(config: LogConfig) -> Result<(), crate::PipelineError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir).map_err(|e| {
            crate::PipelineError::InvalidConfiguration(format!(
                "Failed to create log directory {}: {e}",
                config.log_dir.display()
            ))
        })?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "pagesmith.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| {
            crate::PipelineError::InvalidConfiguration(format!(
                "Failed to set global default subscriber: {e}"
            ))
        })?;

    tracing::debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}

/// Scoped subscriber for tests; dropped at end of scope
#[cfg(feature = "logging")]
pub struct LogLevelGuard {
    _guard: tracing::dispatcher::DefaultGuard,
}

#[cfg(feature = "logging")]
impl LogLevelGuard {
    pub fn set_level(level: &str) -> Self {
        let filter = EnvFilter::new(level);
        let subscriber = tracing_subscriber::registry()
            .with(subscriber_fmt::layer().with_test_writer())
            .with(filter);

        LogLevelGuard {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, "one two\n  three\n  four");
    }

    #[test]
    fn test_cards_do_not_panic() {
        let result =
            crate::pipeline::fallback_result(Some("https://example.com"), std::time::Instant::now());
        log_pipeline_card(&result);
        log_error_card("https://example.com", &crate::PipelineError::LocalhostBlocked);
    }
}
