use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::Result;

/// Directives used when `RUST_LOG` is unset.
///
/// Covers shelf itself, resolver errors from async-graphql and the request
/// rejections axum reports under `axum::rejection`.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("shelf={level},async_graphql={level},axum::rejection=trace")
}

pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// JSON lines written to a daily-rotated file named after `log_path`.
pub fn file_layer(log_path: &Path) -> Result<impl Layer<Registry> + Send + Sync + 'static> {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let prefix = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shelf.log".to_string());
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(dir)?;

    Ok(fmt::layer().with_writer(appender).with_ansi(false).json())
}

/// Install the global subscriber: compact stderr output, plus the JSON file
/// layer when `log_file` is given.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let file_layer = log_file.map(file_layer).transpose()?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(file_layer)
        .with(default_filter(verbose))
        .with(stderr_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(false),
            "shelf=info,async_graphql=info,axum::rejection=trace"
        );
        assert!(default_directives(true).starts_with("shelf=debug,async_graphql=debug"));
    }

    #[test]
    fn test_file_layer_writes_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs").join("shelf.log");

        let subscriber = tracing_subscriber::registry().with(file_layer(&log_path).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(table = "books", "Store call failed");
        });

        let files: Vec<_> = std::fs::read_dir(temp_dir.path().join("logs"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("shelf.log"));

        let contents = std::fs::read_to_string(&files[0]).unwrap();
        let line: Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["message"], "Store call failed");
        assert_eq!(line["fields"]["table"], "books");
    }
}
