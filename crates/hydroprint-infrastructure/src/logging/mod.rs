//! Logging setup.
//!
//! - one-line JSON records written to a daily rolling file
//! - colored human-readable records on stderr (debug builds only, so stdout
//!   stays clean for command output)
//! - `log` macros bridged into `tracing`
//!
//! Every JSON record carries timestamp (ISO 8601 with offset, millisecond
//! precision), level, target, pid, tid, file/line, message, structured fields
//! and the app version.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static APP_VERSION: OnceLock<String> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const LOG_FILE_PREFIX: &str = "hydroprint.log";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
///
/// `level` is the configured default (`error` .. `trace`); `RUST_LOG` wins when set.
pub fn init_logger(log_dir: PathBuf, level: &str) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;

    let _ = LOG_DIR.set(log_dir.clone());
    let _ = APP_VERSION.set(env!("CARGO_PKG_VERSION").to_string());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonFormatter::new())
        .with_filter(file_filter(level));

    let console_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .event_format(HumanReadableFormatter::new())
                .with_filter(console_filter()),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(console_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "hydroprint::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// Default file directive for a configured level; sqlx statements stay at warn
fn default_directive(level: &str) -> String {
    format!("{level},sqlx=warn,hydroprint={level}")
}

fn file_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// One-line JSON formatter
struct JsonFormatter {
    pid: u32,
    version: String,
}

impl JsonFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
            version: APP_VERSION
                .get()
                .cloned()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        }
    }

    fn to_json(&self, event: &Event<'_>) -> serde_json::Value {
        let metadata = event.metadata();
        let thread = std::thread::current();

        let mut json = serde_json::json!({
            "timestamp": chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            "level": metadata.level().to_string(),
            "pid": self.pid,
            "tid": format!("{:?}", thread.id()),
            "thread_name": thread.name().unwrap_or("unnamed"),
            "target": metadata.target(),
            "version": self.version,
        });

        if let Some(file) = metadata.file() {
            json["file"] = serde_json::json!(file);
        }
        if let Some(line) = metadata.line() {
            json["line"] = serde_json::json!(line);
        }

        let mut visitor = JsonVisitor::new();
        event.record(&mut visitor);

        if let Some(message) = visitor.fields.remove("message") {
            json["message"] = message;
        }
        if !visitor.fields.is_empty() {
            json["fields"] = serde_json::Value::Object(visitor.fields);
        }

        json
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&self.to_json(event)).unwrap_or_default()
        )
    }
}

/// `2025-01-09 10:32:15.123 [INFO] (hydroprint::submit) pid=1 tid=ThreadId(1) user=42 - message (src/x.rs:12)`
struct HumanReadableFormatter {
    pid: u32,
}

impl HumanReadableFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

fn colored_level(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31mERROR\x1b[0m",
        Level::WARN => "\x1b[33mWARN\x1b[0m",
        Level::INFO => "\x1b[32mINFO\x1b[0m",
        Level::DEBUG => "\x1b[36mDEBUG\x1b[0m",
        Level::TRACE => "\x1b[35mTRACE\x1b[0m",
    }
}

impl<S, N> FormatEvent<S, N> for HumanReadableFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        let mut visitor = JsonVisitor::new();
        event.record(&mut visitor);

        let message = visitor
            .fields
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let fields_str: String = visitor
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != "message")
            .map(|(key, value)| format!(" {}={}", key, value))
            .collect();

        let location = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };

        writeln!(
            writer,
            "{} [{}] ({}) pid={} tid={:?}{} - {}{}",
            timestamp,
            colored_level(metadata.level()),
            metadata.target(),
            self.pid,
            std::thread::current().id(),
            fields_str,
            message,
            location
        )
    }
}

/// Collects event fields as JSON values
struct JsonVisitor {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn new() -> Self {
        Self {
            fields: serde_json::Map::new(),
        }
    }
}

impl tracing::field::Visit for JsonVisitor {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
