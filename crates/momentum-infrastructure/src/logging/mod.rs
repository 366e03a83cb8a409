//! Process-wide tracing setup.
//!
//! Two sinks share one registry:
//! - a daily-rolling file with one JSON object per line (always on)
//! - a colored, human-readable stdout layer (debug builds only)
//!
//! Every JSON line carries `timestamp` (ISO 8601, local offset, millisecond
//! precision), `level`, `target`, `pid`, `tid`, `file`/`line` when known,
//! `message`, extra `fields`, `source` (`backend` or `frontend`) and the
//! package `version`. `log` records are bridged in through [`LogTracer`].

use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{Event, Level, Subscriber};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

pub const LOG_FILE_PREFIX: &str = "momentum.log";

static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logger(log_dir: &Path) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let (non_blocking, guard) =
        tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonLineFormatter::new())
        .with_filter(env_filter(default_file_directives()));

    let stdout_layer = cfg!(debug_assertions).then(|| {
        fmt::layer()
            .with_ansi(true)
            .event_format(ConsoleFormatter::new())
            .with_filter(env_filter("debug,momentum=trace,sqlx=warn"))
    });

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "momentum::logging",
        source = "backend",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "debug" } else { "release" },
        "Logger initialized"
    );

    Ok(())
}

fn default_file_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,momentum=trace,sqlx=warn"
    } else {
        "info,sqlx=warn"
    }
}

/// `RUST_LOG` wins over `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// A log line shipped by a signed-in browser client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientLog {
    pub level: String,
    pub target: String,
    pub message: String,
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

/// Unknown levels are logged at INFO.
pub fn client_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

macro_rules! emit_client_log {
    ($macro:ident, $log:ident, $user_id:ident) => {
        tracing::$macro!(
            target: "frontend",
            source = "frontend",
            user_id = %$user_id,
            frontend_target = %$log.target,
            fields = ?$log.fields,
            "{}",
            $log.message
        )
    };
}

/// Forward a client log line into the tracing pipeline, tagged with the
/// user that sent it.
pub fn log_from_client(log: &ClientLog, user_id: &str) {
    match client_level(&log.level) {
        Level::ERROR => emit_client_log!(error, log, user_id),
        Level::WARN => emit_client_log!(warn, log, user_id),
        Level::DEBUG => emit_client_log!(debug, log, user_id),
        Level::TRACE => emit_client_log!(trace, log, user_id),
        _ => emit_client_log!(info, log, user_id),
    }
}

struct JsonLineFormatter {
    pid: u32,
    version: &'static str,
}

impl JsonLineFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonLineFormatter
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
        let thread = std::thread::current();

        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);
        let mut fields = visitor.fields;

        let message = fields.remove("message").unwrap_or(serde_json::Value::Null);
        let source = fields
            .remove("source")
            .unwrap_or_else(|| serde_json::json!("backend"));

        let mut line = serde_json::json!({
            "timestamp": chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            "level": metadata.level().to_string(),
            "source": source,
            "pid": self.pid,
            "tid": format!("{:?}", thread.id()),
            "thread_name": thread.name().unwrap_or("unnamed"),
            "target": metadata.target(),
            "version": self.version,
            "message": message,
        });

        if let Some(file) = metadata.file() {
            line["file"] = serde_json::json!(file);
        }
        if let Some(no) = metadata.line() {
            line["line"] = serde_json::json!(no);
        }
        if !fields.is_empty() {
            line["fields"] = serde_json::Value::Object(fields);
        }

        writeln!(writer, "{}", serde_json::to_string(&line).unwrap_or_default())
    }
}

/// `2024-06-01 10:32:15.123 [INFO] (target) pid=1 tid=ThreadId(7) k=v: message (file:line)`
struct ConsoleFormatter {
    pid: u32,
}

impl ConsoleFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
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

        let level = match *metadata.level() {
            Level::ERROR => "\x1b[31mERROR\x1b[0m",
            Level::WARN => "\x1b[33mWARN\x1b[0m",
            Level::INFO => "\x1b[32mINFO\x1b[0m",
            Level::DEBUG => "\x1b[36mDEBUG\x1b[0m",
            Level::TRACE => "\x1b[35mTRACE\x1b[0m",
        };

        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        let message = visitor
            .fields
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let extras: String = visitor
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != "message" && key.as_str() != "source")
            .map(|(key, value)| format!(" {}={}", key, value))
            .collect();

        let location = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };

        writeln!(
            writer,
            "{} [{}] ({}) pid={} tid={:?}{}: {}{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            metadata.target(),
            self.pid,
            std::thread::current().id(),
            extras,
            message,
            location
        )
    }
}

#[derive(Default)]
struct FieldCollector {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl tracing::field::Visit for FieldCollector {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
