//! Core logging bootstrap and privacy policy.
//!
//! # Responsibility
//! - Start one rolling file logger per process for Jotter core events.
//! - Keep note text out of every record, including panic reports.
//!
//! # Invariants
//! - Init with the same level and directory is a no-op; any other
//!   combination after the first init is rejected.
//! - Logging initialization must not panic.
//! - Note titles and content never appear in log records; events carry ids,
//!   counts and lengths only.

use crate::config::CoreConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const LOG_FILE_BASENAME: &str = "jotter";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_NOTE_IDS: usize = 8;

static ACTIVE_TARGET: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Supported log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unsupported log level `{other}`; expected trace|debug|info|warn|error"
            )),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Where and how verbosely the process logs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    level: LogLevel,
    dir: PathBuf,
}

impl LogTarget {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = LogLevel::parse(level)?;
        let trimmed = log_dir.trim();
        if trimmed.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let dir = Path::new(trimmed);
        if !dir.is_absolute() {
            return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
        }
        Ok(Self {
            level,
            dir: dir.to_path_buf(),
        })
    }

    /// Describes why `requested` cannot replace this already active target.
    fn conflict_with(&self, requested: &LogTarget) -> Option<String> {
        if self.dir != requested.dir {
            return Some(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                self.dir.display(),
                requested.dir.display()
            ));
        }
        if self.level != requested.level {
            return Some(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                self.level.as_str(),
                requested.level.as_str()
            ));
        }
        None
    }
}

struct ActiveLogger {
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Initializes core logging with level and directory.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with a different level or directory.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogTarget::parse(level, log_dir)?;

    let active = ACTIVE_TARGET.get_or_try_init(|| -> Result<ActiveLogger, String> {
        let handle = start_file_logger(&requested)?;
        install_panic_hook_once();
        info!(
            "event=app_start module=core status=ok app=jotter platform={} build_mode={} version={}",
            std::env::consts::OS,
            build_mode(),
            env!("CARGO_PKG_VERSION")
        );
        info!(
            "event=core_init module=core status=ok level={} log_dir={}",
            requested.level.as_str(),
            requested.dir.display()
        );
        Ok(ActiveLogger {
            target: requested.clone(),
            _handle: handle,
        })
    })?;

    match active.target.conflict_with(&requested) {
        Some(message) => Err(message),
        None => Ok(()),
    }
}

/// Initializes logging from a resolved [`CoreConfig`].
pub fn init_logging_from_config(config: &CoreConfig) -> Result<(), String> {
    let log_dir = config
        .log_dir
        .to_str()
        .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", config.log_dir.display()))?;
    init_logging(config.log_level, log_dir)
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_TARGET
        .get()
        .map(|active| (active.target.level.as_str(), active.target.dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

/// Normalizes a user-supplied level name.
pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    LogLevel::parse(level).map(LogLevel::as_str)
}

fn start_file_logger(target: &LogTarget) -> Result<LoggerHandle, String> {
    std::fs::create_dir_all(&target.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            target.dir.display()
        )
    })?;

    Logger::try_with_str(target.level.as_str())
        .map_err(|err| format!("invalid log level `{}`: {err}", target.level.as_str()))?
        .log_to_file(
            FileSpec::default()
                .directory(target.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} {}",
            location,
            redact_panic_payload(panic_payload_text(panic_info).as_deref())
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_text(info: &std::panic::PanicHookInfo<'_>) -> Option<String> {
    if let Some(message) = info.payload().downcast_ref::<&str>() {
        Some((*message).to_string())
    } else {
        info.payload().downcast_ref::<String>().cloned()
    }
}

/// Reduces a panic payload to loggable metadata.
///
/// Payloads may quote note text, so only note ids found in it and its length
/// are kept.
fn redact_panic_payload(payload: Option<&str>) -> String {
    let Some(payload) = payload else {
        return "payload=non_string".to_string();
    };

    let note_ids = payload
        .split(|c: char| !(c.is_ascii_hexdigit() || c == '-'))
        .filter_map(|token| Uuid::parse_str(token).ok())
        .take(MAX_PANIC_NOTE_IDS)
        .map(|id| id.to_string())
        .collect::<Vec<_>>();

    format!(
        "payload_chars={} note_ids={}",
        payload.chars().count(),
        if note_ids.is_empty() {
            "none".to_string()
        } else {
            note_ids.join(",")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, init_logging_from_config, logging_status, normalize_level,
        redact_panic_payload, LogTarget,
    };
    use crate::config::CoreConfig;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn log_target_rejects_relative_and_blank_dirs() {
        let error = LogTarget::parse("info", "logs/dev").unwrap_err();
        assert!(error.contains("absolute"));
        assert!(LogTarget::parse("info", "   ").is_err());
    }

    #[test]
    fn log_target_conflicts_name_the_changed_setting() {
        let active = LogTarget::parse("info", "/var/log/jotter").unwrap();
        assert_eq!(active.conflict_with(&active.clone()), None);

        let louder = LogTarget::parse("debug", "/var/log/jotter").unwrap();
        assert!(active.conflict_with(&louder).unwrap().contains("level `info`"));

        let moved = LogTarget::parse("info", "/tmp/jotter").unwrap();
        assert!(active.conflict_with(&moved).unwrap().contains("/var/log/jotter"));
    }

    #[test]
    fn panic_payload_keeps_note_ids_and_drops_text() {
        let redacted = redact_panic_payload(Some(
            "note 11111111-2222-4333-8444-555555555555 titled `Groceries: milk` vanished",
        ));
        assert!(redacted.contains("note_ids=11111111-2222-4333-8444-555555555555"));
        assert!(!redacted.contains("Groceries"));
        assert!(!redacted.contains("milk"));

        assert_eq!(
            redact_panic_payload(Some("index out of bounds")),
            "payload_chars=19 note_ids=none"
        );
        assert_eq!(redact_panic_payload(None), "payload=non_string");
    }

    #[test]
    fn init_from_config_is_idempotent_and_rejects_conflicts() {
        let log_dir = tempfile::tempdir().unwrap();
        let other_dir = tempfile::tempdir().unwrap();
        let config = CoreConfig {
            db_path: log_dir.path().join("jotter.sqlite3"),
            log_dir: log_dir.path().to_path_buf(),
            log_level: "info",
        };

        init_logging_from_config(&config).unwrap();
        init_logging_from_config(&config).unwrap();

        let log_dir_str = log_dir.path().to_str().unwrap();
        let level_error = init_logging("debug", log_dir_str).unwrap_err();
        assert!(level_error.contains("refusing to switch"));

        let dir_error = init_logging("info", other_dir.path().to_str().unwrap()).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));

        let (active_level, active_dir) = logging_status().unwrap();
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, log_dir.path());
    }
}
