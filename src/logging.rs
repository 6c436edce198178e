//! 日志初始化
//!
//! 终端被 TUI 占用，日志只写入文件 (~/.local/share/nutritrack/logs/)

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "nutritrack";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static STARTED: AtomicBool = AtomicBool::new(false);

/// 日志句柄，释放时刷新缓冲区；需持有到进程退出
pub struct LoggingGuard {
    handle: LoggerHandle,
}

impl LoggingGuard {
    pub fn flush(&self) {
        self.handle.flush();
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        self.handle.flush();
    }
}

/// 获取日志目录路径
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("nutritrack").join("logs"))
}

/// 初始化文件日志，每个进程只能成功一次
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggingGuard, String> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Err("logging already initialized".to_string());
    }

    start_logger(level, log_dir).inspect_err(|_| STARTED.store(false, Ordering::SeqCst))
}

fn start_logger(level: &str, log_dir: &Path) -> Result<LoggingGuard, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|err| format!("failed to create log directory `{}`: {err}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=app_start version={} level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(LoggingGuard { handle })
}
