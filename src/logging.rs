use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// 日志级别环境变量
pub const LOG_ENV: &str = "VIVID_LOG";

/// 获取日志文件路径 (~/.local/share/vivid/vivid.log)
pub fn log_path() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no user data directory"))?
        .join("vivid");
    Ok(data_dir.join("vivid.log"))
}

/// 初始化日志，写入文件（标准输出由 TUI 占用）
///
/// 返回的 guard 必须存活到进程结束，否则缓冲中的日志会丢失
pub fn init(log_path: &Path) -> io::Result<WorkerGuard> {
    let log_dir = log_path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(log_dir)?;
    let log_filename = log_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("vivid.log");

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
