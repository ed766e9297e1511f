/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use env_logger::Env;
use std::env;
use std::io::Write;

/// 日志颜色配置
struct LogColors {
    error: &'static str,
    warn: &'static str,
    info: &'static str,
    debug: &'static str,
    trace: &'static str,
    reset: &'static str,
}

impl LogColors {
    fn new(enable_color: bool) -> Self {
        if enable_color {
            Self {
                error: "\x1b[31m",
                warn: "\x1b[33m",
                info: "\x1b[32m",
                debug: "\x1b[36m",
                trace: "\x1b[35m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                error: "",
                warn: "",
                info: "",
                debug: "",
                trace: "",
                reset: "",
            }
        }
    }

    fn for_level(&self, level: log::Level) -> &'static str {
        match level {
            log::Level::Error => self.error,
            log::Level::Warn => self.warn,
            log::Level::Info => self.info,
            log::Level::Debug => self.debug,
            log::Level::Trace => self.trace,
        }
    }
}

/// Filter string for a given number of `-v` flags.
///
/// - 0: ERROR, WARN
/// - 1: + INFO, debug1 (-v)
/// - 2..=5: + debug2 .. debug5
pub fn log_filter(verbose: u8) -> String {
    let mut log_config = vec!["error".to_string(), "warn".to_string()];

    if verbose > 0 {
        log_config.push("info".to_string());
    }

    for level in 1..=verbose.min(5) {
        let log_level = if level <= 4 { "debug" } else { "trace" };
        log_config.push(format!("debug{}={}", level, log_level));
    }

    log_config.join(",")
}

/// 设置日志系统，`RUST_LOG` 已设置时以它为准
pub fn setup_logger(verbose: u8) {
    let enable_color =
        env::var("NO_COLOR").is_err() && env::var("TERM").map_or(false, |term| term != "dumb");
    let colors = LogColors::new(enable_color);

    let filter = env::var("RUST_LOG").unwrap_or_else(|_| log_filter(verbose));

    let result = env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format(move |buf, record| match record.target() {
            // ipmitool 风格：直接输出消息，无前缀
            "debug1" | "debug2" | "debug3" | "debug4" | "debug5" => {
                writeln!(buf, "{}", record.args())
            }
            _ => {
                let level_text = match record.level() {
                    log::Level::Error => "ERROR",
                    log::Level::Warn => "WARN ",
                    log::Level::Info => "INFO ",
                    log::Level::Debug => "DEBUG",
                    log::Level::Trace => "TRACE",
                };
                writeln!(
                    buf,
                    "{}[{}]{} {}",
                    colors.for_level(record.level()),
                    level_text,
                    colors.reset,
                    record.args()
                )
            }
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

/// 检查指定调试级别是否启用
pub fn is_debug_enabled(level: u8) -> bool {
    match level {
        1 => log::log_enabled!(target: "debug1", log::Level::Debug),
        2 => log::log_enabled!(target: "debug2", log::Level::Debug),
        3 => log::log_enabled!(target: "debug3", log::Level::Debug),
        4 => log::log_enabled!(target: "debug4", log::Level::Debug),
        5 => log::log_enabled!(target: "debug5", log::Level::Trace),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_quiet() {
        assert_eq!(log_filter(0), "error,warn");
    }

    #[test]
    fn filter_grows_with_verbosity() {
        assert_eq!(log_filter(2), "error,warn,info,debug1=debug,debug2=debug");
        assert!(log_filter(9).ends_with("debug4=debug,debug5=trace"));
    }

    #[test]
    fn unknown_debug_level_disabled() {
        assert!(!is_debug_enabled(0));
        assert!(!is_debug_enabled(6));
    }
}
