/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

// debugN! 宏输出到同名 target，由 logging::setup_logger 按 -v 次数打开。
// 对应 ipmitool 的 lprintf(LOG_INFO/LOG_DEBUG...) 输出，不带级别前缀。

#[macro_export]
macro_rules! debug1 {
    ($($arg:tt)*) => {
        ::log::debug!(target: "debug1", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug2 {
    ($($arg:tt)*) => {
        ::log::debug!(target: "debug2", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug3 {
    ($($arg:tt)*) => {
        ::log::debug!(target: "debug3", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug4 {
    ($($arg:tt)*) => {
        ::log::debug!(target: "debug4", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug5 {
    ($($arg:tt)*) => {
        ::log::trace!(target: "debug5", $($arg)*)
    };
}

pub mod commands;
pub mod error;
pub mod helper;
pub mod interface;
pub mod ipmi;
pub mod logging;
