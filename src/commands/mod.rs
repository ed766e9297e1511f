/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::IpmiError;

// 统一的命令结果类型
pub type CommandResult<T = ()> = Result<T, IpmiError>;

pub mod vita;
