/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use clap::{ArgAction, Args, Parser};
use vitatool::helper::str2uchar;

// 核心接口类型枚举
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceType {
    #[clap(name = "open")]
    Open,
}

// 主命令结构
#[derive(Parser, Debug)]
#[command(
    name = "vitatool",
    version,
    about = "VITA 46.11 management utility",
    max_term_width = 100,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// VITA command words and their arguments, e.g. `led get 0 1`
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

// 全局参数
#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(short = 'h', long, action = ArgAction::Help)]
    pub help: Option<bool>,

    #[arg(short = 'V', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    #[arg(short = 'v', action = ArgAction::Count, help = "Verbose (can use multiple times)")]
    pub verbose: u8,

    // 设备接口参数
    #[arg(short = 'I', long, default_value = "open")]
    pub interface: InterfaceType,
    #[arg(short = 'd', default_value_t = 0, help = "Specify OpenIPMI device number")]
    pub devnum: u8,

    // 桥接参数
    #[arg(short = 't', long, value_parser = parse_addr, help = "Bridge request to remote target address")]
    pub target_addr: Option<u8>,
    #[arg(short = 'b', long, default_value = "0", value_parser = parse_addr, help = "Set destination channel for bridged request")]
    pub target_channel: u8,
    #[arg(short = 'l', long, default_value = "0", value_parser = parse_addr, help = "Set destination lun for raw commands")]
    pub target_lun: u8,
    #[arg(short = 'm', value_parser = parse_addr, help = "Set local IPMB address")]
    pub arg_addr: Option<u8>,
}

fn parse_addr(s: &str) -> Result<u8, String> {
    str2uchar(s).map_err(|e| e.to_string())
}
