/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::vita::*;

pub struct ValStr {
    pub val: u32,
    pub desc: &'static str,
}

/// Look up `val` in a value/string table.
pub fn val2str(val: u32, vs: &[ValStr]) -> &'static str {
    vs.iter()
        .find(|v| v.val == val)
        .map(|v| v.desc)
        .unwrap_or("Unknown value")
}

// IPMI specification table 5-2 Generic Completion Codes
pub const COMPLETION_CODE_VALS: &[ValStr] = &[
    ValStr { val: 0x00, desc: "Command completed normally" },
    ValStr { val: 0xc0, desc: "Node busy" },
    ValStr { val: 0xc1, desc: "Invalid command" },
    ValStr { val: 0xc2, desc: "Invalid command on LUN" },
    ValStr { val: 0xc3, desc: "Timeout" },
    ValStr { val: 0xc4, desc: "Out of space" },
    ValStr { val: 0xc5, desc: "Reservation cancelled or invalid" },
    ValStr { val: 0xc6, desc: "Request data truncated" },
    ValStr { val: 0xc7, desc: "Request data length invalid" },
    ValStr { val: 0xc8, desc: "Request data field length limit exceeded" },
    ValStr { val: 0xc9, desc: "Parameter out of range" },
    ValStr { val: 0xca, desc: "Cannot return number of requested data bytes" },
    ValStr { val: 0xcb, desc: "Requested sensor, data, or record not found" },
    ValStr { val: 0xcc, desc: "Invalid data field in request" },
    ValStr { val: 0xcd, desc: "Command illegal for specified sensor or record type" },
    ValStr { val: 0xce, desc: "Command response could not be provided" },
    ValStr { val: 0xcf, desc: "Cannot execute duplicated request" },
    ValStr { val: 0xd0, desc: "SDR Repository in update mode" },
    ValStr { val: 0xd1, desc: "Device firmeware in update mode" },
    ValStr { val: 0xd2, desc: "BMC initialization in progress" },
    ValStr { val: 0xd3, desc: "Destination unavailable" },
    ValStr { val: 0xd4, desc: "Insufficient privilege level" },
    ValStr { val: 0xd5, desc: "Command not supported in present state" },
    ValStr { val: 0xd6, desc: "Cannot execute command, command disabled" },
    ValStr { val: 0xff, desc: "Unspecified error" },
];

// VITA 46.11 站点类型
pub const VITA_SITE_TYPE_VALS: &[ValStr] = &[
    ValStr { val: VITA_FRONT_VPX_MODULE as u32, desc: "Front Loading VPX Plug-In Module" },
    ValStr { val: VITA_POWER_ENTRY as u32, desc: "Power Entry Module" },
    ValStr { val: VITA_CHASSIS_FRU as u32, desc: "Chassic FRU Information Module" },
    ValStr { val: VITA_DEDICATED_CHMC as u32, desc: "Dedicated Chassis Manager" },
    ValStr { val: VITA_FAN_TRAY as u32, desc: "Fan Tray" },
    ValStr { val: VITA_FAN_TRAY_FILTER as u32, desc: "Fan Tray Filter" },
    ValStr { val: VITA_ALARM_PANEL as u32, desc: "Alarm Panel" },
    ValStr { val: VITA_XMC as u32, desc: "XMC" },
    ValStr { val: VITA_VPX_RTM as u32, desc: "VPX Rear Transition Module" },
    ValStr { val: VITA_FRONT_VME_MODULE as u32, desc: "Front Loading VME Plug-In Module" },
    ValStr { val: VITA_FRONT_VXS_MODULE as u32, desc: "Front Loading VXS Plug-In Module" },
    ValStr { val: VITA_POWER_SUPPLY as u32, desc: "Power Supply" },
    ValStr { val: VITA_FRONT_VITA62_MODULE as u32, desc: "Front Loading VITA 62 Module" },
    ValStr { val: VITA_71_MODULE as u32, desc: "VITA 71 Module" },
    ValStr { val: VITA_FMC as u32, desc: "FMC" },
];

pub const VITA_FRU_CONTROL_VALS: &[ValStr] = &[
    ValStr { val: 0, desc: "Cold Reset" },
    ValStr { val: 1, desc: "Warm Reset" },
    ValStr { val: 2, desc: "Graceful Reboot" },
    ValStr { val: 3, desc: "Issue Diagnostic Interrupt" },
    ValStr { val: 4, desc: "Quiesce" },
];

const LED_COLOR_STR: [&str; 8] = [
    "reserved", "BLUE", "RED", "GREEN", "AMBER", "ORANGE", "WHITE", "reserved",
];

/// Name of a 3-bit LED color code.
pub fn led_color_str(color: u8) -> &'static str {
    LED_COLOR_STR
        .get(color as usize)
        .copied()
        .unwrap_or("invalid")
}

/// Site type name, or `None` when the code is outside the table.
pub fn site_type_str(site_type: u8) -> Option<&'static str> {
    VITA_SITE_TYPE_VALS
        .iter()
        .find(|v| v.val == site_type as u32)
        .map(|v| v.desc)
}
