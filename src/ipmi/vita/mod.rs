/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{IpmiError, IpmiResult};
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::ipmi::*;

pub mod codec;
pub mod fields;

use codec::VsoSupport;

// VITA 命令常量
pub const VITA_GET_VSO_CAPABILITIES_CMD: u8 = 0x00;
pub const VITA_GET_CHASSIS_IDENTIFIER_CMD: u8 = 0x02;
pub const VITA_SET_CHASSIS_IDENTIFIER_CMD: u8 = 0x03;
pub const VITA_FRU_CONTROL_CMD: u8 = 0x04;
pub const VITA_GET_FRU_LED_PROPERTIES_CMD: u8 = 0x05;
pub const VITA_GET_LED_COLOR_CAPABILITIES_CMD: u8 = 0x06;
pub const VITA_SET_FRU_LED_STATE_CMD: u8 = 0x07;
pub const VITA_GET_FRU_LED_STATE_CMD: u8 = 0x08;
pub const VITA_SET_IPMB_STATE_CMD: u8 = 0x09;
pub const VITA_SET_FRU_STATE_POLICY_BITS_CMD: u8 = 0x0A;
pub const VITA_GET_FRU_STATE_POLICY_BITS_CMD: u8 = 0x0B;
pub const VITA_SET_FRU_ACTIVATION_CMD: u8 = 0x0C;
pub const VITA_GET_FRU_ADDRESS_INFO_CMD: u8 = 0x40;

// VITA 46.11 站点类型
pub const VITA_FRONT_VPX_MODULE: u8 = 0x00;
pub const VITA_POWER_ENTRY: u8 = 0x01;
pub const VITA_CHASSIS_FRU: u8 = 0x02;
pub const VITA_DEDICATED_CHMC: u8 = 0x03;
pub const VITA_FAN_TRAY: u8 = 0x04;
pub const VITA_FAN_TRAY_FILTER: u8 = 0x05;
pub const VITA_ALARM_PANEL: u8 = 0x06;
pub const VITA_XMC: u8 = 0x07;
pub const VITA_VPX_RTM: u8 = 0x09;
pub const VITA_FRONT_VME_MODULE: u8 = 0x0A;
pub const VITA_FRONT_VXS_MODULE: u8 = 0x0B;
pub const VITA_POWER_SUPPLY: u8 = 0x0C;
pub const VITA_FRONT_VITA62_MODULE: u8 = 0x0D;
pub const VITA_71_MODULE: u8 = 0x0E;
pub const VITA_FMC: u8 = 0x0F;

/// Group extension identifier; first byte of every request and response.
pub const GROUP_EXT_VITA: u8 = 0x03;

/// Build a PICMG request for a VITA command from an encoded payload.
pub fn vita_request(cmd: u8, data: Vec<u8>) -> IpmiRq {
    IpmiRq::new(IPMI_NETFN_PICMG, cmd, data)
}

/// Send one VITA request and hand back the payload of a successful
/// response. Payload layout is checked by the codec.
pub fn vita_sendrecv(intf: &mut dyn IpmiIntf, cmd: u8, data: Vec<u8>) -> IpmiResult<Vec<u8>> {
    let req = vita_request(cmd, data);
    let rsp = intf.sendrecv(&req).ok_or(IpmiError::NoResponse)?;
    if rsp.fail() {
        return Err(IpmiError::CompletionCode(rsp.ccode));
    }
    Ok(rsp.data)
}

/// Query the IPMB-0 address of the controller. Returns 0 when it cannot be
/// determined.
pub fn ipmi_vita_ipmb_address(intf: &mut dyn IpmiIntf) -> u8 {
    let data = match vita_sendrecv(intf, VITA_GET_FRU_ADDRESS_INFO_CMD, vec![GROUP_EXT_VITA]) {
        Ok(data) => data,
        Err(e) => {
            debug1!("{}", e);
            return 0;
        }
    };

    match codec::decode_address_info(&data) {
        Ok(info) => info.ipmb0_addr,
        Err(e) => {
            debug1!("{}", e);
            0
        }
    }
}

/// Check whether the controller implements VITA 46.11 revision 1.x.
pub fn vita_discover(intf: &mut dyn IpmiIntf) -> bool {
    let ctx = intf.context();
    debug2!(
        "Running Get VSO Capabilities my_addr {:#x}, target {:#x}",
        ctx.my_addr(),
        ctx.target_addr()
    );

    let data = match vita_sendrecv(
        intf,
        VITA_GET_VSO_CAPABILITIES_CMD,
        codec::encode_get_capabilities(),
    ) {
        Ok(data) => data,
        Err(IpmiError::CompletionCode(IPMI_CC_INV_CMD)) => {
            debug2!("Invalid completion code received: Invalid command");
            return false;
        }
        Err(e @ IpmiError::CompletionCode(IPMI_CC_INV_DATA_FIELD_IN_REQ)) => {
            debug1!("Invalid data field received: {}", e);
            return false;
        }
        Err(e) => {
            debug1!("{}", e);
            return false;
        }
    };

    let caps = match codec::decode_capabilities(&data) {
        Ok(caps) => caps,
        Err(e) => {
            debug1!("{}", e);
            return false;
        }
    };

    match caps.support() {
        VsoSupport::Supported => {
            debug1!(
                "Discovered VITA 46.11 Revision {}.{}",
                caps.revision_major(),
                caps.revision_minor()
            );
            true
        }
        VsoSupport::UnknownStandard(standard) => {
            debug1!("Unknown VSO Standard {}", standard);
            false
        }
        VsoSupport::UnknownRevision { major, minor } => {
            debug1!("Unknown VSO Specification Revision {}.{}", major, minor);
            false
        }
    }
}
