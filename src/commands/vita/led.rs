/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! `led prop|cap|get|set`

use super::VitaRequest;
use crate::commands::CommandResult;
use crate::helper::{is_fru_id, str2uchar};
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::vita::codec::{
    decode_ack, decode_led_color_caps, decode_led_properties, decode_led_state,
    encode_get_led_color_caps, encode_get_led_properties, encode_get_led_state,
    encode_set_led_state, LedSetting,
};
use crate::ipmi::vita::{
    vita_sendrecv, VITA_GET_FRU_LED_PROPERTIES_CMD, VITA_GET_FRU_LED_STATE_CMD,
    VITA_GET_LED_COLOR_CAPABILITIES_CMD, VITA_SET_FRU_LED_STATE_CMD,
};

pub fn parse_led_prop(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::LedProperties {
        fru_id: is_fru_id(&args[0])?,
    })
}

pub fn parse_led_cap(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::LedColorCaps {
        fru_id: is_fru_id(&args[0])?,
        led_id: str2uchar(&args[1])?,
    })
}

pub fn parse_led_get(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::LedState {
        fru_id: is_fru_id(&args[0])?,
        led_id: str2uchar(&args[1])?,
    })
}

/// Field values go out as given; the controller validates them.
pub fn parse_led_set(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::SetLedState(LedSetting {
        fru_id: is_fru_id(&args[0])?,
        led_id: str2uchar(&args[1])?,
        function: str2uchar(&args[2])?,
        duration: str2uchar(&args[3])?,
        color: str2uchar(&args[4])?,
    }))
}

pub fn ipmi_vita_get_led_properties(intf: &mut dyn IpmiIntf, fru_id: u8) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_GET_FRU_LED_PROPERTIES_CMD,
        encode_get_led_properties(fru_id),
    )?;
    let props = decode_led_properties(&data)?;
    println!("{}", props);
    Ok(())
}

pub fn ipmi_vita_get_led_color_capabilities(
    intf: &mut dyn IpmiIntf,
    fru_id: u8,
    led_id: u8,
) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_GET_LED_COLOR_CAPABILITIES_CMD,
        encode_get_led_color_caps(fru_id, led_id),
    )?;
    let caps = decode_led_color_caps(&data)?;
    println!("{}", caps);
    Ok(())
}

pub fn ipmi_vita_get_led_state(intf: &mut dyn IpmiIntf, fru_id: u8, led_id: u8) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_GET_FRU_LED_STATE_CMD,
        encode_get_led_state(fru_id, led_id),
    )?;
    let state = decode_led_state(&data)?;
    println!("{}", state);
    Ok(())
}

pub fn ipmi_vita_set_led_state(intf: &mut dyn IpmiIntf, setting: &LedSetting) -> CommandResult {
    debug2!("Set FRU LED state: {:?}", setting);

    let data = vita_sendrecv(intf, VITA_SET_FRU_LED_STATE_CMD, encode_set_led_state(setting))?;
    decode_ack(&data, "set FRU LED state")?;

    println!("LED state has been updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::vita::{args, ipmi_vita_main};
    use crate::error::IpmiError;
    use crate::ipmi::intf::testing::ScriptedIntf;

    #[test]
    fn led_prop() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x00, 0x04]);
        ipmi_vita_main(&mut intf, &args(&["led", "prop", "0"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x00]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_FRU_LED_PROPERTIES_CMD);
    }

    #[test]
    fn led_cap() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x0e, 0x02, 0x03, 0x02]);
        ipmi_vita_main(&mut intf, &args(&["led", "cap", "1", "0x2"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x01, 0x02]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_LED_COLOR_CAPABILITIES_CMD);
    }

    #[test]
    fn led_get() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x01, 0x00, 0x00, 0x02]);
        ipmi_vita_main(&mut intf, &args(&["led", "get", "1", "0"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x01, 0x00]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_FRU_LED_STATE_CMD);
    }

    #[test]
    fn led_get_override_needs_eight_bytes() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x02, 0x00, 0x00, 0x02]);
        let err = ipmi_vita_main(&mut intf, &args(&["led", "get", "1", "0"])).unwrap_err();
        assert!(matches!(err, IpmiError::ShortPayload { expected: 8, actual: 5, .. }));
    }

    #[test]
    fn led_set() {
        let mut intf = ScriptedIntf::new().reply(&[0x03]);
        ipmi_vita_main(
            &mut intf,
            &args(&["led", "set", "1", "0xff", "251", "10", "0xE"]),
        )
        .unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x01, 0xff, 0xfb, 0x0a, 0x0e]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_SET_FRU_LED_STATE_CMD);
    }

    #[test]
    fn led_set_bad_color() {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&["led", "set", "1", "0", "0", "0", "blue"]))
            .unwrap_err();
        assert!(matches!(err, IpmiError::InvalidArgument(_)));
        assert!(intf.requests.is_empty());
    }
}
