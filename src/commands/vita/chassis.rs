/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::VitaRequest;
use crate::commands::CommandResult;
use crate::error::{IpmiError, IpmiResult};
use crate::helper::{buf2str, parse_hex_byte};
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::vita::codec::{
    decode_ack, decode_chassis_id, encode_get_chassis_id, encode_set_chassis_id,
    encode_set_ipmb_state, ChassisId, IpmbState,
};
use crate::ipmi::vita::{
    vita_sendrecv, VITA_GET_CHASSIS_IDENTIFIER_CMD, VITA_SET_CHASSIS_IDENTIFIER_CMD,
    VITA_SET_IPMB_STATE_CMD,
};

fn parse_hex_bytes(args: &[String]) -> IpmiResult<Vec<u8>> {
    args.iter().map(|arg| parse_hex_byte(arg)).collect()
}

pub fn parse_get_chassis_id(_args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::GetChassisId)
}

/// `setchassisid <byte>...`: every token is one identifier byte, in hex.
pub fn parse_set_chassis_id(args: &[String]) -> CommandResult<VitaRequest> {
    let id = ChassisId::new(parse_hex_bytes(args)?)?;
    // 空标识同样在发送前拒绝
    encode_set_chassis_id(&id)?;
    Ok(VitaRequest::SetChassisId(id))
}

/// `setipmbstate <a> <b> <speed>`
pub fn parse_set_ipmb_state(args: &[String]) -> CommandResult<VitaRequest> {
    let [a, b, speed] = args else {
        return Err(IpmiError::InvalidArgument(
            "Please provide IPMB-A state byte IPMB-B state byte and IPMB speed".to_string(),
        ));
    };

    Ok(VitaRequest::SetIpmbState(IpmbState {
        ipmb_a: parse_hex_byte(a)?,
        ipmb_b: parse_hex_byte(b)?,
        speed: parse_hex_byte(speed)?,
    }))
}

pub fn ipmi_vita_get_chassis_id(intf: &mut dyn IpmiIntf) -> CommandResult {
    let data = vita_sendrecv(intf, VITA_GET_CHASSIS_IDENTIFIER_CMD, encode_get_chassis_id())?;
    let id = decode_chassis_id(&data)?;
    println!("{}", id);
    Ok(())
}

pub fn ipmi_vita_set_chassis_id(intf: &mut dyn IpmiIntf, id: &ChassisId) -> CommandResult {
    let req = encode_set_chassis_id(id)?;
    debug2!("Set chassis identifier: {}", buf2str(id.as_bytes()));

    let data = vita_sendrecv(intf, VITA_SET_CHASSIS_IDENTIFIER_CMD, req)?;
    decode_ack(&data, "set chassis identifier")
}

pub fn ipmi_vita_set_ipmb_state(intf: &mut dyn IpmiIntf, state: &IpmbState) -> CommandResult {
    let data = vita_sendrecv(intf, VITA_SET_IPMB_STATE_CMD, encode_set_ipmb_state(state))?;
    decode_ack(&data, "set IPMB state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::vita::{args, ipmi_vita_main};
    use crate::ipmi::intf::testing::ScriptedIntf;
    use rstest::rstest;

    #[test]
    fn get_chassis_id() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0xc2, 0xab, 0xcd]);
        ipmi_vita_main(&mut intf, &args(&["getchassisid"])).unwrap();
        assert_eq!(intf.sent(), &[0x03]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_CHASSIS_IDENTIFIER_CMD);
    }

    #[test]
    fn get_chassis_id_rejects_other_types() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x82, 0xab, 0xcd]);
        let err = ipmi_vita_main(&mut intf, &args(&["getchassisid"])).unwrap_err();
        assert_eq!(err, IpmiError::NotVitaChassis(0x82));
    }

    #[test]
    fn set_chassis_id_frames_bytes() {
        let mut intf = ScriptedIntf::new().reply(&[0x03]);
        ipmi_vita_main(&mut intf, &args(&["setchassisid", "0x0A", "b", "ff"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0xc3, 0x0a, 0x0b, 0xff]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_SET_CHASSIS_IDENTIFIER_CMD);
    }

    #[test]
    fn set_chassis_id_needs_a_byte() {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&["setchassisid"])).unwrap_err();
        assert!(matches!(err, IpmiError::InvalidArgument(_)));
        assert!(intf.requests.is_empty());
    }

    #[test]
    fn set_chassis_id_too_long() {
        let mut tokens = vec!["setchassisid"];
        tokens.extend(std::iter::repeat("01").take(64));
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&tokens)).unwrap_err();
        assert!(matches!(err, IpmiError::InvalidArgument(_)));
        assert!(intf.requests.is_empty());
    }

    #[test]
    fn set_chassis_id_group_mismatch() {
        let mut intf = ScriptedIntf::new().reply(&[0x00]);
        let err = ipmi_vita_main(&mut intf, &args(&["setchassisid", "1"])).unwrap_err();
        assert_eq!(
            err,
            IpmiError::GroupMismatch {
                expected: 0x03,
                actual: 0x00
            }
        );
    }

    #[test]
    fn set_ipmb_state() {
        let mut intf = ScriptedIntf::new().reply(&[0x03]);
        ipmi_vita_main(&mut intf, &args(&["setipmbstate", "81", "0x80", "1"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x81, 0x80, 0x01]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_SET_IPMB_STATE_CMD);
    }

    #[rstest]
    #[case(&["setipmbstate"])]
    #[case(&["setipmbstate", "1", "2"])]
    #[case(&["setipmbstate", "1", "2", "3", "4"])]
    #[case(&["setipmbstate", "1", "2", "zz"])]
    fn set_ipmb_state_rejects_bad_arguments(#[case] tokens: &[&str]) {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(tokens)).unwrap_err();
        assert!(matches!(err, IpmiError::InvalidArgument(_)));
        assert!(intf.requests.is_empty());
    }

    #[test]
    fn set_ipmb_state_empty_ack() {
        let mut intf = ScriptedIntf::new().reply(&[]);
        let err = ipmi_vita_main(&mut intf, &args(&["setipmbstate", "1", "2", "3"])).unwrap_err();
        assert!(matches!(err, IpmiError::ShortPayload { .. }));
    }
}
