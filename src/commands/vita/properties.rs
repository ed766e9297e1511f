/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::VitaRequest;
use crate::commands::CommandResult;
use crate::helper::is_fru_id;
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::vita::codec::{
    decode_address_info, decode_capabilities, encode_address_info, encode_get_capabilities,
};
use crate::ipmi::vita::{
    vita_sendrecv, VITA_GET_FRU_ADDRESS_INFO_CMD, VITA_GET_VSO_CAPABILITIES_CMD,
};

pub fn parse_properties(_args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::Properties)
}

/// `addrinfo [<FRU-ID>]`: FRU id defaults to 0.
pub fn parse_addrinfo(args: &[String]) -> CommandResult<VitaRequest> {
    let fru_id = match args.first() {
        Some(token) => is_fru_id(token)?,
        None => 0,
    };
    Ok(VitaRequest::AddrInfo { fru_id })
}

/// `properties`: print the VSO capabilities of the controller.
pub fn ipmi_vita_get_vso_capabilities(intf: &mut dyn IpmiIntf) -> CommandResult {
    let data = vita_sendrecv(intf, VITA_GET_VSO_CAPABILITIES_CMD, encode_get_capabilities())?;
    let caps = decode_capabilities(&data)?;
    println!("{}", caps);
    Ok(())
}

pub fn ipmi_vita_getaddr(intf: &mut dyn IpmiIntf, fru_id: u8) -> CommandResult {
    let data = vita_sendrecv(intf, VITA_GET_FRU_ADDRESS_INFO_CMD, encode_address_info(fru_id))?;
    let info = decode_address_info(&data)?;
    println!("{}", info);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::vita::{args, ipmi_vita_main};
    use crate::error::IpmiError;
    use crate::ipmi::intf::testing::ScriptedIntf;
    use crate::ipmi::ipmi::IPMI_NETFN_PICMG;

    #[test]
    fn properties_request() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x12, 0x11, 0x00, 0x01]);
        ipmi_vita_main(&mut intf, &args(&["properties"])).unwrap();
        assert_eq!(intf.sent(), &[0x03]);
        assert_eq!(intf.requests[0].msg.netfn(), IPMI_NETFN_PICMG);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_VSO_CAPABILITIES_CMD);
    }

    #[test]
    fn properties_short_response() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x12]);
        let err = ipmi_vita_main(&mut intf, &args(&["properties"])).unwrap_err();
        assert!(matches!(err, IpmiError::ShortPayload { actual: 2, .. }));
    }

    #[test]
    fn addrinfo_defaults_to_fru_zero() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x41, 0x82, 0x00, 0x00, 0x05, 0x00]);
        ipmi_vita_main(&mut intf, &args(&["addrinfo"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x00]);
        assert_eq!(intf.requests[0].msg.cmd, VITA_GET_FRU_ADDRESS_INFO_CMD);
    }

    #[test]
    fn addrinfo_with_fru_id() {
        let mut intf = ScriptedIntf::new().reply(&[0x03, 0x41, 0x82, 0x02, 0x00, 0x05, 0x00]);
        ipmi_vita_main(&mut intf, &args(&["addrinfo", "0x2"])).unwrap();
        assert_eq!(intf.sent(), &[0x03, 0x02]);
    }

    #[test]
    fn addrinfo_bad_fru_id_sends_nothing() {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&["addrinfo", "300"])).unwrap_err();
        assert!(matches!(err, IpmiError::InvalidArgument(_)));
        assert!(intf.requests.is_empty());
    }

    #[test]
    fn completion_code_is_reported() {
        let mut intf = ScriptedIntf::new().reply_ccode(0xc1);
        let err = ipmi_vita_main(&mut intf, &args(&["addrinfo", "1"])).unwrap_err();
        assert_eq!(err, IpmiError::CompletionCode(0xc1));
    }

    #[test]
    fn missing_response_is_reported() {
        let mut intf = ScriptedIntf::new().no_reply();
        let err = ipmi_vita_main(&mut intf, &args(&["properties"])).unwrap_err();
        assert_eq!(err, IpmiError::NoResponse);
    }
}
