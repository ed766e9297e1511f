/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::VitaRequest;
use crate::commands::CommandResult;
use crate::helper::{is_fru_id, str2uchar};
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::strings::{val2str, VITA_FRU_CONTROL_VALS};
use crate::ipmi::vita::codec::{
    decode_ack, decode_fru_policy, encode_fru_control, encode_get_fru_policy,
    encode_set_fru_activation, encode_set_fru_policy, FruActivation,
};
use crate::ipmi::vita::fields::FruPolicyBits;
use crate::ipmi::vita::{
    vita_sendrecv, VITA_FRU_CONTROL_CMD, VITA_GET_FRU_STATE_POLICY_BITS_CMD,
    VITA_SET_FRU_ACTIVATION_CMD, VITA_SET_FRU_STATE_POLICY_BITS_CMD,
};

/// `activate <FRU-ID>`
pub fn parse_activate(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::Activation {
        fru_id: is_fru_id(&args[0])?,
        action: FruActivation::Activate,
    })
}

/// `deactivate <FRU-ID>`
pub fn parse_deactivate(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::Activation {
        fru_id: is_fru_id(&args[0])?,
        action: FruActivation::Deactivate,
    })
}

/// `policy get <FRU-ID>`
pub fn parse_get_policy(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::GetPolicy {
        fru_id: is_fru_id(&args[0])?,
    })
}

fn policy_bits(token: &str, what: &str) -> CommandResult<FruPolicyBits> {
    let raw = str2uchar(token)?;
    let bits = FruPolicyBits::from_bits_truncate(raw);
    if bits.bits() != raw {
        log::warn!(
            "Reserved bits {:#04x} in policy {} are ignored",
            raw & !FruPolicyBits::all().bits(),
            what
        );
    }
    Ok(bits)
}

/// `policy set <FRU-ID> <MASK> <VALUE>`
pub fn parse_set_policy(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::SetPolicy {
        fru_id: is_fru_id(&args[0])?,
        mask: policy_bits(&args[1], "mask")?,
        value: policy_bits(&args[2], "value")?,
    })
}

/// `frucontrol <FRU-ID> <OPTION>`
pub fn parse_fru_control(args: &[String]) -> CommandResult<VitaRequest> {
    Ok(VitaRequest::FruControl {
        fru_id: is_fru_id(&args[0])?,
        option: str2uchar(&args[1])?,
    })
}

pub fn ipmi_vita_set_fru_activation(
    intf: &mut dyn IpmiIntf,
    fru_id: u8,
    action: FruActivation,
) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_SET_FRU_ACTIVATION_CMD,
        encode_set_fru_activation(fru_id, action),
    )?;
    decode_ack(&data, "set FRU activation")?;

    println!("FRU has been successfully {}", action.done());
    Ok(())
}

pub fn ipmi_vita_get_fru_policy(intf: &mut dyn IpmiIntf, fru_id: u8) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_GET_FRU_STATE_POLICY_BITS_CMD,
        encode_get_fru_policy(fru_id),
    )?;
    let policy = decode_fru_policy(&data)?;
    println!("{}", policy);
    Ok(())
}

pub fn ipmi_vita_set_fru_policy(
    intf: &mut dyn IpmiIntf,
    fru_id: u8,
    mask: FruPolicyBits,
    value: FruPolicyBits,
) -> CommandResult {
    let data = vita_sendrecv(
        intf,
        VITA_SET_FRU_STATE_POLICY_BITS_CMD,
        encode_set_fru_policy(fru_id, mask, value),
    )?;
    decode_ack(&data, "set FRU state policy bits")?;

    println!("FRU state policy bits have been updated");
    Ok(())
}

pub fn ipmi_vita_fru_control(intf: &mut dyn IpmiIntf, fru_id: u8, option: u8) -> CommandResult {
    println!(
        "FRU Device Id: {} FRU Control Option: {}",
        fru_id,
        val2str(option as u32, VITA_FRU_CONTROL_VALS)
    );

    let data = vita_sendrecv(intf, VITA_FRU_CONTROL_CMD, encode_fru_control(fru_id, option))?;
    decode_ack(&data, "FRU control")?;

    println!("FRU Control: ok");
    Ok(())
}
