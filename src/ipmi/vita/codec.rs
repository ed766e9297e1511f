/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Request encoders and response decoders for the VITA 46.11 command set.
//!
//! Encoders return the complete request payload, group extension byte
//! included. Decoders take the response payload (completion code already
//! stripped) and check the minimum length first, then the group extension
//! echo, then field content. Nothing here talks to an interface.

use std::fmt;

use super::fields::*;
use super::GROUP_EXT_VITA;
use crate::error::{IpmiError, IpmiResult};
use crate::ipmi::strings::{led_color_str, site_type_str};

fn check_length(data: &[u8], what: &'static str, expected: usize) -> IpmiResult<()> {
    if data.len() < expected {
        return Err(IpmiError::ShortPayload {
            what,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

fn check_group(data: &[u8]) -> IpmiResult<()> {
    match data.first() {
        Some(&GROUP_EXT_VITA) => Ok(()),
        Some(&actual) => Err(IpmiError::GroupMismatch {
            expected: GROUP_EXT_VITA,
            actual,
        }),
        None => Err(IpmiError::ShortPayload {
            what: "group extension",
            expected: 1,
            actual: 0,
        }),
    }
}

fn check_payload(data: &[u8], what: &'static str, expected: usize) -> IpmiResult<()> {
    check_length(data, what, expected)?;
    check_group(data)
}

/// Decode the bare acknowledgement returned by the set-style commands.
pub fn decode_ack(data: &[u8], what: &'static str) -> IpmiResult<()> {
    check_payload(data, what, 1)
}

// ---------------------------------------------------------------------------
// Get VSO Capabilities

pub fn encode_get_capabilities() -> Vec<u8> {
    vec![GROUP_EXT_VITA]
}

/// Outcome of comparing a capabilities response with what this tool speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsoSupport {
    Supported,
    UnknownStandard(u8),
    UnknownRevision { major: u8, minor: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsoCapabilities {
    pub ipmc_id: u8,
    pub ipmb_caps: u8,
    pub standard: u8,
    pub revision: u8,
    pub max_fru_id: Option<u8>,
    pub fru_id: Option<u8>,
}

impl VsoCapabilities {
    pub fn tier(&self) -> u8 {
        IPMC_TIER.get(self.ipmc_id) + 1
    }

    pub fn layer(&self) -> u8 {
        IPMC_LAYER.get(self.ipmc_id) + 1
    }

    /// IPMB clock in kHz, `None` for the reserved encodings.
    pub fn ipmb_frequency_khz(&self) -> Option<u32> {
        match IPMB_FREQUENCY.get(self.ipmb_caps) {
            0 => Some(100),
            1 => Some(400),
            _ => None,
        }
    }

    /// Number of IPMB interfaces, `None` for the reserved encodings.
    pub fn ipmb_interfaces(&self) -> Option<u8> {
        match IPMB_COUNT.get(self.ipmb_caps) {
            0 => Some(1),
            1 => Some(2),
            _ => None,
        }
    }

    pub fn vso_standard(&self) -> u8 {
        VSO_STANDARD.get(self.standard)
    }

    pub fn revision_major(&self) -> u8 {
        VSO_REVISION_MAJOR.get(self.revision)
    }

    pub fn revision_minor(&self) -> u8 {
        VSO_REVISION_MINOR.get(self.revision)
    }

    pub fn support(&self) -> VsoSupport {
        if self.vso_standard() != 0 {
            VsoSupport::UnknownStandard(self.vso_standard())
        } else if self.revision_major() != 1 {
            VsoSupport::UnknownRevision {
                major: self.revision_major(),
                minor: self.revision_minor(),
            }
        } else {
            VsoSupport::Supported
        }
    }
}

pub fn decode_capabilities(data: &[u8]) -> IpmiResult<VsoCapabilities> {
    check_payload(data, "VSO capabilities", 5)?;
    Ok(VsoCapabilities {
        ipmc_id: data[1],
        ipmb_caps: data[2],
        standard: data[3],
        revision: data[4],
        max_fru_id: data.get(5).copied(),
        fru_id: data.get(6).copied(),
    })
}

impl fmt::Display for VsoCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VSO Identifier    : 0x{:02x}", GROUP_EXT_VITA)?;
        writeln!(f, "IPMC Identifier   : 0x{:02x}", self.ipmc_id)?;
        writeln!(f, "    Tier  {}", self.tier())?;
        writeln!(f, "    Layer {}", self.layer())?;
        writeln!(f, "IPMB Capabilities : 0x{:02x}", self.ipmb_caps)?;
        match self.ipmb_frequency_khz() {
            Some(khz) => writeln!(f, "    Frequency  {}kHz", khz)?,
            None => writeln!(f, "    Frequency  RESERVEDkHz")?,
        }
        match self.ipmb_interfaces() {
            Some(1) => writeln!(f, "    1 IPMB interface supported")?,
            Some(n) => writeln!(f, "    {} IPMB interfaces supported", n)?,
            None => {}
        }
        writeln!(
            f,
            "VSO Standard      : {}",
            if self.vso_standard() == 0 {
                "VITA 46.11"
            } else {
                "RESERVED"
            }
        )?;
        write!(
            f,
            "VSO Spec Revision : {}.{}",
            self.revision_major(),
            self.revision_minor()
        )?;
        if let Some(max) = self.max_fru_id {
            write!(f, "\nMax FRU Device ID : 0x{:02x}", max)?;
        }
        if let Some(id) = self.fru_id {
            write!(f, "\nFRU Device ID     : 0x{:02x}", id)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Get FRU Address Info

pub fn encode_address_info(fru_id: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    pub hw_addr: u8,
    pub ipmb0_addr: u8,
    pub fru_id: u8,
    pub site_id: u8,
    pub site_type: u8,
    pub channel7_addr: Option<u8>,
}

pub fn decode_address_info(data: &[u8]) -> IpmiResult<AddressInfo> {
    check_payload(data, "FRU address info", 7)?;
    Ok(AddressInfo {
        hw_addr: data[1],
        ipmb0_addr: data[2],
        fru_id: data[4],
        site_id: data[5],
        site_type: data[6],
        channel7_addr: data.get(8).copied(),
    })
}

impl fmt::Display for AddressInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hardware Address : 0x{:02x}", self.hw_addr)?;
        writeln!(f, "IPMB-0 Address   : 0x{:02x}", self.ipmb0_addr)?;
        writeln!(f, "FRU ID           : 0x{:02x}", self.fru_id)?;
        writeln!(f, "Site ID          : 0x{:02x}", self.site_id)?;
        match site_type_str(self.site_type) {
            Some(name) => write!(f, "Site Type        : {}", name)?,
            None => write!(f, "Site Type        : Unknown (0x{:02x})", self.site_type)?,
        }
        if let Some(addr) = self.channel7_addr {
            write!(f, "\nChannel 7 Address: 0x{:02x}", addr)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Set IPMB State

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpmbState {
    pub ipmb_a: u8,
    pub ipmb_b: u8,
    pub speed: u8,
}

pub fn encode_set_ipmb_state(state: &IpmbState) -> Vec<u8> {
    vec![GROUP_EXT_VITA, state.ipmb_a, state.ipmb_b, state.speed]
}

// ---------------------------------------------------------------------------
// Chassis Identifier

/// Chassis identifier of at most [`ChassisId::MAX_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChassisId(Vec<u8>);

impl ChassisId {
    /// Largest length the six-bit length field can carry.
    pub const MAX_LEN: usize = CHASSIS_ID_LENGTH.mask() as usize;

    pub fn new(bytes: Vec<u8>) -> IpmiResult<Self> {
        if bytes.len() > Self::MAX_LEN {
            return Err(IpmiError::InvalidArgument(format!(
                "# of bytes in chassis identifier is {} (not valid, at most {})",
                bytes.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Type/length header byte: VITA type code in the top bits.
    pub fn header(&self) -> u8 {
        let hdr = CHASSIS_ID_TYPE.put(0, CHASSIS_ID_TYPE_VITA);
        CHASSIS_ID_LENGTH.put(hdr, self.0.len() as u8)
    }
}

impl fmt::Display for ChassisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# of bytes in chassis identifier : {}", self.0.len())?;
        for (i, byte) in self.0.iter().enumerate() {
            write!(f, "\nByte {} in id is 0x{:x}", i, byte)?;
        }
        Ok(())
    }
}

pub fn encode_get_chassis_id() -> Vec<u8> {
    vec![GROUP_EXT_VITA]
}

pub fn encode_set_chassis_id(id: &ChassisId) -> IpmiResult<Vec<u8>> {
    // 0 字节不能作为 VITA 46.11 的机箱标识
    if id.is_empty() {
        return Err(IpmiError::InvalidArgument(
            "# of bytes in chassis identifier is 0 (not valid)".to_string(),
        ));
    }
    let mut data = Vec::with_capacity(id.len() + 2);
    data.push(GROUP_EXT_VITA);
    data.push(id.header());
    data.extend_from_slice(id.as_bytes());
    Ok(data)
}

pub fn decode_chassis_id(data: &[u8]) -> IpmiResult<ChassisId> {
    check_payload(data, "chassis identifier", 3)?;
    let hdr = data[1];
    if CHASSIS_ID_TYPE.get(hdr) != CHASSIS_ID_TYPE_VITA {
        return Err(IpmiError::NotVitaChassis(hdr));
    }
    let len = CHASSIS_ID_LENGTH.get(hdr) as usize;
    check_length(data, "chassis identifier bytes", 2 + len)?;
    ChassisId::new(data[2..2 + len].to_vec())
}

// ---------------------------------------------------------------------------
// Set FRU Activation

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruActivation {
    Deactivate = 0,
    Activate = 1,
}

impl FruActivation {
    pub fn done(self) -> &'static str {
        match self {
            FruActivation::Activate => "activated",
            FruActivation::Deactivate => "deactivated",
        }
    }
}

pub fn encode_set_fru_activation(fru_id: u8, action: FruActivation) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id, action as u8]
}

// ---------------------------------------------------------------------------
// FRU State Policy Bits

pub fn encode_get_fru_policy(fru_id: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id]
}

pub fn encode_set_fru_policy(fru_id: u8, mask: FruPolicyBits, value: FruPolicyBits) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id, mask.bits(), value.bits()]
}

/// Policy byte as reported by the FRU, reserved bits included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruPolicy {
    pub raw: u8,
}

impl FruPolicy {
    pub fn bits(&self) -> FruPolicyBits {
        FruPolicyBits::from_bits_truncate(self.raw)
    }
}

pub fn decode_fru_policy(data: &[u8]) -> IpmiResult<FruPolicy> {
    check_payload(data, "FRU state policy bits", 2)?;
    Ok(FruPolicy { raw: data[1] })
}

impl fmt::Display for FruPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();
        let bit = |flag| u8::from(bits.contains(flag));
        writeln!(f, "FRU State Policy Bits:\t{:x}h", self.raw)?;
        writeln!(
            f,
            "    Default-Activation-Locked Policy Bit is {}",
            bit(FruPolicyBits::DEFAULT_ACTIVATION_LOCKED)
        )?;
        writeln!(
            f,
            "    Commanded-Deactivation-Ignored Policy Bit is {}",
            bit(FruPolicyBits::COMMANDED_DEACTIVATION_IGNORED)
        )?;
        writeln!(
            f,
            "    Deactivation-Locked Policy Bit is {}",
            bit(FruPolicyBits::DEACTIVATION_LOCKED)
        )?;
        write!(
            f,
            "    Activation-Locked Policy Bit is {}",
            bit(FruPolicyBits::ACTIVATION_LOCKED)
        )
    }
}

// ---------------------------------------------------------------------------
// LED commands

pub fn encode_get_led_properties(fru_id: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedProperties {
    pub led_count: u8,
}

pub fn decode_led_properties(data: &[u8]) -> IpmiResult<LedProperties> {
    check_payload(data, "FRU LED properties", 3)?;
    Ok(LedProperties {
        led_count: data[2],
    })
}

impl fmt::Display for LedProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED Count:\t   {:#x}", self.led_count)
    }
}

pub fn encode_get_led_color_caps(fru_id: u8, led_id: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id, led_id]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedColorCapabilities {
    pub colors: u8,
    pub default_local: u8,
    pub default_override: u8,
    pub flags: Option<LedCapFlags>,
}

impl LedColorCapabilities {
    /// Color codes whose bit is set in the capability mask.
    pub fn supported_colors(&self) -> impl Iterator<Item = u8> + '_ {
        (0..8u8).filter(move |&i| self.colors & (1u8 << i) != 0)
    }
}

pub fn decode_led_color_caps(data: &[u8]) -> IpmiResult<LedColorCapabilities> {
    check_payload(data, "LED color capabilities", 4)?;
    Ok(LedColorCapabilities {
        colors: data[1],
        default_local: data[2],
        default_override: data[3],
        // flags 字节只在长度恰好为 5 时出现
        flags: if data.len() == 5 {
            Some(LedCapFlags::from_bits_truncate(data[4]))
        } else {
            None
        },
    })
}

impl fmt::Display for LedColorCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED Color Capabilities: ")?;
        for color in self.supported_colors() {
            write!(f, "{}, ", led_color_str(color))?;
        }
        writeln!(f)?;
        writeln!(f, "Default LED Color in")?;
        writeln!(
            f,
            "      LOCAL control:  {}",
            led_color_str(self.default_local)
        )?;
        write!(
            f,
            "      OVERRIDE state: {}",
            led_color_str(self.default_override)
        )?;
        if let Some(flags) = self.flags {
            write!(f, "\nLED flags:")?;
            if flags.contains(LedCapFlags::HW_RESTRICT) {
                write!(f, "\n      [HW RESTRICT]")?;
            }
            if flags.contains(LedCapFlags::PAYLOAD_PWR) {
                write!(f, "\n      [PAYLOAD PWR]")?;
            }
        }
        Ok(())
    }
}

pub fn encode_get_led_state(fru_id: u8, led_id: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id, led_id]
}

/// LED function byte: off, on, or blinking with the given off-duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedFunction {
    Off,
    On,
    Blinking(u8),
}

impl From<u8> for LedFunction {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => LedFunction::Off,
            0xff => LedFunction::On,
            off => LedFunction::Blinking(off),
        }
    }
}

impl From<LedFunction> for u8 {
    fn from(function: LedFunction) -> u8 {
        match function {
            LedFunction::Off => 0x00,
            LedFunction::On => 0xff,
            LedFunction::Blinking(off) => off,
        }
    }
}

impl LedFunction {
    fn label(self) -> &'static str {
        match self {
            LedFunction::Off => "[OFF]",
            LedFunction::On => "[ON]",
            LedFunction::Blinking(_) => "[BLINKING]",
        }
    }
}

/// Function, on-duration and color of one LED control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedControlState {
    pub function: LedFunction,
    pub on_duration: u8,
    pub color: u8,
}

impl LedControlState {
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            function: LedFunction::from(bytes[0]),
            on_duration: bytes[1],
            color: bytes[2],
        }
    }

    fn color_name(&self) -> &'static str {
        led_color_str(LED_COLOR.get(self.color))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedState {
    pub raw_flags: u8,
    pub local: Option<LedControlState>,
    pub override_state: Option<LedControlState>,
    pub lamp_test_duration: Option<u8>,
}

impl LedState {
    pub fn flags(&self) -> LedStateFlags {
        LedStateFlags::from_bits_truncate(self.raw_flags)
    }
}

pub fn decode_led_state(data: &[u8]) -> IpmiResult<LedState> {
    check_length(data, "FRU LED state", 5)?;
    let flags = LedStateFlags::from_bits_truncate(data[1]);
    if flags.contains(LedStateFlags::OVERRIDE) {
        check_length(data, "FRU LED override state", 8)?;
    }
    if flags.contains(LedStateFlags::LAMP_TEST) {
        check_length(data, "FRU LED lamp test state", 9)?;
    }
    check_group(data)?;

    let local = flags
        .contains(LedStateFlags::LOCAL_CONTROL)
        .then(|| LedControlState::from_bytes(&data[2..5]));
    let override_state = flags
        .intersects(LedStateFlags::OVERRIDE | LedStateFlags::LAMP_TEST)
        .then(|| LedControlState::from_bytes(&data[5..8]));
    // 仅在状态字节恰好为 0x04 时才给出灯测试时长
    let lamp_test_duration = (data[1] == LedStateFlags::LAMP_TEST.bits()).then(|| data[8]);

    Ok(LedState {
        raw_flags: data[1],
        local,
        override_state,
        lamp_test_duration,
    })
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.flags();
        write!(f, "LED states:                   {:x}\t", self.raw_flags)?;
        if flags.contains(LedStateFlags::LOCAL_CONTROL) {
            write!(f, "[LOCAL CONTROL] ")?;
        }
        if flags.contains(LedStateFlags::OVERRIDE) {
            write!(f, "[OVERRIDE] ")?;
        }
        if flags.contains(LedStateFlags::LAMP_TEST) {
            write!(f, "[LAMPTEST] ")?;
        }
        if flags.contains(LedStateFlags::HW_RESTRICT) {
            write!(f, "[HW RESTRICT] ")?;
        }

        if let Some(local) = &self.local {
            write!(
                f,
                "\n  Local Control function:     {:x}\t{}",
                u8::from(local.function),
                local.function.label()
            )?;
            write!(f, "\n  Local Control On-Duration:  {:x}", local.on_duration)?;
            write!(
                f,
                "\n  Local Control Color:        {:x}\t[{}]",
                local.color,
                local.color_name()
            )?;
        }

        if let Some(ovr) = &self.override_state {
            write!(
                f,
                "\n  Override function:     {:x}\t{}",
                u8::from(ovr.function),
                ovr.function.label()
            )?;
            write!(f, "\n  Override On-Duration:  {:x}", ovr.on_duration)?;
            write!(
                f,
                "\n  Override Color:        {:x}\t[{}]",
                ovr.color,
                ovr.color_name()
            )?;
            if let Some(duration) = self.lamp_test_duration {
                write!(f, "\n  Lamp test duration:    {:x}", duration)?;
            }
        }
        Ok(())
    }
}

/// Fields of a Set FRU LED State request, taken as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedSetting {
    pub fru_id: u8,
    pub led_id: u8,
    pub function: u8,
    pub duration: u8,
    pub color: u8,
}

pub fn encode_set_led_state(setting: &LedSetting) -> Vec<u8> {
    vec![
        GROUP_EXT_VITA,
        setting.fru_id,
        setting.led_id,
        setting.function,
        setting.duration,
        setting.color,
    ]
}

// ---------------------------------------------------------------------------
// FRU Control

pub fn encode_fru_control(fru_id: u8, option: u8) -> Vec<u8> {
    vec![GROUP_EXT_VITA, fru_id, option]
}
