/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Bit layouts of the packed VITA payload bytes.
//!
//! Each multi-bit quantity is described once as a [`BitField`]; single-bit
//! flags are `bitflags` sets. Encoders and decoders both go through these
//! definitions, so reserved bits are dropped on decode and written as zero.

use bitflags::bitflags;

/// A `width`-bit field starting at bit `shift` of one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    shift: u8,
    width: u8,
}

impl BitField {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Extract the field from `byte`.
    pub const fn get(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }

    /// Return `byte` with the field replaced by `value`; excess bits of
    /// `value` are dropped.
    pub const fn put(self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

// Get VSO Capabilities, IPMC identifier byte
pub const IPMC_TIER: BitField = BitField::new(0, 2);
pub const IPMC_LAYER: BitField = BitField::new(4, 2);

// Get VSO Capabilities, IPMB capabilities byte
pub const IPMB_COUNT: BitField = BitField::new(0, 2);
pub const IPMB_FREQUENCY: BitField = BitField::new(4, 2);

// Get VSO Capabilities, standard and revision bytes
pub const VSO_STANDARD: BitField = BitField::new(0, 2);
pub const VSO_REVISION_MAJOR: BitField = BitField::new(0, 4);
pub const VSO_REVISION_MINOR: BitField = BitField::new(4, 4);

// Chassis identifier type/length header
pub const CHASSIS_ID_TYPE: BitField = BitField::new(6, 2);
pub const CHASSIS_ID_LENGTH: BitField = BitField::new(0, 6);

/// Type code in the top two header bits of a VITA chassis identifier.
pub const CHASSIS_ID_TYPE_VITA: u8 = 0x03;

/// LED color codes occupy the low three bits when displayed.
pub const LED_COLOR: BitField = BitField::new(0, 3);

bitflags! {
    /// FRU state policy bits (Get/Set FRU State Policy Bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FruPolicyBits: u8 {
        const ACTIVATION_LOCKED = 1 << 0;
        const DEACTIVATION_LOCKED = 1 << 1;
        const COMMANDED_DEACTIVATION_IGNORED = 1 << 2;
        const DEFAULT_ACTIVATION_LOCKED = 1 << 3;
    }
}

bitflags! {
    /// LED state flags, byte 1 of Get FRU LED State.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LedStateFlags: u8 {
        const LOCAL_CONTROL = 1 << 0;
        const OVERRIDE = 1 << 1;
        const LAMP_TEST = 1 << 2;
        const HW_RESTRICT = 1 << 3;
    }
}

bitflags! {
    /// Optional flags byte of Get LED Color Capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LedCapFlags: u8 {
        const PAYLOAD_PWR = 1 << 0;
        const HW_RESTRICT = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks() {
        assert_eq!(IPMC_TIER.mask(), 0x03);
        assert_eq!(IPMC_LAYER.mask(), 0x30);
        assert_eq!(VSO_REVISION_MINOR.mask(), 0xf0);
        assert_eq!(CHASSIS_ID_TYPE.mask(), 0xc0);
        assert_eq!(CHASSIS_ID_LENGTH.mask(), 0x3f);
    }

    #[test]
    fn get_ignores_neighbouring_bits() {
        assert_eq!(IPMC_TIER.get(0xfe), 0x02);
        assert_eq!(IPMC_LAYER.get(0xcf), 0x00);
        assert_eq!(IPMB_FREQUENCY.get(0x10), 0x01);
        assert_eq!(LED_COLOR.get(0x0e), 0x06);
    }

    #[test]
    fn put_then_get() {
        let hdr = CHASSIS_ID_LENGTH.put(CHASSIS_ID_TYPE.put(0, CHASSIS_ID_TYPE_VITA), 5);
        assert_eq!(hdr, 0xc5);
        assert_eq!(CHASSIS_ID_TYPE.get(hdr), CHASSIS_ID_TYPE_VITA);
        assert_eq!(CHASSIS_ID_LENGTH.get(hdr), 5);
        // 超出宽度的部分被丢弃
        assert_eq!(CHASSIS_ID_LENGTH.put(0xc0, 0x7f), 0xff);
    }

    #[test]
    fn policy_reserved_bits_dropped() {
        let bits = FruPolicyBits::from_bits_truncate(0xf5);
        assert_eq!(bits.bits(), 0x05);
        assert!(bits.contains(FruPolicyBits::ACTIVATION_LOCKED));
        assert!(bits.contains(FruPolicyBits::COMMANDED_DEACTIVATION_IGNORED));
    }
}
