/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use std::fmt;

pub const IPMI_BUF_SIZE: usize = 1024;

// Network Function Codes
pub const IPMI_NETFN_PICMG: u8 = 0x2C;

pub const IPMI_BMC_SLAVE_ADDR: u32 = 0x20;

/*
 * CC
 * See IPMI specification table 5-2 Generic Completion Codes
 */
pub const IPMI_CC_OK: u8 = 0x00;
pub const IPMI_CC_INV_CMD: u8 = 0xc1;
pub const IPMI_CC_INV_DATA_FIELD_IN_REQ: u8 = 0xcc;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct IpmiMessage {
    pub netfn_lun: u8, // 6 bits+2 bits
    pub cmd: u8,
    pub data: Vec<u8>,
}

impl fmt::Debug for IpmiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpmiMessage")
            .field("netfn", &self.netfn())
            .field("lun", &self.lun())
            .field("cmd", &self.cmd)
            .field("data", &format_args!("{:02x?}", self.data))
            .finish()
    }
}

// 提供位域访问方法
impl IpmiMessage {
    pub fn new(netfn: u8, cmd: u8) -> Self {
        Self {
            netfn_lun: netfn << 2,
            cmd,
            data: Vec::new(),
        }
    }

    pub fn netfn(&self) -> u8 {
        self.netfn_lun >> 2
    }

    pub fn lun(&self) -> u8 {
        self.netfn_lun & 0b11
    }

    pub fn netfn_mut(&mut self, val: u8) {
        self.netfn_lun = (val << 2) | (self.netfn_lun & 0b11);
    }

    pub fn lun_mut(&mut self, val: u8) {
        self.netfn_lun = (self.netfn_lun & 0b11111100) | (val & 0b11);
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IpmiRq {
    pub msg: IpmiMessage,
}

impl IpmiRq {
    pub fn new(netfn: u8, cmd: u8, data: Vec<u8>) -> Self {
        let mut msg = IpmiMessage::new(netfn, cmd);
        msg.data = data;
        Self { msg }
    }
}

/// Response as handed back by an interface: completion code plus the
/// payload that followed it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IpmiRs {
    pub ccode: u8,
    pub data: Vec<u8>,
}

impl IpmiRs {
    pub fn new(ccode: u8, data: &[u8]) -> Self {
        Self {
            ccode,
            data: data.to_vec(),
        }
    }

    #[inline]
    pub fn fail(&self) -> bool {
        self.ccode != IPMI_CC_OK
    }

    #[inline]
    pub fn ok(&self) -> bool {
        self.ccode == IPMI_CC_OK
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn netfn_and_lun_share_one_byte() {
        let mut msg = IpmiMessage::new(IPMI_NETFN_PICMG, 0x00);
        assert_eq!(msg.netfn(), IPMI_NETFN_PICMG);
        assert_eq!(msg.lun(), 0);

        msg.lun_mut(2);
        assert_eq!(msg.netfn(), IPMI_NETFN_PICMG);
        assert_eq!(msg.lun(), 2);

        msg.netfn_mut(0x06);
        assert_eq!(msg.netfn(), 0x06);
        assert_eq!(msg.lun(), 2);
    }

    #[test]
    fn response_status() {
        let rsp = IpmiRs::new(0xc1, &[]);
        assert!(rsp.fail());
        assert_eq!(rsp.data_len(), 0);
        assert!(IpmiRs::new(0, &[0x03]).ok());
    }
}
