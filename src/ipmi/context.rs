/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::ipmi::ipmi::IPMI_BMC_SLAVE_ADDR;

/// 输出上下文 - 控制命令输出的详细程度
#[derive(Clone, Debug, Default)]
pub struct OutputContext {
    /// 详细输出级别 (0=正常, 1=详细, 2=非常详细, 3=调试级别)
    pub verbose: u8,
}

impl OutputContext {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

/// 基础IPMI上下文 - 本地和目标寻址
#[derive(Clone, Default, Debug)]
pub struct IpmiBaseContext {
    /// 本地地址
    pub my_addr: u32,
    /// 目标地址 (0 表示直接发往 BMC)
    pub target_addr: u32,
    /// 目标逻辑单元号
    pub target_lun: u8,
    /// 目标通道
    pub target_channel: u8,
    /// 通过 VITA 发现得到的 IPMB-0 地址
    pub target_ipmb_addr: u8,
}

/// Addressing and output settings shared by an interface and the commands
/// running over it.
#[derive(Clone, Default, Debug)]
pub struct IpmiContext {
    pub base: IpmiBaseContext,
    pub output: OutputContext,
}

impl IpmiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context addressing the local BMC, the usual starting point.
    pub fn local(verbose: u8) -> Self {
        Self {
            base: IpmiBaseContext {
                my_addr: IPMI_BMC_SLAVE_ADDR,
                target_ipmb_addr: IPMI_BMC_SLAVE_ADDR as u8,
                ..Default::default()
            },
            output: OutputContext::new(verbose),
        }
    }

    /// 是否需要经 IPMB 转发
    pub fn is_bridged(&self) -> bool {
        self.base.target_addr != 0 && self.base.target_addr != self.base.my_addr
    }

    pub fn set_my_addr(&mut self, addr: u32) {
        self.base.my_addr = addr;
    }

    pub fn my_addr(&self) -> u32 {
        self.base.my_addr
    }

    pub fn set_target_addr(&mut self, addr: u32) {
        self.base.target_addr = addr;
    }

    pub fn target_addr(&self) -> u32 {
        self.base.target_addr
    }

    pub fn set_target_channel(&mut self, channel: u8) {
        self.base.target_channel = channel;
    }

    pub fn target_channel(&self) -> u8 {
        self.base.target_channel
    }

    pub fn set_target_lun(&mut self, lun: u8) {
        self.base.target_lun = lun;
    }

    pub fn target_lun(&self) -> u8 {
        self.base.target_lun
    }

    pub fn set_target_ipmb_addr(&mut self, addr: u8) {
        self.base.target_ipmb_addr = addr;
    }

    pub fn target_ipmb_addr(&self) -> u8 {
        self.base.target_ipmb_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = IpmiContext::new();
        assert_eq!(ctx.my_addr(), 0);
        assert!(!ctx.output.is_verbose());
        assert!(!ctx.is_bridged());
    }

    #[test]
    fn test_local_context() {
        let ctx = IpmiContext::local(2);
        assert_eq!(ctx.my_addr(), 0x20);
        assert_eq!(ctx.target_ipmb_addr(), 0x20);
        assert!(ctx.output.is_verbose());
    }

    #[test]
    fn test_bridging() {
        let mut ctx = IpmiContext::local(0);
        // 目标地址与本地相同，不需要桥接
        ctx.set_target_addr(0x20);
        assert!(!ctx.is_bridged());

        ctx.set_target_addr(0x82);
        ctx.set_target_channel(7);
        assert!(ctx.is_bridged());
        assert_eq!(ctx.target_channel(), 7);
    }
}
