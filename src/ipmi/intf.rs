/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use super::ipmi::*;
use crate::error::IpmiResult;

pub use crate::ipmi::context::IpmiContext;

/// A request/response transport to a management controller.
///
/// `sendrecv` returns `None` when nothing came back; completion codes and
/// payload checks are left to the caller.
pub trait IpmiIntf {
    fn context(&mut self) -> &mut IpmiContext;

    fn setup(&mut self) -> IpmiResult<()>;
    fn open(&mut self) -> IpmiResult<()>;
    fn close(&mut self);

    fn sendrecv(&mut self, req: &IpmiRq) -> Option<IpmiRs>;

    fn set_my_addr(&mut self, addr: u8) -> IpmiResult<()>;
}

// 扩展 trait，包含泛型方法
pub trait IpmiIntfExt: IpmiIntf {
    fn with_context<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut IpmiContext) -> R,
    {
        let ctx = self.context();
        f(ctx)
    }
}
// 为所有实现了 IpmiIntf 的类型自动实现扩展 trait
impl<T: IpmiIntf + ?Sized> IpmiIntfExt for T {}
