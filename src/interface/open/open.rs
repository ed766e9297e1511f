/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Linux OpenIPMI character device interface (`/dev/ipmi0`).

use std::os::fd::{BorrowedFd, RawFd};
use std::sync::atomic::{AtomicI64, Ordering};

use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::select::{select, FdSet};
use nix::sys::stat::Mode;
use nix::sys::time::TimeVal;
use nix::{ioctl_read, ioctl_readwrite};

use crate::error::{IpmiError, IpmiResult};
use crate::helper::buf2str;
use crate::ipmi::intf::{IpmiContext, IpmiIntf};
use crate::ipmi::ipmi::*;
use crate::logging::is_debug_enabled;

pub const IPMI_MAX_ADDR_SIZE: usize = 0x20;
pub const IPMI_BMC_CHANNEL: u8 = 0xf;

pub const IPMI_SYSTEM_INTERFACE_ADDR_TYPE: i32 = 0x0c;
pub const IPMI_IPMB_ADDR_TYPE: i32 = 0x01;

pub const IPMI_OPENIPMI_READ_TIMEOUT: i64 = 15;

static CURR_SEQ: AtomicI64 = AtomicI64::new(0);
fn next_seq() -> i64 {
    CURR_SEQ.fetch_add(1, Ordering::SeqCst)
}

// 以下结构体与 <linux/ipmi.h> 中的定义保持一致

#[repr(C)]
pub struct IpmiAddr {
    pub addr_type: i32,
    pub channel: i16,
    pub data: [u8; IPMI_MAX_ADDR_SIZE],
}

impl Default for IpmiAddr {
    fn default() -> Self {
        Self {
            addr_type: 0,
            channel: 0,
            data: [0; IPMI_MAX_ADDR_SIZE],
        }
    }
}

#[repr(C)]
pub struct IpmiMsg {
    pub netfn: u8,
    pub cmd: u8,
    pub data_len: u16,
    pub data: *mut u8,
}

impl Default for IpmiMsg {
    fn default() -> Self {
        Self {
            netfn: 0,
            cmd: 0,
            data_len: 0,
            data: std::ptr::null_mut(),
        }
    }
}

#[repr(C)]
pub struct IpmiReq {
    pub addr: *mut u8,
    pub addr_len: u32,
    pub msgid: i64,
    pub msg: IpmiMsg,
}

impl Default for IpmiReq {
    fn default() -> Self {
        Self {
            addr: std::ptr::null_mut(),
            addr_len: 0,
            msgid: 0,
            msg: IpmiMsg::default(),
        }
    }
}

#[repr(C)]
pub struct IpmiRecv {
    pub recv_type: i32,
    pub addr: *mut u8,
    pub addr_len: u32,
    pub msgid: i64,
    pub msg: IpmiMsg,
}

impl Default for IpmiRecv {
    fn default() -> Self {
        Self {
            recv_type: 0,
            addr: std::ptr::null_mut(),
            addr_len: 0,
            msgid: 0,
            msg: IpmiMsg::default(),
        }
    }
}

#[derive(Default)]
#[repr(C)]
pub struct IpmiSystemInterfaceAddr {
    pub addr_type: i32,
    pub channel: i16,
    pub lun: u8,
}

#[derive(Default)]
#[repr(C)]
pub struct IpmiIpmbAddr {
    pub addr_type: i32,
    pub channel: i16,
    pub slave_addr: u8,
    pub lun: u8,
}

// IOC commands
pub const IPMI_IOC_MAGIC: u8 = b'i';
pub const IPMICTL_RECEIVE_MSG_TRUNC: u8 = 11;
//只有 RECEIVE 是 _IOWR，其它都是 _IOR
pub const IPMICTL_SEND_COMMAND: u8 = 13;
pub const IPMICTL_SET_GETS_EVENTS_CMD: u8 = 16;
pub const IPMICTL_SET_MY_ADDRESS_CMD: u8 = 17;

ioctl_readwrite!(
    ipmi_ioctl_receive_msg_trunc,
    IPMI_IOC_MAGIC,
    IPMICTL_RECEIVE_MSG_TRUNC,
    IpmiRecv
);

ioctl_read!(
    ipmi_ioctl_send_command,
    IPMI_IOC_MAGIC,
    IPMICTL_SEND_COMMAND,
    IpmiReq
);

ioctl_read!(
    ipmi_ioctl_set_get_events_cmd,
    IPMI_IOC_MAGIC,
    IPMICTL_SET_GETS_EVENTS_CMD,
    i32
);

ioctl_read!(
    ipmi_ioctl_set_my_address_cmd,
    IPMI_IOC_MAGIC,
    IPMICTL_SET_MY_ADDRESS_CMD,
    u32
);

pub struct OpenIntf {
    pub name: &'static str,
    pub desc: &'static str,
    pub devnum: u8,
    pub context: IpmiContext,
    fd: Option<RawFd>,
}

impl OpenIntf {
    pub fn new(devnum: u8, ctx: IpmiContext) -> Self {
        Self {
            name: "open",
            desc: "Linux OpenIPMI Interface",
            devnum,
            context: ctx,
            fd: None,
        }
    }

    fn dev_paths(&self) -> [String; 3] {
        [
            format!("/dev/ipmi{}", self.devnum),
            format!("/dev/ipmi/{}", self.devnum),
            format!("/dev/ipmidev/{}", self.devnum),
        ]
    }

    /// Wait for the reply carrying `msgid` and copy it into `buf`.
    /// Returns the number of bytes received (completion code included).
    fn recv_reply(&self, fd: RawFd, msgid: i64, buf: &mut [u8]) -> Option<usize> {
        let mut addr = IpmiAddr::default();
        let mut recv = IpmiRecv::default();

        loop {
            let mut timeval = TimeVal::new(IPMI_OPENIPMI_READ_TIMEOUT, 0);
            let borrowfd = unsafe { BorrowedFd::borrow_raw(fd) };
            let mut fd_set = FdSet::new();
            fd_set.insert(borrowfd);

            match select(fd + 1, &mut fd_set, None, None, Some(&mut timeval)) {
                Ok(0) => {
                    log::error!("No data available");
                    return None;
                }
                Ok(_) if !fd_set.contains(borrowfd) => {
                    log::error!("No data available");
                    return None;
                }
                Ok(_) => {}
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    log::error!("I/O Error: {}", e);
                    return None;
                }
            }

            recv.addr = &mut addr as *mut IpmiAddr as *mut u8;
            recv.addr_len = std::mem::size_of::<IpmiAddr>() as u32;
            recv.msg.data = buf.as_mut_ptr();
            recv.msg.data_len = buf.len() as u16;

            // 截断的消息仍然可用
            if let Err(e) = unsafe { ipmi_ioctl_receive_msg_trunc(fd, &mut recv) } {
                if e != Errno::EMSGSIZE {
                    log::error!("Unable to receive msg: {}", e);
                    return None;
                }
            }

            if recv.msgid != msgid {
                log::error!(
                    "Received a response with unexpected ID {} vs. {}",
                    recv.msgid,
                    msgid
                );
                continue;
            }
            break;
        }

        let len = (recv.msg.data_len as usize).min(buf.len());
        debug5!("Got message:");
        debug5!("  type      = {}", recv.recv_type);
        debug5!("  channel   = {:#x}", addr.channel);
        debug5!("  msgid     = {}", recv.msgid);
        debug5!("  netfn     = {:#x}", recv.msg.netfn);
        debug5!("  cmd       = {:#x}", recv.msg.cmd);
        debug5!("  data_len  = {}", len);
        debug5!("  data      = {}", buf2str(&buf[..len]));
        Some(len)
    }
}

impl IpmiIntf for OpenIntf {
    fn context(&mut self) -> &mut IpmiContext {
        &mut self.context
    }

    fn setup(&mut self) -> IpmiResult<()> {
        if self.context.my_addr() == 0 {
            self.context.set_my_addr(IPMI_BMC_SLAVE_ADDR);
        }
        Ok(())
    }

    fn open(&mut self) -> IpmiResult<()> {
        if self.fd.is_some() {
            return Ok(());
        }

        debug2!("Using ipmi device {}", self.devnum);
        let fd = self
            .dev_paths()
            .iter()
            .find_map(|path| open(path.as_str(), OFlag::O_RDWR, Mode::empty()).ok())
            .ok_or_else(|| {
                IpmiError::System(format!(
                    "Could not open device at /dev/ipmi{0} or /dev/ipmi/{0} or /dev/ipmidev/{0}: No such file or directory",
                    self.devnum
                ))
            })?;
        self.fd = Some(fd);
        if self.context.output.is_verbose() {
            log::info!("Opened {} ({}) device {}", self.desc, self.name, self.devnum);
        }

        let mut receive_events: i32 = 1;
        if unsafe { ipmi_ioctl_set_get_events_cmd(fd, &mut receive_events) }.is_err() {
            self.close();
            return Err(IpmiError::System(
                "Could not enable event receiver".to_string(),
            ));
        }

        let my_addr = self.context.my_addr() as u8;
        if my_addr != 0 && my_addr != IPMI_BMC_SLAVE_ADDR as u8 {
            if let Err(e) = self.set_my_addr(my_addr) {
                self.close();
                return Err(IpmiError::System(format!(
                    "Could not set IPMB address: {}",
                    e
                )));
            }
        }

        Ok(())
    }

    fn close(&mut self) {
        if let Some(fd) = self.fd.take() {
            let _ = nix::unistd::close(fd);
        }
    }

    fn sendrecv(&mut self, req: &IpmiRq) -> Option<IpmiRs> {
        if let Err(e) = self.open() {
            log::error!("{}", e);
            return None;
        }
        let fd = self.fd?;

        debug3!("OpenIPMI Request Message Header:");
        debug3!("  netfn     = 0x{:x}", req.msg.netfn());
        debug3!("  cmd       = 0x{:x}", req.msg.cmd);
        if is_debug_enabled(3) && !req.msg.data.is_empty() {
            debug3!("{}", hexbuf(&req.msg.data, "OpenIPMI Request Message Data"));
        }

        // -l 指定的 LUN 优先
        let lun = match self.context.target_lun() {
            0 => req.msg.lun(),
            lun => lun & 0x03,
        };
        let mut bmc_addr = IpmiSystemInterfaceAddr {
            addr_type: IPMI_SYSTEM_INTERFACE_ADDR_TYPE,
            channel: IPMI_BMC_CHANNEL as i16,
            lun,
        };
        let mut ipmb_addr = IpmiIpmbAddr {
            addr_type: IPMI_IPMB_ADDR_TYPE,
            channel: (self.context.target_channel() & 0x0f) as i16,
            slave_addr: self.context.target_addr() as u8,
            lun,
        };

        let mut ioreq = IpmiReq::default();
        if self.context.is_bridged() {
            log::info!(
                "Sending request 0x{:x} to IPMB target @ 0x{:x}:0x{:x} (from 0x{:x})",
                req.msg.cmd,
                self.context.target_addr(),
                self.context.target_channel(),
                self.context.my_addr()
            );
            ioreq.addr = &mut ipmb_addr as *mut IpmiIpmbAddr as *mut u8;
            ioreq.addr_len = std::mem::size_of::<IpmiIpmbAddr>() as u32;
        } else {
            ioreq.addr = &mut bmc_addr as *mut IpmiSystemInterfaceAddr as *mut u8;
            ioreq.addr_len = std::mem::size_of::<IpmiSystemInterfaceAddr>() as u32;
        }

        // 内核只读取请求数据，这里仍然给它一份可变拷贝
        let mut data = req.msg.data.clone();
        ioreq.msgid = next_seq();
        ioreq.msg = IpmiMsg {
            netfn: req.msg.netfn(),
            cmd: req.msg.cmd,
            data_len: data.len() as u16,
            data: if data.is_empty() {
                std::ptr::null_mut()
            } else {
                data.as_mut_ptr()
            },
        };
        debug4!(
            "OpenIPMI msgid {} addr_len {}",
            ioreq.msgid,
            ioreq.addr_len
        );

        if let Err(e) = unsafe { ipmi_ioctl_send_command(fd, &mut ioreq) } {
            log::error!("Unable to send command: {}", e);
            return None;
        }

        let mut buf = vec![0u8; IPMI_BUF_SIZE];
        let len = self.recv_reply(fd, ioreq.msgid, &mut buf)?;
        if len == 0 {
            log::error!("Received a response without completion code");
            return None;
        }

        Some(IpmiRs::new(buf[0], &buf[1..len]))
    }

    fn set_my_addr(&mut self, addr: u8) -> IpmiResult<()> {
        let fd = self
            .fd
            .ok_or_else(|| IpmiError::Interface("device is not open".to_string()))?;
        let mut a = addr as u32;
        unsafe { ipmi_ioctl_set_my_address_cmd(fd, &mut a) }
            .map_err(|e| IpmiError::System(format!("Failed to set my address: {}", e)))?;
        self.context.set_my_addr(a);
        debug2!("Set IPMB address to 0x{:x}", a);
        Ok(())
    }
}

impl Drop for OpenIntf {
    fn drop(&mut self) {
        self.close();
    }
}

pub fn hexbuf(buf: &[u8], desc: &str) -> String {
    let mut output = format!("{} ({} bytes)", desc, buf.len());
    for chunk in buf.chunks(16) {
        output.push('\n');
        output.push_str(&buf2str(chunk));
    }
    output
}
