/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
mod cli;
use clap::Parser;
use cli::{Cli, InterfaceType};

use vitatool::commands::vita::ipmi_vita_parse;
use vitatool::commands::CommandResult;
use vitatool::interface::open::OpenIntf;
use vitatool::ipmi::intf::{IpmiContext, IpmiIntf, IpmiIntfExt};
use vitatool::ipmi::vita::{ipmi_vita_ipmb_address, vita_discover};
use vitatool::logging;
use vitatool::{debug2, debug3};

fn main() {
    let cli = Cli::parse();
    logging::setup_logger(cli.global.verbose);

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> CommandResult {
    let global = &cli.global;

    // 帮助和参数错误在打开设备之前处理
    let Some(request) = ipmi_vita_parse(&cli.command)? else {
        return Ok(());
    };

    let mut ctx = IpmiContext::local(global.verbose);
    if let Some(addr) = global.arg_addr {
        ctx.set_my_addr(addr as u32);
    }
    if let Some(addr) = global.target_addr {
        ctx.set_target_addr(addr as u32);
        ctx.set_target_channel(global.target_channel);
    }
    ctx.set_target_lun(global.target_lun);

    // 加载接口
    debug3!("Loading interface: {:?}", global.interface);
    let mut intf: Box<dyn IpmiIntf> = match global.interface {
        InterfaceType::Open => Box::new(OpenIntf::new(global.devnum, ctx)),
    };
    intf.setup()?;

    intf.open()?;
    debug3!("Interface opened successfully");
    acquire_ipmb_address(intf.as_mut(), global.arg_addr.is_none());

    let result = request.execute(intf.as_mut());
    intf.close();
    result
}

fn acquire_ipmb_address(intf: &mut dyn IpmiIntf, update_my_addr: bool) {
    debug2!("Acquire IPMB address");
    let addr = if vita_discover(intf) {
        ipmi_vita_ipmb_address(intf)
    } else {
        0
    };
    debug2!("Discovered IPMB address 0x{:02x}", addr);
    if addr == 0 {
        return;
    }

    intf.with_context(|ctx| ctx.set_target_ipmb_addr(addr));
    log::info!("Discovered Target IPMB-0 address 0x{:02x}", addr);

    let my_addr = intf.with_context(|ctx| ctx.my_addr());
    if update_my_addr && addr as u32 != my_addr {
        if let Err(e) = intf.set_my_addr(addr) {
            log::warn!("Unable to set my address to 0x{:x}: {}", addr, e);
            intf.with_context(|ctx| ctx.set_my_addr(addr as u32));
        }
    }

    intf.with_context(|ctx| {
        debug2!(
            "Interface address: my_addr 0x{:02x} target 0x{:02x}:{} ipmb_target 0x{:02x}",
            ctx.my_addr(),
            ctx.target_addr(),
            ctx.target_channel(),
            ctx.target_ipmb_addr()
        );
    });
}
