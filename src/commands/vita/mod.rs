/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Command-line front end for the VITA 46.11 command set.
//!
//! Tokens are resolved against a static two-level table: a command word,
//! and for the `policy` and `led` families a sub-command word. Each entry
//! carries the number of arguments it needs and a parser turning them into
//! a [`VitaRequest`]. Parsing never touches the interface, so every
//! argument error is reported before the device is opened.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::CommandResult;
use crate::error::IpmiError;
use crate::ipmi::intf::IpmiIntf;
use crate::ipmi::vita::codec::{ChassisId, FruActivation, IpmbState, LedSetting};
use crate::ipmi::vita::fields::FruPolicyBits;

pub mod chassis;
pub mod fru;
pub mod help;
pub mod led;
pub mod properties;

use help::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitaCmd {
    Help,
    Properties,
    ChassisAddrTableInfo,
    GetChassisId,
    SetChassisId,
    FruControl,
    SetIpmbState,
    SetFruPolicy,
    GetFruPolicy,
    GetDeviceLocator,
    GetChassisMgrIpmbAddr,
    SetFanPolicy,
    GetFanPolicy,
    AddrInfo,
    Activate,
    Deactivate,
    PolicyGet,
    PolicySet,
    LedProp,
    LedCap,
    LedGet,
    LedSet,
    Unknown,
}

/// A fully validated command, ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VitaRequest {
    Properties,
    AddrInfo { fru_id: u8 },
    GetChassisId,
    SetChassisId(ChassisId),
    SetIpmbState(IpmbState),
    Activation { fru_id: u8, action: FruActivation },
    GetPolicy { fru_id: u8 },
    SetPolicy {
        fru_id: u8,
        mask: FruPolicyBits,
        value: FruPolicyBits,
    },
    FruControl { fru_id: u8, option: u8 },
    LedProperties { fru_id: u8 },
    LedColorCaps { fru_id: u8, led_id: u8 },
    LedState { fru_id: u8, led_id: u8 },
    SetLedState(LedSetting),
}

impl VitaRequest {
    pub fn execute(&self, intf: &mut dyn IpmiIntf) -> CommandResult {
        match self {
            VitaRequest::Properties => properties::ipmi_vita_get_vso_capabilities(intf),
            VitaRequest::AddrInfo { fru_id } => properties::ipmi_vita_getaddr(intf, *fru_id),
            VitaRequest::GetChassisId => chassis::ipmi_vita_get_chassis_id(intf),
            VitaRequest::SetChassisId(id) => chassis::ipmi_vita_set_chassis_id(intf, id),
            VitaRequest::SetIpmbState(state) => chassis::ipmi_vita_set_ipmb_state(intf, state),
            VitaRequest::Activation { fru_id, action } => {
                fru::ipmi_vita_set_fru_activation(intf, *fru_id, *action)
            }
            VitaRequest::GetPolicy { fru_id } => fru::ipmi_vita_get_fru_policy(intf, *fru_id),
            VitaRequest::SetPolicy {
                fru_id,
                mask,
                value,
            } => fru::ipmi_vita_set_fru_policy(intf, *fru_id, *mask, *value),
            VitaRequest::FruControl { fru_id, option } => {
                fru::ipmi_vita_fru_control(intf, *fru_id, *option)
            }
            VitaRequest::LedProperties { fru_id } => led::ipmi_vita_get_led_properties(intf, *fru_id),
            VitaRequest::LedColorCaps { fru_id, led_id } => {
                led::ipmi_vita_get_led_color_capabilities(intf, *fru_id, *led_id)
            }
            VitaRequest::LedState { fru_id, led_id } => {
                led::ipmi_vita_get_led_state(intf, *fru_id, *led_id)
            }
            VitaRequest::SetLedState(setting) => led::ipmi_vita_set_led_state(intf, setting),
        }
    }
}

type ArgParser = fn(&[String]) -> CommandResult<VitaRequest>;

/// One row of the command table.
pub struct VitaCommand {
    pub cmd: VitaCmd,
    pub name: &'static str,
    pub sub: Option<&'static str>,
    /// Full command words, used in messages.
    pub words: &'static str,
    /// Arguments required after the command words.
    pub min_args: usize,
    pub usage: Option<&'static str>,
    /// `None` for words that are recognised but not implemented.
    pub parse: Option<ArgParser>,
}

macro_rules! vita_cmd {
    ($cmd:ident, $name:literal, $min:expr, $usage:expr, $parse:expr) => {
        VitaCommand {
            cmd: VitaCmd::$cmd,
            name: $name,
            sub: None,
            words: $name,
            min_args: $min,
            usage: $usage,
            parse: $parse,
        }
    };
    ($cmd:ident, $name:literal $sub:literal, $min:expr, $usage:expr, $parse:expr) => {
        VitaCommand {
            cmd: VitaCmd::$cmd,
            name: $name,
            sub: Some($sub),
            words: concat!($name, " ", $sub),
            min_args: $min,
            usage: $usage,
            parse: $parse,
        }
    };
}

static VITA_COMMANDS: &[VitaCommand] = &[
    vita_cmd!(Properties, "properties", 0, None, Some(properties::parse_properties)),
    vita_cmd!(ChassisAddrTableInfo, "chassisaddr", 0, None, None),
    vita_cmd!(GetChassisId, "getchassisid", 0, Some(GETCHASSISID_USAGE), Some(chassis::parse_get_chassis_id)),
    vita_cmd!(SetChassisId, "setchassisid", 0, Some(SETCHASSISID_USAGE), Some(chassis::parse_set_chassis_id)),
    vita_cmd!(FruControl, "frucontrol", 2, Some(FRUCONTROL_USAGE), Some(fru::parse_fru_control)),
    vita_cmd!(SetIpmbState, "setipmbstate", 0, Some(SETIPMBSTATE_USAGE), Some(chassis::parse_set_ipmb_state)),
    vita_cmd!(SetFruPolicy, "setfrupolicy", 3, Some(SETFRUPOLICY_USAGE), Some(fru::parse_set_policy)),
    vita_cmd!(GetFruPolicy, "getfrupolicy", 1, Some(GETFRUPOLICY_USAGE), Some(fru::parse_get_policy)),
    vita_cmd!(GetDeviceLocator, "getdevicelocator", 0, None, None),
    vita_cmd!(GetChassisMgrIpmbAddr, "getcmipmbaddr", 0, None, None),
    vita_cmd!(SetFanPolicy, "setfanpolicy", 0, None, None),
    vita_cmd!(GetFanPolicy, "getfanpolicy", 0, None, None),
    vita_cmd!(AddrInfo, "addrinfo", 0, Some(ADDRINFO_USAGE), Some(properties::parse_addrinfo)),
    vita_cmd!(Activate, "activate", 1, Some(ACTIVATE_USAGE), Some(fru::parse_activate)),
    vita_cmd!(Deactivate, "deactivate", 1, Some(DEACTIVATE_USAGE), Some(fru::parse_deactivate)),
    vita_cmd!(PolicyGet, "policy" "get", 1, Some(POLICY_GET_USAGE), Some(fru::parse_get_policy)),
    vita_cmd!(PolicySet, "policy" "set", 3, Some(POLICY_SET_USAGE), Some(fru::parse_set_policy)),
    vita_cmd!(LedProp, "led" "prop", 1, Some(LED_PROP_USAGE), Some(led::parse_led_prop)),
    vita_cmd!(LedCap, "led" "cap", 2, Some(LED_CAP_USAGE), Some(led::parse_led_cap)),
    vita_cmd!(LedGet, "led" "get", 2, Some(LED_GET_USAGE), Some(led::parse_led_get)),
    vita_cmd!(LedSet, "led" "set", 5, Some(LED_SET_USAGE), Some(led::parse_led_set)),
];

enum Node {
    Leaf(&'static VitaCommand),
    Family(HashMap<&'static str, &'static VitaCommand>),
}

lazy_static! {
    static ref COMMAND_INDEX: HashMap<&'static str, Node> = build_index();
}

fn build_index() -> HashMap<&'static str, Node> {
    let mut index = HashMap::new();
    for entry in VITA_COMMANDS {
        match entry.sub {
            None => {
                index.insert(entry.name, Node::Leaf(entry));
            }
            Some(sub) => {
                if let Node::Family(subs) = index
                    .entry(entry.name)
                    .or_insert_with(|| Node::Family(HashMap::new()))
                {
                    subs.insert(sub, entry);
                }
            }
        }
    }
    index
}

/// Outcome of resolving a token sequence.
#[derive(Clone, Copy)]
pub enum Resolved<'a> {
    /// `help`, optionally followed by the tokens of the topic.
    Help(&'a [String]),
    /// A table entry and the arguments left after its command words.
    Command(&'static VitaCommand, &'a [String]),
    Unknown,
}

impl Resolved<'_> {
    pub fn cmd(&self) -> VitaCmd {
        match self {
            Resolved::Help(_) => VitaCmd::Help,
            Resolved::Command(entry, _) => entry.cmd,
            Resolved::Unknown => VitaCmd::Unknown,
        }
    }
}

pub fn resolve(tokens: &[String]) -> Resolved<'_> {
    let Some(first) = tokens.first() else {
        return Resolved::Help(tokens);
    };
    if first == "help" {
        return Resolved::Help(&tokens[1..]);
    }

    match COMMAND_INDEX.get(first.as_str()) {
        Some(Node::Leaf(entry)) => Resolved::Command(*entry, &tokens[1..]),
        Some(Node::Family(subs)) => match tokens.get(1).and_then(|sub| subs.get(sub.as_str())) {
            Some(entry) => Resolved::Command(*entry, &tokens[2..]),
            None => Resolved::Unknown,
        },
        None => Resolved::Unknown,
    }
}

/// Map a token sequence to its command identifier.
pub fn ipmi_vita_get_cmd(tokens: &[String]) -> VitaCmd {
    resolve(tokens).cmd()
}

fn print_help(topic: Resolved<'_>) {
    match topic {
        Resolved::Command(entry, _) => println!("{}", entry.usage.unwrap_or(VITA_HELP)),
        Resolved::Unknown => {
            println!("{}", UNKNOWN_USAGE);
            println!("{}", VITA_HELP);
        }
        Resolved::Help(_) => println!("{}", VITA_HELP),
    }
}

impl VitaCommand {
    fn print_usage(&self) {
        println!("{}", self.usage.unwrap_or(VITA_HELP));
    }

    /// Check arity and turn `args` into a request. Usage is printed for
    /// argument errors.
    fn parse(&self, args: &[String]) -> CommandResult<VitaRequest> {
        let Some(parse) = self.parse else {
            log::warn!("VITA command '{}' is not supported", self.words);
            println!("{}", VITA_HELP);
            return Err(IpmiError::Unsupported(self.words));
        };

        if args.len() < self.min_args {
            self.print_usage();
            return Err(IpmiError::MissingArguments {
                command: self.words,
                expected: self.min_args,
                actual: args.len(),
            });
        }

        parse(args).inspect_err(|e| {
            if e.is_usage() {
                self.print_usage();
            }
        })
    }
}

/// Resolve `tokens` into a request without touching any interface.
///
/// `Ok(None)` means the tokens asked for help, which has been printed.
pub fn ipmi_vita_parse(tokens: &[String]) -> CommandResult<Option<VitaRequest>> {
    match resolve(tokens) {
        Resolved::Help(topic) => {
            print_help(resolve(topic));
            Ok(None)
        }
        Resolved::Unknown => {
            println!("{}", VITA_HELP);
            Err(IpmiError::UnknownCommand)
        }
        Resolved::Command(entry, args) => {
            let request = entry.parse(args)?;
            debug2!("VITA command '{}': {:?}", entry.words, request);
            Ok(Some(request))
        }
    }
}

/// Resolve `tokens` and run the matching command.
pub fn ipmi_vita_main(intf: &mut dyn IpmiIntf, tokens: &[String]) -> CommandResult {
    match ipmi_vita_parse(tokens)? {
        Some(request) => request.execute(intf),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipmi::intf::testing::ScriptedIntf;
    use rstest::rstest;

    #[rstest]
    #[case(&[], VitaCmd::Help)]
    #[case(&["help"], VitaCmd::Help)]
    #[case(&["help", "led", "set"], VitaCmd::Help)]
    #[case(&["properties"], VitaCmd::Properties)]
    #[case(&["addrinfo", "3"], VitaCmd::AddrInfo)]
    #[case(&["getchassisid"], VitaCmd::GetChassisId)]
    #[case(&["setchassisid", "01"], VitaCmd::SetChassisId)]
    #[case(&["setipmbstate"], VitaCmd::SetIpmbState)]
    #[case(&["frucontrol"], VitaCmd::FruControl)]
    #[case(&["activate"], VitaCmd::Activate)]
    #[case(&["deactivate"], VitaCmd::Deactivate)]
    #[case(&["policy", "get"], VitaCmd::PolicyGet)]
    #[case(&["policy", "set"], VitaCmd::PolicySet)]
    #[case(&["setfrupolicy"], VitaCmd::SetFruPolicy)]
    #[case(&["getfrupolicy"], VitaCmd::GetFruPolicy)]
    #[case(&["led", "prop"], VitaCmd::LedProp)]
    #[case(&["led", "cap"], VitaCmd::LedCap)]
    #[case(&["led", "get"], VitaCmd::LedGet)]
    #[case(&["led", "set", "1"], VitaCmd::LedSet)]
    #[case(&["chassisaddr"], VitaCmd::ChassisAddrTableInfo)]
    #[case(&["getdevicelocator"], VitaCmd::GetDeviceLocator)]
    #[case(&["getcmipmbaddr"], VitaCmd::GetChassisMgrIpmbAddr)]
    #[case(&["setfanpolicy"], VitaCmd::SetFanPolicy)]
    #[case(&["getfanpolicy"], VitaCmd::GetFanPolicy)]
    #[case(&["policy"], VitaCmd::Unknown)]
    #[case(&["policy", "dump"], VitaCmd::Unknown)]
    #[case(&["led"], VitaCmd::Unknown)]
    #[case(&["led", "blink"], VitaCmd::Unknown)]
    #[case(&["bogus"], VitaCmd::Unknown)]
    #[case(&["PROPERTIES"], VitaCmd::Unknown)]
    fn resolves_command_words(#[case] tokens: &[&str], #[case] expected: VitaCmd) {
        assert_eq!(ipmi_vita_get_cmd(&args(tokens)), expected);
    }

    #[test]
    fn resolved_arguments_skip_command_words() {
        let tokens = args(&["led", "get", "1", "2"]);
        match resolve(&tokens) {
            Resolved::Command(entry, rest) => {
                assert_eq!(entry.words, "led get");
                assert_eq!(rest, &tokens[2..]);
            }
            _ => panic!("led get did not resolve"),
        }
    }

    #[rstest]
    #[case(&[])]
    #[case(&["help"])]
    #[case(&["help", "led", "set"])]
    #[case(&["help", "bogus"])]
    #[case(&["help", "chassisaddr"])]
    fn help_never_touches_interface(#[case] tokens: &[&str]) {
        let mut intf = ScriptedIntf::new();
        assert!(ipmi_vita_main(&mut intf, &args(tokens)).is_ok());
        assert!(intf.requests.is_empty());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&["policy", "dump"])).unwrap_err();
        assert_eq!(err, IpmiError::UnknownCommand);
        assert!(intf.requests.is_empty());
    }

    #[rstest]
    #[case(&["frucontrol", "1"], "frucontrol", 2, 1)]
    #[case(&["activate"], "activate", 1, 0)]
    #[case(&["deactivate"], "deactivate", 1, 0)]
    #[case(&["policy", "get"], "policy get", 1, 0)]
    #[case(&["policy", "set", "1", "0xf"], "policy set", 3, 2)]
    #[case(&["setfrupolicy", "1"], "setfrupolicy", 3, 1)]
    #[case(&["led", "prop"], "led prop", 1, 0)]
    #[case(&["led", "cap", "1"], "led cap", 2, 1)]
    #[case(&["led", "get", "1"], "led get", 2, 1)]
    #[case(&["led", "set", "1", "0", "255", "0"], "led set", 5, 4)]
    fn short_argument_lists_are_rejected(
        #[case] tokens: &[&str],
        #[case] command: &'static str,
        #[case] expected: usize,
        #[case] actual: usize,
    ) {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(tokens)).unwrap_err();
        assert_eq!(
            err,
            IpmiError::MissingArguments {
                command,
                expected,
                actual,
            }
        );
        assert!(intf.requests.is_empty());
    }

    #[rstest]
    #[case("chassisaddr")]
    #[case("getdevicelocator")]
    #[case("getcmipmbaddr")]
    #[case("setfanpolicy")]
    #[case("getfanpolicy")]
    fn unimplemented_words_are_unsupported(#[case] word: &str) {
        let mut intf = ScriptedIntf::new();
        let err = ipmi_vita_main(&mut intf, &args(&[word])).unwrap_err();
        assert!(matches!(err, IpmiError::Unsupported(name) if name == word));
        assert!(intf.requests.is_empty());
    }

    #[rstest]
    #[case(&["properties"], VitaRequest::Properties)]
    #[case(&["addrinfo"], VitaRequest::AddrInfo { fru_id: 0 })]
    #[case(&["led", "get", "1", "0x2"], VitaRequest::LedState { fru_id: 1, led_id: 2 })]
    #[case(&["deactivate", "010"], VitaRequest::Activation { fru_id: 8, action: FruActivation::Deactivate })]
    fn parses_requests(#[case] tokens: &[&str], #[case] expected: VitaRequest) {
        assert_eq!(ipmi_vita_parse(&args(tokens)).unwrap(), Some(expected));
    }

    #[rstest]
    #[case(&["help", "properties"])]
    #[case(&[])]
    fn help_parses_to_nothing(#[case] tokens: &[&str]) {
        assert_eq!(ipmi_vita_parse(&args(tokens)).unwrap(), None);
    }

    #[rstest]
    #[case(&["setchassisid"])]
    #[case(&["setchassisid", "zz"])]
    #[case(&["setipmbstate", "1", "2"])]
    #[case(&["activate", "zz"])]
    #[case(&["led", "set", "1", "0", "0", "0", "blue"])]
    #[case(&["policy", "set", "1", "0x100", "0"])]
    fn malformed_arguments_fail_before_any_request(#[case] tokens: &[&str]) {
        let err = ipmi_vita_parse(&args(tokens)).unwrap_err();
        assert!(err.is_usage(), "{:?}", err);
    }

    #[test]
    fn table_words_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for entry in VITA_COMMANDS {
            assert!(seen.insert(entry.words), "duplicate entry {}", entry.words);
            if let Some(sub) = entry.sub {
                assert!(entry.words.ends_with(sub));
            }
        }
    }
}
