/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use thiserror::Error;

use crate::ipmi::strings::{val2str, COMPLETION_CODE_VALS};

/// Errors raised while building, sending or interpreting a VITA request.
///
/// 每个变体对应一类失败，调用方据此区分用法错误和设备错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpmiError {
    /// The transport returned nothing.
    #[error("No valid response received.")]
    NoResponse,

    /// The responder reported a fault completion code.
    #[error("Invalid completion code received: {}", val2str(*.0 as u32, COMPLETION_CODE_VALS))]
    CompletionCode(u8),

    /// The response payload is shorter than the fields being read.
    #[error("Invalid response length {actual} for {what} (expected at least {expected})")]
    ShortPayload {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The first response byte does not echo the group extension id.
    #[error("Invalid group extension {actual:#x} (expected {expected:#x})")]
    GroupMismatch { expected: u8, actual: u8 },

    /// Chassis identifier header does not carry the VITA tag bits.
    #[error("Not a VITA 46.11 chassis (identifier header {0:#04x})")]
    NotVitaChassis(u8),

    /// A command-line token could not be turned into a request field.
    #[error("{0}")]
    InvalidArgument(String),

    /// Too few positional arguments for the resolved command.
    #[error("{command}: expected at least {expected} argument(s), got {actual}")]
    MissingArguments {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown command")]
    UnknownCommand,

    /// Command word is part of the VITA vocabulary but has no implementation.
    #[error("Command '{0}' is not supported")]
    Unsupported(&'static str),

    /// Interface setup failure
    #[error("Interface error: {0}")]
    Interface(String),

    /// System error (device files, ioctl)
    #[error("{0}")]
    System(String),
}

impl IpmiError {
    /// Argument errors are reported together with the command usage.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            IpmiError::InvalidArgument(_) | IpmiError::MissingArguments { .. }
        )
    }
}

impl From<std::io::Error> for IpmiError {
    fn from(error: std::io::Error) -> Self {
        IpmiError::System(error.to_string())
    }
}

impl From<nix::Error> for IpmiError {
    fn from(error: nix::Error) -> Self {
        IpmiError::System(error.to_string())
    }
}

pub type IpmiResult<T> = Result<T, IpmiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_code_message_uses_vocabulary() {
        let err = IpmiError::CompletionCode(0xc1);
        assert_eq!(
            err.to_string(),
            "Invalid completion code received: Invalid command"
        );
    }

    #[test]
    fn group_mismatch_reports_observed_byte() {
        let err = IpmiError::GroupMismatch {
            expected: 0x03,
            actual: 0x00,
        };
        assert!(err.to_string().starts_with("Invalid group extension 0x0"));
    }

    #[test]
    fn usage_errors_are_classified() {
        assert!(IpmiError::InvalidArgument("x".into()).is_usage());
        assert!(!IpmiError::NoResponse.is_usage());
        assert!(!IpmiError::UnknownCommand.is_usage());
    }
}
