/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
//! Command-line paths that finish before any IPMI device is opened.

use assert_cmd::Command;
use predicates::prelude::*;

fn vitatool() -> Command {
    let mut cmd = Command::cargo_bin("vitatool").unwrap();
    // 使用不存在的设备号，确保不会碰到真实的 BMC
    cmd.args(["-d", "250"]);
    cmd
}

#[test]
fn no_command_prints_general_help() {
    vitatool()
        .assert()
        .success()
        .stdout(predicate::str::contains("VITA commands:"));
}

#[test]
fn help_lists_commands() {
    vitatool()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("led set"))
        .stdout(predicate::str::contains("setipmbstate"));
}

#[test]
fn help_for_led_set() {
    vitatool()
        .args(["help", "led", "set"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "usage: led set <FRU-ID> <LED-ID> <FUNCTION> <DURATION> <COLOR>",
        ))
        .stdout(predicate::str::contains("0xF: use default color"));
}

#[test]
fn unknown_command_fails() {
    vitatool()
        .arg("bogus")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("VITA commands:"))
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn family_word_alone_is_unknown() {
    vitatool()
        .arg("policy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn frucontrol_needs_two_arguments() {
    vitatool()
        .args(["frucontrol", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("usage: frucontrol <FRU-ID> <OPTION>"))
        .stderr(predicate::str::contains("expected at least 2"));
}

#[test]
fn unsupported_command_fails() {
    vitatool()
        .arg("getfanpolicy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn bad_address_option_is_rejected() {
    vitatool()
        .args(["-t", "0x100", "properties"])
        .assert()
        .failure();
}

#[test]
fn setchassisid_without_bytes_prints_usage() {
    vitatool()
        .arg("setchassisid")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage: setchassisid <Sequence of bytes>"))
        .stderr(predicate::str::contains("Could not open device").not());
}

#[test]
fn setchassisid_bad_byte_prints_usage() {
    vitatool()
        .args(["setchassisid", "zz"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage: setchassisid <Sequence of bytes>"))
        .stderr(predicate::str::contains("Could not open device").not());
}

#[test]
fn setipmbstate_needs_three_bytes() {
    vitatool()
        .args(["setipmbstate", "1", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Usage: setipmbstate Byte0 Byte1 Byte2"))
        .stderr(predicate::str::contains("Could not open device").not());
}

#[test]
fn activate_bad_fru_id_prints_usage() {
    vitatool()
        .args(["activate", "zz"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("usage: activate <FRU-ID>"))
        .stderr(predicate::str::contains("FRU ID 'zz' is either invalid"))
        .stderr(predicate::str::contains("Could not open device").not());
}
