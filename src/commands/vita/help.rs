/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
pub const VITA_HELP: &str = "VITA commands:
    properties        - get VSO properties
    frucontrol        - FRU control
    addrinfo          - get address information
    activate          - activate a FRU
    deactivate        - deactivate a FRU
    policy get        - get the FRU activation policy
    policy set        - set the FRU activation policy
    led prop          - get led properties
    led cap           - get led color capabilities
    led get           - get led state
    led set           - set led state
    getchassisid      - Get Chassis ID
    setchassisid      - Set Chassis ID
    setipmbstate      - Set IPMB state
    getfrupolicy      - same as policy get
    setfrupolicy      - same as policy set";

pub const FRUCONTROL_USAGE: &str = "usage: frucontrol <FRU-ID> <OPTION>
    OPTION: 0 - Cold Reset
            1 - Warm Reset
            2 - Graceful Reboot
            3 - Issue Diagnostic Interrupt
            4 - Quiesce";

pub const ADDRINFO_USAGE: &str = "usage: addrinfo [<FRU-ID>]";

pub const ACTIVATE_USAGE: &str = "usage: activate <FRU-ID>";

pub const DEACTIVATE_USAGE: &str = "usage: deactivate <FRU-ID>";

pub const POLICY_GET_USAGE: &str = "usage: policy get <FRU-ID>";

pub const GETFRUPOLICY_USAGE: &str = "usage: getfrupolicy <FRU-ID>";

macro_rules! policy_bits_help {
    () => {
        "
    MASK:  [3] affect the Default-Activation-Locked Policy Bit
           [2] affect the Commanded-Deactivation-Ignored Policy Bit
           [1] affect the Deactivation-Locked Policy Bit
           [0] affect the Activation-Locked Policy Bit
    VALUE: [3] value for the Default-Activation-Locked Policy Bit
           [2] value for the Commanded-Deactivation-Ignored Policy Bit
           [1] value for the Deactivation-Locked Policy Bit
           [0] value for the Activation-Locked Policy Bit"
    };
}

pub const POLICY_SET_USAGE: &str = concat!(
    "usage: policy set <FRU-ID> <MASK> <VALUE>",
    policy_bits_help!()
);

pub const SETFRUPOLICY_USAGE: &str = concat!(
    "usage: setfrupolicy <FRU-ID> <MASK> <VALUE>",
    policy_bits_help!()
);

pub const LED_PROP_USAGE: &str = "usage: led prop <FRU-ID>";

pub const LED_CAP_USAGE: &str = "usage: led cap <FRU-ID> <LED-ID>";

pub const LED_GET_USAGE: &str = "usage: led get <FRU-ID> <LED-ID>";

pub const LED_SET_USAGE: &str = "usage: led set <FRU-ID> <LED-ID> <FUNCTION> <DURATION> <COLOR>
    <FRU-ID>
    <LED-ID>   0-0xFE:    Specified LED
               0xFF:      All LEDs under management control
    <FUNCTION> 0:       LED OFF override
               1 - 250: LED blinking override (off duration)
               251:     LED Lamp Test
               252:     LED restore to local control
               255:     LED ON override
    <DURATION> 1 - 127: LED Lamp Test / on duration
    <COLOR>    1:   BLUE
               2:   RED
               3:   GREEN
               4:   AMBER
               5:   ORANGE
               6:   WHITE
               0xE: do not change
               0xF: use default color";

pub const GETCHASSISID_USAGE: &str = "Usage: getchassisid";

pub const SETCHASSISID_USAGE: &str = "Usage: setchassisid <Sequence of bytes>";

pub const SETIPMBSTATE_USAGE: &str = "Usage: setipmbstate Byte0 Byte1 Byte2";

pub const UNKNOWN_USAGE: &str = "Unknown command";
