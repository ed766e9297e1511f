/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{IpmiError, IpmiResult};

/// Parse an unsigned byte the way `strtoul(s, NULL, 0)` reads it:
/// `0x` prefix for hexadecimal, a leading `0` for octal, decimal otherwise.
/// The whole token must be consumed and the value must fit in a byte.
pub fn str2uchar(s: &str) -> IpmiResult<u8> {
    let invalid = || IpmiError::InvalidArgument(format!("Given value '{}' is invalid.", s));

    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let value = u32::from_str_radix(digits, radix).map_err(|_| {
        IpmiError::InvalidArgument(format!("Given value '{}' is out of range.", s))
    })?;
    u8::try_from(value)
        .map_err(|_| IpmiError::InvalidArgument(format!("Given value '{}' is out of range.", s)))
}

/// Validate a FRU device id token.
pub fn is_fru_id(s: &str) -> IpmiResult<u8> {
    str2uchar(s).map_err(|_| {
        IpmiError::InvalidArgument(format!(
            "FRU ID '{}' is either invalid or out of range.",
            s
        ))
    })
}

/// Parse a hexadecimal byte with an optional `0x` prefix, as `%x` does.
pub fn parse_hex_byte(s: &str) -> IpmiResult<u8> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(IpmiError::InvalidArgument(format!(
            "Given value '{}' is not a hexadecimal byte.",
            s
        )));
    }
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| {
            IpmiError::InvalidArgument(format!("Given value '{}' is out of range.", s))
        })
}

pub fn buf2str(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("10", 10)]
    #[case("255", 255)]
    #[case("0x1f", 0x1f)]
    #[case("0XFF", 0xff)]
    #[case("017", 0o17)]
    fn str2uchar_accepts(#[case] token: &str, #[case] expected: u8) {
        assert_eq!(str2uchar(token), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("256")]
    #[case("0x100")]
    #[case("-1")]
    #[case("12abc")]
    #[case("0x")]
    #[case("09")]
    #[case(" 1")]
    fn str2uchar_rejects(#[case] token: &str) {
        assert!(matches!(str2uchar(token), Err(IpmiError::InvalidArgument(_))));
    }

    #[test]
    fn every_hex_fru_id_round_trips() {
        for id in 0..=255u8 {
            assert_eq!(is_fru_id(&format!("0x{:02x}", id)), Ok(id));
        }
    }

    #[test]
    fn fru_id_message() {
        assert_eq!(
            is_fru_id("300").unwrap_err().to_string(),
            "FRU ID '300' is either invalid or out of range."
        );
    }

    #[rstest]
    #[case("10", 0x10)]
    #[case("0x10", 0x10)]
    #[case("ff", 0xff)]
    #[case("A", 0x0a)]
    fn hex_byte_accepts(#[case] token: &str, #[case] expected: u8) {
        assert_eq!(parse_hex_byte(token), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("g1")]
    #[case("100")]
    #[case("0x")]
    fn hex_byte_rejects(#[case] token: &str) {
        assert!(parse_hex_byte(token).is_err());
    }

    #[test]
    fn buf2str_spacing() {
        assert_eq!(buf2str(&[0x03, 0xc2, 0x0a]), "03 c2 0a");
        assert_eq!(buf2str(&[]), "");
    }
}
