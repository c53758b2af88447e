// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    parsing::parse_address_list,
    structs::{Address, AddressList, IpFam, Subnet},
    AddressError,
};
use tracing::debug;

/**
Find the smallest CIDR block covering every address in `lines`.

This is the whole pipeline in one call: per-line parsing/validation,
common-prefix analysis, and masking. The returned [Subnet] renders the
final `<address>/<prefix>` string via its [Display](std::fmt::Display)
impl. The first invalid line aborts the computation, as does an empty
input.

```
use minsubnet::{find_subnet, IpFam};

let lines = ["192.168.1.2", "192.168.1.3", "192.168.1.5"];
let subnet = find_subnet(&lines, IpFam::V4).unwrap();
assert_eq!(subnet.to_string(), "192.168.1.0/29");
```
*/
pub fn find_subnet(lines: &[impl AsRef<str>], fam: IpFam) -> Result<Subnet, AddressError> {
    let list: AddressList = parse_address_list(lines, fam)?;
    let prefix: u8 = common_prefix_len(&list);
    debug!("{} addresses share a /{} prefix", list.len(), prefix);
    Ok(apply_mask(list.first(), prefix))
}

/* ---------------------------------- */

/**
Derive the number of leading bits common to all addresses in the list.

The rule is deliberately not a true bitwise longest-common-prefix scan:
the prefix ends at the first field where any address disagrees with the
first one, and within that field the common bit count is the leading-zero
run of the *maximum* value observed there. This is exact for contiguous,
aligned ranges and is kept as-is for compatibility with the tool's
historical results.
*/
pub(crate) fn common_prefix_len(list: &AddressList) -> u8 {
    let bits: u8 = list.fam.field_bits();
    let min_field: usize = first_diff_field(list);

    let highest: u16 = list
        .addrs()
        .iter()
        .map(|addr| addr.fields()[min_field])
        .max()
        .unwrap_or(0);

    min_field as u8 * bits + (bits - significant_bits(highest, bits))
}

/// First field index at which any address disagrees with the first one.
/// Falls back to the last index when the whole list is identical.
fn first_diff_field(list: &AddressList) -> usize {
    let first: &[u16] = list.first().fields();
    for (i, field) in first.iter().enumerate() {
        for addr in list.addrs() {
            if addr.fields()[i] != *field {
                return i;
            }
        }
    }
    first.len() - 1
}

/// Bit length of `v` within a `bits`-wide field: position of the highest
/// set bit counted from the least significant end, 0 for a value of 0.
#[inline]
pub(crate) fn significant_bits(v: u16, bits: u8) -> u8 {
    debug_assert!(bits == 16 || (v as u32) < (1u32 << bits));
    (u16::BITS - v.leading_zeros()) as u8
}

/* ---------------------------------- */

/// Apply a `prefix`-length mask to `addr`, producing the network address.
pub(crate) fn apply_mask(addr: &Address, prefix: u8) -> Subnet {
    let fam: IpFam = addr.fam;
    let masked: u128 = addr.to_bits() & mask_bits(fam.total_bits(), prefix);

    Subnet {
        fam,
        fields: unpack_fields(masked, fam),
        prefix,
    }
}

/**
Returns a u128 with `prefix` high bits set within a `bits`-wide window,
remaining low bits zero.

bits: 32 or 128, prefix: `0..=bits`
*/
#[inline]
fn mask_bits(bits: u8, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let all: u128 = if bits == 128 {
        !0u128
    } else {
        (1u128 << bits) - 1
    };
    if prefix >= bits {
        return all;
    }
    let low: u8 = bits - prefix;
    all & !((1u128 << low) - 1)
}

/// Split a packed address back into most-significant-first fields.
fn unpack_fields(v: u128, fam: IpFam) -> Vec<u16> {
    let bits: u32 = fam.field_bits() as u32;
    let n: usize = fam.fields();
    let field_mask: u128 = (1u128 << bits) - 1;

    (0..n)
        .map(|i| ((v >> ((n - 1 - i) as u32 * bits)) & field_mask) as u16)
        .collect()
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subnet::parsing::parse_address;
    use quickcheck_macros::quickcheck;

    const DATA_LAST: [&str; 3] = ["192.168.1.2", "192.168.1.3", "192.168.1.5"];
    const DATA_MID: [&str; 3] = ["192.168.1.0", "192.168.1.3", "192.168.2.0"];
    const DATA_SAME: [&str; 3] = ["192.168.1.0", "192.168.1.0", "192.168.1.0"];

    fn v4_list(lines: &[&str]) -> AddressList {
        parse_address_list(lines, IpFam::V4).unwrap()
    }

    #[test]
    fn test_first_diff_field() {
        assert_eq!(first_diff_field(&v4_list(&DATA_LAST)), 3);
        assert_eq!(first_diff_field(&v4_list(&DATA_MID)), 2);
        assert_eq!(first_diff_field(&v4_list(&DATA_SAME)), 3);
    }

    #[test]
    fn test_significant_bits() {
        assert_eq!(significant_bits(0, 8), 0);
        assert_eq!(significant_bits(0b101, 8), 3);
        assert_eq!(significant_bits(0b100101, 8), 6);
        assert_eq!(significant_bits(255, 8), 8);
        assert_eq!(significant_bits(0xffe0, 16), 16);
        assert_eq!(significant_bits(1, 16), 1);
    }

    #[test]
    fn test_mask_bits() {
        assert_eq!(mask_bits(32, 0), 0);
        assert_eq!(mask_bits(32, 24), 0xffffff00);
        assert_eq!(mask_bits(32, 32), 0xffffffff);
        assert_eq!(mask_bits(128, 0), 0);
        assert_eq!(mask_bits(128, 128), u128::MAX);
        assert_eq!(mask_bits(128, 72), !0u128 << 56);
    }

    #[test]
    fn test_find_subnet_v4() {
        let subnet = find_subnet(&DATA_LAST, IpFam::V4).unwrap();
        assert_eq!(subnet.to_string(), "192.168.1.0/29");
    }

    #[test]
    fn test_find_subnet_v4_identical() {
        let subnet = find_subnet(&DATA_SAME, IpFam::V4).unwrap();
        assert_eq!(subnet.to_string(), "192.168.1.0/32");
    }

    #[test]
    fn test_find_subnet_v4_whole_space() {
        let lines = ["0.0.0.0", "255.0.0.0"];
        let subnet = find_subnet(&lines, IpFam::V4).unwrap();
        assert_eq!(subnet.to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_find_subnet_v4_mid_field() {
        let lines = ["192.168.4.1", "192.168.15.30", "192.168.9.200"];
        let subnet = find_subnet(&lines, IpFam::V4).unwrap();
        assert_eq!(subnet.to_string(), "192.168.0.0/20");
    }

    #[test]
    fn test_find_subnet_v4_partial_octet() {
        let lines = ["164.172.80.100", "164.172.80.120"];
        let subnet = find_subnet(&lines, IpFam::V4).unwrap();
        assert_eq!(subnet.to_string(), "164.172.80.0/25");
    }

    #[test]
    fn test_find_subnet_v6() {
        let lines = ["ffe0:0:0:0:80:0:0:1", "ffe0::ff:0:0:2"];
        let subnet = find_subnet(&lines, IpFam::V6).unwrap();
        assert_eq!(subnet.to_string(), "ffe0::/72");
    }

    #[test]
    fn test_find_subnet_v6_partial_group() {
        // divergence inside the second group: max 0xfff has 4 leading
        // zero bits, so 16 whole bits + 4 common
        let lines = ["ffe0:800:0:0:1::", "ffe0:fff::2", "ffe0:900::"];
        let subnet = find_subnet(&lines, IpFam::V6).unwrap();
        assert_eq!(subnet.to_string(), "ffe0::/20");
    }

    #[test]
    fn test_find_subnet_v6_high_group_diff() {
        // first group diverges within its top nibble run
        let lines = ["ffe0::1", "fff0::2"];
        let subnet = find_subnet(&lines, IpFam::V6).unwrap();
        assert_eq!(subnet.to_string(), "::/0");
    }

    #[test]
    fn test_find_subnet_v6_whole_space() {
        let lines = ["::", "8000::"];
        let subnet = find_subnet(&lines, IpFam::V6).unwrap();
        assert_eq!(subnet.to_string(), "::/0");
    }

    #[test]
    fn test_find_subnet_aborts_on_invalid_line() {
        let lines = ["192.168.1.2", "300.200.1.0"];
        let result = find_subnet(&lines, IpFam::V4);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_subnet_empty_input() {
        let lines: [&str; 0] = [];
        assert_eq!(find_subnet(&lines, IpFam::V6), Err(AddressError::Empty));
    }

    /// same input always produces the same subnet
    #[quickcheck]
    fn deterministic(octets: Vec<(u8, u8, u8, u8)>) -> bool {
        if octets.is_empty() {
            return true;
        }
        let lines: Vec<String> = octets
            .iter()
            .map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
            .collect();
        find_subnet(&lines, IpFam::V4) == find_subnet(&lines, IpFam::V4)
    }

    /// masking the masked address again changes nothing
    #[quickcheck]
    fn masking_is_idempotent(a: u8, b: u8, c: u8, d: u8, prefix: u8) -> bool {
        let prefix = prefix % 33;
        let line = format!("{a}.{b}.{c}.{d}");
        let addr = parse_address(&line, IpFam::V4).unwrap();
        let once = apply_mask(&addr, prefix);
        let network = Address::new(IpFam::V4, once.fields.clone());
        apply_mask(&network, prefix) == once
    }

    /// the covering subnet's prefix never exceeds the family width,
    /// and the masked address has all host bits zero
    #[quickcheck]
    fn host_bits_are_cleared(octets: Vec<(u8, u8, u8, u8)>) -> bool {
        if octets.is_empty() {
            return true;
        }
        let lines: Vec<String> = octets
            .iter()
            .map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
            .collect();
        let subnet = find_subnet(&lines, IpFam::V4).unwrap();
        if subnet.prefix > 32 {
            return false;
        }
        let packed = Address::new(IpFam::V4, subnet.fields.clone()).to_bits();
        (packed & !mask_bits(32, subnet.prefix)) == 0
    }

    /// `significant_bits` is the leading-zero-run complement: the value
    /// has no bits at or above the reported length
    #[quickcheck]
    fn significant_bits_bound(v: u16) -> bool {
        let sig = significant_bits(v, 16);
        let above = if sig == 16 { 0 } else { v >> sig };
        above == 0 && (sig == 0 || v >> (sig - 1) == 1)
    }
}
