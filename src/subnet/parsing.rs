// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*,
    structs::{Address, AddressList, IpFam},
    AddressError, V4_FIELDS, V6_FIELDS,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::error;

lazy_static! {
    /// One written IPv6 group: 1-4 lowercase hex digits.
    static ref HEX_GROUP: Regex = Regex::new(r"^[0-9a-f]{1,4}$").unwrap();
}

/**
Parse and validate one line as an address of the given family.

The line is trimmed and lowercased before validation, so inputs are
case-insensitive. Validation is strict: an IPv4 address needs exactly
4 octets, an IPv6 address exactly 8 groups after `::` expansion, and
at most one `::` shorthand is accepted.
*/
pub fn parse_address(line: impl AsRef<str>, fam: IpFam) -> Result<Address, AddressError> {
    let line: String = line.as_ref().trim().to_lowercase();
    match fam {
        IpFam::V4 => parse_v4(&line),
        IpFam::V6 => parse_v6(&line),
    }
}

/**
Parse a whole list of lines into an [AddressList].

The first invalid line aborts the whole list (fail-fast, lowest line
wins); the returned error carries the 1-based line number. An empty
input is an error, never a vacuous success.
*/
pub fn parse_address_list(
    lines: &[impl AsRef<str>],
    fam: IpFam,
) -> Result<AddressList, AddressError> {
    if lines.is_empty() {
        return Err(AddressError::Empty);
    }

    let mut addrs: Vec<Address> = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        match parse_address(line, fam) {
            Ok(addr) => addrs.push(addr),
            Err(source) => {
                let errmsg: String = format!("line {}: {source}", idx + 1);
                error!(errmsg);
                return Err(AddressError::Line {
                    num: idx + 1,
                    source: Box::new(source),
                });
            }
        }
    }

    Ok(AddressList::new(fam, addrs))
}

/* ---------------------------------- */

fn parse_v4(line: &str) -> Result<Address, AddressError> {
    let tokens: Vec<&str> = line.split(DOT).collect();
    if tokens.len() != V4_FIELDS {
        return Err(AddressError::V4FieldCount(tokens.len()));
    }

    let mut fields: Vec<u16> = Vec::with_capacity(V4_FIELDS);
    for tok in tokens {
        // u16 rejects signs and non-digits; the range check catches the rest
        let val: u16 = tok
            .parse()
            .map_err(|_| AddressError::InvalidV4Octet(tok.into()))?;
        if val > 255 {
            return Err(AddressError::InvalidV4Octet(tok.into()));
        }
        fields.push(val);
    }

    Ok(Address::new(IpFam::V4, fields))
}

fn parse_v6(line: &str) -> Result<Address, AddressError> {
    match line.find(DCOLON) {
        Some(pos) => {
            // the expansion below assumes a single elision point
            if line[pos + 1..].contains(DCOLON) {
                return Err(AddressError::MultipleElisions(line.into()));
            }

            let head: Vec<u16> = parse_v6_groups(&line[..pos])?;
            let tail: Vec<u16> = parse_v6_groups(&line[pos + 2..])?;

            // `::` must stand for at least one elided zero group;
            // +1 accounts for the elision marker itself
            let written: usize = head.len() + tail.len();
            if written >= V6_FIELDS {
                return Err(AddressError::V6GroupCount(written + 1));
            }

            let mut fields: Vec<u16> = Vec::with_capacity(V6_FIELDS);
            fields.extend_from_slice(&head);
            fields.resize(V6_FIELDS - tail.len(), 0);
            fields.extend_from_slice(&tail);
            Ok(Address::new(IpFam::V6, fields))
        }
        None => {
            let fields: Vec<u16> = parse_v6_groups(line)?;
            if fields.len() != V6_FIELDS {
                return Err(AddressError::V6GroupCount(fields.len()));
            }
            Ok(Address::new(IpFam::V6, fields))
        }
    }
}

/// Parse a run of `:`-separated hex groups (either side of a `::`).
/// An empty side contributes no groups at all.
fn parse_v6_groups(side: &str) -> Result<Vec<u16>, AddressError> {
    if side.is_empty() {
        return Ok(Vec::new());
    }

    let mut groups: Vec<u16> = Vec::new();
    for tok in side.split(COLON) {
        if !HEX_GROUP.is_match(tok) {
            return Err(AddressError::InvalidV6Group(tok.into()));
        }
        let val: u16 = u16::from_str_radix(tok, 16)
            .map_err(|_| AddressError::InvalidV6Group(tok.into()))?;
        groups.push(val);
    }
    Ok(groups)
}

/* -------------------------------------------------------------------------- */
