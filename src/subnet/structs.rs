// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, AddressError, V4_FIELDS, V4_FIELD_BITS, V6_FIELDS, V6_FIELD_BITS};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// IP address family. Selected once at the pipeline entry and threaded
/// through; all family-specific parameters hang off this enum.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    /// Number of numeric fields in an address (octets / hextets).
    pub fn fields(&self) -> usize {
        match self {
            IpFam::V4 => V4_FIELDS,
            IpFam::V6 => V6_FIELDS,
        }
    }

    /// Width of a single field in bits.
    pub fn field_bits(&self) -> u8 {
        match self {
            IpFam::V4 => V4_FIELD_BITS,
            IpFam::V6 => V6_FIELD_BITS,
        }
    }

    /// Total address width in bits (**v4**: 32, **v6**: 128).
    pub fn total_bits(&self) -> u8 {
        self.fields() as u8 * self.field_bits()
    }
}

impl FromStr for IpFam {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ipv4" => Ok(IpFam::V4),
            "ipv6" => Ok(IpFam::V6),
            other => Err(AddressError::UnknownFamily(other.into())),
        }
    }
}

/* -------------------------------------------------------------------------- */

/// One parsed address: most-significant-first numeric fields.
/// u16 covers both field widths (octets 0..=255, hextets 0..=65535).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Address {
    pub fam: IpFam,
    fields: Vec<u16>,
}

impl Address {
    /// Invariant: `fields.len() == fam.fields()`; the parser is the only
    /// constructor call site and enforces this before handing fields over.
    pub(crate) fn new(fam: IpFam, fields: Vec<u16>) -> Self {
        debug_assert_eq!(fields.len(), fam.fields());
        Address { fam, fields }
    }

    pub fn fields(&self) -> &[u16] {
        &self.fields
    }

    /// Pack the fields into a single integer, most significant field first.
    pub(crate) fn to_bits(&self) -> u128 {
        let bits: u32 = self.fam.field_bits() as u32;
        self.fields
            .iter()
            .fold(0u128, |acc, &field| (acc << bits) | field as u128)
    }
}

/* -------------------------------------------------------------------------- */

/// Non-empty list of addresses of one family, all with the same field count.
/// Built once by the parser and immutable afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressList {
    pub fam: IpFam,
    addrs: Vec<Address>,
}

impl AddressList {
    pub(crate) fn new(fam: IpFam, addrs: Vec<Address>) -> Self {
        debug_assert!(!addrs.is_empty());
        AddressList { fam, addrs }
    }

    pub fn addrs(&self) -> &[Address] {
        &self.addrs
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// The representative address the mask is applied to.
    pub fn first(&self) -> &Address {
        &self.addrs[0]
    }
}

/* -------------------------------------------------------------------------- */

/// The final answer: masked network address fields plus prefix length.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    pub fam: IpFam,
    pub fields: Vec<u16>,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    pub prefix: u8,
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fam {
            IpFam::V4 => {
                let octets: Vec<String> = self.fields.iter().map(|v| v.to_string()).collect();
                write!(f, "{}{SLASH}{}", octets.join(DOT), self.prefix)
            }
            IpFam::V6 => {
                let groups: Vec<String> = self.fields.iter().map(|v| format!("{v:x}")).collect();
                write!(f, "{}{SLASH}{}", compress_groups(&groups), self.prefix)
            }
        }
    }
}

/**
Single-pass zero-run compression over IPv6 hex groups.

A run starting with two consecutive `0` groups is replaced by one `::`
marker which swallows all immediately following `0` groups; kept groups
are joined with `:`, never adjacent to a `::` marker. The scan does not
restart after a run, so an address with two separated zero runs renders
two `::` tokens (not valid IPv6 syntax, but the historical output of
this tool, and kept for compatibility).
*/
fn compress_groups(groups: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(groups.len());
    let mut i: usize = 0;

    while i < groups.len() {
        if i + 1 < groups.len() && groups[i] == "0" && groups[i + 1] == "0" {
            kept.push(DCOLON);
            i += 1;
            while i < groups.len() && groups[i] == "0" {
                i += 1;
            }
        } else {
            kept.push(&groups[i]);
            i += 1;
        }
    }

    let mut out: String = String::new();
    for (n, tok) in kept.iter().enumerate() {
        if n > 0 && *tok != DCOLON && kept[n - 1] != DCOLON {
            out.push_str(COLON);
        }
        out.push_str(tok);
    }
    out
}

/* -------------------------------------------------------------------------- */
