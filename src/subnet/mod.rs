// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Smallest covering CIDR block for a list of IP addresses.
//!
//! The pipeline runs in four stages: per-line parsing/validation into
//! fixed-width numeric fields, detection of the first field where the
//! addresses diverge, derivation and application of the common-prefix
//! mask, and family-specific formatting (IPv6 gets zero-run compression).

mod analysis;
mod parsing;
mod strings;
mod structs;

use std::{error, fmt};
use strings::*;

pub use analysis::find_subnet;
pub use parsing::{parse_address, parse_address_list};
pub use structs::{Address, AddressList, IpFam, Subnet};

pub(crate) const V4_FIELDS: usize = 4;
pub(crate) const V6_FIELDS: usize = 8;
pub(crate) const V4_FIELD_BITS: u8 = 8;
pub(crate) const V6_FIELD_BITS: u8 = 16;

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// the input contained no addresses at all
    Empty,
    /// wrong number of dotted octets in an IPv4 address
    V4FieldCount(usize),
    InvalidV4Octet(String),
    /// wrong number of colon groups in an IPv6 address
    V6GroupCount(usize),
    InvalidV6Group(String),
    /// more than one `::` shorthand in an IPv6 address
    MultipleElisions(String),
    UnknownFamily(String),
    /// per-line context wrapper (1-based line number)
    Line { num: usize, source: Box<AddressError> },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Empty => {
                write!(f, "{ERR_EMPTY}")
            }
            AddressError::V4FieldCount(count) => {
                write!(f, "{ERR_V4_FIELDS} {count}")
            }
            AddressError::InvalidV4Octet(tok) => {
                write!(f, "{ERR_V4_OCTET}: '{tok}'")
            }
            AddressError::V6GroupCount(count) => {
                write!(f, "{ERR_V6_GROUPS} {count}")
            }
            AddressError::InvalidV6Group(tok) => {
                write!(f, "{ERR_V6_GROUP}: '{tok}'")
            }
            AddressError::MultipleElisions(line) => {
                write!(f, "{ERR_ELISION}: '{line}'")
            }
            AddressError::UnknownFamily(fam) => {
                write!(f, "{ERR_FAM}: '{fam}'")
            }
            AddressError::Line { num, source } => {
                write!(f, "{ERR_LINE} {num}: {source}")
            }
        }
    }
}

impl error::Error for AddressError {}
