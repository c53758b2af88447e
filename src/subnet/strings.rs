// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: &str = ".";
pub(crate) static COLON: &str = ":";
pub(crate) static DCOLON: &str = "::";
pub(crate) static SLASH: &str = "/";

// parsing.rs
pub(crate) static ERR_EMPTY: &str = "no addresses supplied";
pub(crate) static ERR_V4_FIELDS: &str = "IPv4 address must have 4 octets, got";
pub(crate) static ERR_V4_OCTET: &str = "invalid IPv4 octet";
pub(crate) static ERR_V6_GROUPS: &str = "IPv6 address must have 8 groups, got";
pub(crate) static ERR_V6_GROUP: &str = "invalid IPv6 group";
pub(crate) static ERR_ELISION: &str = "more than one '::' elision";
pub(crate) static ERR_LINE: &str = "invalid address on line";

// structs.rs
pub(crate) static ERR_FAM: &str = "unsupported address family (supported: ipv4, ipv6)";
