// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compute the smallest CIDR block covering a list of IP addresses.

mod subnet;

pub use subnet::{
    find_subnet, parse_address, parse_address_list, Address, AddressError, AddressList, IpFam,
    Subnet,
};
