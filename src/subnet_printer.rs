// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use minsubnet::{find_subnet, IpFam};
use std::{env, fs, process::ExitCode};
use tracing_subscriber::EnvFilter;

static USAGE: &str = "Usage: subnet-printer <file> <ipv4|ipv6>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 2 {
        eprintln!("Invalid number of parameters ({}). {USAGE}", args.len());
        return ExitCode::FAILURE;
    }

    let fam: IpFam = match args[1].parse() {
        Ok(fam) => fam,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let contents: String = match fs::read_to_string(&args[0]) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("ERROR: cannot read '{}': {e}", args[0]);
            return ExitCode::FAILURE;
        }
    };
    let lines: Vec<&str> = contents.lines().collect();

    match find_subnet(&lines, fam) {
        Ok(subnet) => {
            println!("Result net: {subnet}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
