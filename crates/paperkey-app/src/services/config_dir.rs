// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration file location.

use std::ffi::OsString;
use std::path::PathBuf;

/// Default configuration file: `$XDG_CONFIG_HOME/paperkey/config.json`,
/// falling back to `~/.config/paperkey/config.json`.
pub fn config_path() -> PathBuf {
    config_base(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
    .join("paperkey")
    .join("config.json")
}

fn config_base(xdg: Option<OsString>, home: Option<OsString>) -> PathBuf {
    match (xdg, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".config"),
        // Last resort
        _ => PathBuf::from("."),
    }
}
