// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backup and restore configuration, persisted as JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PaperkeyError, Result};
use crate::types::{EcLevel, PaperSize};

/// Smallest quiet zone (in modules) a reader can rely on.
pub const MIN_QUIET_ZONE: u32 = 4;

/// Largest QR symbol version defined by ISO/IEC 18004.
pub const MAX_QR_VERSION: u8 = 40;

/// Notes beyond this many lines never make it onto paper.
pub const DEFAULT_MAX_NOTE_LINES: usize = 5;

/// Settings for generating and restoring paper backups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Page size of the generated PDF.
    pub paper_size: PaperSize,
    /// Heading printed at the top of the page.
    pub title: String,
    /// QR error-correction level.
    pub error_correction: EcLevel,
    /// Blank border around the symbol, in modules (at least 4).
    pub quiet_zone: u32,
    /// Pixels per QR module when rasterising the symbol.
    pub module_pixels: u32,
    /// Largest QR version the backup may use; bigger payloads are refused.
    pub max_qr_version: u8,
    /// Notes lines kept on the page.
    pub max_note_lines: usize,
    /// Upper bound on restored key size; guards against decompression bombs.
    pub max_restored_bytes: usize,
    /// Delay between camera polls while scanning.
    pub scan_poll_interval_ms: u64,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            title: "PRIVATE KEY PAPER BACKUP".into(),
            error_correction: EcLevel::Low,
            quiet_zone: MIN_QUIET_ZONE,
            module_pixels: 10,
            max_qr_version: MAX_QR_VERSION,
            max_note_lines: DEFAULT_MAX_NOTE_LINES,
            max_restored_bytes: 64 * 1024,
            scan_poll_interval_ms: 10,
        }
    }
}

impl BackupConfig {
    /// Poll interval as a `Duration`.
    pub fn scan_poll_interval(&self) -> Duration {
        Duration::from_millis(self.scan_poll_interval_ms)
    }

    /// Reject settings that would produce unscannable output.
    pub fn validate(&self) -> Result<()> {
        if self.quiet_zone < MIN_QUIET_ZONE {
            return Err(PaperkeyError::InvalidConfig(format!(
                "quiet_zone must be at least {MIN_QUIET_ZONE} modules, got {}",
                self.quiet_zone
            )));
        }
        if self.module_pixels == 0 {
            return Err(PaperkeyError::InvalidConfig(
                "module_pixels must be non-zero".into(),
            ));
        }
        if !(1..=MAX_QR_VERSION).contains(&self.max_qr_version) {
            return Err(PaperkeyError::InvalidConfig(format!(
                "max_qr_version must be within 1..={MAX_QR_VERSION}, got {}",
                self.max_qr_version
            )));
        }
        if self.max_restored_bytes == 0 {
            return Err(PaperkeyError::InvalidConfig(
                "max_restored_bytes must be non-zero".into(),
            ));
        }
        if self.scan_poll_interval_ms == 0 {
            return Err(PaperkeyError::InvalidConfig(
                "scan_poll_interval_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Load from a JSON file. Missing fields fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
