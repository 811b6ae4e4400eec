// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Non-interactive collaborators: answer the fingerprint check and the save
// prompt from values known up front.

use std::path::PathBuf;

use paperkey_core::error::Result;
use paperkey_core::types::{Decision, Fingerprint};
use tracing::{info, warn};

use crate::traits::{DestinationPicker, VerificationPrompt};

/// Confirms only when the restored fingerprint equals the one printed on paper.
pub struct ExpectedFingerprint(pub Fingerprint);

impl VerificationPrompt for ExpectedFingerprint {
    fn confirm_fingerprint(&mut self, fingerprint: &Fingerprint) -> Result<Decision> {
        if *fingerprint == self.0 {
            info!(%fingerprint, "fingerprint matches expected value");
            Ok(Decision::Confirm)
        } else {
            warn!(expected = %self.0, actual = %fingerprint, "fingerprint mismatch");
            Ok(Decision::Reject)
        }
    }
}

/// Confirms every fingerprint. The operator takes responsibility for checking.
pub struct AssumeYes;

impl VerificationPrompt for AssumeYes {
    fn confirm_fingerprint(&mut self, fingerprint: &Fingerprint) -> Result<Decision> {
        warn!(%fingerprint, "fingerprint accepted without comparison");
        Ok(Decision::Confirm)
    }
}

/// Always answers the save prompt with the same destination.
pub struct FixedDestination(pub Option<PathBuf>);

impl DestinationPicker for FixedDestination {
    fn choose_destination(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_fingerprint_confirms_match_only() {
        let printed = Fingerprint::from_digest([7; 32]);
        let mut prompt = ExpectedFingerprint(printed);
        assert_eq!(prompt.confirm_fingerprint(&printed).unwrap(), Decision::Confirm);
        let other = Fingerprint::from_digest([8; 32]);
        assert_eq!(prompt.confirm_fingerprint(&other).unwrap(), Decision::Reject);
    }

    #[test]
    fn fixed_destination_repeats_answer() {
        let mut picker = FixedDestination(Some(PathBuf::from("/tmp/key.pem")));
        assert_eq!(
            picker.choose_destination().unwrap(),
            Some(PathBuf::from("/tmp/key.pem"))
        );
        assert_eq!(FixedDestination(None).choose_destination().unwrap(), None);
    }
}
