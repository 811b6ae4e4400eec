// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame pre-processing ahead of symbol detection.

pub mod enhance;

pub use enhance::FrameEnhancer;
