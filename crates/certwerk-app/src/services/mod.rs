// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the command line to the certwerk library crates.
//
// Each service does one job for `main`: read inputs from disk, or fingerprint
// the finished document.

pub mod inputs;
pub mod integrity;
