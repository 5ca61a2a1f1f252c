// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: PNG validation, decoding and opacity.

pub mod png;

pub use png::{PNG_SIGNATURE, apply_opacity, decode_png, validate_png};
