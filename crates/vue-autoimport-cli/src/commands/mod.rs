// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `build`: Write a transformed copy of the source tree
//! - `dts`: Write the global declaration file
//! - `transform`: Transform a single file to stdout
//! - `watch`: Build, then rebuild components on change

/// Source tree build command.
pub mod build;
/// Declaration file command.
pub mod dts;
/// Single file transform command.
pub mod transform;
/// File watch command.
pub mod watch;
