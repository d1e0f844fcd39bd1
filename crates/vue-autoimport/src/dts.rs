// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Global type declarations for auto-imported composables.

use std::collections::BTreeSet;

/// Generates a declaration file that tells type checkers about composables
/// that are used without an explicit import.
///
/// Names are sorted and deduplicated so the output is stable.
pub fn generate_dts<S: AsRef<str>>(module: &str, symbols: &[S]) -> String {
    let names: BTreeSet<&str> = symbols.iter().map(|s| s.as_ref()).collect();

    let mut out = String::new();
    out.push_str("/* eslint-disable */\n");
    out.push_str("/* prettier-ignore */\n");
    out.push_str("// @ts-nocheck\n");
    out.push_str("// Generated by vue-autoimport\n");
    out.push_str("export {}\n");
    out.push_str("declare global {\n");
    for name in names {
        out.push_str(&format!(
            "  const {name}: typeof import('{module}')['{name}']\n",
            name = name,
            module = module
        ));
    }
    out.push_str("}\n");
    out
}
