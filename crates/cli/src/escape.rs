// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backslash escapes for mapping arguments.
//!
//! Lets arbitrary bytes be written on a command line or in a config file:
//! `\n`, `\r`, `\t`, `\0`, `\\` and `\xHH` (two hex digits).

use crate::error::{Error, Result};

/// Decode backslash escapes in `input` into raw bytes.
pub fn unescape(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte != b'\\' {
            out.push(byte);
            i += 1;
            continue;
        }

        let escape = bytes.get(i + 1).copied().ok_or_else(|| Error::Escape {
            input: input.to_string(),
            message: "trailing backslash".to_string(),
        })?;

        let (decoded, len) = match escape {
            b'n' => (b'\n', 2),
            b'r' => (b'\r', 2),
            b't' => (b'\t', 2),
            b'0' => (0, 2),
            b'\\' => (b'\\', 2),
            b'x' => (hex_byte(input, bytes.get(i + 2..i + 4))?, 4),
            other => {
                return Err(Error::Escape {
                    input: input.to_string(),
                    message: format!("unknown escape `\\{}`", other as char),
                });
            }
        };

        out.push(decoded);
        i += len;
    }

    Ok(out)
}

fn hex_byte(input: &str, digits: Option<&[u8]>) -> Result<u8> {
    let invalid = || Error::Escape {
        input: input.to_string(),
        message: "`\\x` needs two hex digits".to_string(),
    };

    let digits = digits.ok_or_else(invalid)?;
    let text = std::str::from_utf8(digits).map_err(|_| invalid())?;
    u8::from_str_radix(text, 16).map_err(|_| invalid())
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
