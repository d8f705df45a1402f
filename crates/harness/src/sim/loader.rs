//! Hex memory images.
//!
//! This module moves memory contents between the model and text files. It performs:
//! 1. **Parsing:** One hexadecimal 32-bit word per line, no `0x` prefix.
//! 2. **Loading:** Words are placed at consecutive addresses from memory offset 0; the whole
//!    image is range-checked before anything is written.
//! 3. **Dumping:** Every memory word in address order, as 8 zero-padded hex digits per line.
//!
//! `@address` origin directives are recognised but not supported and are always an error,
//! since skipping one would place the following data at the wrong address.

use std::io::{BufRead, Write};

use crate::common::error::{HarnessError, Result};

/// Parses a hex image into words.
///
/// Blank lines are skipped and surrounding whitespace is ignored.
pub fn parse_hex<R: BufRead>(reader: R) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.starts_with('@') {
            return Err(HarnessError::OriginDirective {
                line: idx + 1,
                text: text.to_string(),
            });
        }
        let word = u32::from_str_radix(text, 16).map_err(|_| HarnessError::HexParse {
            line: idx + 1,
            text: text.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Copies `words` into `memory` starting at word 0.
///
/// Fails without touching `memory` if the image does not fit.
pub fn load_words(memory: &mut [u32], words: &[u32]) -> Result<()> {
    if words.len() > memory.len() {
        return Err(HarnessError::AddressOutOfRange {
            addr: memory.len() as u64 * 4,
            size: memory.len() as u64 * 4,
        });
    }
    memory[..words.len()].copy_from_slice(words);
    Ok(())
}

/// Parses a hex image from `reader` and loads it into `memory`.
///
/// Returns the number of bytes written.
pub fn load_hex<R: BufRead>(memory: &mut [u32], reader: R) -> Result<u64> {
    let words = parse_hex(reader)?;
    load_words(memory, &words)?;
    Ok(words.len() as u64 * 4)
}

/// Writes every word of `memory` to `writer`, one per line.
pub fn dump_words<W: Write>(memory: &[u32], mut writer: W) -> Result<()> {
    for word in memory {
        writeln!(writer, "{word:08x}")?;
    }
    writer.flush()?;
    Ok(())
}
