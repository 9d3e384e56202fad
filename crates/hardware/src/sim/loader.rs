//! Object-Image Loader.
//!
//! This module reads LC-3 object images and installs them in memory. It performs:
//! 1. **File Reading:** Parses `.obj` files of 16-bit big-endian words.
//! 2. **Validation:** Origin presence, word alignment, and address-space fit.
//! 3. **Installation:** Copies a validated image into memory.
//!
//! All failures are reported before any machine state changes, so a failed
//! load leaves the simulator exactly as it was.

use std::fs;
use std::path::Path;

use crate::common::constants::MEMORY_WORDS;
use crate::common::error::LoadError;
use crate::common::word::Word;
use crate::core::arch::Memory;

/// A parsed object image: an origin address and the words that follow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectImage {
    /// Address the first body word loads at; also the entry PC.
    pub origin: Word,
    /// The image body.
    pub words: Vec<Word>,
}

/// Reads and parses an object file.
///
/// The file is a sequence of 16-bit big-endian words; the first word is the
/// origin, the rest populate memory from there.
///
/// # Arguments
///
/// * `path` - Path to the `.obj` file.
///
/// # Returns
///
/// The parsed image, or the reason it could not be loaded.
pub fn read_object_file(path: &Path) -> Result<ObjectImage, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_object_bytes(&bytes)
}

/// Parses raw object-file bytes.
///
/// Split from the file read so in-memory images can be validated the same
/// way.
pub fn parse_object_bytes(bytes: &[u8]) -> Result<ObjectImage, LoadError> {
    if bytes.len() % 2 != 0 {
        return Err(LoadError::OddLength);
    }
    if bytes.len() < 2 {
        return Err(LoadError::MissingOrigin);
    }

    let origin = Word::from_be_bytes([bytes[0], bytes[1]]);
    let body: Vec<Word> = bytes[2..]
        .chunks_exact(2)
        .map(|pair| Word::from_be_bytes([pair[0], pair[1]]))
        .collect();

    check_fit(origin, body.len())?;
    Ok(ObjectImage {
        origin,
        words: body,
    })
}

/// Checks that `len` words starting at `origin` stay inside memory.
pub fn check_fit(origin: Word, len: usize) -> Result<(), LoadError> {
    if origin as usize + len > MEMORY_WORDS {
        return Err(LoadError::ImageTooLarge {
            origin,
            words: len,
        });
    }
    Ok(())
}

/// Installs a validated word slice into memory at `origin`.
///
/// # Arguments
///
/// * `memory` - The target memory.
/// * `words` - The image body.
/// * `origin` - The load address.
pub fn install(memory: &mut Memory, words: &[Word], origin: Word) -> Result<(), LoadError> {
    check_fit(origin, words.len())?;
    memory.load_image(words, origin);
    Ok(())
}
