//! Word-Addressed Memory.
//!
//! This module implements the 64K-word memory with its device-register
//! region. It provides:
//! 1. **Backing Store:** A fully populated word array.
//! 2. **Device Dispatch:** Reads and writes at device addresses route to the console.
//! 3. **Raw Access:** Side-effect-free `peek`/`poke` for external inspection.
//!
//! All microcode traffic goes through [`read`](Memory::read) and
//! [`write`](Memory::write); the raw accessors exist for callers inspecting
//! or patching state between ticks.

use crate::common::constants::{DDR, DSR, KBDR, KBSR, MEMORY_WORDS, STATUS_BIT};
use crate::common::word::Word;

use super::device::Console;

/// The 64K-word memory and its console device.
#[derive(Clone, Debug)]
pub struct Memory {
    words: Box<[Word]>,
    console: Console,
    display_ready: bool,
}

impl Memory {
    /// Creates a memory image with every cell set to `fill`.
    ///
    /// # Arguments
    ///
    /// * `fill` - Word stored in every cell.
    /// * `display_ready` - Whether DSR reports ready.
    pub fn new(fill: Word, display_ready: bool) -> Self {
        Self {
            words: vec![fill; MEMORY_WORDS].into_boxed_slice(),
            console: Console::new(),
            display_ready,
        }
    }

    /// Reads `addr`, applying device semantics in the device region.
    ///
    /// KBSR reports key availability, KBDR consumes the pending key, and DSR
    /// reports display readiness. Every other address reads the backing store.
    pub fn read(&mut self, addr: Word) -> Word {
        match addr {
            KBSR => {
                if self.console.key_available() {
                    STATUS_BIT
                } else {
                    0
                }
            }
            KBDR => self.console.take_key().map_or(0, Word::from),
            DSR => {
                if self.display_ready {
                    STATUS_BIT
                } else {
                    0
                }
            }
            _ => self.words[addr as usize],
        }
    }

    /// Writes `addr`, applying device semantics in the device region.
    ///
    /// A DDR write emits the low byte to the console; the display consumes it
    /// immediately, so DSR stays ready. Every other address (the MCR run
    /// latch included) writes the backing store.
    pub fn write(&mut self, addr: Word, val: Word) {
        if addr == DDR {
            self.console.write_byte(val as u8);
        }
        self.words[addr as usize] = val;
    }

    /// Reads `addr` without device side effects.
    pub fn peek(&self, addr: Word) -> Word {
        self.words[addr as usize]
    }

    /// Writes `addr` without device side effects.
    pub fn poke(&mut self, addr: Word, val: Word) {
        self.words[addr as usize] = val;
    }

    /// Copies `words` into memory starting at `origin`.
    ///
    /// The caller is responsible for bounds checking; the loader validates
    /// images before they reach this point.
    pub fn load_image(&mut self, words: &[Word], origin: Word) {
        let start = origin as usize;
        self.words[start..start + words.len()].copy_from_slice(words);
    }

    /// The console device.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Mutable access to the console device.
    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }
}
