//! Memory-Mapped Console Device.
//!
//! This module models the keyboard and display behind the four device
//! registers. It provides:
//! 1. **Display:** Bytes written through DDR accumulate in an owned output buffer.
//! 2. **Keyboard:** An input queue backing KBSR/KBDR reads.
//! 3. **Observability:** Accessors for embedding callers to exchange bytes.
//!
//! The display consumes bytes instantly, so DSR stays ready; real device
//! timing is outside the core's scope.

use std::collections::VecDeque;

/// Console state owned by the memory system.
#[derive(Clone, Debug, Default)]
pub struct Console {
    output: Vec<u8>,
    input: VecDeque<u8>,
}

impl Console {
    /// Creates an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a key for the program to read through KBDR.
    pub fn push_key(&mut self, key: u8) {
        self.input.push_back(key);
    }

    /// True when a key is pending (KBSR bit 15).
    pub fn key_available(&self) -> bool {
        !self.input.is_empty()
    }

    /// Consumes and returns the pending key, if any.
    pub fn take_key(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    /// Appends one display byte (a DDR write).
    pub fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }

    /// The accumulated display output.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Takes the accumulated display output, leaving the buffer empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Drops all pending input and output.
    pub fn clear(&mut self) {
        self.output.clear();
        self.input.clear();
    }
}
