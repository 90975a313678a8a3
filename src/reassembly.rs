//! Fragment reassembly for the chunked command transport.
//!
//! Wireless writes arrive in chunks of whatever size the transport felt
//! like delivering. Fragments are accumulated until the closing structural
//! character of the message framing shows up as the final byte.

use heapless::Vec;

/// Closing structural character of the message framing.
const FRAME_END: u8 = b'}';

/// Accumulates transport fragments into complete command messages.
///
/// `N` bounds the accumulator. A fragment that would overflow it drops
/// everything gathered so far, so a peer that never closes its frame
/// cannot grow the buffer without bound.
#[derive(Debug, Default)]
pub struct Reassembler<const N: usize> {
    buffer: Vec<u8, N>,
}

impl<const N: usize> Reassembler<N> {
    /// Creates an empty reassembler.
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Appends one transport fragment.
    ///
    /// Returns the accumulated message once the terminating `}` arrives,
    /// resetting the accumulator for the next message. Returns `None` while
    /// the message is still incomplete, or when an oversized stream was
    /// dropped.
    pub fn on_fragment(&mut self, fragment: &[u8]) -> Option<Vec<u8, N>> {
        if self.buffer.extend_from_slice(fragment).is_err() {
            self.buffer.clear();
            return None;
        }
        if self.buffer.last() == Some(&FRAME_END) {
            return Some(core::mem::take(&mut self.buffer));
        }
        None
    }

    /// Number of bytes waiting for the rest of their message.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discards any partially accumulated message.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
