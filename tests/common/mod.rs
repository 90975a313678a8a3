//! Shared test infrastructure for ring-animator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ring_animator::{Delay, LedRing};

/// Ring size used throughout the integration tests.
pub const RING_PIXELS: usize = 60;

/// Mock ring that buffers pixel writes and counts buffer operations.
pub struct MockRing {
    pixels: [u32; RING_PIXELS],
    pub writes: usize,
    pub flushes: usize,
}

impl MockRing {
    pub fn new() -> Self {
        Self {
            pixels: [0; RING_PIXELS],
            writes: 0,
            flushes: 0,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of pixels holding a non-black color.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != 0).count()
    }
}

impl LedRing for MockRing {
    fn pixel_count(&self) -> usize {
        RING_PIXELS
    }

    fn set_pixel(&mut self, index: usize, color: u32) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
            self.writes += 1;
        }
    }

    fn get_pixel(&self, index: usize) -> u32 {
        self.pixels.get(index).copied().unwrap_or(0)
    }

    fn clear(&mut self) {
        self.pixels = [0; RING_PIXELS];
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Delay that records every requested sleep instead of blocking.
///
/// The engine takes ownership of its delay, so the log is shared: clone
/// the handle from [`RecordingDelay::log`] before moving the delay in.
pub struct RecordingDelay {
    log: Rc<RefCell<Vec<u32>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<Vec<u32>>> {
        Rc::clone(&self.log)
    }
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(ms);
    }
}

/// Delay that does nothing at all.
pub struct NoopDelay;

impl Delay for NoopDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Deterministic RNG for reproducible shuffle behavior.
pub fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5EED)
}
