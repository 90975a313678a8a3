//! Timing abstraction for platform-agnostic blocking delays.

/// Trait for abstracting blocking delays.
///
/// The rendering algorithms pace themselves by sleeping between frames.
/// Implement this for your platform's busy-wait or scheduler sleep; tests
/// use a recording implementation so animations run without real time
/// passing.
pub trait Delay {
    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
