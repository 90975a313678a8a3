//! Device-facing facade wiring transport, interpreter, and engine.
//!
//! [`RingController`] owns the shared [`RenderState`], the fragment
//! [`Reassembler`], and the [`RingEngine`]. The wireless transport hands
//! its received chunks to [`on_fragment`](RingController::on_fragment);
//! the main loop calls [`tick`](RingController::tick). Everything runs on
//! one thread of control, so a tick and a fragment never interleave.

use crate::command::{self, CommandOutcome};
use crate::engine::{LedRing, RingEngine};
use crate::reassembly::Reassembler;
use crate::time::Delay;
use crate::types::{DecodeError, Mode, RenderState};
use log::{debug, warn};
use rand_core::RngCore;

/// Single-ring animation controller.
///
/// # Type Parameters
/// * `L` - LED ring implementation
/// * `D` - Delay implementation
/// * `R` - Random number generator
/// * `P` - Pixel capacity for shuffle scratch space (>= the ring size)
/// * `M` - Maximum reassembled message length
pub struct RingController<L: LedRing, D: Delay, R: RngCore, const P: usize, const M: usize> {
    state: RenderState,
    reassembler: Reassembler<M>,
    engine: RingEngine<L, D, R, P>,
    debug: bool,
}

impl<L: LedRing, D: Delay, R: RngCore, const P: usize, const M: usize>
    RingController<L, D, R, P, M>
{
    /// Creates a controller in the power-on state (idle, default
    /// brightness).
    pub fn new(led: L, delay: D, rng: R) -> Self {
        Self {
            state: RenderState::default(),
            reassembler: Reassembler::new(),
            engine: RingEngine::new(led, delay, rng),
            debug: false,
        }
    }

    /// Brings the device up: plays the ready animation (three green pulse
    /// steps, then black). The wireless transport itself is the caller's
    /// business; `device_name` is only echoed to the log.
    pub fn init(&mut self, device_name: &str) {
        if self.debug {
            debug!("ring controller up as {}", device_name);
        }
        self.engine.play_ready(self.state.brightness);
    }

    /// Executes one dispatch of the current mode. Call repeatedly from the
    /// main loop.
    pub fn tick(&mut self) {
        self.engine.tick(&mut self.state);
    }

    /// Feeds one transport fragment into the reassembler.
    ///
    /// Returns `None` while the message is incomplete. Once the closing
    /// `}` arrives, the message is interpreted and the outcome returned;
    /// a decode failure leaves the committed state untouched, so the
    /// device keeps rendering under its previous mode either way.
    pub fn on_fragment(
        &mut self,
        fragment: &[u8],
    ) -> Option<Result<CommandOutcome, DecodeError>> {
        let message = self.reassembler.on_fragment(fragment)?;
        if self.debug {
            debug!("complete message, {} bytes", message.len());
        }

        let outcome = command::interpret(&message, &mut self.state);
        if self.debug {
            match &outcome {
                Ok(outcome) => {
                    debug!(
                        "committed mode {:?} (changed: {})",
                        outcome.mode, outcome.committed
                    );
                    for warning in &outcome.warnings {
                        warn!("{}", warning);
                    }
                }
                Err(err) => warn!("dropped message: {}", err),
            }
        }
        Some(outcome)
    }

    /// Sets the global brightness applied by the fill-based modes.
    pub fn set_brightness(&mut self, level: u8) {
        self.state.brightness = level;
    }

    /// Direct mode override, bypassing command parsing. Commits like a
    /// command would: the change flag is raised for the next tick.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.last_mode = self.state.mode;
        self.state.mode = mode;
        self.state.just_changed = true;
    }

    /// Enables or disables debug diagnostics on the `log` facade.
    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Current global brightness.
    pub fn brightness(&self) -> u8 {
        self.state.brightness
    }

    /// The full committed state, for inspection.
    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    /// Borrows the LED capability, e.g. for buffer inspection in tests.
    pub fn led(&self) -> &L {
        self.engine.led()
    }
}
