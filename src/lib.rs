#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Mode`**: the rendering state machine; one variant per animation
//! - **`RenderState`**: the committed state shared between the command
//!   interpreter (sole writer) and the animation engine (sole reader)
//! - **`Reassembler`**: accumulates transport fragments into complete
//!   `}`-terminated command messages
//! - **`interpret`**: decodes a complete message and commits a new
//!   `RenderState`
//! - **`RingEngine`**: per-tick dispatcher that renders the current mode
//! - **`RingController`**: facade wiring reassembly, interpretation, and
//!   rendering into the device-facing control surface
//! - **`LedRing`**: trait to implement for your LED hardware
//! - **`Delay`**: trait to implement for your timing system
//!
//! Colors cross the hardware boundary as packed `0xRRGGBB` values. When
//! implementing [`LedRing`] for your hardware, unpack them into whatever
//! format your driver expects.

// Re-export the RNG trait bound for user convenience
pub use rand_core::RngCore;

pub mod color;
pub mod command;
pub mod controller;
pub mod engine;
pub mod reassembly;
pub mod shuffle;
pub mod time;
pub mod types;

pub use command::{CommandOutcome, interpret};
pub use controller::RingController;
pub use engine::{LedRing, RingEngine};
pub use reassembly::Reassembler;
pub use time::Delay;
pub use types::{DecodeError, Mode, ParseWarning, RenderState, Section};

/// Named colors used by the built-in animations.
pub const RED: u32 = 0xFF0000;
pub const GREEN: u32 = 0x00FF00;
pub const YELLOW: u32 = 0xFFFF00;
pub const BLUE: u32 = 0x0000FF;
pub const WHITE: u32 = 0xFFFFFF;
pub const BLACK: u32 = 0x000000;

/// Power-on brightness level.
pub const DEFAULT_BRIGHTNESS: u8 = 150;
