//! Per-tick animation dispatch against the LED ring capability.
//!
//! [`RingEngine`] reads the committed [`RenderState`] every tick and runs
//! exactly one step (or, for the rainbow modes, one full blocking pass) of
//! the current mode's algorithm. Phase state that must survive across
//! ticks - the pulse ramp, the roulette cursor - lives on the engine
//! rather than in the shared state, so the interpreter can never corrupt
//! it.

use crate::color::{self, scale};
use crate::shuffle::{fisher_yates, random_below};
use crate::time::Delay;
use crate::types::{Mode, RenderState, Section};
use crate::{BLACK, GREEN, RED};
use heapless::Vec;
use rand_core::RngCore;

/// Frame delay for the blocking rainbow animations, in milliseconds.
const RAINBOW_FRAME_MS: u32 = 5;
/// Base delay for one pulse phase step.
const PULSE_STEP_MS: u32 = 5;
/// Delay between roulette cursor advances.
const ROULETTE_STEP_MS: u32 = 5;
/// How long a shuffled section holds before fading.
const SECTION_HOLD_MS: u32 = 500;
/// Delay per fade-out brightness step.
const FADE_STEP_MS: u32 = 20;

/// Trait for abstracting the addressable LED ring hardware.
///
/// Colors are packed `0xRRGGBB` values. Pixel writes go to a buffer that
/// becomes visible on [`flush`](LedRing::flush); writes past
/// `pixel_count` must be ignored rather than fail.
pub trait LedRing {
    /// Number of pixels on the ring.
    fn pixel_count(&self) -> usize;

    /// Writes one pixel into the buffer.
    fn set_pixel(&mut self, index: usize, color: u32);

    /// Reads one pixel back from the buffer (0 past the end).
    fn get_pixel(&self, index: usize) -> u32;

    /// Zeroes the whole buffer without flushing.
    fn clear(&mut self);

    /// Pushes the buffer out to the hardware.
    fn flush(&mut self);

    /// Maps a position on the 16-bit color wheel to a gamma-corrected
    /// packed color. Override if the hardware driver has its own lookup.
    fn hue_to_color(&self, hue: u16) -> u32 {
        color::hue_wheel(hue)
    }
}

/// Tick-driven dispatcher rendering the committed state onto the ring.
///
/// # Type Parameters
/// * `L` - LED ring implementation
/// * `D` - Delay implementation
/// * `R` - Random number generator
/// * `P` - Pixel capacity for shuffle scratch space (>= the ring size)
pub struct RingEngine<L: LedRing, D: Delay, R: RngCore, const P: usize> {
    led: L,
    delay: D,
    rng: R,
    pulse_level: u8,
    pulse_descending: bool,
    roulette_idx: usize,
}

impl<L: LedRing, D: Delay, R: RngCore, const P: usize> RingEngine<L, D, R, P> {
    /// Creates an engine around the injected capabilities.
    pub fn new(led: L, delay: D, rng: R) -> Self {
        Self {
            led,
            delay,
            rng,
            pulse_level: 255,
            pulse_descending: true,
            roulette_idx: 0,
        }
    }

    /// Executes one dispatch of the current mode.
    ///
    /// Takes the one-shot change flag exactly once per transition and hands
    /// it to the algorithm so it can reset its phase state. The rainbow
    /// modes block for their full pass; everything else returns after a
    /// single step.
    pub fn tick(&mut self, state: &mut RenderState) {
        let just_changed = state.take_just_changed();
        match state.mode {
            Mode::Idle => self.fill(BLACK, state.brightness),
            Mode::Rainbow => self.theater_chase_rainbow(RAINBOW_FRAME_MS),
            Mode::RainbowWipe => self.rainbow_wipe(RAINBOW_FRAME_MS),
            Mode::Freeze => {}
            Mode::Pulse => {
                if just_changed {
                    self.pulse_level = 255;
                    self.pulse_descending = true;
                }
                self.pulse_step(state.color, state.brightness, PULSE_STEP_MS);
            }
            Mode::Roulette => self.roulette(state.color),
            Mode::RandomNumber => {
                if just_changed {
                    self.random_number(state.numeric_param, state.color, state.brightness);
                }
            }
            Mode::Static => self.fill(state.color, state.brightness),
            Mode::ShowSection => self.show_section(state.numeric_param, state.color),
            Mode::ShuffleSections => self.shuffle_sections(),
            Mode::Brightness => state.brightness = state.numeric_param,
            Mode::Unknown => self.fill(BLACK, state.brightness),
        }
    }

    /// Start-of-day indicator: three green pulse steps, then black.
    pub fn play_ready(&mut self, brightness: u8) {
        self.pulse_level = 255;
        self.pulse_descending = true;
        for _ in 0..3 {
            self.pulse_step(GREEN, brightness, 1);
        }
        self.fill(BLACK, brightness);
    }

    /// Borrows the LED capability, e.g. for buffer inspection in tests.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Fills every pixel with `color` scaled by `level` and flushes.
    fn fill(&mut self, color: u32, level: u8) {
        let adjusted = scale(color, level);
        for i in 0..self.led.pixel_count() {
            self.led.set_pixel(i, adjusted);
        }
        self.led.flush();
    }

    /// Theater-chase rainbow: 30 repetitions of 3 phase offsets, lighting
    /// every third pixel with a hue that rotates once around the wheel
    /// over the strip and once over the 90 frames. Blocks until done.
    fn theater_chase_rainbow(&mut self, wait: u32) {
        let count = self.led.pixel_count();
        if count == 0 {
            return;
        }
        let mut first_hue: u32 = 0;
        for _ in 0..30 {
            for offset in 0..3 {
                self.led.clear();
                for i in (offset..count).step_by(3) {
                    let hue = first_hue + i as u32 * 65536 / count as u32;
                    let pixel_color = self.led.hue_to_color(hue as u16);
                    self.led.set_pixel(i, pixel_color);
                }
                self.led.flush();
                self.delay.delay_ms(wait);
                first_hue += 65536 / 90;
            }
        }
    }

    /// Single hue sweep around the ring, one flushed pixel at a time.
    /// Blocks until done; the buffer is cleared without a flush at the
    /// end, so the black frame shows on the next flush.
    fn rainbow_wipe(&mut self, wait: u32) {
        let count = self.led.pixel_count();
        if count == 0 {
            return;
        }
        for i in 0..count {
            let hue = (i as u32 * 65536 / count as u32) as u16;
            let pixel_color = self.led.hue_to_color(hue);
            self.led.set_pixel(i, pixel_color);
            self.led.flush();
            self.delay.delay_ms(wait);
        }
        self.led.clear();
    }

    /// One step of the breathing ramp: the level walks 255 -> 0 -> 255,
    /// flipping direction exactly at the bounds.
    fn pulse_step(&mut self, pulse_color: u32, brightness: u8, wait: u32) {
        if self.pulse_descending {
            self.pulse_level -= 1;
            if self.pulse_level == 0 {
                self.pulse_descending = false;
            }
        } else {
            self.pulse_level += 1;
            if self.pulse_level == 255 {
                self.pulse_descending = true;
            }
        }
        self.fill(pulse_color, self.pulse_level);
        self.delay.delay_ms(wait * 255 / u32::from(brightness.max(1)));
    }

    /// Advances the single lit pixel one position, wrapping at the end.
    /// The cursor persists across mode changes.
    fn roulette(&mut self, cursor_color: u32) {
        self.led.clear();
        self.led.set_pixel(self.roulette_idx, cursor_color);
        self.led.flush();
        self.delay.delay_ms(ROULETTE_STEP_MS);
        self.roulette_idx += 1;
        if self.roulette_idx >= self.led.pixel_count() {
            self.roulette_idx = 0;
        }
    }

    /// One-shot draw: blanks the ring, shuffles the pixel indices, lights
    /// the first `how_many` of them.
    fn random_number(&mut self, how_many: u8, draw_color: u32, brightness: u8) {
        self.fill(BLACK, brightness);
        let count = self.led.pixel_count().min(P);
        let mut indices: Vec<u16, P> = Vec::new();
        for i in 0..count {
            let _ = indices.push(i as u16);
        }
        fisher_yates(&mut indices, &mut self.rng);
        for &index in indices.iter().take(usize::from(how_many)) {
            self.led.set_pixel(usize::from(index), draw_color);
        }
        self.led.flush();
    }

    /// Lights a named section, additively over the current buffer.
    /// Out-of-range section indices are a no-op.
    fn show_section(&mut self, section_index: u8, section_color: u32) {
        if let Some(section) = Section::from_index(section_index) {
            self.show_ring_part(section, section_color);
        }
    }

    fn show_ring_part(&mut self, section: Section, section_color: u32) {
        for i in section.pixel_range(self.led.pixel_count()) {
            self.led.set_pixel(i, section_color);
            self.led.flush();
        }
    }

    /// Flashes a uniformly random section in red, holds, then fades the
    /// whole ring to black.
    fn shuffle_sections(&mut self) {
        let pick = random_below(&mut self.rng, Section::COUNT) as u8;
        if let Some(section) = Section::from_index(pick) {
            self.show_ring_part(section, RED);
        }
        self.delay.delay_ms(SECTION_HOLD_MS);
        self.fade_out(FADE_STEP_MS);
    }

    /// Fades the buffer contents to black. Each step rescales what the
    /// buffer currently holds, so the decay compounds and bottoms out well
    /// before the final step; the loop exits as soon as every channel
    /// reads zero.
    fn fade_out(&mut self, step_delay: u32) {
        for level in (1..=255u32).rev() {
            let mut all_off = true;
            for i in 0..self.led.pixel_count() {
                let faded = scale(self.led.get_pixel(i), level as u8);
                self.led.set_pixel(i, faded);
                if faded != BLACK {
                    all_off = false;
                }
            }
            self.led.flush();
            self.delay.delay_ms(step_delay);
            if all_off {
                break;
            }
        }
    }
}
