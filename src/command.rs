//! Wire-format decoding and command interpretation.
//!
//! A complete message is a JSON object like
//! `{"state":"STATIC","parameter":[{"color":"255,0,0"}]}`: a mode name plus
//! an ordered list of single-key parameter objects. [`interpret`] decodes
//! one message and commits the result to the shared [`RenderState`].
//!
//! Decoding is deliberately forgiving. An unrecognized mode name keeps the
//! current mode, malformed parameter values are zeroed or saturated and
//! reported as warnings, and only a structurally broken payload is
//! rejected outright - in which case the committed state is left untouched
//! and the device keeps rendering whatever it was rendering.

use crate::types::{DecodeError, Mode, ParseWarning, RenderState};
use heapless::Vec;
use serde::Deserialize;
use serde::de::{Deserializer, SeqAccess, Visitor};

/// Upper bound on warnings collected per message.
pub const MAX_WARNINGS: usize = 8;

/// Result of committing one command message.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Mode the state machine ended up in.
    pub mode: Mode,
    /// Whether the commit raised the one-shot change flag.
    pub committed: bool,
    /// Permissive-parsing warnings. Never fatal.
    pub warnings: Vec<ParseWarning, MAX_WARNINGS>,
}

#[derive(Deserialize)]
struct WireCommand<'a> {
    #[serde(borrow, default)]
    state: Option<&'a str>,
    #[serde(borrow, default)]
    parameter: Parameters<'a>,
}

/// One entry of the `parameter` list. Each object carries at most one of
/// the known keys; unrecognized keys are ignored.
#[derive(Deserialize, Default)]
struct WireParameter<'a> {
    #[serde(borrow, default)]
    color: Option<&'a str>,
    #[serde(default)]
    number: Option<i64>,
}

/// The parameter list folded in order: later entries win.
#[derive(Default)]
struct Parameters<'a> {
    color: Option<&'a str>,
    number: Option<i64>,
}

impl<'de: 'a, 'a> Deserialize<'de> for Parameters<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FoldVisitor<'a>(core::marker::PhantomData<&'a ()>);

        impl<'de: 'a, 'a> Visitor<'de> for FoldVisitor<'a> {
            type Value = Parameters<'a>;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a list of parameter objects")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut folded = Parameters::default();
                while let Some(entry) = seq.next_element::<WireParameter<'de>>()? {
                    if entry.color.is_some() {
                        folded.color = entry.color;
                    }
                    if entry.number.is_some() {
                        folded.number = entry.number;
                    }
                }
                Ok(folded)
            }
        }

        deserializer.deserialize_seq(FoldVisitor(core::marker::PhantomData))
    }
}

/// Decodes a complete message buffer and commits a new [`RenderState`].
///
/// On success the state holds the resolved mode, any supplied parameters
/// (unsupplied parameters keep their previous values), and `just_changed`
/// reflecting whether anything actually changed. On [`DecodeError`] the
/// state is untouched.
pub fn interpret(
    buffer: &[u8],
    state: &mut RenderState,
) -> Result<CommandOutcome, DecodeError> {
    let (wire, _consumed) = serde_json_core::from_slice::<WireCommand<'_>>(buffer)
        .map_err(|_| DecodeError::Malformed)?;

    let mut warnings = Vec::new();

    let resolved = wire
        .state
        .and_then(Mode::from_name)
        .unwrap_or(state.mode);

    let mut param_change = false;

    let color = wire.parameter.color.map(|text| {
        param_change = true;
        parse_color(text, &mut warnings)
    });

    let number = wire.parameter.number.map(|value| {
        param_change = true;
        clamp_number(value, &mut warnings)
    });

    let previous = state.mode;
    let committed = resolved != previous || param_change;

    state.last_mode = previous;
    state.mode = resolved;
    if let Some(color) = color {
        state.color = color;
    }
    if let Some(number) = number {
        state.numeric_param = number;
    }
    state.just_changed = committed;

    Ok(CommandOutcome {
        mode: resolved,
        committed,
        warnings,
    })
}

/// Parses a decimal `"R,G,B"` triple into a packed color.
///
/// Components that fail to scan read as zero; the failure is reported as a
/// warning, never an error.
fn parse_color(text: &str, warnings: &mut Vec<ParseWarning, MAX_WARNINGS>) -> u32 {
    let mut components = [0u8; 3];
    let mut clean = true;
    let mut parts = text.splitn(3, ',');
    for slot in &mut components {
        match parts.next().map(str::trim).map(str::parse::<u8>) {
            Some(Ok(value)) => *slot = value,
            _ => clean = false,
        }
    }
    if !clean {
        let _ = warnings.push(ParseWarning::BadColorFormat);
    }
    crate::color::pack(components[0], components[1], components[2])
}

/// Coerces the wire integer into `u8`, saturating out-of-range values.
fn clamp_number(value: i64, warnings: &mut Vec<ParseWarning, MAX_WARNINGS>) -> u8 {
    if !(0..=255).contains(&value) {
        let _ = warnings.push(ParseWarning::BadNumberFormat);
    }
    value.clamp(0, 255) as u8
}
