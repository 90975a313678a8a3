//! Integration tests for command interpretation against the shared state

mod common;

use ring_animator::{DecodeError, Mode, ParseWarning, RenderState, interpret};

#[test]
fn unrecognized_state_leaves_mode_unchanged() {
    let mut state = RenderState::default();
    state.mode = Mode::Pulse;
    state.just_changed = false;

    let outcome = interpret(br#"{"state":"SPARKLE"}"#, &mut state).unwrap();

    assert_eq!(state.mode, Mode::Pulse);
    assert_eq!(outcome.mode, Mode::Pulse);
    assert!(!outcome.committed);
    assert!(!state.just_changed);
}

#[test]
fn color_decodes_to_exact_packed_value() {
    for (text, packed) in [
        ("255,0,0", 0xFF0000u32),
        ("0,255,0", 0x00FF00),
        ("0,0,255", 0x0000FF),
        ("255,255,255", 0xFFFFFF),
        ("0,0,0", 0x000000),
        ("12,34,56", (12 << 16) | (34 << 8) | 56),
    ] {
        let mut state = RenderState::default();
        let message = format!(r#"{{"state":"STATIC","parameter":[{{"color":"{text}"}}]}}"#);
        let outcome = interpret(message.as_bytes(), &mut state).unwrap();
        assert!(outcome.warnings.is_empty(), "warned on {text}");
        assert_eq!(state.color, packed, "mismatch for {text}");
    }
}

#[test]
fn malformed_message_reports_error_and_keeps_state() {
    let mut state = RenderState::default();
    state.mode = Mode::Rainbow;
    state.color = 0x445566;
    state.just_changed = false;
    let before = state;

    let result = interpret(br#"{"state":}"#, &mut state);

    assert_eq!(result.unwrap_err(), DecodeError::Malformed);
    assert_eq!(state, before);
}

#[test]
fn mode_change_without_parameters_commits() {
    let mut state = RenderState::default();
    state.mode = Mode::Idle;
    state.just_changed = false;

    let outcome = interpret(br#"{"state":"ROULETTE"}"#, &mut state).unwrap();

    assert!(outcome.committed);
    assert_eq!(state.mode, Mode::Roulette);
    assert_eq!(state.last_mode, Mode::Idle);
    assert!(state.just_changed);
}

#[test]
fn number_parameter_commits_for_section_selection() {
    let mut state = RenderState::default();
    interpret(
        br#"{"state":"SHOW_SECTION","parameter":[{"number":4}]}"#,
        &mut state,
    )
    .unwrap();
    assert_eq!(state.mode, Mode::ShowSection);
    assert_eq!(state.numeric_param, 4);
}

#[test]
fn warnings_do_not_block_the_commit() {
    let mut state = RenderState::default();
    state.just_changed = false;

    let outcome = interpret(
        br#"{"state":"STATIC","parameter":[{"color":"red,0,0"},{"number":999}]}"#,
        &mut state,
    )
    .unwrap();

    assert!(outcome.committed);
    assert_eq!(state.mode, Mode::Static);
    assert_eq!(state.color, 0x000000);
    assert_eq!(state.numeric_param, 255);
    assert!(outcome.warnings.contains(&ParseWarning::BadColorFormat));
    assert!(outcome.warnings.contains(&ParseWarning::BadNumberFormat));
}

#[test]
fn successive_commands_track_last_mode() {
    let mut state = RenderState::default();

    interpret(br#"{"state":"STATIC"}"#, &mut state).unwrap();
    assert_eq!(state.last_mode, Mode::Idle);

    interpret(br#"{"state":"PULSE"}"#, &mut state).unwrap();
    assert_eq!(state.last_mode, Mode::Static);
    assert_eq!(state.mode, Mode::Pulse);
}
