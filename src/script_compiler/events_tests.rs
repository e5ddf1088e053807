// Default event compiler tests

use crate::script_compiler::builder::ScriptBuilder;
use crate::script_compiler::context::{SceneSnapshot, ScriptContext};
use crate::script_compiler::error::CompilerError;
use crate::script_compiler::events::*;
use test_log::test;

fn event_builder(actors: &[&str]) -> ScriptBuilder {
    ScriptBuilder::new(ScriptContext::new(
        SceneSnapshot::new("scene1").with_actors(actors),
        None,
    ))
    .with_event_compiler(default_event_compiler())
}

#[test]
fn test_events_lower_to_commands() {
    let mut sb = event_builder(&["actor1", "actor2"]);
    let events = vec![
        ScriptEvent::new("e1", EVENT_ACTOR_SET_ACTIVE).with_arg("actorId", "actor2"),
        ScriptEvent::new("e2", EVENT_ACTOR_MOVE_TO)
            .with_arg("x", 5)
            .with_arg("y", 6)
            .with_arg("useCollisions", true)
            .with_arg("moveType", "horizontal"),
    ];
    sb.compile_events(&events).unwrap();

    let mut direct = ScriptBuilder::new(ScriptContext::new(
        SceneSnapshot::new("scene1").with_actors(&["actor1", "actor2"]),
        None,
    ));
    direct.actor_set_active("actor2").unwrap();
    direct
        .actor_move_to(5, 6, true, crate::script_compiler::MoveType::Horizontal)
        .unwrap();

    assert_eq!(sb.output(), direct.output());
}

#[test]
fn test_nested_if_events_use_children() {
    let mut sb = event_builder(&[]);
    let events = vec![
        ScriptEvent::new("if1", EVENT_IF_TRUE)
            .with_arg("variable", 0)
            .with_children(
                "true",
                vec![ScriptEvent::new("t", EVENT_TEXT).with_arg("text", "yes")],
            )
            .with_children(
                "false",
                vec![ScriptEvent::new("if2", EVENT_IF_VALUE)
                    .with_arg("variable", "1")
                    .with_arg("operator", "==")
                    .with_arg("comparator", 3)
                    .with_children(
                        "true",
                        vec![ScriptEvent::new("w", EVENT_WAIT).with_arg("frames", 30)],
                    )],
            ),
        ScriptEvent::new("end", EVENT_END),
    ];
    sb.compile_events(&events).unwrap();

    let output = sb.output();
    assert_eq!(output[1], "        VM_IF_CONST .GT         VAR_VARIABLE_0, 0, 1$, 0");
    assert_eq!(output[2], "        ; If Variable Compare");
    assert_eq!(output[3], "        VM_IF_CONST .EQ         VAR_VARIABLE_1, 3, 3$, 0");
    assert_eq!(output[4], "        VM_JUMP                 4$");
    assert_eq!(output[5], "3$:");
    assert_eq!(output.last().unwrap(), "        VM_STOP");
    assert_eq!(sb.stack_depth(), 0);
}

#[test]
fn test_labels_from_events() {
    let mut sb = event_builder(&[]);
    let events = vec![
        ScriptEvent::new("l", EVENT_LABEL_DEFINE).with_arg("label", "top"),
        ScriptEvent::new("d", EVENT_DEBUG).with_arg("text", "tick"),
        ScriptEvent::new("g", EVENT_LABEL_GOTO).with_arg("label", "top"),
    ];
    sb.compile_events(&events).unwrap();
    assert_eq!(
        sb.output(),
        &[
            "top$:",
            "        VM_DEBUG                0",
            "        .asciz \"tick\"",
            "        VM_JUMP                 top$",
        ]
    );
}

#[test]
fn test_disabled_events_are_skipped() {
    let mut sb = event_builder(&[]);
    let mut skipped = ScriptEvent::new("e1", EVENT_WAIT).with_arg("frames", 10);
    skipped.disabled = true;
    sb.compile_events(&[skipped]).unwrap();
    assert!(sb.output().is_empty());
}

#[test]
fn test_unknown_command() {
    let mut sb = event_builder(&[]);
    let result = sb.compile_events(&[ScriptEvent::new("e9", "EVENT_FADE_IN")]);
    assert_eq!(
        result,
        Err(CompilerError::UnknownCommand(
            "e9".to_string(),
            "EVENT_FADE_IN".to_string()
        ))
    );
}

#[test]
fn test_bad_arguments() {
    let mut sb = event_builder(&[]);
    let missing = sb.compile_events(&[ScriptEvent::new("e1", EVENT_WAIT)]);
    assert!(matches!(missing, Err(CompilerError::InvalidArgument(_, _))));

    let out_of_range =
        sb.compile_events(&[ScriptEvent::new("e2", EVENT_WAIT).with_arg("frames", -1)]);
    assert!(matches!(out_of_range, Err(CompilerError::InvalidArgument(_, _))));

    let wrong_type = sb.compile_events(&[ScriptEvent::new("e3", EVENT_TEXT).with_arg("text", 5)]);
    assert!(matches!(wrong_type, Err(CompilerError::InvalidArgument(_, _))));

    let bad_move = sb.compile_events(&[ScriptEvent::new("e4", EVENT_ACTOR_MOVE_TO)
        .with_arg("x", 1)
        .with_arg("y", 1)
        .with_arg("moveType", "sideways")]);
    assert!(matches!(bad_move, Err(CompilerError::InvalidArgument(_, _))));
}

#[test]
fn test_move_to_rejects_coordinates_past_subpixel_range() {
    let mut sb = event_builder(&["actor1"]);
    let result = sb.compile_events(&[ScriptEvent::new("e1", EVENT_ACTOR_MOVE_TO)
        .with_arg("x", 20_000_000)
        .with_arg("y", 1)]);
    assert_eq!(
        result,
        Err(CompilerError::InvalidArgument(
            EVENT_ACTOR_MOVE_TO.to_string(),
            "'x' out of range: 20000000".to_string()
        ))
    );
    assert!(sb.output().is_empty());
}
