// Golden text tests for the script compiler
// Drives the public API from TOML script documents through to assembly text

use gbvm_script::script_compiler::{
    CompilerConfig, CompilerError, ScriptCompiler, ScriptDocument,
};

const TWO_ACTOR_DOCUMENT: &str = r#"
[scene]
id = "scene1"
actors = [{ id = "actor1" }, { id = "actor2" }]
triggers = []

[[scripts]]
name = "MY_SCRIPT"

[[scripts.events]]
id = "e1"
command = "EVENT_ACTOR_SET_ACTIVE"
args = { actorId = "actor2" }

[[scripts.events]]
id = "e2"
command = "EVENT_ACTOR_MOVE_TO"
args = { x = 5, y = 6, useCollisions = true, moveType = "horizontal" }
"#;

#[test]
fn test_two_actor_move_document() {
    let document = ScriptDocument::from_toml_str(TWO_ACTOR_DOCUMENT).unwrap();
    let scripts = ScriptCompiler::default()
        .compile_document(&document)
        .unwrap();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].name, "MY_SCRIPT");
    assert_eq!(
        scripts[0].text,
        r#".include "vm.i"
.include "data/game_globals.i"

.area _CODE_255

ACTOR = -4

___bank_MY_SCRIPT = 255
.globl ___bank_MY_SCRIPT

_MY_SCRIPT::
        ; Local Actor
        VM_PUSH_CONST           0
        VM_PUSH_CONST           0
        VM_PUSH_CONST           0
        VM_PUSH_CONST           0

        ; Actor Set Active
        VM_SET_CONST            ACTOR, 2

        ; Actor Move To
        VM_SET_CONST            ^/(ACTOR + 1)/, 640
        VM_SET_CONST            ^/(ACTOR + 2)/, 768
        VM_SET_CONST            ^/(ACTOR + 3)/, ^/(.ACTOR_ATTR_CHECK_COLL | .ACTOR_ATTR_H_FIRST)/
        VM_ACTOR_MOVE_TO        ACTOR

"#
    );
}

#[test]
fn test_wait_document_with_config() {
    let document = ScriptDocument::from_toml_str(
        r#"
        [scene]
        id = "scene1"

        [[scripts]]
        name = "WAIT_SCRIPT"
        export = true

        [[scripts.events]]
        command = "EVENT_WAIT"
        args = { frames = 20 }
        "#,
    )
    .unwrap();
    let config = CompilerConfig::from_toml_str("[assembler]\nbank = 4\n").unwrap();
    let scripts = ScriptCompiler::new(config)
        .compile_document(&document)
        .unwrap();
    assert_eq!(
        scripts[0].text,
        r#".include "vm.i"
.include "data/game_globals.i"

.area _CODE_4

___bank_WAIT_SCRIPT = 4
.globl ___bank_WAIT_SCRIPT
.globl _WAIT_SCRIPT

_WAIT_SCRIPT::
        ; Wait N Frames
        VM_PUSH_CONST           20
        VM_INVOKE               b_wait_frames, _wait_frames, 1, .ARG0

"#
    );
}

#[test]
fn test_scripts_do_not_share_labels() {
    let document = ScriptDocument::from_toml_str(
        r#"
        [scene]
        id = "scene1"

        [[scripts]]
        name = "FIRST"
        [[scripts.events]]
        command = "EVENT_IF_TRUE"
        args = { variable = "0" }

        [[scripts]]
        name = "SECOND"
        [[scripts.events]]
        command = "EVENT_IF_TRUE"
        args = { variable = "0" }
        "#,
    )
    .unwrap();
    let scripts = ScriptCompiler::default()
        .compile_document(&document)
        .unwrap();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].text.replace("FIRST", "SECOND"), scripts[1].text);
    assert!(scripts[1].text.contains("VAR_VARIABLE_0, 0, 1$, 0"));
}

#[test]
fn test_self_reference_uses_entity() {
    let document = ScriptDocument::from_toml_str(
        r#"
        [scene]
        id = "scene1"
        actors = [{ id = "a" }, { id = "b" }]

        [entity]
        id = "b"

        [[scripts]]
        name = "SELF"
        [[scripts.events]]
        command = "EVENT_ACTOR_SET_ACTIVE"
        args = { actorId = "$self$" }
        "#,
    )
    .unwrap();
    let scripts = ScriptCompiler::default()
        .compile_document(&document)
        .unwrap();
    assert!(scripts[0].text.contains("VM_SET_CONST            ACTOR, 2\n"));
}

#[test]
fn test_errors_abort_without_output() {
    let document = ScriptDocument::from_toml_str(
        r#"
        [scene]
        id = "scene1"
        variables = ["0"]

        [[scripts]]
        name = "BROKEN"
        [[scripts.events]]
        command = "EVENT_LABEL_DEFINE"
        args = { label = "loop" }
        [[scripts.events]]
        command = "EVENT_IF_TRUE"
        args = { variable = "9" }
        "#,
    )
    .unwrap();
    let result = ScriptCompiler::default().compile_document(&document);
    assert_eq!(result, Err(CompilerError::UnknownVariable("9".to_string())));
}

#[test]
fn test_demo_scene_compiles() {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("demos");
    let config = CompilerConfig::load(&path.join("gbvm.toml")).unwrap();
    let document = ScriptDocument::load(&path.join("intro_scene.toml")).unwrap();

    let scripts = ScriptCompiler::new(config)
        .compile_document(&document)
        .unwrap();
    assert_eq!(scripts.len(), 2);

    let guide = &scripts[0].text;
    assert!(guide.contains(".globl _intro_guide_interact\n"));
    assert!(guide.contains("ACTOR = -4\n"));
    assert!(guide.contains("        VM_SET_CONST            ACTOR, 1\n"));
    assert!(guide.contains("        .asciz \"Welcome, traveller.\"\n"));
    assert!(guide.ends_with("        ; Stop Script\n        VM_STOP\n"));

    let cat = &scripts[1].text;
    assert!(cat.contains("_intro_cat_idle::\n"));
    assert!(cat.contains(
        "idle$:\n        ; Actor Set Active\n        VM_SET_CONST            ACTOR, 2\n"
    ));
    assert!(cat.contains("^/(ACTOR + 3)/, .ACTOR_ATTR_CHECK_COLL\n"));
    assert!(cat.ends_with("        VM_JUMP                 idle$\n"));
}

#[test]
fn test_missing_document_is_io_error() {
    let result = ScriptDocument::load(std::path::Path::new("demos/does_not_exist.toml"));
    assert!(matches!(result, Err(CompilerError::IOError(_))));
}

#[test]
fn test_built_document_with_repeated_name_is_rejected() {
    let mut document = ScriptDocument::from_toml_str(
        r#"
        [scene]
        id = "scene1"

        [[scripts]]
        name = "ONCE"
        "#,
    )
    .unwrap();
    document.scripts.push(document.scripts[0].clone());
    let result = ScriptCompiler::default().compile_document(&document);
    assert!(matches!(result, Err(CompilerError::InvalidArgument(_, _))));
}
