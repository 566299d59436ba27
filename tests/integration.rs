//! End-to-end tests over the public entry points: JSON documents, the flat
//! graph form, custom formats and compiler configuration.
mod common;
use botgen::error::ConversionError;
use botgen::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_compile_json_nested_form() {
    let json = json!([
        { "kind": "event", "data": { "eventType": "message.text", "pattern": "hi", "matchMode": "exact" } },
        { "type": "reply", "data": { "replyType": "text", "content": "Hello" } },
        { "kind": "comment", "data": { "note": "ignored" } }
    ])
    .to_string();

    let program = Compiler::default().compile_json(&json).unwrap();
    assert!(program.contains(r#"    if message.lower() == "hi".lower():"#));
    assert!(program.contains(r#"        reply_messages.append(TextSendMessage(text="Hello"))"#));
}

#[test]
fn test_compile_json_graph_form() {
    let json = create_sample_graph_json().to_string();
    let program = Compiler::default().compile_json(&json).unwrap();

    let expected = r#"    if "menu".lower() in message.lower():
        for _ in range(2):
            reply_messages.append(TextSendMessage(text="one"))
            reply_messages.append(ImageSendMessage(original_content_url="https://example.com/image.png", preview_image_url="https://example.com/image.png"))
"#;
    assert!(program.contains(expected), "unexpected handler:\n{}", program);
    assert_eq!(count_lines(&program, "from linebot.models import ImageSendMessage"), 1);
}

#[test]
fn test_graph_and_nested_forms_compile_identically() {
    let nested = vec![
        event("message.text").with_data("pattern", "menu"),
        control("loop")
            .with_data("loopCount", 2)
            .with_children(vec![text_reply("one"), reply("image")]),
    ];
    let compiler = Compiler::default();
    let from_graph = compiler
        .compile_json(&create_sample_graph_json().to_string())
        .unwrap();
    let from_tree = compiler.compile(&nested).unwrap();
    assert_eq!(from_graph, from_tree);
}

#[test]
fn test_graph_roots_inferred_when_omitted() {
    let graph: BlockGraph = serde_json::from_value(json!({
        "blocks": [
            { "id": "e1", "kind": "event", "data": { "eventType": "follow" } },
            { "id": "c1", "kind": "control", "data": { "controlType": "if" }, "children": ["r1"] },
            { "id": "r1", "kind": "reply", "data": { "replyType": "text", "content": "inside" } }
        ]
    }))
    .unwrap();

    let roots = graph.resolve().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[1].children.len(), 1);
    assert_eq!(roots[1].children[0].id.as_deref(), Some("r1"));
}

#[test]
fn test_graph_missing_references_are_skipped() {
    let json = json!({
        "roots": ["e1", "ghost", "c1"],
        "blocks": [
            { "id": "e1", "kind": "event", "data": { "eventType": "follow" } },
            { "id": "c1", "kind": "control", "data": { "controlType": "loop" }, "children": ["nobody"] }
        ]
    })
    .to_string();

    let program = Compiler::default().compile_json(&json).unwrap();
    assert!(program.contains("    for _ in range(5):\n        pass\n"));
}

#[test]
fn test_graph_cycle_is_rejected() {
    let json = json!({
        "roots": ["e1", "a"],
        "blocks": [
            { "id": "e1", "kind": "event", "data": { "eventType": "follow" } },
            { "id": "a", "kind": "control", "data": { "controlType": "loop" }, "children": ["b"] },
            { "id": "b", "kind": "control", "data": { "controlType": "if" }, "children": ["a"] }
        ]
    })
    .to_string();

    let err = Compiler::default().compile_json(&json).unwrap_err();
    assert_eq!(
        err,
        CompileError::CyclicGraph {
            block_id: "a".to_string(),
            depth: 2
        }
    );
}

#[test]
fn test_unrooted_cycle_is_rejected() {
    // Every block is someone's child, so no root can be inferred.
    let graph: BlockGraph = serde_json::from_value(json!({
        "blocks": [
            { "id": "a", "kind": "control", "data": { "controlType": "loop" }, "children": ["b"] },
            { "id": "b", "kind": "control", "data": { "controlType": "loop" }, "children": ["a"] }
        ]
    }))
    .unwrap();

    let result = Compiler::default().compile_graph(&graph);
    assert!(matches!(result, Err(CompileError::CyclicGraph { .. })));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let result = Compiler::default().compile_json("[{ \"kind\": ");
    assert!(matches!(result, Err(CompileError::JsonParse(_))));

    let result = Compiler::default().compile_json("42");
    assert!(matches!(result, Err(CompileError::JsonParse(_))));
}

#[test]
fn test_compile_from_custom_format() {
    struct Script {
        lines: Vec<(&'static str, &'static str)>,
    }

    impl IntoBlocks for Script {
        fn into_blocks(self) -> std::result::Result<Vec<Block>, ConversionError> {
            self.lines
                .into_iter()
                .map(|(verb, arg)| match verb {
                    "on" => Ok(event(arg)),
                    "say" => Ok(text_reply(arg)),
                    other => Err(ConversionError::Validation(format!("unknown verb '{}'", other))),
                })
                .collect()
        }
    }

    let compiler = Compiler::default();
    let program = compiler
        .compile_from(Script {
            lines: vec![("on", "join"), ("say", "Hi group")],
        })
        .unwrap();
    assert!(program.contains("def handle_join_1(event, reply_messages):"));
    assert!(program.contains(r#"reply_messages.append(TextSendMessage(text="Hi group"))"#));

    let err = compiler
        .compile_from(Script {
            lines: vec![("shout", "HEY")],
        })
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::Conversion(ConversionError::Validation("unknown verb 'shout'".to_string()))
    );
}

#[test]
fn test_builder_event_alias() {
    let compiler = Compiler::builder()
        .with_event_alias("text", "message.text")
        .with_event_alias("reaction", "message.reaction")
        .build();
    assert_eq!(compiler.options().event_aliases.len(), 1);

    let blocks = vec![
        event("text").with_data("pattern", "menu"),
        text_reply("Here is the menu"),
        event("reaction"),
        text_reply("dropped"),
    ];
    let program = compiler.compile(&blocks).unwrap();
    assert!(program.contains("@on(\"message.text\")\ndef handle_message_text_1(event, reply_messages):"));
    assert!(!program.contains("dropped"));
}

#[test]
fn test_builder_indent_width() {
    let compiler = Compiler::builder().with_indent_width(2).build();
    let blocks = vec![
        event("follow"),
        control("loop")
            .with_data("loopCount", "3")
            .with_children(vec![text_reply("x")]),
    ];
    let program = compiler.compile(&blocks).unwrap();

    assert!(program.contains("\ndef handle_follow_1(event, reply_messages):\n  message = message_text(event)\n"));
    assert!(program.contains("\n  for _ in range(3):\n    reply_messages.append(TextSendMessage(text=\"x\"))\n"));
    assert!(program.contains("\n  return register\n"));
    assert!(program.contains("\n  app.run(host=\"0.0.0.0\", port=port)\n"));
    assert!(!program.contains("\n    return register\n"));
}

#[test]
fn test_builder_defaults_and_port() {
    let compiler = Compiler::builder()
        .with_default_text("Hi!")
        .with_placeholder_image_url("https://cdn.example.org/p.png")
        .with_port(8080)
        .build();
    let program = compiler
        .compile(&[event("follow"), reply("text"), reply("image")])
        .unwrap();

    assert!(program.contains(r#"TextSendMessage(text="Hi!")"#));
    assert!(program.contains(r#"original_content_url="https://cdn.example.org/p.png""#));
    assert!(program.contains(r#"port = int(os.environ.get("PORT", 8080))"#));
}

#[test]
fn test_options_from_json_file_contents() {
    let options = CompilerOptions::from_json(
        r#"{ "indentWidth": 2, "port": 9000, "eventAliases": { "text": "message.text" } }"#,
    )
    .unwrap();
    assert_eq!(options.indent_width, 2);
    assert_eq!(options.port, 9000);
    assert_eq!(options.default_text, "Hello!");
    assert_eq!(options.resolve_event("text"), Some(EventType::MessageText));

    let program = Compiler::new(options)
        .compile(&[event("text"), text_reply("ok")])
        .unwrap();
    assert!(program.contains("\n  variables = user_variables.setdefault(user_id, {})\n"));
}

#[test]
fn test_invalid_options_are_a_parse_error() {
    let result = CompilerOptions::from_json(r#"{ "port": "not a number" }"#);
    assert!(matches!(result, Err(CompileError::JsonParse(_))));
}

#[test]
fn test_shared_compiler_is_reusable() {
    let compiler = Compiler::builder().with_port(7000).build();
    let blocks = create_sample_blocks();
    let first = compiler.compile(&blocks).unwrap();
    let _other = compiler.compile(&[event("join"), control("wait")]).unwrap();
    let again = compiler.compile(&blocks).unwrap();
    assert_eq!(first, again);
    assert_eq!(count_lines(&first, "import time"), 1);
}

#[test]
fn test_compiler_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compiler>();

    let compiler = std::sync::Arc::new(Compiler::default());
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let compiler = compiler.clone();
            std::thread::spawn(move || compiler.compile(&create_sample_blocks()).unwrap())
        })
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs[0], outputs[1]);
}

/// An event followed by `length` loops, each nested in the previous one.
fn loop_chain(length: usize) -> serde_json::Value {
    let mut blocks = vec![json!({ "id": "e", "kind": "event", "data": { "eventType": "follow" } })];
    for i in 0..length {
        let children: Vec<String> = if i + 1 < length {
            vec![format!("n{}", i + 1)]
        } else {
            Vec::new()
        };
        blocks.push(json!({
            "id": format!("n{}", i),
            "kind": "control",
            "data": { "controlType": "loop" },
            "children": children
        }));
    }
    json!({ "roots": ["e", "n0"], "blocks": blocks })
}

#[test]
fn test_graph_chain_deeper_than_limit_is_rejected() {
    let graph: BlockGraph = serde_json::from_value(loop_chain(200_000)).unwrap();

    let err = graph.resolve().unwrap_err();
    assert!(matches!(err, CompileError::CyclicGraph { depth: 257, .. }));

    let compiler = Compiler::builder().with_max_depth(10).build();
    let err = compiler.compile_graph(&graph).unwrap_err();
    assert_eq!(
        err,
        CompileError::CyclicGraph {
            block_id: "n11".to_string(),
            depth: 11
        }
    );
}

#[test]
fn test_graph_chain_within_limit_compiles() {
    let graph: BlockGraph = serde_json::from_value(loop_chain(10)).unwrap();
    let program = Compiler::builder()
        .with_max_depth(10)
        .build()
        .compile_graph(&graph)
        .unwrap();
    assert_eq!(count_lines(&program, &format!("{}pass", " ".repeat(4 * 11))), 1);
}

#[test]
fn test_graph_shared_child_is_placed_once() {
    let json = json!({
        "roots": ["e", "c", "r"],
        "blocks": [
            { "id": "e", "kind": "event", "data": { "eventType": "follow" } },
            { "id": "c", "kind": "control", "data": { "controlType": "loop" }, "children": ["r", "r"] },
            { "id": "r", "kind": "reply", "data": { "replyType": "text", "content": "dup" } }
        ]
    })
    .to_string();

    let program = Compiler::default().compile_json(&json).unwrap();
    assert_eq!(program.matches("dup").count(), 1);
    assert!(program.contains(
        "    for _ in range(5):\n        reply_messages.append(TextSendMessage(text=\"dup\"))\n"
    ));
}

#[test]
fn test_graph_diamond_does_not_expand() {
    // Every level lists the next one twice; a naive expansion doubles per level.
    let mut blocks = vec![json!({ "id": "e", "kind": "event", "data": { "eventType": "follow" } })];
    for i in 0..40 {
        blocks.push(json!({
            "id": format!("c{}", i),
            "kind": "control",
            "data": { "controlType": "loop", "loopCount": 1 },
            "children": [format!("c{}", i + 1), format!("c{}", i + 1)]
        }));
    }
    blocks.push(json!({ "id": "c40", "kind": "reply", "data": { "replyType": "text", "content": "leaf" } }));
    let json = json!({ "roots": ["e", "c0"], "blocks": blocks }).to_string();

    let program = Compiler::default().compile_json(&json).unwrap();
    assert_eq!(program.matches("leaf").count(), 1);
    assert_eq!(program.matches("for _ in range(1):").count(), 40);
}

#[test]
fn test_null_fields_read_as_defaults() {
    let json = json!([
        { "kind": "event", "data": { "eventType": "follow" }, "children": null },
        { "kind": "control", "data": { "controlType": "loop" }, "children": null },
        { "kind": "reply", "data": null }
    ])
    .to_string();
    let program = Compiler::default().compile_json(&json).unwrap();
    assert!(program.contains("    for _ in range(5):\n        pass\n"));

    let graph = json!({
        "roots": null,
        "blocks": [
            { "id": "e", "kind": "event", "data": { "eventType": "join" }, "children": null },
            { "id": "r", "kind": "reply", "data": null, "children": null }
        ]
    })
    .to_string();
    let program = Compiler::default().compile_json(&graph).unwrap();
    assert!(program.contains("def handle_join_1(event, reply_messages):"));
}
