//! Common test utilities for building block graphs.
use botgen::prelude::*;
use serde_json::{Value, json};

/// An `event` block for the given trigger.
#[allow(dead_code)]
pub fn event(event_type: &str) -> Block {
    Block::new(BlockKind::Event).with_data("eventType", event_type)
}

/// A `message.text` event that filters on a pattern.
#[allow(dead_code)]
pub fn text_event(pattern: &str, match_mode: &str, case_sensitive: bool) -> Block {
    event("message.text")
        .with_data("pattern", pattern)
        .with_data("matchMode", match_mode)
        .with_data("caseSensitive", case_sensitive)
}

#[allow(dead_code)]
pub fn text_reply(content: &str) -> Block {
    Block::new(BlockKind::Reply)
        .with_data("replyType", "text")
        .with_data("content", content)
}

#[allow(dead_code)]
pub fn reply(reply_type: &str) -> Block {
    Block::new(BlockKind::Reply).with_data("replyType", reply_type)
}

#[allow(dead_code)]
pub fn control(control_type: &str) -> Block {
    Block::new(BlockKind::Control).with_data("controlType", control_type)
}

#[allow(dead_code)]
pub fn setting(setting_type: &str, variable_name: &str) -> Block {
    Block::new(BlockKind::Setting)
        .with_data("settingType", setting_type)
        .with_data("variableName", variable_name)
}

/// A small but complete bot: a greeting, a price lookup with a nested
/// condition, a follow handler and a postback handler.
///
/// Handlers: `message.text` x2, `follow`, `postback`.
#[allow(dead_code)]
pub fn create_sample_blocks() -> Vec<Block> {
    vec![
        text_event("hello", "exact", false),
        text_reply("Hi there!"),
        reply("sticker"),
        text_event("price", "contains", false),
        control("if")
            .with_data("conditionType", "userId")
            .with_data("operator", "==")
            .with_data("conditionValue", "U-vip")
            .with_children(vec![text_reply("VIP price: $8")]),
        text_reply("$10"),
        event("follow"),
        setting("setVariable", "stage").with_data("value", "welcome"),
        text_reply("Thanks for following!"),
        event("postback").with_data("postbackData", "action=buy"),
        control("wait").with_data("waitTime", 500),
        text_reply("Purchased."),
    ]
}

/// The same kind of graph as the editor exports it, in the flat form.
#[allow(dead_code)]
pub fn create_sample_graph_json() -> Value {
    json!({
        "roots": ["e1", "c1"],
        "blocks": [
            { "id": "e1", "kind": "event", "data": { "eventType": "message.text", "pattern": "menu" } },
            { "id": "c1", "kind": "control", "data": { "controlType": "loop", "loopCount": 2 }, "children": ["r1", "r2"] },
            { "id": "r1", "kind": "reply", "data": { "replyType": "text", "content": "one" } },
            { "id": "r2", "kind": "reply", "data": { "replyType": "image" } }
        ]
    })
}

/// Counts the lines of `program` that equal `line` exactly.
#[allow(dead_code)]
pub fn count_lines(program: &str, line: &str) -> usize {
    program.lines().filter(|l| *l == line).count()
}
