//! Translation of leaf blocks (replies and variable settings) into statements.

use super::condition::MESSAGE;
use super::context::CompileContext;
use super::imports::Import;
use crate::block::{Block, DataExt, ReplyType, SettingType};
use crate::target::{Lines, PyLiteral, py_ident, py_str};
use serde_json::Value;

/// Handler-local list that collects outgoing messages.
pub const REPLY_MESSAGES: &str = "reply_messages";
/// Handler-local dict with the sender's variables.
pub const VARIABLES: &str = "variables";

const DEFAULT_STICKER_ID: &str = "1";
const DEFAULT_FLEX_ALT_TEXT: &str = "Flex Message";
const DEFAULT_VARIABLE_NAME: &str = "variable";

/// Translates a `reply` block. Unknown or missing reply types emit nothing.
pub(super) fn translate_reply(block: &Block, ctx: &mut CompileContext<'_>) -> Lines {
    let data = &block.data;
    let Some(reply_type) = data.text("replyType").and_then(ReplyType::from_tag) else {
        log::debug!("Skipping reply block '{}' with unknown reply type", block.label());
        return Vec::new();
    };

    let message = match reply_type {
        ReplyType::Text => {
            let content = data.text("content").unwrap_or(ctx.options.default_text.as_str());
            format!("TextSendMessage(text={})", py_str(content))
        }
        ReplyType::Image => {
            ctx.register(Import::ImageMessage);
            let placeholder = ctx.options.placeholder_image_url.as_str();
            let original = data.text("originalContentUrl").unwrap_or(placeholder);
            let preview = data.text("previewImageUrl").unwrap_or(placeholder);
            format!(
                "ImageSendMessage(original_content_url={}, preview_image_url={})",
                py_str(original),
                py_str(preview)
            )
        }
        ReplyType::Flex => {
            ctx.register(Import::FlexMessage);
            let alt_text = data.text("altText").unwrap_or(DEFAULT_FLEX_ALT_TEXT);
            format!(
                "FlexSendMessage(alt_text={}, contents={})",
                py_str(alt_text),
                flex_contents(data.get("flexContent"))
            )
        }
        ReplyType::Sticker => {
            ctx.register(Import::StickerMessage);
            let package_id = data
                .scalar_text("packageId")
                .unwrap_or_else(|| DEFAULT_STICKER_ID.to_string());
            let sticker_id = data
                .scalar_text("stickerId")
                .unwrap_or_else(|| DEFAULT_STICKER_ID.to_string());
            format!(
                "StickerSendMessage(package_id={}, sticker_id={})",
                py_str(&package_id),
                py_str(&sticker_id)
            )
        }
    };

    vec![format!("{REPLY_MESSAGES}.append({message})")]
}

/// Renders the flex payload in whatever shape the editor stored it.
///
/// Structured data becomes a dict literal and text is decoded at runtime; the
/// compiler never reparses the payload itself.
fn flex_contents(content: Option<&Value>) -> String {
    match content {
        None => "{}".to_string(),
        Some(Value::String(raw)) => format!("json.loads({})", py_str(raw)),
        Some(other) => PyLiteral(other).to_string(),
    }
}

/// Translates a `setting` block. Unknown or missing setting types emit nothing.
pub(super) fn translate_setting(block: &Block, ctx: &mut CompileContext<'_>) -> Lines {
    let data = &block.data;
    let Some(setting_type) = data.text("settingType").and_then(SettingType::from_tag) else {
        log::debug!("Skipping setting block '{}' with unknown setting type", block.label());
        return Vec::new();
    };

    let name = data.text("variableName").unwrap_or(DEFAULT_VARIABLE_NAME);
    let line = match setting_type {
        SettingType::SetVariable => {
            if data.text("valueSource") == Some("message") {
                format!("{VARIABLES}[{}] = {MESSAGE}", py_str(name))
            } else {
                let value = data.get("value").cloned().unwrap_or(Value::Null);
                let line = format!("{VARIABLES}[{}] = {}", py_str(name), PyLiteral(&value));
                ctx.variables.record(name, value);
                line
            }
        }
        SettingType::GetVariable => {
            let fallback = data
                .get("defaultValue")
                .filter(|v| !v.is_null())
                .or_else(|| ctx.variables.last_value(name).filter(|v| !v.is_null()));
            match fallback {
                Some(default) => format!(
                    "{} = {VARIABLES}.get({}, {})",
                    py_ident(name),
                    py_str(name),
                    PyLiteral(default)
                ),
                None => format!("{} = {VARIABLES}.get({})", py_ident(name), py_str(name)),
            }
        }
        SettingType::SaveUserData => {
            let key = data.text("dataKey").unwrap_or(name);
            format!(
                "pass  # saveUserData({}): persistence is handled by the host",
                py_str(key)
            )
        }
    };

    vec![line]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::compiler::options::CompilerOptions;
    use serde_json::json;

    fn reply(reply_type: &str) -> Block {
        Block::new(BlockKind::Reply).with_data("replyType", reply_type)
    }

    fn setting(setting_type: &str, name: &str) -> Block {
        Block::new(BlockKind::Setting)
            .with_data("settingType", setting_type)
            .with_data("variableName", name)
    }

    #[test]
    fn text_reply_defaults_to_placeholder() {
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&options);
        let lines = translate_reply(&reply("text"), &mut ctx);
        assert_eq!(lines, vec![r#"reply_messages.append(TextSendMessage(text="Hello!"))"#]);
    }

    #[test]
    fn sticker_defaults_and_import() {
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&options);
        let lines = translate_reply(&reply("sticker").with_data("stickerId", 52002734), &mut ctx);
        assert_eq!(
            lines,
            vec![r#"reply_messages.append(StickerSendMessage(package_id="1", sticker_id="52002734"))"#]
        );
        assert!(ctx.imports.contains(Import::StickerMessage));
    }

    #[test]
    fn flex_payload_keeps_its_shape() {
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&options);

        let structured = reply("flex").with_data("flexContent", json!({"type": "bubble"}));
        assert_eq!(
            translate_reply(&structured, &mut ctx)[0],
            r#"reply_messages.append(FlexSendMessage(alt_text="Flex Message", contents={"type": "bubble"}))"#
        );

        let raw = reply("flex").with_data("flexContent", r#"{"type":"bubble"}"#);
        assert_eq!(
            translate_reply(&raw, &mut ctx)[0],
            r#"reply_messages.append(FlexSendMessage(alt_text="Flex Message", contents=json.loads("{\"type\":\"bubble\"}")))"#
        );

        let odd = reply("flex").with_data("flexContent", 42);
        assert!(translate_reply(&odd, &mut ctx)[0].contains("contents=42"));
    }

    #[test]
    fn get_variable_uses_recorded_value_as_fallback() {
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&options);

        let bare = translate_setting(&setting("getVariable", "score"), &mut ctx);
        assert_eq!(bare, vec![r#"var_score = variables.get("score")"#]);

        let set = translate_setting(&setting("setVariable", "score").with_data("value", 10), &mut ctx);
        assert_eq!(set, vec![r#"variables["score"] = 10"#]);

        let read = translate_setting(&setting("getVariable", "score"), &mut ctx);
        assert_eq!(read, vec![r#"var_score = variables.get("score", 10)"#]);
    }

    #[test]
    fn unknown_sub_types_emit_nothing() {
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&options);
        assert!(translate_reply(&reply("carousel"), &mut ctx).is_empty());
        assert!(translate_setting(&setting("deleteVariable", "x"), &mut ctx).is_empty());
    }
}
