//! Final stitching of the generated program.
//!
//! Layout: fixed preamble, accumulated imports, one section per event
//! handler, fixed epilogue. Fragments are concatenated as text and never
//! reparsed.

use super::actions::{REPLY_MESSAGES, VARIABLES};
use super::condition::{MESSAGE, POSTBACK_DATA, USER_ID};
use super::context::CompileContext;
use super::router::EventHandler;
use crate::target::{Lines, body, indent, reindent};

/// Webhook entry point, signature verification, the handler registry and
/// the per-event reply.
const PREAMBLE: &str = r#"# Generated by botgen. Do not edit by hand.
import os
import json

from flask import Flask, request, abort
from linebot import LineBotApi, WebhookParser
from linebot.exceptions import InvalidSignatureError
from linebot.models import TextSendMessage

app = Flask(__name__)
line_bot_api = LineBotApi(os.environ.get("LINE_CHANNEL_ACCESS_TOKEN", ""))
parser = WebhookParser(os.environ.get("LINE_CHANNEL_SECRET", ""))

user_variables = {}
HANDLERS = {}


def on(trigger):
    def register(func):
        HANDLERS.setdefault(trigger, []).append(func)
        return func
    return register


def trigger_of(event):
    if event.type == "message":
        return "message." + event.message.type
    return event.type


def message_text(event):
    return getattr(getattr(event, "message", None), "text", None) or ""


def sender_id(event):
    return getattr(getattr(event, "source", None), "user_id", None) or ""


def postback_payload(event):
    return getattr(getattr(event, "postback", None), "data", None) or ""


@app.route("/callback", methods=["POST"])
def callback():
    signature = request.headers.get("X-Line-Signature", "")
    body = request.get_data(as_text=True)
    try:
        events = parser.parse(body, signature)
    except InvalidSignatureError:
        abort(400)
    for event in events:
        reply_messages = []
        for handle in HANDLERS.get(trigger_of(event), []):
            handle(event, reply_messages)
        reply_token = getattr(event, "reply_token", None)
        if reply_messages and reply_token:
            line_bot_api.reply_message(reply_token, reply_messages[:5])
    return "OK"
"#;

const IMPORTS_HEADER: &str = "# Imports required by the blocks below";

const EPILOGUE: &str = r#"if __name__ == "__main__":
    port = int(os.environ.get("PORT", {port}))
    app.run(host="0.0.0.0", port=port)
"#;

/// Renders one event handler around its already-emitted action lines.
///
/// Handlers append to a reply list owned by the webhook route, which sends it
/// once per inbound event; a reply token is single-use.
pub(super) fn render_handler(handler: &EventHandler<'_>, actions: Lines, ctx: &CompileContext<'_>) -> String {
    let unit = ctx.unit();

    let mut inner: Lines = vec![
        format!("{MESSAGE} = message_text(event)"),
        format!("{USER_ID} = sender_id(event)"),
        format!("{POSTBACK_DATA} = postback_payload(event)"),
        format!("{VARIABLES} = user_variables.setdefault({USER_ID}, {{}})"),
    ];
    match &handler.condition {
        Some(condition) => {
            inner.push(format!("if {}:", condition));
            inner.extend(body(actions, unit));
        }
        None => inner.extend(actions),
    }

    let mut lines = vec![
        format!("# Event handler {}: {}", handler.index, handler.trigger),
        format!("@on(\"{}\")", handler.trigger),
        format!("def {}(event, {REPLY_MESSAGES}):", handler.function_name()),
    ];
    lines.extend(indent(inner, unit));

    let mut section = lines.join("\n");
    section.push('\n');
    section
}

/// Joins every part of the program into the final text.
pub(super) fn assemble(sections: &[String], ctx: &CompileContext<'_>) -> String {
    let unit = ctx.unit();
    let mut out = reindent(PREAMBLE, unit);

    out.push_str("\n\n");
    out.push_str(IMPORTS_HEADER);
    out.push('\n');
    for statement in ctx.imports.statements() {
        out.push_str(statement);
        out.push('\n');
    }

    for section in sections {
        out.push_str("\n\n");
        out.push_str(section);
    }

    out.push_str("\n\n");
    let epilogue = EPILOGUE.replace("{port}", &ctx.options.port.to_string());
    out.push_str(&reindent(&epilogue, unit));
    out
}
