//! Recursive emission of block subtrees.
//!
//! Leaves are handed to the action translator; `if` and `loop` blocks render
//! their children one indent level deeper. A body that emits nothing becomes
//! `pass` so the program stays syntactically valid.

use super::actions::{translate_reply, translate_setting};
use super::condition::block_condition;
use super::context::CompileContext;
use super::imports::Import;
use crate::block::{Block, BlockKind, ControlType, DataExt};
use crate::error::CompileError;
use crate::target::{Lines, PLACEHOLDER, body, seconds};

const DEFAULT_LOOP_COUNT: u64 = 5;
const DEFAULT_WAIT_MILLIS: u64 = 1000;

/// Emits a sequence of blocks in order, at the current indentation level.
pub(super) fn emit_sequence<'b, I>(blocks: I, ctx: &mut CompileContext<'_>) -> Result<Lines, CompileError>
where
    I: IntoIterator<Item = &'b Block>,
{
    let mut lines = Vec::new();
    for block in blocks {
        lines.extend(emit_block(block, ctx)?);
    }
    Ok(lines)
}

/// Emits one block and, for control blocks, its whole subtree.
pub(super) fn emit_block(block: &Block, ctx: &mut CompileContext<'_>) -> Result<Lines, CompileError> {
    match &block.kind {
        BlockKind::Reply => Ok(translate_reply(block, ctx)),
        BlockKind::Setting => Ok(translate_setting(block, ctx)),
        BlockKind::Control => emit_control(block, ctx),
        BlockKind::Event => {
            log::debug!("Skipping nested event block '{}'", block.label());
            Ok(Vec::new())
        }
        BlockKind::Unknown(kind) => {
            log::debug!("Skipping block '{}' of unknown kind '{}'", block.label(), kind);
            Ok(Vec::new())
        }
    }
}

fn emit_control(block: &Block, ctx: &mut CompileContext<'_>) -> Result<Lines, CompileError> {
    let data = &block.data;
    let Some(control_type) = data.text("controlType").and_then(ControlType::from_tag) else {
        log::debug!("Skipping control block '{}' with unknown control type", block.label());
        return Ok(Vec::new());
    };

    match control_type {
        ControlType::If => {
            let mut lines = vec![format!("if {}:", block_condition(data))];
            lines.extend(emit_children(block, ctx)?);
            lines.push("else:".to_string());
            lines.extend(body(vec![PLACEHOLDER.to_string()], ctx.unit()));
            Ok(lines)
        }
        ControlType::Loop => {
            let count = data.count("loopCount").unwrap_or(DEFAULT_LOOP_COUNT);
            let mut lines = vec![format!("for _ in range({}):", count)];
            lines.extend(emit_children(block, ctx)?);
            Ok(lines)
        }
        ControlType::Wait => {
            ctx.register(Import::Time);
            let millis = data.count("waitTime").unwrap_or(DEFAULT_WAIT_MILLIS);
            Ok(vec![format!("time.sleep({})", seconds(millis))])
        }
    }
}

/// Renders the children of a control block one level deeper.
fn emit_children(block: &Block, ctx: &mut CompileContext<'_>) -> Result<Lines, CompileError> {
    ctx.enter(block)?;
    let emitted = emit_sequence(&block.children, ctx);
    ctx.leave();
    Ok(body(emitted?, ctx.unit()))
}
