use super::condition::{pattern_condition, postback_condition};
use super::context::CompileContext;
use crate::block::{Block, BlockKind, DataExt, EventType, MatchMode};

/// The compiled unit for one `event` block and the root blocks that follow it.
#[derive(Debug)]
pub struct EventHandler<'b> {
    /// 1-based position among the program's handlers.
    pub index: usize,
    pub trigger: EventType,
    /// Guard over the whole handler body, if the trigger is filtered.
    pub condition: Option<String>,
    pub actions: Vec<&'b Block>,
}

impl EventHandler<'_> {
    pub fn function_name(&self) -> String {
        format!("handle_{}_{}", self.trigger.ident(), self.index)
    }
}

/// Groups root blocks into event handlers, in document order.
///
/// Blocks before the first event have no handler to join and are dropped. An
/// event block with an unknown trigger closes the open handler, so its
/// actions are dropped as well.
pub(super) fn route<'b>(blocks: &'b [Block], ctx: &mut CompileContext<'_>) -> Vec<EventHandler<'b>> {
    let mut handlers: Vec<EventHandler<'b>> = Vec::new();
    let mut open = false;

    for block in blocks {
        match &block.kind {
            BlockKind::Event => {
                let trigger = block
                    .data
                    .text("eventType")
                    .and_then(|tag| ctx.options.resolve_event(tag));
                match trigger {
                    Some(trigger) => {
                        let condition = trigger_condition(block, trigger, ctx);
                        handlers.push(EventHandler {
                            index: handlers.len() + 1,
                            trigger,
                            condition,
                            actions: Vec::new(),
                        });
                        open = true;
                    }
                    None => {
                        log::debug!("Skipping event block '{}' with unknown event type", block.label());
                        open = false;
                    }
                }
            }
            BlockKind::Unknown(kind) => {
                log::debug!("Skipping root block '{}' of unknown kind '{}'", block.label(), kind);
            }
            _ => match handlers.last_mut() {
                Some(handler) if open => handler.actions.push(block),
                _ => log::debug!("Dropping block '{}' outside of any event handler", block.label()),
            },
        }
    }

    handlers
}

fn trigger_condition(block: &Block, trigger: EventType, ctx: &mut CompileContext<'_>) -> Option<String> {
    let data = &block.data;
    match trigger {
        EventType::MessageText => {
            let pattern = data.text("pattern")?;
            let mode = data
                .text("matchMode")
                .and_then(MatchMode::from_tag)
                .unwrap_or(MatchMode::Contains);
            let case_sensitive = data.flag("caseSensitive").unwrap_or(false);
            Some(pattern_condition(pattern, mode, case_sensitive, ctx))
        }
        EventType::Postback => {
            let payload = data.text("postbackData").or_else(|| data.text("data"))?;
            Some(postback_condition(payload))
        }
        _ => None,
    }
}
