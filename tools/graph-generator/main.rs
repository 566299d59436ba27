use botgen::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::fs;

/// A CLI tool to generate random block graphs for exercising the compiler
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_blocks.json")]
    output: String,

    /// Number of event handlers to generate
    #[arg(long, default_value_t = 5)]
    handlers: usize,

    /// Maximum number of actions per handler or control body
    #[arg(long, default_value_t = 4)]
    max_actions: usize,

    /// Maximum control nesting depth
    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    /// Write the flat, id-referenced graph form instead of nested blocks
    #[arg(long)]
    flat: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.max_actions == 0 {
        eprintln!("Error: --max-actions must be at least 1");
        std::process::exit(1);
    }

    let mut rng = cli
        .seed
        .map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_os_rng);

    println!(
        "Generating {} handlers (up to {} actions, depth {})...",
        cli.handlers, cli.max_actions, cli.max_depth
    );

    let mut blocks = Vec::new();
    for _ in 0..cli.handlers {
        blocks.push(random_event(&mut rng));
        let count = rng.random_range(1..=cli.max_actions);
        for _ in 0..count {
            blocks.push(random_action(&mut rng, cli.max_actions, cli.max_depth));
        }
    }

    let json_output = if cli.flat {
        serde_json::to_string_pretty(&flatten(&blocks))?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved blocks to '{}'", cli.output);
    Ok(())
}

fn random_event(rng: &mut StdRng) -> Block {
    let event_type = *EventType::ALL.choose(rng).unwrap_or(&EventType::MessageText);
    let mut block = Block::new(BlockKind::Event).with_data("eventType", event_type.tag());
    match event_type {
        EventType::MessageText => {
            let mode = *MatchMode::ALL.choose(rng).unwrap_or(&MatchMode::Contains);
            let pattern = *["hello", "price", "help", "^order\\s+\\d+$", "bye"]
                .choose(rng)
                .unwrap_or(&"hello");
            block = block
                .with_data("pattern", pattern)
                .with_data("matchMode", mode.tag())
                .with_data("caseSensitive", rng.random_bool(0.5));
        }
        EventType::Postback => {
            block = block.with_data("postbackData", format!("action={}", rng.random_range(1..100u32)));
        }
        _ => {}
    }
    block
}

fn random_action(rng: &mut StdRng, max_actions: usize, depth: usize) -> Block {
    if depth > 0 && rng.random_bool(0.3) {
        return random_control(rng, max_actions, depth);
    }
    if rng.random_bool(0.7) {
        random_reply(rng)
    } else {
        random_setting(rng)
    }
}

fn random_control(rng: &mut StdRng, max_actions: usize, depth: usize) -> Block {
    let control_type = *ControlType::ALL.choose(rng).unwrap_or(&ControlType::If);
    let block = Block::new(BlockKind::Control).with_data("controlType", control_type.tag());
    let block = match control_type {
        ControlType::If => block
            .with_data("conditionType", *["message", "userId"].choose(rng).unwrap_or(&"message"))
            .with_data("operator", *["==", "!=", "in", "not in"].choose(rng).unwrap_or(&"=="))
            .with_data("conditionValue", "yes"),
        ControlType::Loop => block.with_data("loopCount", rng.random_range(1..=10u32)),
        ControlType::Wait => return block.with_data("waitTime", rng.random_range(100..=5000u32)),
    };
    let count = rng.random_range(0..=max_actions);
    let children = (0..count)
        .map(|_| random_action(rng, max_actions, depth - 1))
        .collect();
    block.with_children(children)
}

fn random_reply(rng: &mut StdRng) -> Block {
    let reply_type = *ReplyType::ALL.choose(rng).unwrap_or(&ReplyType::Text);
    let block = Block::new(BlockKind::Reply).with_data("replyType", reply_type.tag());
    match reply_type {
        ReplyType::Text => block.with_data("content", format!("Reply #{}", rng.random_range(1..1000u32))),
        ReplyType::Image => block.with_data("originalContentUrl", "https://example.com/full.jpg"),
        ReplyType::Flex => block.with_data(
            "flexContent",
            json!({
                "type": "bubble",
                "body": {
                    "type": "box",
                    "layout": "vertical",
                    "contents": [{ "type": "text", "text": "Generated" }]
                }
            }),
        ),
        ReplyType::Sticker => block
            .with_data("packageId", "446")
            .with_data("stickerId", rng.random_range(1988..2027u32).to_string()),
    }
}

fn random_setting(rng: &mut StdRng) -> Block {
    let setting_type = *SettingType::ALL.choose(rng).unwrap_or(&SettingType::SetVariable);
    let name = *["score", "stage", "nickname"].choose(rng).unwrap_or(&"score");
    let block = Block::new(BlockKind::Setting)
        .with_data("settingType", setting_type.tag())
        .with_data("variableName", name);
    match setting_type {
        SettingType::SetVariable => block.with_data("value", rng.random_range(0..100u32)),
        _ => block,
    }
}

/// Converts nested blocks into the flat graph form with generated ids.
fn flatten(blocks: &[Block]) -> BlockGraph {
    fn visit(block: &Block, nodes: &mut Vec<BlockNode>) -> String {
        let id = format!("b{}", nodes.len() + 1);
        let index = nodes.len();
        nodes.push(BlockNode {
            id: id.clone(),
            kind: block.kind.clone(),
            data: block.data.clone(),
            children: Vec::new(),
        });
        let children = block.children.iter().map(|c| visit(c, nodes)).collect();
        nodes[index].children = children;
        id
    }

    let mut nodes = Vec::new();
    let roots = blocks.iter().map(|b| visit(b, &mut nodes)).collect();
    BlockGraph {
        roots,
        blocks: nodes,
    }
}
