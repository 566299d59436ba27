use super::definition::{Block, BlockKind, null_as_default};
use crate::error::CompileError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nesting accepted by [`BlockGraph::resolve`] and by the compiler by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The flat, id-referenced form of a block graph, as the editor stores it.
///
/// Children are referenced by id instead of being nested, which means a
/// malformed document can contain back-edges. [`BlockGraph::resolve`] turns the
/// arena into the nested tree the compiler consumes and rejects cycles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockGraph {
    /// Ids of the root-level blocks, in program order. When empty, every block
    /// that is not referenced as a child is a root, in arena order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roots: Vec<String>,
    pub blocks: Vec<BlockNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockNode {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: BlockKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
}

impl BlockGraph {
    /// Resolves the arena into nested root blocks, accepting nesting up to
    /// [`DEFAULT_MAX_DEPTH`] levels.
    pub fn resolve(&self) -> Result<Vec<Block>, CompileError> {
        self.resolve_with_limit(DEFAULT_MAX_DEPTH)
    }

    /// Resolves the arena into nested root blocks.
    ///
    /// Every block is placed at most once: a block referenced again after it
    /// has been placed is skipped with a warning. A back-edge, or a chain
    /// nested deeper than `max_depth`, fails with [`CompileError::CyclicGraph`].
    pub fn resolve_with_limit(&self, max_depth: usize) -> Result<Vec<Block>, CompileError> {
        let index: AHashMap<&str, usize> = self
            .blocks
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let root_ids: Vec<usize> = if self.roots.is_empty() {
            let referenced: AHashSet<&str> = self
                .blocks
                .iter()
                .flat_map(|node| node.children.iter().map(String::as_str))
                .collect();
            (0..self.blocks.len())
                .filter(|&i| !referenced.contains(self.blocks[i].id.as_str()))
                .collect()
        } else {
            self.roots
                .iter()
                .filter_map(|id| {
                    let found = index.get(id.as_str()).copied();
                    if found.is_none() {
                        log::warn!("Root block '{}' not found in graph, skipping", id);
                    }
                    found
                })
                .collect()
        };

        let mut resolver = Resolver {
            graph: self,
            index,
            max_depth,
            visiting: AHashSet::new(),
            reached: AHashSet::new(),
        };

        let mut roots = Vec::with_capacity(root_ids.len());
        for i in root_ids {
            if let Some(block) = resolver.place(i)? {
                roots.push(block);
            }
        }

        if self.roots.is_empty() {
            // Blocks that no inferred root reaches can only hang off a cycle.
            for i in 0..self.blocks.len() {
                if !resolver.reached.contains(&i) {
                    resolver.place(i)?;
                }
            }
        }

        Ok(roots)
    }
}

struct Resolver<'g> {
    graph: &'g BlockGraph,
    index: AHashMap<&'g str, usize>,
    max_depth: usize,
    /// Blocks on the current root-to-node path.
    visiting: AHashSet<usize>,
    /// Blocks already placed somewhere in the tree.
    reached: AHashSet<usize>,
}

impl Resolver<'_> {
    /// Builds block `i` unless it was already placed.
    fn place(&mut self, i: usize) -> Result<Option<Block>, CompileError> {
        let graph = self.graph;
        let node = &graph.blocks[i];
        if self.visiting.contains(&i) || self.visiting.len() > self.max_depth {
            return Err(CompileError::CyclicGraph {
                block_id: node.id.clone(),
                depth: self.visiting.len(),
            });
        }
        if self.reached.contains(&i) {
            log::warn!("Block '{}' is referenced more than once, skipping the repeat", node.id);
            return Ok(None);
        }
        self.build(i).map(Some)
    }

    fn build(&mut self, i: usize) -> Result<Block, CompileError> {
        let graph = self.graph;
        let node = &graph.blocks[i];

        self.visiting.insert(i);
        self.reached.insert(i);

        let mut children = Vec::with_capacity(node.children.len());
        for child_id in &node.children {
            match self.index.get(child_id.as_str()).copied() {
                Some(child) => children.extend(self.place(child)?),
                None => log::warn!(
                    "Block '{}' references missing child '{}', skipping",
                    node.id,
                    child_id
                ),
            }
        }

        self.visiting.remove(&i);
        Ok(Block {
            id: Some(node.id.clone()),
            kind: node.kind.clone(),
            data: node.data.clone(),
            children,
        })
    }
}
