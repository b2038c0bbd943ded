//! Equipment tree assembly (weapon / kinsect / charm lines).
//!
//! Equipment ships as a flat record array plus an upgrade-relation table.
//! Assembly runs in two passes: nodes first, then wiring through the
//! relation table's descendant indices. The forest is arena-backed — nodes
//! live in one `Vec` and refer to each other by index, so parent links need
//! no reference counting.
//!
//! The in-game UI treats a "direct descendant" upgrade as a continuation of
//! the parent's line even when the records carry different tree ids, so that
//! child inherits the parent's effective tree id. Traversal is depth-first
//! pre-order with children pushed in reverse, matching in-game display order.

use log::debug;

use crate::chunk::layout::Record;
use crate::chunk::types::error::{ChunkError, Result};

/// One equipment record prepared for assembly.
#[derive(Debug)]
pub struct EquipEntry {
    pub id: u32,
    pub name: String,
    /// Declared tree id; 0 means none.
    pub tree_id: u32,
    pub record: Record,
}

/// One row of the upgrade-relation table, with empty slots stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRelation {
    /// Position of the owning record in the flat equipment array.
    pub owner: usize,
    /// Ingredients to create the piece outright, as (item, quantity).
    pub create: Vec<(u32, u32)>,
    /// Ingredients to upgrade into this piece from its parent.
    pub upgrade: Vec<(u32, u32)>,
    /// Positions of descendant records; slot 0 is the straight-line
    /// continuation.
    pub descendants: Vec<usize>,
    pub direct_descendant: bool,
}

impl UpgradeRelation {
    /// Extracts a relation from a decoded `weapon_craft`-shaped record.
    /// Zero item ids and zero descendant indices mark empty slots.
    pub fn from_record(record: &Record) -> Result<UpgradeRelation> {
        let owner = record.uint("equip_index")? as usize;
        let create = recipe_pairs(record, "create")?;
        let upgrade = recipe_pairs(record, "upgrade")?;
        let mut descendants = Vec::new();
        for value in record.list("descendants")? {
            let index = value.as_uint().ok_or_else(|| {
                ChunkError::InvalidFormat("descendant index is not an integer".to_string())
            })?;
            if index != 0 {
                descendants.push(index as usize);
            }
        }
        let direct_descendant = record.uint("direct_descendant")? != 0;
        Ok(UpgradeRelation {
            owner,
            create,
            upgrade,
            descendants,
            direct_descendant,
        })
    }

    fn is_empty(&self) -> bool {
        self.create.is_empty() && self.upgrade.is_empty() && self.descendants.is_empty()
    }
}

fn recipe_pairs(record: &Record, field: &str) -> Result<Vec<(u32, u32)>> {
    let mut pairs = Vec::new();
    for value in record.list(field)? {
        let pair = value.as_struct().ok_or_else(|| {
            ChunkError::InvalidFormat(format!("recipe slot in '{}' is not a struct", field))
        })?;
        let item = pair.uint("item")? as u32;
        if item != 0 {
            pairs.push((item, pair.uint("quantity")? as u32));
        }
    }
    Ok(pairs)
}

/// One assembled node: the entry, its effective tree id, and its links.
#[derive(Debug)]
pub struct TreeNode {
    pub entry: EquipEntry,
    /// Tree id after the direct-descendant override.
    pub tree: u32,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// The assembled equipment forest.
#[derive(Debug)]
pub struct EquipForest {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
    isolated: Vec<usize>,
}

impl EquipForest {
    /// Builds the forest from the flat entry array and its relation table.
    pub fn assemble(entries: Vec<EquipEntry>, relations: &[UpgradeRelation]) -> Result<EquipForest> {
        // Pass 1: nodes.
        let mut nodes: Vec<TreeNode> = entries
            .into_iter()
            .map(|entry| TreeNode {
                tree: entry.tree_id,
                entry,
                parent: None,
                children: Vec::new(),
            })
            .collect();

        let mut has_relation_data = vec![false; nodes.len()];
        // slot-0 child of each node whose relation sets the flag
        let mut direct_child = vec![None; nodes.len()];

        // Pass 2: wiring.
        for relation in relations {
            let parent = relation.owner;
            if parent >= nodes.len() {
                return Err(ChunkError::InvalidFormat(format!(
                    "upgrade relation owner {} outside {} equipment records",
                    parent,
                    nodes.len()
                )));
            }
            if !relation.is_empty() {
                has_relation_data[parent] = true;
            }
            for (slot, &child) in relation.descendants.iter().enumerate() {
                if child >= nodes.len() {
                    return Err(ChunkError::InvalidFormat(format!(
                        "descendant index {} outside {} equipment records",
                        child,
                        nodes.len()
                    )));
                }
                if let Some(previous) = nodes[child].parent {
                    return Err(ChunkError::InvalidFormat(format!(
                        "equipment {} has two incoming upgrade edges ({} and {})",
                        child, previous, parent
                    )));
                }
                nodes[child].parent = Some(parent);
                nodes[parent].children.push(child);
                has_relation_data[child] = true;
                if slot == 0 && relation.direct_descendant {
                    direct_child[parent] = Some(child);
                }
            }
        }

        // Isolated: no edges, no recipes, no declared tree.
        let isolated: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| {
                node.parent.is_none()
                    && node.children.is_empty()
                    && !has_relation_data[*index]
                    && node.entry.tree_id == 0
            })
            .map(|(index, _)| index)
            .collect();

        let roots: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| node.parent.is_none() && !isolated.contains(index))
            .map(|(index, _)| index)
            .collect();

        // Propagate the naming override top-down so chains of direct
        // descendants all land in the ancestor's tree.
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            if let Some(child) = direct_child[index] {
                nodes[child].tree = nodes[index].tree;
            }
            for &child in nodes[index].children.iter().rev() {
                stack.push(child);
            }
        }

        debug!(
            "assembled forest: {} nodes, {} roots, {} isolated",
            nodes.len(),
            roots.len(),
            isolated.len()
        );
        Ok(EquipForest {
            nodes,
            roots,
            isolated,
        })
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Records excluded from the forest entirely.
    pub fn isolated(&self) -> &[usize] {
        &self.isolated
    }

    /// Depth-first pre-order over the whole forest: explicit stack, children
    /// pushed in reverse so the first child is visited first.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            for &child in self.nodes[index].children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Nodes in display order.
    pub fn walk(&self) -> impl Iterator<Item = &TreeNode> {
        self.preorder().into_iter().map(|index| &self.nodes[index])
    }
}
