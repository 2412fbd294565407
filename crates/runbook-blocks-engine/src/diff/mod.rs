//! Per-block change classification between two document snapshots.
//!
//! Blocks are matched by id at the top level. A matched block counts as
//! moved when its index changes, or when its rank among the blocks present
//! in both snapshots changes (a block that keeps its index while its shared
//! neighbours swap around it). A block whose position and fields both
//! changed yields two records, `Moved` then `Modified`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{Block, BlockProps, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Moved,
    Modified,
    Unchanged,
}

/// `(old, new)` for each differing field; absent props read as `null`.
pub type FieldChanges = BTreeMap<String, (Value, Value)>;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockChange {
    pub kind: ChangeKind,
    pub block_id: Uuid,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub old_block: Option<Block>,
    pub new_block: Option<Block>,
    /// Only set on `Modified` records.
    pub field_changes: Option<FieldChanges>,
}

impl BlockChange {
    fn sort_key(&self) -> (usize, usize) {
        (
            self.old_index.unwrap_or(usize::MAX),
            self.new_index.unwrap_or(usize::MAX),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentDiff {
    pub changes: Vec<BlockChange>,
}

impl DocumentDiff {
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.kind != ChangeKind::Unchanged)
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    pub fn added(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    pub fn removed(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    pub fn moved(&self) -> usize {
        self.count(ChangeKind::Moved)
    }

    pub fn modified(&self) -> usize {
        self.count(ChangeKind::Modified)
    }

    /// Records for one block, in output order.
    pub fn for_block(&self, id: Uuid) -> impl Iterator<Item = &BlockChange> {
        self.changes.iter().filter(move |c| c.block_id == id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentDiffer;

impl DocumentDiffer {
    pub fn new() -> Self {
        Self
    }

    pub fn diff(&self, old: &Document, new: &Document) -> DocumentDiff {
        let old_index: HashMap<Uuid, (usize, &Block)> = index_blocks(&old.content);
        let new_index: HashMap<Uuid, (usize, &Block)> = index_blocks(&new.content);

        let mut changes = Vec::new();

        for (i, block) in old.content.iter().enumerate() {
            if !new_index.contains_key(&block.id) {
                changes.push(BlockChange {
                    kind: ChangeKind::Removed,
                    block_id: block.id,
                    old_index: Some(i),
                    new_index: None,
                    old_block: Some(block.clone()),
                    new_block: None,
                    field_changes: None,
                });
            }
        }

        for (j, block) in new.content.iter().enumerate() {
            if !old_index.contains_key(&block.id) {
                changes.push(BlockChange {
                    kind: ChangeKind::Added,
                    block_id: block.id,
                    old_index: None,
                    new_index: Some(j),
                    old_block: None,
                    new_block: Some(block.clone()),
                    field_changes: None,
                });
            }
        }

        let old_ranks = shared_ranks(&old.content, &new_index);
        let new_ranks = shared_ranks(&new.content, &old_index);

        for (i, old_block) in old.content.iter().enumerate() {
            let Some(&(j, new_block)) = new_index.get(&old_block.id) else {
                continue;
            };
            if i != j || old_ranks.get(&old_block.id) != new_ranks.get(&old_block.id) {
                changes.push(BlockChange {
                    kind: ChangeKind::Moved,
                    block_id: old_block.id,
                    old_index: Some(i),
                    new_index: Some(j),
                    old_block: Some(old_block.clone()),
                    new_block: Some(new_block.clone()),
                    field_changes: None,
                });
            }
            let fields = field_changes(old_block, new_block);
            if !fields.is_empty() {
                changes.push(BlockChange {
                    kind: ChangeKind::Modified,
                    block_id: old_block.id,
                    old_index: Some(i),
                    new_index: Some(j),
                    old_block: Some(old_block.clone()),
                    new_block: Some(new_block.clone()),
                    field_changes: Some(fields),
                });
            }
        }

        // Stable: a block's Moved record stays ahead of its Modified record.
        changes.sort_by_key(BlockChange::sort_key);

        log::debug!(
            "diffed {} -> {}: {} changes",
            old.id,
            new.id,
            changes.len()
        );
        DocumentDiff { changes }
    }
}

/// Diff with a default [`DocumentDiffer`].
pub fn diff(old: &Document, new: &Document) -> DocumentDiff {
    DocumentDiffer::new().diff(old, new)
}

fn index_blocks(blocks: &[Block]) -> HashMap<Uuid, (usize, &Block)> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id, (i, b)))
        .collect()
}

/// Rank of each block among those also present in `other`.
fn shared_ranks<T>(blocks: &[Block], other: &HashMap<Uuid, T>) -> HashMap<Uuid, usize> {
    blocks
        .iter()
        .filter(|b| other.contains_key(&b.id))
        .enumerate()
        .map(|(rank, b)| (b.id, rank))
        .collect()
}

/// Field-level differences between two versions of one block.
///
/// Content is compared as a whole and children are not compared.
pub fn field_changes(old: &Block, new: &Block) -> FieldChanges {
    let mut fields = FieldChanges::new();

    if old.kind() != new.kind() {
        fields.insert(
            "type".to_string(),
            (
                Value::String(old.kind().to_string()),
                Value::String(new.kind().to_string()),
            ),
        );
    }

    let mut old_props = old.props.to_json_map();
    let mut new_props = new.props.to_json_map();
    // A typed side reports every field; compare only what the open side
    // could have seen, so untouched defaults are not changes.
    if old.props.is_unknown() != new.props.is_unknown() {
        drop_unseen_defaults(&mut old_props, &old.props, &new_props);
        drop_unseen_defaults(&mut new_props, &new.props, &old_props);
    }
    let keys: BTreeSet<&String> = old_props.keys().chain(new_props.keys()).collect();
    for key in keys {
        let before = old_props.get(key).cloned().unwrap_or(Value::Null);
        let after = new_props.get(key).cloned().unwrap_or(Value::Null);
        if before != after {
            fields.insert(format!("props.{key}"), (before, after));
        }
    }

    if old.content != new.content {
        fields.insert("content".to_string(), (old.content_value(), new.content_value()));
    }

    fields
}

fn drop_unseen_defaults(
    props: &mut Map<String, Value>,
    typed: &BlockProps,
    other: &Map<String, Value>,
) {
    for key in typed.defaulted_keys() {
        if !other.contains_key(&key) {
            props.remove(&key);
        }
    }
}
