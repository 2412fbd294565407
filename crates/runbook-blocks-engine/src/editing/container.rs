//! Two-region block container.
//!
//! Blocks loaded from storage live in the existing region, drafts authored
//! this session in the new region. Both are addressed through one index
//! space `[0, existing.len() + new.len())`, existing first. Every operation
//! resolves its indices before touching either region, so a failed call
//! leaves the container unchanged.

use uuid::Uuid;

use crate::error::ContainerError;
use crate::models::Block;

use super::builders::BlockDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Existing,
    New,
}

/// Borrowed view of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerItem<'a> {
    Existing(&'a Block),
    New(&'a BlockDraft),
}

impl ContainerItem<'_> {
    pub fn id(&self) -> Uuid {
        match self {
            ContainerItem::Existing(b) => b.id,
            ContainerItem::New(d) => d.id,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ContainerItem::Existing(b) => b.kind(),
            ContainerItem::New(d) => &d.kind,
        }
    }
}

/// An item taken out of the container.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerEntry {
    Existing(Block),
    New(BlockDraft),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockContainer {
    existing: Vec<Block>,
    new: Vec<BlockDraft>,
    /// Bumped by every mutation.
    generation: u64,
}

impl BlockContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            existing: blocks,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.existing.len() + self.new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn existing(&self) -> &[Block] {
        &self.existing
    }

    pub fn new_drafts(&self) -> &[BlockDraft] {
        &self.new
    }

    /// First global index of the new region.
    pub fn boundary(&self) -> usize {
        self.existing.len()
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    /// Translate a global index to its region and local index.
    pub fn locate(&self, index: usize) -> Result<(Region, usize), ContainerError> {
        let boundary = self.boundary();
        if index < boundary {
            Ok((Region::Existing, index))
        } else if index < self.len() {
            Ok((Region::New, index - boundary))
        } else {
            Err(ContainerError::Index {
                index,
                len: self.len(),
            })
        }
    }

    pub fn add_existing(&mut self, block: Block) {
        self.existing.push(block);
        self.touch();
    }

    pub fn add_new(&mut self, draft: BlockDraft) {
        self.new.push(draft);
        self.touch();
    }

    /// Item at a global index, or `None` past the end. Unlike the mutating
    /// operations this does not report `ContainerError::Index`; use
    /// [`locate`](Self::locate) for the error.
    pub fn get(&self, index: usize) -> Option<ContainerItem<'_>> {
        match self.locate(index).ok()? {
            (Region::Existing, i) => self.existing.get(i).map(ContainerItem::Existing),
            (Region::New, i) => self.new.get(i).map(ContainerItem::New),
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<ContainerEntry, ContainerError> {
        let entry = match self.locate(index)? {
            (Region::Existing, i) => ContainerEntry::Existing(self.existing.remove(i)),
            (Region::New, i) => ContainerEntry::New(self.new.remove(i)),
        };
        self.touch();
        Ok(entry)
    }

    /// Supersede the item at `index` with a draft.
    ///
    /// An existing block is dropped from its region and the draft goes to the
    /// front of the new region; a draft is swapped in place.
    pub fn replace(
        &mut self,
        index: usize,
        draft: BlockDraft,
    ) -> Result<ContainerEntry, ContainerError> {
        let replaced = match self.locate(index)? {
            (Region::Existing, i) => {
                let block = self.existing.remove(i);
                self.new.insert(0, draft);
                ContainerEntry::Existing(block)
            }
            (Region::New, i) => {
                ContainerEntry::New(std::mem::replace(&mut self.new[i], draft))
            }
        };
        self.touch();
        Ok(replaced)
    }

    /// Move the item at `from` so that it ends up at `to`, within one region.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), ContainerError> {
        if from == to {
            return Ok(());
        }
        let (from_region, f) = self.locate(from)?;
        let (to_region, t) = self.locate(to)?;
        if from_region != to_region {
            return Err(ContainerError::CrossRegion {
                from,
                to,
                boundary: self.boundary(),
            });
        }

        match from_region {
            Region::Existing => {
                let block = self.existing.remove(f);
                self.existing.insert(t, block);
            }
            Region::New => {
                let draft = self.new.remove(f);
                self.new.insert(t, draft);
            }
        }
        self.touch();
        Ok(())
    }

    /// Only the existing region is searched.
    pub fn find_by_id(&self, id: Uuid) -> Option<(usize, &Block)> {
        self.existing.iter().enumerate().find(|(_, b)| b.id == id)
    }

    /// Only the existing region is searched.
    pub fn find_by_type(&self, kind: &str) -> Vec<(usize, &Block)> {
        self.existing
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind() == kind)
            .collect()
    }

    /// Existing region, then new region.
    pub fn iter(&self) -> impl Iterator<Item = ContainerItem<'_>> {
        self.existing
            .iter()
            .map(ContainerItem::Existing)
            .chain(self.new.iter().map(ContainerItem::New))
    }

    pub fn clear_new(&mut self) {
        if !self.new.is_empty() {
            self.new.clear();
            self.touch();
        }
    }

    /// Promote materialized drafts into the existing region.
    pub(crate) fn commit(&mut self, blocks: Vec<Block>) {
        self.existing.extend(blocks);
        self.new.clear();
        self.touch();
    }
}
