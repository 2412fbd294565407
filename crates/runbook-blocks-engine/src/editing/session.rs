use uuid::Uuid;

use crate::error::{ContainerError, RunbookError};
use crate::io::{DocumentStore, Renderer, ensure_single_trailing_newline};
use crate::models::{Block, Document};
use crate::parsing::{ParseOptions, Parser};
use crate::validation::Validator;

use super::builders::{BlockBuilder, BlockDraft};
use super::container::{BlockContainer, ContainerEntry};
use super::ids::IdGenerator;

/// Editing state for one document: its header, a [`BlockContainer`] with
/// the loaded blocks and this session's drafts, and a builder for new drafts.
///
/// [`build`](Self::build) materializes the drafts, merges them after the
/// loaded blocks and validates the result. The outcome is memoized until the
/// next mutation.
#[derive(Debug)]
pub struct EditSession<G> {
    id: Uuid,
    name: String,
    version: i64,
    container: BlockContainer,
    builder: BlockBuilder<G>,
    parser: Parser,
    validator: Validator,
    header_edits: u64,
    cache: Option<(u64, Document)>,
    validations: u64,
}

impl<G: IdGenerator> EditSession<G> {
    /// Empty document at version 1 with a fresh id.
    pub fn create(name: impl Into<String>, mut ids: G) -> Self {
        let id = ids.generate();
        Self::with_header(id, name.into(), 1, BlockContainer::new(), ids)
    }

    /// Edit a loaded document; its blocks form the existing region.
    pub fn from_document(document: Document, ids: G) -> Self {
        let Document {
            id,
            name,
            version,
            content,
        } = document;
        Self::with_header(id, name, version, BlockContainer::from_blocks(content), ids)
    }

    fn with_header(
        id: Uuid,
        name: String,
        version: i64,
        container: BlockContainer,
        ids: G,
    ) -> Self {
        Self {
            id,
            name,
            version,
            container,
            builder: BlockBuilder::new(ids),
            parser: Parser::default(),
            validator: Validator::new(),
            header_edits: 0,
            cache: None,
            validations: 0,
        }
    }

    /// Parse options used to materialize drafts. Validation always runs on
    /// the merged document regardless of `options.validate`.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parser = Parser::new(options);
        self.cache = None;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.header_edits += 1;
    }

    pub fn set_version(&mut self, version: i64) {
        self.version = version;
        self.header_edits += 1;
    }

    pub fn builder(&mut self) -> &mut BlockBuilder<G> {
        &mut self.builder
    }

    pub fn container(&self) -> &BlockContainer {
        &self.container
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Monotonic; changes whenever the header or any block changes.
    pub fn generation(&self) -> u64 {
        self.container.generation() + self.header_edits
    }

    /// How many times the merged document has been validated.
    pub fn validation_count(&self) -> u64 {
        self.validations
    }

    /// Append a draft; returns its global index.
    pub fn add(&mut self, draft: BlockDraft) -> usize {
        self.container.add_new(draft);
        self.container.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<ContainerEntry, ContainerError> {
        self.container.remove(index)
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), ContainerError> {
        self.container.move_block(from, to)
    }

    pub fn replace(
        &mut self,
        index: usize,
        draft: BlockDraft,
    ) -> Result<ContainerEntry, ContainerError> {
        self.container.replace(index, draft)
    }

    fn materialize_drafts(&self) -> Result<Vec<Block>, RunbookError> {
        let boundary = self.container.boundary();
        self.container
            .new_drafts()
            .iter()
            .enumerate()
            .map(|(i, draft)| {
                let path = format!("content[{}]", boundary + i);
                self.parser
                    .parse_block(&draft.to_value(), &path)
                    .map_err(RunbookError::from)
            })
            .collect()
    }

    /// Merged, validated document.
    pub fn build(&mut self) -> Result<Document, RunbookError> {
        let generation = self.generation();
        if let Some((cached_at, document)) = &self.cache
            && *cached_at == generation
        {
            log::debug!("session {}: reusing build for generation {generation}", self.id);
            return Ok(document.clone());
        }

        let mut content = self.container.existing().to_vec();
        content.extend(self.materialize_drafts()?);
        let document = Document {
            id: self.id,
            name: self.name.clone(),
            version: self.version,
            content,
        };

        self.validations += 1;
        self.validator.validate(&document)?;
        log::debug!(
            "session {}: built generation {generation} ({} blocks)",
            self.id,
            document.content.len()
        );

        self.cache = Some((generation, document.clone()));
        Ok(document)
    }

    /// Build and render through `renderer`; output ends in one newline.
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &R) -> Result<String, RunbookError> {
        let document = self.build()?;
        let text = renderer
            .render(&document.to_value())
            .map_err(RunbookError::Render)?;
        Ok(ensure_single_trailing_newline(&text))
    }

    /// Build, persist, and promote the drafts to loaded blocks.
    pub fn save<S: DocumentStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Document, RunbookError> {
        let document = self.build()?;
        store
            .save(document.clone())
            .map_err(RunbookError::Store)?;

        let boundary = self.container.boundary();
        if !self.container.new_drafts().is_empty() {
            self.container.commit(document.content[boundary..].to_vec());
            self.cache = Some((self.generation(), document.clone()));
        }
        log::debug!("session {}: saved version {}", self.id, self.version);
        Ok(document)
    }
}
