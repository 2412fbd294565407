/*!
 * # Editing
 *
 * Authoring and rearranging blocks before a document is saved.
 *
 * - **`ids`**: `IdGenerator` and its implementations, injected wherever ids are minted
 * - **`builders`**: `BlockBuilder` producing `BlockDraft`s, blocks in wire shape that
 *   have not been parsed yet
 * - **`container`**: `BlockContainer`, loaded blocks and drafts behind one index space
 * - **`session`**: `EditSession`, header + container + builder, producing a validated
 *   `Document` on build
 *
 * ```rust
 * use runbook_blocks_engine::editing::{EditSession, SequentialIdGenerator};
 *
 * let mut session = EditSession::create("Deploy", SequentialIdGenerator::new(0));
 * let heading = session.builder().heading(1, "Deploy");
 * let script = session.builder().script("build", "cargo build --release");
 * session.add(heading);
 * session.add(script);
 *
 * let doc = session.build().unwrap();
 * assert_eq!(doc.content.len(), 2);
 * ```
 */

pub mod builders;
pub mod container;
pub mod ids;
pub mod session;

pub use builders::{BlockBuilder, BlockDraft};
pub use container::{BlockContainer, ContainerEntry, ContainerItem, Region};
pub use ids::{
    IdGenerator, RandomIdGenerator, SeededIdGenerator, SequentialIdGenerator,
    TimeOrderedIdGenerator,
};
pub use session::EditSession;
