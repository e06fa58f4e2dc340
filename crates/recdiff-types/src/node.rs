//! The diff tree: one node per compared source pair.

use serde::{Deserialize, Serialize};

/// Reserved comment marking an entry present only in the first archive.
///
/// This phrase is the authoritative encoding of one-sided presence;
/// renderers and consumers match on it via [`DiffNode::status`].
pub const ENTRY_ONLY_IN_FIRST: &str = "Entry only in first archive";

/// Reserved comment marking an entry present only in the second archive.
pub const ENTRY_ONLY_IN_SECOND: &str = "Entry only in second archive";

/// One node of the diff tree.
///
/// A node describes one pair of logical sources (file, archive entry,
/// listing) and how they differ. Equality is signalled out-of-band — the
/// engine returns no node at all for equal inputs — so a node that exists
/// always describes a difference, carried by at most one of `unified_diff`
/// and `details` plus any number of `comments`.
///
/// The tree is strictly acyclic with owned child lists; a node has a single
/// parent and no back-references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffNode {
    /// Label of the first compared source.
    pub source1: String,
    /// Label of the second compared source.
    pub source2: String,
    /// Header-less unified diff; the first line begins with `@@`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unified_diff: Option<String>,
    /// Informational comments, in attachment order. The two reserved
    /// "Entry only in …" phrases carry node-status semantics.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub comments: Vec<String>,
    /// Child nodes, in a well-defined order (listing node first, then
    /// entries in lexicographic name order).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<DiffNode>,
}

/// One-sided presence signal decoded from the reserved comments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    /// The entry exists only in the first archive.
    OnlyFirst,
    /// The entry exists only in the second archive.
    OnlySecond,
}

impl DiffNode {
    /// Create an empty node for a pair of source labels.
    pub fn new(source1: impl Into<String>, source2: impl Into<String>) -> Self {
        Self {
            source1: source1.into(),
            source2: source2.into(),
            ..Self::default()
        }
    }

    /// Whether the node carries any difference content.
    pub fn has_content(&self) -> bool {
        self.unified_diff.is_some() || !self.comments.is_empty() || !self.details.is_empty()
    }

    /// Append a comment.
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Append a child node.
    pub fn push_detail(&mut self, child: DiffNode) {
        self.details.push(child);
    }

    /// Decode the one-sided presence signal, if any comment carries one.
    pub fn status(&self) -> Option<NodeStatus> {
        for comment in &self.comments {
            match comment.as_str() {
                ENTRY_ONLY_IN_FIRST => return Some(NodeStatus::OnlyFirst),
                ENTRY_ONLY_IN_SECOND => return Some(NodeStatus::OnlySecond),
                _ => {}
            }
        }
        None
    }
}
