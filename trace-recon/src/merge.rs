// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tree reconstruction: splices a flat pool of independently-reported span
//! fragments into an existing call tree.
//!
//! The engine is purely functional. It never mutates its receiver, takes no
//! locks and does no I/O, so it is safe to call concurrently on the same
//! span from any number of threads. Worst case it re-scans most of the pool
//! at every node, so cost is bounded by tree size times pool size.

use crate::span::Span;
use log::debug;

impl Span {
    /// Threads a flat batch of freshly collected fragments into the tree
    /// rooted at `self` and returns the merged tree.
    ///
    /// Fragments may arrive in any order and may duplicate hops already in
    /// the tree; duplicates of a known hop contribute their annotations to
    /// that hop rather than becoming siblings. Fragments that cannot be
    /// linked to this tree by the transitive parent/id relation are dropped:
    /// a collector legitimately receives fragments for traces whose root it
    /// does not (yet, or ever) hold.
    pub fn merge(&self, fragments: Vec<Span>) -> Span {
        let (merged, dropped) = self.splice(link_batch(fragments));
        if !dropped.is_empty() {
            debug!(
                "dropped {} fragment(s) unattachable under root {}",
                dropped.len(),
                self.id_string()
            );
        }
        merged
    }

    /// Merges `pool` into the subtree rooted at `self`, returning the
    /// updated subtree and the fragments neither it nor its descendants
    /// claimed.
    ///
    /// Fragments sharing this span's id are duplicate reports of the same
    /// hop: their annotations are appended after this span's own, in pool
    /// order. The rest of the pool is offered to the existing children one
    /// by one, each child seeing only what earlier siblings left behind, so
    /// a fragment attaches to at most one node and sibling order decides
    /// ties. Whatever then remains with a matching `parent_id` becomes a
    /// new direct child; everything else goes back to the caller.
    pub(crate) fn splice(&self, pool: Vec<Span>) -> (Span, Vec<Span>) {
        let (to_merge, rest): (Vec<Span>, Vec<Span>) =
            pool.into_iter().partition(|fragment| fragment.id == self.id);

        let mut remaining = rest;
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let (spliced, leftover) = child.splice(remaining);
            children.push(spliced);
            remaining = leftover;
        }

        let (new_children, unclaimed): (Vec<Span>, Vec<Span>) = remaining
            .into_iter()
            .partition(|fragment| fragment.parent_id == Some(self.id));
        children.extend(new_children);

        let mut annotations = self.annotations.clone();
        for fragment in to_merge {
            annotations.extend(fragment.annotations);
        }

        let merged = Span {
            annotations,
            children,
            ..self.clone()
        };
        (merged, unclaimed)
    }
}

/// Pre-attach pass over one flat batch: gives every fragment the children
/// declared for it elsewhere in the same batch, so parent/child pairs that
/// arrived together are already linked when the recursive splice runs.
///
/// A child stays in the pool after being attached to its batch parent; if
/// the parent itself never links into the tree, both copies fall out as
/// unclaimed together.
fn link_batch(fragments: Vec<Span>) -> Vec<Span> {
    fragments
        .iter()
        .map(|fragment| {
            let mut children = fragment.children.clone();
            for candidate in &fragments {
                if candidate.parent_id == Some(fragment.id) && !children.contains(candidate) {
                    children.push(candidate.clone());
                }
            }
            Span {
                children,
                ..fragment.clone()
            }
        })
        .collect()
}
