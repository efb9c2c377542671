/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! The search tree. Nodes live in an arena and point back at their parent by key, so a node is
//! cheap to create and the whole tree is dropped at once when the search finishes.

use slotmap::{new_key_type, SlotMap};

use crate::Cost;

new_key_type! {
    /// Handle to a node in a [`SearchTree`].
    pub struct NodeKey;
}

/// A node of the search tree: a state plus the way it was reached.
#[derive(Debug, Clone)]
pub struct SearchNode<_State, _Action> {
    /// The state this node represents.
    pub state: _State,

    /// The node this one was generated from. `None` for the root.
    pub parent: Option<NodeKey>,

    /// The action applied to the parent's state. `None` for the root.
    pub parent_action: Option<_Action>,

    /// Sum of step costs from the root to this node.
    pub path_cost: Cost,

    /// Number of actions from the root to this node.
    pub depth: usize,
}

/// Arena of [`SearchNode`]s rooted at the initial state.
#[derive(Debug, Clone)]
pub struct SearchTree<_State, _Action> {
    nodes: SlotMap<NodeKey, SearchNode<_State, _Action>>,
    root: NodeKey,
}

impl<_State, _Action> SearchTree<_State, _Action> {
    /// Create a tree containing only the root.
    pub fn new(root_state: _State) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SearchNode {
            state: root_state,
            parent: None,
            parent_action: None,
            path_cost: 0.0,
            depth: 0,
        });
        Self { nodes, root }
    }

    /// The root node's key.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Look up a node. Keys are only valid for the tree that created them.
    pub fn node(&self, key: NodeKey) -> &SearchNode<_State, _Action> {
        &self.nodes[key]
    }

    /// Generate a child of `parent` reached by `action` at a cost of `step_cost`.
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        state: _State,
        action: _Action,
        step_cost: Cost,
    ) -> NodeKey {
        let (path_cost, depth) = {
            let parent_node = &self.nodes[parent];
            (parent_node.path_cost + step_cost, parent_node.depth + 1)
        };
        self.nodes.insert(SearchNode {
            state,
            parent: Some(parent),
            parent_action: Some(action),
            path_cost,
            depth,
        })
    }

    /// Total cost of the path from the root to `key`.
    pub fn path_cost(&self, key: NodeKey) -> Cost {
        self.nodes[key].path_cost
    }

    /// Number of nodes generated so far, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is created with the tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<_State, _Action> SearchTree<_State, _Action>
where
    _Action: Clone,
{
    /// Actions from the root to `key`, in the order they must be applied. Empty for the root.
    ///
    /// Walks the parent keys up to the root and reverses, so deep trees do not grow the stack.
    pub fn path(&self, key: NodeKey) -> Vec<_Action> {
        let mut actions = Vec::with_capacity(self.nodes[key].depth);
        let mut current = &self.nodes[key];
        while let Some(parent) = current.parent {
            if let Some(action) = &current.parent_action {
                actions.push(action.clone());
            }
            current = &self.nodes[parent];
        }
        actions.reverse();
        actions
    }
}
