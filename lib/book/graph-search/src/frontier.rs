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

//! Frontiers decide which generated node is expanded next, and so which search algorithm
//! [`crate::graph_search`] performs.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{NodeKey, SearchTree};
use crate::Cost;

/// The set of generated but not yet expanded nodes.
///
/// A frontier may hold several nodes for the same state. Search discards the extras when they
/// come out.
pub trait Frontier<_State, _Action> {
    /// Add a node. `tree` is the tree the node belongs to, for frontiers that order by it.
    fn put(&mut self, tree: &SearchTree<_State, _Action>, node: NodeKey);

    /// Remove and return the next node to expand, or `None` if empty.
    fn get(&mut self) -> Option<NodeKey>;

    /// Number of nodes waiting.
    fn len(&self) -> usize;

    /// Whether no nodes are waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out. Gives breadth-first search, which finds a shortest path when every step
/// costs the same.
#[derive(Debug, Default, Clone)]
pub struct FifoFrontier {
    queue: VecDeque<NodeKey>,
}

impl FifoFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<_State, _Action> Frontier<_State, _Action> for FifoFrontier {
    fn put(&mut self, _tree: &SearchTree<_State, _Action>, node: NodeKey) {
        self.queue.push_back(node);
    }

    fn get(&mut self) -> Option<NodeKey> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out. Gives depth-first search, which makes no promise about the path it finds.
#[derive(Debug, Default, Clone)]
pub struct LifoFrontier {
    stack: Vec<NodeKey>,
}

impl LifoFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<_State, _Action> Frontier<_State, _Action> for LifoFrontier {
    fn put(&mut self, _tree: &SearchTree<_State, _Action>, node: NodeKey) {
        self.stack.push(node);
    }

    fn get(&mut self) -> Option<NodeKey> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Ordering key for [`PriorityFrontier`]. Lower evaluation first, then older insertion first.
#[derive(Debug, Clone, Copy)]
struct EvaluationKey {
    evaluation: Cost,
    sequence: u64,
}

impl PartialEq for EvaluationKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EvaluationKey {}

impl PartialOrd for EvaluationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.evaluation
            .total_cmp(&other.evaluation)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// `BinaryHeap` is a max-heap, so entries are keyed by `Reverse<EvaluationKey>`.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<EvaluationKey>,
    node: NodeKey,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Orders nodes by `evaluation(node) = path_cost(node) + heuristic(node.state)`, lowest first.
/// This is A* search, or uniform-cost search with [`zero_heuristic`].
///
/// Nodes with equal evaluations come out in the order they went in. The heuristic does not have
/// to be admissible, but if it overestimates the returned path may not be the cheapest.
pub struct PriorityFrontier<_Heuristic> {
    heap: BinaryHeap<FrontierEntry>,
    heuristic: _Heuristic,
    next_sequence: u64,
}

impl<_Heuristic> PriorityFrontier<_Heuristic> {
    /// Create an empty frontier ordering by path cost plus `heuristic`.
    pub fn new(heuristic: _Heuristic) -> Self {
        Self {
            heap: BinaryHeap::new(),
            heuristic,
            next_sequence: 0,
        }
    }
}

impl<_State, _Action, _Heuristic> Frontier<_State, _Action> for PriorityFrontier<_Heuristic>
where
    _Heuristic: Fn(&_State) -> Cost,
{
    fn put(&mut self, tree: &SearchTree<_State, _Action>, node: NodeKey) {
        let search_node = tree.node(node);
        let evaluation = search_node.path_cost + (self.heuristic)(&search_node.state);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(EvaluationKey {
                evaluation,
                sequence,
            }),
            node,
        });
    }

    fn get(&mut self) -> Option<NodeKey> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A heuristic that knows nothing. With it [`PriorityFrontier`] performs uniform-cost search.
pub fn zero_heuristic<_State>(_state: &_State) -> Cost {
    0.0
}
