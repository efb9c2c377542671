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

//! Graph search, Figure 3.7 page 77.

use serde::Serialize;
use tracing::debug;

use crate::frontier::Frontier;
use crate::node::SearchTree;
use crate::problem::{Problem, ProblemError};
use crate::{Cost, HashSet};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Nodes whose successors were generated.
    pub expanded: usize,

    /// Child nodes created.
    pub generated: usize,

    /// Nodes taken off the frontier for a state that was already explored.
    pub duplicates_discarded: usize,

    /// Largest number of nodes waiting in the frontier at once.
    pub max_frontier_size: usize,
}

/// Result of [`search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome<_Action> {
    /// Actions from the initial state to a goal, or `None` if no goal is reachable.
    pub path: Option<Vec<_Action>>,

    /// Total step cost of `path`.
    pub path_cost: Option<Cost>,

    /// What the search did to get here.
    pub statistics: SearchStatistics,
}

/// Search `problem`, expanding nodes in the order of the frontier made by `frontier_strategy`.
///
/// Returns the actions leading from the initial state to the first goal taken off the frontier,
/// an empty path if the initial state is already a goal, or `None` if every reachable state was
/// explored without finding a goal. Errors only come from the problem itself.
///
/// Terminates on finite state spaces. On infinite ones it may not.
///
/// ```
/// # use graph_search::{graph_search, FifoFrontier, Problem, ProblemError, Cost};
/// struct CountTo(u32);
///
/// impl Problem for CountTo {
///     type State = u32;
///     type Action = u32;
///
///     fn initial_state(&self) -> u32 { 0 }
///     fn is_goal(&self, state: &u32) -> bool { *state == self.0 }
///     fn legal_actions(&self, state: &u32) -> Vec<u32> {
///         if *state < self.0 { vec![1, 2] } else { vec![] }
///     }
///     fn next_state(&self, state: &u32, action: &u32) -> Result<u32, ProblemError> {
///         Ok(state + action)
///     }
///     fn path_cost(&self, _state: &u32, _action: &u32) -> Result<Cost, ProblemError> {
///         Ok(1.0)
///     }
/// }
///
/// let path = graph_search(&CountTo(5), FifoFrontier::new).unwrap();
/// assert_eq!(path, Some(vec![1, 2, 2]));
/// ```
pub fn graph_search<_Problem, _Frontier, _Strategy>(
    problem: &_Problem,
    frontier_strategy: _Strategy,
) -> Result<Option<Vec<_Problem::Action>>, ProblemError>
where
    _Problem: Problem,
    _Frontier: Frontier<_Problem::State, _Problem::Action>,
    _Strategy: FnOnce() -> _Frontier,
{
    search(problem, frontier_strategy).map(|outcome| outcome.path)
}

/// Same as [`graph_search`], but also reports the path cost and search statistics.
pub fn search<_Problem, _Frontier, _Strategy>(
    problem: &_Problem,
    frontier_strategy: _Strategy,
) -> Result<SearchOutcome<_Problem::Action>, ProblemError>
where
    _Problem: Problem,
    _Frontier: Frontier<_Problem::State, _Problem::Action>,
    _Strategy: FnOnce() -> _Frontier,
{
    let mut tree = SearchTree::new(problem.initial_state());
    let mut frontier = frontier_strategy();
    let mut explored: HashSet<_Problem::State> = HashSet::default();
    let mut statistics = SearchStatistics::default();

    frontier.put(&tree, tree.root());
    statistics.max_frontier_size = frontier.len();

    let mut goal = None;
    while let Some(node_key) = frontier.get() {
        let state = tree.node(node_key).state.clone();

        // Nodes for an explored state may still be waiting, they are dropped here rather than
        // when they are put.
        if !explored.insert(state.clone()) {
            statistics.duplicates_discarded += 1;
            continue;
        }

        if problem.is_goal(&state) {
            goal = Some(node_key);
            break;
        }

        statistics.expanded += 1;
        for action in problem.legal_actions(&state) {
            let next_state = problem.next_state(&state, &action)?;
            let step_cost = problem.path_cost(&state, &action)?;
            let child = tree.add_child(node_key, next_state, action, step_cost);
            frontier.put(&tree, child);
            statistics.generated += 1;
        }
        statistics.max_frontier_size = statistics.max_frontier_size.max(frontier.len());
    }

    let outcome = SearchOutcome {
        path: goal.map(|key| tree.path(key)),
        path_cost: goal.map(|key| tree.path_cost(key)),
        statistics,
    };
    debug!(
        found = outcome.path.is_some(),
        path_length = outcome.path.as_ref().map(Vec::len),
        path_cost = outcome.path_cost,
        expanded = statistics.expanded,
        generated = statistics.generated,
        duplicates_discarded = statistics.duplicates_discarded,
        max_frontier_size = statistics.max_frontier_size,
        "graph search finished"
    );
    Ok(outcome)
}
