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

#![warn(missing_docs)]

//! Solving problems by searching.
//!
//! A [`Problem`] describes a state space. [`graph_search`] explores it, expanding nodes in the
//! order chosen by a [`Frontier`]: first in first out for breadth-first search, last in first out
//! for depth-first search, or by path cost plus heuristic for A*. A [`ProblemSolvingAgent`] plays
//! a solution back one action at a time.
//!
//! See:
//! -  Chapter 3: Solving Problems by Searching, section 3.3 page 73 and section 3.5.2 page 85

pub mod agent;
pub mod frontier;
pub mod node;
pub mod problem;
pub mod search;

pub use agent::ProblemSolvingAgent;
pub use frontier::{zero_heuristic, FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use node::{NodeKey, SearchNode, SearchTree};
pub use problem::{Problem, ProblemError};
pub use search::{graph_search, search, SearchOutcome, SearchStatistics};

/// Step and path costs.
pub type Cost = f64;

/// Set used for explored states.
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
