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

//! The formal definition of a search problem.

use std::fmt::Debug;
use std::hash::Hash;

use crate::Cost;

/// Problem error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemError {
    /// The action is not in `legal_actions` for the state it was applied to.
    #[error("illegal action '{0}'")]
    IllegalAction(String),

    /// The problem cannot be built because its initial state is invalid.
    #[error("illegal state: {0}")]
    IllegalInitialState(String),
}

impl ProblemError {
    /// An [`ProblemError::IllegalAction`] naming `action`.
    pub fn illegal_action<_Action: Debug>(action: &_Action) -> Self {
        ProblemError::IllegalAction(format!("{:?}", action))
    }
}

/// A problem is defined by its initial state, a goal test, the actions available in each state,
/// a transition model and a step cost.
///
/// Implementations must be pure: every method depends only on its arguments. Search relies on
/// this to apply transitions in any order it likes.
///
/// States are compared by value. Two equal states are the same state, no matter which path
/// reached them.
pub trait Problem {
    /// A snapshot of the world.
    type State: Clone + Eq + Hash + Debug;

    /// A transition available from some state.
    type Action: Clone + Debug;

    /// Where the search starts.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` solves the problem.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Actions applicable in `state`, possibly none. The order is not significant.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` in `state`.
    ///
    /// May fail with [`ProblemError::IllegalAction`] if `action` is not legal in `state`.
    fn next_state(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, ProblemError>;

    /// The non-negative cost of applying `action` in `state`.
    ///
    /// May fail with [`ProblemError::IllegalAction`] if `action` is not legal in `state`.
    fn path_cost(&self, state: &Self::State, action: &Self::Action) -> Result<Cost, ProblemError>;
}
