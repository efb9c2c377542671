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

//! Search problems wired up to agents that act in an environment.

use std::fmt;
use std::str::FromStr;

use graph_search::{
    search, Cost, FifoFrontier, LifoFrontier, PriorityFrontier, Problem, ProblemError,
    SearchOutcome,
};
use serde::Serialize;
use tracing::{debug, warn};

pub mod missionary_cannibal;
pub mod roomba_coverage;

/// Which frontier to search with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SearchStrategy {
    /// Breadth-first, `fifo`.
    Fifo,

    /// Depth-first, `lifo`.
    Lifo,

    /// A* with the problem's heuristic, `a-star`.
    AStar,
}

/// A string that names no [`SearchStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy '{0}', expected one of fifo, lifo, a-star")]
pub struct UnknownSearchStrategy(String);

impl FromStr for SearchStrategy {
    type Err = UnknownSearchStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(SearchStrategy::Fifo),
            "lifo" => Ok(SearchStrategy::Lifo),
            "a-star" | "astar" => Ok(SearchStrategy::AStar),
            _ => Err(UnknownSearchStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Fifo => write!(f, "fifo"),
            SearchStrategy::Lifo => write!(f, "lifo"),
            SearchStrategy::AStar => write!(f, "a-star"),
        }
    }
}

/// Search `problem` with the frontier `strategy` names. `heuristic` is only used by A*.
pub fn solve<_Problem, _Heuristic>(
    problem: &_Problem,
    strategy: SearchStrategy,
    heuristic: _Heuristic,
) -> Result<SearchOutcome<_Problem::Action>, ProblemError>
where
    _Problem: Problem,
    _Heuristic: Fn(&_Problem::State) -> Cost,
{
    match strategy {
        SearchStrategy::Fifo => search(problem, FifoFrontier::new),
        SearchStrategy::Lifo => search(problem, LifoFrontier::new),
        SearchStrategy::AStar => search(problem, || PriorityFrontier::new(heuristic)),
    }
}

/// A solver for [`graph_search::ProblemSolvingAgent`]. A problem error is logged and treated as
/// no solution, the agent then falls back to its failure decision.
pub fn solver<_Problem, _Heuristic>(
    problem: _Problem,
    strategy: SearchStrategy,
    heuristic: _Heuristic,
) -> impl FnOnce() -> Option<Vec<_Problem::Action>>
where
    _Problem: Problem,
    _Heuristic: Fn(&_Problem::State) -> Cost,
{
    move || match solve(&problem, strategy, heuristic) {
        Ok(outcome) => {
            debug!(
                %strategy,
                statistics = ?outcome.statistics,
                path_cost = outcome.path_cost,
                "planned"
            );
            outcome.path
        }
        Err(error) => {
            warn!(%strategy, %error, "search failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_strategy() {
        assert_eq!("fifo".parse(), Ok(SearchStrategy::Fifo));
        assert_eq!("LIFO".parse(), Ok(SearchStrategy::Lifo));
        assert_eq!("a-star".parse(), Ok(SearchStrategy::AStar));
        assert_eq!(
            "dijkstra".parse::<SearchStrategy>().unwrap_err().to_string(),
            "unknown search strategy 'dijkstra', expected one of fifo, lifo, a-star"
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for strategy in [
            SearchStrategy::Fifo,
            SearchStrategy::Lifo,
            SearchStrategy::AStar,
        ] {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }
}
