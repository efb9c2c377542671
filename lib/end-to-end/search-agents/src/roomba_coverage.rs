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

//! Planning a route that visits every square of a roomba world floor.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use graph_search::{Cost, Problem, ProblemError, ProblemSolvingAgent};
use intelligent_agents::roomba_world::{RoombaAction, RoombaLocation, RoombaPercept, RoombaWorld};
use intelligent_agents::{Agent, AgentRegistry};
use tracing::warn;

use crate::{solver, SearchStrategy};

/// Largest number of reachable squares [`CoverageAgent`] will plan for. The coverage state space
/// grows exponentially with the number of squares.
pub const MAX_COVERAGE_LOCATIONS: usize = 16;

/// The locations in `all_locations` that can be walked to from `start`, including `start`.
/// Empty if `start` is not one of them.
pub fn reachable_locations(
    all_locations: &BTreeSet<RoombaLocation>,
    start: RoombaLocation,
) -> BTreeSet<RoombaLocation> {
    let mut reachable = BTreeSet::new();
    if !all_locations.contains(&start) {
        return reachable;
    }
    let mut queue = VecDeque::from([start]);
    reachable.insert(start);
    while let Some(location) = queue.pop_front() {
        for direction in RoombaAction::DIRECTIONS {
            let next = location.step(direction);
            if all_locations.contains(&next) && reachable.insert(next) {
                queue.push_back(next);
            }
        }
    }
    reachable
}

/// Where the agent is and where it has been.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageState {
    /// Every location visited so far, including the current one.
    pub visited: BTreeSet<RoombaLocation>,

    /// Every location the agent can stand on. Shared by all states of one problem.
    pub all_locations: Arc<BTreeSet<RoombaLocation>>,

    /// Where the agent is.
    pub agent_location: RoombaLocation,
}

impl CoverageState {
    fn validate(&self) -> Result<(), ProblemError> {
        if !self.all_locations.contains(&self.agent_location) {
            return Err(ProblemError::IllegalInitialState(
                "agent out of bounds".to_string(),
            ));
        }
        if let Some(location) = self.visited.difference(&self.all_locations).next() {
            return Err(ProblemError::IllegalInitialState(format!(
                "location '{}' does not exist but was visited.",
                location
            )));
        }
        Ok(())
    }

    fn unvisited(&self) -> impl Iterator<Item = &RoombaLocation> {
        self.all_locations.difference(&self.visited)
    }
}

/// Visit every location at least once, moving one square per step.
#[derive(Debug, Clone)]
pub struct RoombaCoverageProblem {
    initial_state: CoverageState,
}

impl RoombaCoverageProblem {
    /// Start at `agent_location`, which counts as visited.
    pub fn new(
        all_locations: BTreeSet<RoombaLocation>,
        agent_location: RoombaLocation,
    ) -> Result<Self, ProblemError> {
        Self::with_visited(all_locations, BTreeSet::new(), agent_location)
    }

    /// Start at `agent_location` having already been to `visited`.
    pub fn with_visited(
        all_locations: BTreeSet<RoombaLocation>,
        mut visited: BTreeSet<RoombaLocation>,
        agent_location: RoombaLocation,
    ) -> Result<Self, ProblemError> {
        visited.insert(agent_location);
        let initial_state = CoverageState {
            visited,
            all_locations: Arc::new(all_locations),
            agent_location,
        };
        initial_state.validate()?;
        Ok(Self { initial_state })
    }

    /// The problem for the passable squares of `world` that its agent can reach.
    pub fn for_world(world: &RoombaWorld) -> Result<Self, ProblemError> {
        let start = world.agent_location();
        Self::new(
            reachable_locations(&world.floor().passable_locations(), start),
            start,
        )
    }
}

impl Problem for RoombaCoverageProblem {
    type State = CoverageState;
    type Action = RoombaAction;

    fn initial_state(&self) -> Self::State {
        self.initial_state.clone()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        state.visited.len() == state.all_locations.len()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        RoombaAction::DIRECTIONS
            .into_iter()
            .filter(|action| {
                state
                    .all_locations
                    .contains(&state.agent_location.step(*action))
            })
            .collect()
    }

    fn next_state(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, ProblemError> {
        if !self.legal_actions(state).contains(action) {
            return Err(ProblemError::illegal_action(action));
        }
        let agent_location = state.agent_location.step(*action);
        let mut visited = state.visited.clone();
        visited.insert(agent_location);
        Ok(CoverageState {
            visited,
            all_locations: Arc::clone(&state.all_locations),
            agent_location,
        })
    }

    fn path_cost(&self, state: &Self::State, action: &Self::Action) -> Result<Cost, ProblemError> {
        if self.legal_actions(state).contains(action) {
            Ok(1.0)
        } else {
            Err(ProblemError::illegal_action(action))
        }
    }
}

/// Mean squared euclidean distance from the agent to the locations it has not visited, or 0 if
/// there are none. Not admissible, it trades optimality for fewer expansions.
pub fn coverage_heuristic(state: &CoverageState) -> Cost {
    let (count, total) = state
        .unvisited()
        .map(|location| {
            let dx = Cost::from(location.x - state.agent_location.x);
            let dy = Cost::from(location.y - state.agent_location.y);
            dx * dx + dy * dy
        })
        .fold((0usize, 0.0), |(count, total), d| (count + 1, total + d));
    if count == 0 {
        0.0
    } else {
        total / count as Cost
    }
}

type CoverageSolver = Box<dyn FnOnce() -> Option<Vec<RoombaAction>>>;

/// Sucks whenever it stands on dirt. Otherwise follows an A* plan that visits every passable
/// square, computed on the first step. Sucks once the plan is used up, or if there is none.
pub struct CoverageAgent {
    planner: ProblemSolvingAgent<CoverageSolver, RoombaAction, RoombaPercept>,
}

impl CoverageAgent {
    /// Plan over the part of `all_locations` reachable from `agent_location`.
    ///
    /// With more than [`MAX_COVERAGE_LOCATIONS`] reachable squares the agent does not plan at all,
    /// and only sucks.
    pub fn new(all_locations: BTreeSet<RoombaLocation>, agent_location: RoombaLocation) -> Self {
        let mut locations = reachable_locations(&all_locations, agent_location);
        if locations.is_empty() {
            // Let the problem report the bad start.
            locations = all_locations;
        }
        let plan: CoverageSolver = if locations.len() > MAX_COVERAGE_LOCATIONS {
            warn!(
                locations = locations.len(),
                max = MAX_COVERAGE_LOCATIONS,
                "floor too large to plan coverage"
            );
            Box::new(|| None)
        } else {
            match RoombaCoverageProblem::new(locations, agent_location) {
                Ok(problem) => {
                    Box::new(solver(problem, SearchStrategy::AStar, coverage_heuristic))
                }
                Err(error) => {
                    warn!(%error, "cannot plan coverage");
                    Box::new(|| None)
                }
            }
        };
        Self {
            planner: ProblemSolvingAgent::new(plan, RoombaAction::Suck, RoombaAction::Suck),
        }
    }

    /// Plan over the passable squares of `world`, starting where its agent is.
    pub fn for_world(world: &RoombaWorld) -> Self {
        Self::new(world.floor().passable_locations(), world.agent_location())
    }
}

impl Agent for CoverageAgent {
    type Action = RoombaAction;
    type Percept = RoombaPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        if percept.is_dirty {
            RoombaAction::Suck
        } else {
            self.planner.act(percept)
        }
    }
}

/// Register a `coverage` agent that plans for `world`.
pub fn register_coverage_agent(
    registry: &mut AgentRegistry<RoombaAction, RoombaPercept>,
    world: &RoombaWorld,
) {
    let all_locations = world.floor().passable_locations();
    let agent_location = world.agent_location();
    registry.register("coverage", move || {
        Box::new(CoverageAgent::new(all_locations.clone(), agent_location))
    });
}
