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

//! Missionaries and cannibals, exercise 3.9 page 115.
//!
//! Three missionaries and three cannibals are on the left bank of a river with a boat that holds
//! one or two people. Get everyone across without cannibals ever outnumbering missionaries on
//! either bank, unless there are no missionaries there.

use std::fmt;

use graph_search::{Cost, Problem, ProblemError, ProblemSolvingAgent};
use intelligent_agents::{Agent, Environment, Evaluator};
use serde::Serialize;

use crate::{solver, SearchStrategy};

/// Missionaries, and separately cannibals, per bank.
pub const PEOPLE_PER_GROUP: i32 = 3;

/// Who is on the left bank. `boat` is 1 when the boat is on the left bank and 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RiverState {
    /// Missionaries on the left bank.
    pub missionaries: i32,

    /// Cannibals on the left bank.
    pub cannibals: i32,

    /// 1 if the boat is on the left bank.
    pub boat: i32,
}

impl RiverState {
    /// Everyone, and the boat, on the left bank.
    pub const START: RiverState = RiverState::new(PEOPLE_PER_GROUP, PEOPLE_PER_GROUP, 1);

    /// Everyone, and the boat, on the right bank.
    pub const GOAL: RiverState = RiverState::new(0, 0, 0);

    /// Create a state from left bank counts.
    pub const fn new(missionaries: i32, cannibals: i32, boat: i32) -> Self {
        Self {
            missionaries,
            cannibals,
            boat,
        }
    }

    /// Add `load` to every count, without checking the result.
    pub fn apply(&self, load: &BoatLoad) -> Self {
        Self::new(
            self.missionaries + load.missionaries,
            self.cannibals + load.cannibals,
            self.boat + load.boat,
        )
    }

    /// Whether the counts are possible and nobody on either bank gets eaten.
    pub fn is_legal(&self) -> bool {
        let people = 0..=PEOPLE_PER_GROUP;
        if !people.contains(&self.missionaries)
            || !people.contains(&self.cannibals)
            || !(0..=1).contains(&self.boat)
        {
            return false;
        }
        let left = (self.missionaries, self.cannibals);
        let right = (
            PEOPLE_PER_GROUP - self.missionaries,
            PEOPLE_PER_GROUP - self.cannibals,
        );
        [left, right]
            .into_iter()
            .all(|(missionaries, cannibals)| !(cannibals > missionaries && missionaries > 0))
    }
}

impl fmt::Display for RiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.missionaries, self.cannibals, self.boat)
    }
}

/// Change in left bank counts caused by one crossing. Negative when people leave the left bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoatLoad {
    /// Change in missionaries on the left bank.
    pub missionaries: i32,

    /// Change in cannibals on the left bank.
    pub cannibals: i32,

    /// Change in boats on the left bank.
    pub boat: i32,
}

impl BoatLoad {
    /// Nobody moves. Returned by the search agent once it is done.
    pub const STAY: BoatLoad = BoatLoad::new(0, 0, 0);

    /// Who can be in the boat, as (missionaries, cannibals).
    pub const PASSENGERS: [(i32, i32); 5] = [(0, 2), (0, 1), (1, 1), (1, 0), (2, 0)];

    /// Create a load.
    pub const fn new(missionaries: i32, cannibals: i32, boat: i32) -> Self {
        Self {
            missionaries,
            cannibals,
            boat,
        }
    }
}

impl fmt::Display for BoatLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.missionaries, self.cannibals, self.boat)
    }
}

/// The river crossing as a search problem. Every crossing costs 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionaryCannibalProblem;

impl Problem for MissionaryCannibalProblem {
    type State = RiverState;
    type Action = BoatLoad;

    fn initial_state(&self) -> Self::State {
        RiverState::START
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        *state == RiverState::GOAL
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        // The boat carries people away from whichever bank it is on.
        let sign = if state.boat == 1 { -1 } else { 1 };
        BoatLoad::PASSENGERS
            .into_iter()
            .map(|(missionaries, cannibals)| {
                BoatLoad::new(sign * missionaries, sign * cannibals, sign)
            })
            .filter(|load| state.apply(load).is_legal())
            .collect()
    }

    fn next_state(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, ProblemError> {
        if self.legal_actions(state).contains(action) {
            Ok(state.apply(action))
        } else {
            Err(ProblemError::illegal_action(action))
        }
    }

    fn path_cost(&self, state: &Self::State, action: &Self::Action) -> Result<Cost, ProblemError> {
        self.next_state(state, action).map(|_| 1.0)
    }
}

/// Half the people still on the left bank. The boat moves at most two people per crossing, so
/// this never overestimates.
pub fn crossing_heuristic(state: &RiverState) -> Cost {
    Cost::from(state.missionaries + state.cannibals) / 2.0
}

/// The river. Applies whatever load it is given.
#[derive(Debug, Clone)]
pub struct MissionaryCannibalEnvironment {
    state: RiverState,
}

impl MissionaryCannibalEnvironment {
    /// Everyone starts on the left bank.
    pub fn new() -> Self {
        Self {
            state: RiverState::START,
        }
    }
}

impl Default for MissionaryCannibalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for MissionaryCannibalEnvironment {
    type Action = BoatLoad;
    type Percept = RiverState;
    type State = RiverState;

    fn percept(&self) -> Self::Percept {
        self.state
    }

    fn state(&self) -> Self::State {
        self.state
    }

    fn execute_action(&mut self, action: &Self::Action) {
        self.state = self.state.apply(action);
    }
}

/// Counts the time steps that end away from the goal. The score is that count if the last state
/// seen was the goal, and 0 otherwise.
#[derive(Debug, Default)]
pub struct CrossingEvaluator {
    steps: u32,
    at_goal: bool,
}

impl CrossingEvaluator {
    /// Create an evaluator that has seen nothing.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for CrossingEvaluator {
    type State = RiverState;
    type Score = u32;

    fn update(&mut self, state: &Self::State) {
        self.at_goal = MissionaryCannibalProblem.is_goal(state);
        if !self.at_goal {
            self.steps += 1;
        }
    }

    fn score(&self) -> Self::Score {
        if self.at_goal {
            self.steps
        } else {
            0
        }
    }
}

/// An agent that plans the whole crossing with `strategy` on its first step, then replays it.
/// Afterwards, or if there is no plan, it sends [`BoatLoad::STAY`].
pub fn search_agent(
    strategy: SearchStrategy,
) -> impl Agent<Action = BoatLoad, Percept = RiverState> {
    ProblemSolvingAgent::new(
        solver(MissionaryCannibalProblem, strategy, crossing_heuristic),
        BoatLoad::STAY,
        BoatLoad::STAY,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use graph_search::{graph_search, FifoFrontier};
    use intelligent_agents::{Simulation, SimulationConfig};
    use proptest::prelude::*;
    use proptest::sample::Index;

    use super::*;
    use crate::solve;

    fn replay(path: &[BoatLoad]) -> Vec<RiverState> {
        let problem = MissionaryCannibalProblem;
        let mut states = vec![problem.initial_state()];
        for load in path {
            let next = problem.next_state(states.last().unwrap(), load).unwrap();
            states.push(next);
        }
        states
    }

    #[test]
    fn test_start_and_goal() {
        let problem = MissionaryCannibalProblem;
        assert_eq!(problem.initial_state(), RiverState::new(3, 3, 1));
        assert!(!problem.is_goal(&RiverState::START));
        assert!(problem.is_goal(&RiverState::new(0, 0, 0)));
        assert!(!problem.is_goal(&RiverState::new(0, 0, 1)));
    }

    #[test]
    fn test_legal_actions_from_start() {
        assert_eq!(
            MissionaryCannibalProblem.legal_actions(&RiverState::START),
            vec![
                BoatLoad::new(0, -2, -1),
                BoatLoad::new(0, -1, -1),
                BoatLoad::new(-1, -1, -1),
            ]
        );
    }

    #[test]
    fn test_boat_on_right_bank_brings_people_back() {
        let actions = MissionaryCannibalProblem.legal_actions(&RiverState::new(3, 1, 0));
        assert!(actions.iter().all(|load| load.boat == 1));
        assert!(actions.contains(&BoatLoad::new(0, 1, 1)));
    }

    #[test]
    fn test_legality() {
        assert!(RiverState::new(3, 1, 0).is_legal());
        // No missionaries on the right bank, so two cannibals there are harmless.
        assert!(RiverState::new(3, 1, 1).is_legal());
        assert!(!RiverState::new(2, 3, 0).is_legal());
        assert!(!RiverState::new(1, 0, 1).is_legal());
        assert!(!RiverState::new(4, 0, 1).is_legal());
        assert!(!RiverState::new(0, -1, 0).is_legal());
        assert!(!RiverState::new(3, 3, 2).is_legal());
    }

    #[test]
    fn test_illegal_load_is_rejected() {
        let problem = MissionaryCannibalProblem;
        let load = BoatLoad::new(-2, 0, -1);
        assert_eq!(
            problem.next_state(&RiverState::START, &load),
            Err(ProblemError::illegal_action(&load))
        );
        assert!(problem.path_cost(&RiverState::START, &load).is_err());
        assert_abs_diff_eq!(
            problem
                .path_cost(&RiverState::START, &BoatLoad::new(0, -2, -1))
                .unwrap(),
            1.0
        );
    }

    #[test]
    fn test_breadth_first_finds_eleven_crossings() {
        let path = graph_search(&MissionaryCannibalProblem, FifoFrontier::new)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 11);
        let states = replay(&path);
        assert_eq!(states.last(), Some(&RiverState::GOAL));
        assert!(states.iter().all(RiverState::is_legal));
    }

    #[test]
    fn test_every_strategy_gets_everyone_across() {
        for strategy in [
            SearchStrategy::Fifo,
            SearchStrategy::Lifo,
            SearchStrategy::AStar,
        ] {
            let outcome = solve(&MissionaryCannibalProblem, strategy, crossing_heuristic).unwrap();
            let path = outcome.path.unwrap();
            assert_eq!(replay(&path).last(), Some(&RiverState::GOAL));
            assert_abs_diff_eq!(outcome.path_cost.unwrap(), path.len() as f64);
        }
    }

    #[test]
    fn test_a_star_is_optimal() {
        let outcome = solve(
            &MissionaryCannibalProblem,
            SearchStrategy::AStar,
            crossing_heuristic,
        )
        .unwrap();
        assert_eq!(outcome.path.map(|path| path.len()), Some(11));
    }

    #[test]
    fn test_heuristic() {
        assert_abs_diff_eq!(crossing_heuristic(&RiverState::START), 3.0);
        assert_abs_diff_eq!(crossing_heuristic(&RiverState::new(1, 0, 1)), 0.5);
        assert_abs_diff_eq!(crossing_heuristic(&RiverState::GOAL), 0.0);
    }

    #[test]
    fn test_environment_applies_any_load() {
        let mut environment = MissionaryCannibalEnvironment::new();
        environment.execute_action(&BoatLoad::new(-3, 0, -1));
        assert_eq!(environment.state(), RiverState::new(0, 3, 0));
        assert_eq!(environment.percept(), environment.state());
        environment.execute_action(&BoatLoad::STAY);
        assert_eq!(environment.state(), RiverState::new(0, 3, 0));
    }

    #[test]
    fn test_evaluator_scores_only_when_goal_reached() {
        let mut evaluator = CrossingEvaluator::new();
        evaluator.update(&RiverState::new(3, 1, 0));
        evaluator.update(&RiverState::new(3, 2, 1));
        assert_eq!(evaluator.score(), 0);
        evaluator.update(&RiverState::GOAL);
        evaluator.update(&RiverState::GOAL);
        assert_eq!(evaluator.score(), 2);
        evaluator.update(&RiverState::new(0, 1, 1));
        assert_eq!(evaluator.score(), 0);
    }

    #[test]
    fn test_search_agent_solves_crossing_in_simulation() {
        let mut simulation = Simulation::new(
            MissionaryCannibalEnvironment::new(),
            search_agent(SearchStrategy::Fifo),
            CrossingEvaluator::new(),
            SimulationConfig::new(20),
        );
        simulation.run();
        assert_eq!(simulation.environment().state(), RiverState::GOAL);
        // Ten crossings end away from the goal, the eleventh lands on it.
        assert_eq!(simulation.score(), 10);
    }

    proptest! {
        #[test]
        fn test_legal_actions_keep_everyone_safe(
            choices in prop::collection::vec(any::<Index>(), 0..40)
        ) {
            let problem = MissionaryCannibalProblem;
            let mut state = problem.initial_state();
            for choice in choices {
                let actions = problem.legal_actions(&state);
                // Every reachable state has a way forward, or back.
                prop_assert!(!actions.is_empty());
                let before = state;
                state = problem.next_state(&state, choice.get(&actions)).unwrap();
                prop_assert!(state.is_legal());
                prop_assert_eq!(state.boat, 1 - before.boat);
            }
        }
    }
}
