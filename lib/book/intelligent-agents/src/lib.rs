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

//! Agents, environments and the simulation loop that connects them.
//!
//! PEAS - Performance, Environment, Action, Sensing
//!
//! See:
//! -  Chapter 2: Intelligent Agents, page 40

use std::fmt::Debug;

use serde::Serialize;
use tracing::info;

pub mod registry;
pub mod roomba_world;
pub mod vacuum_world;

pub use registry::{AgentRegistry, BoxedAgent, RegistryError};

/// Hash map used throughout the crate.
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Random number generator used by stochastic agents.
pub type Rng = rand_pcg::Pcg64;

/// Number of time steps a simulation runs for unless configured otherwise.
pub const NUM_TRIALS: u32 = 1000;

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Perception, the Agent will return an Action.
///
/// If the Agent wants to implement a table-driven agent, implementations can
/// store state of all previous Perceptions.
///
/// If the Agent wants to implement e.g. ReflexVacuumAgent, it does not need
/// to store any state.
///
/// Notice that the Agent is not aware of an Environment, it's only interface
/// is the Perception coming in then the Action going out.
pub trait Agent {
    /// What the agent can do.
    type Action;

    /// What the agent can sense.
    type Percept;

    /// Decide on the next action given the latest percept.
    fn act(&mut self, percept: &Self::Percept) -> Self::Action;
}

impl<_Agent> Agent for Box<_Agent>
where
    _Agent: Agent + ?Sized,
{
    type Action = _Agent::Action;
    type Percept = _Agent::Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        (**self).act(percept)
    }
}

/// An Environment runs a single Agent in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    /// Actions the environment accepts.
    type Action;

    /// The part of the state an agent's sensors can observe.
    type Percept;

    /// All information, observable or not, about the environment.
    type State;

    /// What the agent currently perceives.
    fn percept(&self) -> Self::Percept;

    /// Snapshot of the full environment state, as seen by an [`Evaluator`].
    fn state(&self) -> Self::State;

    /// Apply the effects of an agent's action.
    fn execute_action(&mut self, action: &Self::Action);
}

/// An Evaluator scores an agent against a performance measure by watching the full environment
/// state after every time step.
pub trait Evaluator {
    /// The environment state being watched.
    type State;

    /// Accumulated score.
    type Score: num_traits::NumAssign + Copy;

    /// Observe the environment state after one time step.
    fn update(&mut self, state: &Self::State);

    /// The score so far.
    fn score(&self) -> Self::Score;
}

/// Configuration for a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    /// How many percept / act / execute cycles to run.
    pub time_steps: u32,
}

impl SimulationConfig {
    /// Create a configuration that runs for `time_steps` cycles.
    pub fn new(time_steps: u32) -> Self {
        Self { time_steps }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(NUM_TRIALS)
    }
}

/// Outcome of a finished simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationReport<_Score> {
    /// Number of time steps that were run.
    pub time_steps: u32,

    /// Final evaluator score.
    pub score: _Score,
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles. After every cycle the Evaluator sees the full Environment state.
///
/// The Simulation is aware of both the Environment and the single Agent. Notice that the Agent's
/// generic Action and Percept come from the Environment. The Agent still does not need to know that
/// the Environment exists, but the Agent definitely needs the Environment's Action and Percept
/// types.
pub struct Simulation<_Environment, _Agent, _Evaluator>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    _Evaluator: Evaluator<State = _Environment::State>,
{
    environment: _Environment,
    agent: _Agent,
    evaluator: _Evaluator,
    config: SimulationConfig,
}

impl<_Environment, _Agent, _Evaluator> Simulation<_Environment, _Agent, _Evaluator>
where
    _Environment: Environment,
    _Environment::Action: Debug,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    _Evaluator: Evaluator<State = _Environment::State>,
{
    /// Create a simulation. Nothing runs until [`Simulation::run`] is called.
    pub fn new(
        environment: _Environment,
        agent: _Agent,
        evaluator: _Evaluator,
        config: SimulationConfig,
    ) -> Self {
        Self {
            environment,
            agent,
            evaluator,
            config,
        }
    }

    /// Run every configured time step. Each decision is logged at INFO.
    pub fn run(&mut self) {
        for t in 1..=self.config.time_steps {
            let percept = self.environment.percept();
            let action = self.agent.act(&percept);
            info!(t, decision = ?action, "agent decision");
            self.environment.execute_action(&action);
            self.evaluator.update(&self.environment.state());
        }
    }

    /// The evaluator's score so far.
    pub fn score(&self) -> _Evaluator::Score {
        self.evaluator.score()
    }

    /// Summary of the configuration and score.
    pub fn report(&self) -> SimulationReport<_Evaluator::Score> {
        SimulationReport {
            time_steps: self.config.time_steps,
            score: self.score(),
        }
    }

    /// The environment, e.g. to inspect it after a run.
    pub fn environment(&self) -> &_Environment {
        &self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingEnvironment {
        executed: Vec<u32>,
        percepts_given: std::cell::Cell<u32>,
    }

    impl Environment for CountingEnvironment {
        type Action = u32;
        type Percept = u32;
        type State = usize;

        fn percept(&self) -> Self::Percept {
            let next = self.percepts_given.get() + 1;
            self.percepts_given.set(next);
            next
        }

        fn state(&self) -> Self::State {
            self.executed.len()
        }

        fn execute_action(&mut self, action: &Self::Action) {
            self.executed.push(*action);
        }
    }

    struct DoublingAgent {
        percepts: Vec<u32>,
    }

    impl Agent for DoublingAgent {
        type Action = u32;
        type Percept = u32;

        fn act(&mut self, percept: &Self::Percept) -> Self::Action {
            self.percepts.push(*percept);
            percept * 2
        }
    }

    #[derive(Default)]
    struct StateSumEvaluator {
        states: Vec<usize>,
    }

    impl Evaluator for StateSumEvaluator {
        type State = usize;
        type Score = i64;

        fn update(&mut self, state: &Self::State) {
            self.states.push(*state);
        }

        fn score(&self) -> Self::Score {
            self.states.iter().map(|s| *s as i64).sum()
        }
    }

    #[test]
    fn test_simulation_runs_configured_time_steps() {
        let mut simulation = Simulation::new(
            CountingEnvironment::default(),
            DoublingAgent { percepts: vec![] },
            StateSumEvaluator::default(),
            SimulationConfig::default(),
        );
        simulation.run();
        assert_eq!(simulation.environment().executed.len(), NUM_TRIALS as usize);
        assert_eq!(simulation.agent.percepts.len(), NUM_TRIALS as usize);
        assert_eq!(simulation.evaluator.states.len(), NUM_TRIALS as usize);
    }

    #[test]
    fn test_agent_affects_and_perceives_environment() {
        let mut simulation = Simulation::new(
            CountingEnvironment::default(),
            DoublingAgent { percepts: vec![] },
            StateSumEvaluator::default(),
            SimulationConfig::new(3),
        );
        simulation.run();
        assert_eq!(simulation.agent.percepts, vec![1, 2, 3]);
        assert_eq!(simulation.environment().executed, vec![2, 4, 6]);
    }

    #[test]
    fn test_evaluator_sees_state_after_each_action() {
        let mut simulation = Simulation::new(
            CountingEnvironment::default(),
            DoublingAgent { percepts: vec![] },
            StateSumEvaluator::default(),
            SimulationConfig::new(4),
        );
        simulation.run();
        assert_eq!(simulation.evaluator.states, vec![1, 2, 3, 4]);
        assert_eq!(
            simulation.report(),
            SimulationReport {
                time_steps: 4,
                score: 10
            }
        );
    }

    #[test]
    fn test_boxed_agent_delegates() {
        let mut agent: Box<dyn Agent<Action = u32, Percept = u32>> =
            Box::new(DoublingAgent { percepts: vec![] });
        assert_eq!(agent.act(&21), 42);
    }
}
