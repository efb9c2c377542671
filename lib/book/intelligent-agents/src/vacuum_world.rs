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

//! Basic vacuum world specified on page 38 and depicted in Figure 2.2.
//!
//! There are two locations, A and B, and one agent. Either or both locations may contain dirt.
//! The agent perceives its current location and whether there is dirt there. The agent may move
//! left, move right, or suck up the dirt in its current location. Sucking cleans the current
//! square and clean squares stay clean.

use std::str::FromStr;

use serde::Serialize;

use crate::{Agent, AgentRegistry, Environment, Evaluator, HashMap};

const DIRTY_VALUES: [&str; 5] = ["y", "yes", "t", "true", "dirty"];
const CLEAN_VALUES: [&str; 5] = ["n", "no", "f", "false", "clean"];

/// Vacuum world error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VacuumWorldError {
    /// Not one of the two locations.
    #[error("invalid location: '{0}'")]
    InvalidLocation(String),

    /// Not a recognised way of saying dirty or clean.
    #[error("invalid dirt status: '{0}'")]
    InvalidDirtStatus(String),
}

/// One of the two squares of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VacuumWorldLocation {
    /// The left square.
    A,

    /// The right square.
    B,
}

impl VacuumWorldLocation {
    /// Every location, left to right.
    pub const ALL: [VacuumWorldLocation; 2] = [VacuumWorldLocation::A, VacuumWorldLocation::B];
}

impl std::fmt::Display for VacuumWorldLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VacuumWorldLocation::A => write!(f, "A"),
            VacuumWorldLocation::B => write!(f, "B"),
        }
    }
}

impl FromStr for VacuumWorldLocation {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(VacuumWorldLocation::A),
            "B" => Ok(VacuumWorldLocation::B),
            _ => Err(VacuumWorldError::InvalidLocation(s.to_string())),
        }
    }
}

/// Whether a square has dirt in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SquareState {
    /// No dirt.
    Clean,

    /// Needs sucking.
    Dirty,
}

impl FromStr for SquareState {
    type Err = VacuumWorldError;

    /// Accepts the usual spellings of yes/no, true/false and dirty/clean, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        if DIRTY_VALUES.contains(&lowered.as_str()) {
            Ok(SquareState::Dirty)
        } else if CLEAN_VALUES.contains(&lowered.as_str()) {
            Ok(SquareState::Clean)
        } else {
            Err(VacuumWorldError::InvalidDirtStatus(s.to_string()))
        }
    }
}

/// What the vacuum cleaner can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VacuumWorldAction {
    /// Move to A.
    Left,

    /// Move to B.
    Right,

    /// Clean the current square.
    Suck,
}

/// VacuumWorldPercept is the Percept that the Agent receives from the Environment for just
/// a single location, e.g imagine a dirt sensor looking right down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VacuumWorldPercept {
    /// Where the agent is.
    pub location: VacuumWorldLocation,

    /// Whether there is dirt where the agent is.
    pub square_state: SquareState,
}

/// Everything about the world, including squares the agent cannot see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacuumWorldState {
    /// Where the agent is.
    pub agent_location: VacuumWorldLocation,

    /// Dirt status of every location.
    pub squares: HashMap<VacuumWorldLocation, SquareState>,
}

/// Sucks if the square is dirty, otherwise moves to the other square.
#[derive(Default)]
pub struct ReflexVacuumAgent {}

impl ReflexVacuumAgent {
    /// Create a reflex agent.
    pub fn new() -> Self {
        Self {}
    }
}

impl Agent for ReflexVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        if percept.square_state == SquareState::Dirty {
            VacuumWorldAction::Suck
        } else if percept.location == VacuumWorldLocation::A {
            VacuumWorldAction::Right
        } else {
            VacuumWorldAction::Left
        }
    }
}

/// Vacuum world agent that only chooses the Suck action.
#[derive(Default)]
pub struct SuckyAgent {}

impl SuckyAgent {
    /// Create a sucky agent.
    pub fn new() -> Self {
        Self {}
    }
}

impl Agent for SuckyAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;

    fn act(&mut self, _percept: &Self::Percept) -> Self::Action {
        VacuumWorldAction::Suck
    }
}

/// The two-square environment.
pub struct VacuumWorldEnvironment {
    squares: HashMap<VacuumWorldLocation, SquareState>,
    agent_location: VacuumWorldLocation,
}

impl Default for VacuumWorldEnvironment {
    fn default() -> Self {
        VacuumWorldEnvironment::new(
            VacuumWorldLocation::A,
            [SquareState::Dirty, SquareState::Dirty],
        )
    }
}

impl VacuumWorldEnvironment {
    /// Create an environment. `dirt_status` is given for A then B.
    pub fn new(agent_location: VacuumWorldLocation, dirt_status: [SquareState; 2]) -> Self {
        let squares = VacuumWorldLocation::ALL
            .into_iter()
            .zip(dirt_status)
            .collect();
        Self {
            squares,
            agent_location,
        }
    }

    fn square_state(&self, location: VacuumWorldLocation) -> SquareState {
        self.squares
            .get(&location)
            .copied()
            .unwrap_or(SquareState::Clean)
    }
}

impl Environment for VacuumWorldEnvironment {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;
    type State = VacuumWorldState;

    fn percept(&self) -> Self::Percept {
        VacuumWorldPercept {
            location: self.agent_location,
            square_state: self.square_state(self.agent_location),
        }
    }

    fn state(&self) -> Self::State {
        VacuumWorldState {
            agent_location: self.agent_location,
            squares: self.squares.clone(),
        }
    }

    fn execute_action(&mut self, action: &Self::Action) {
        match action {
            VacuumWorldAction::Left => {
                self.agent_location = VacuumWorldLocation::A;
            }
            VacuumWorldAction::Right => {
                self.agent_location = VacuumWorldLocation::B;
            }
            VacuumWorldAction::Suck => {
                self.squares.insert(self.agent_location, SquareState::Clean);
            }
        }
    }
}

/// Scores highly for having clean floors: one point per clean square per time step.
#[derive(Debug, Default)]
pub struct CleanFloorEvaluator {
    score: i32,
}

impl CleanFloorEvaluator {
    /// Create an evaluator with a score of zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for CleanFloorEvaluator {
    type State = VacuumWorldState;
    type Score = i32;

    fn update(&mut self, state: &Self::State) {
        self.score += state
            .squares
            .values()
            .filter(|&s| *s == SquareState::Clean)
            .count() as i32;
    }

    fn score(&self) -> Self::Score {
        self.score
    }
}

/// Every starting agent location combined with every dirt status, eight in all.
pub fn all_initial_configurations() -> Vec<(VacuumWorldLocation, [SquareState; 2])> {
    let statuses = [SquareState::Clean, SquareState::Dirty];
    let mut configurations = Vec::with_capacity(8);
    for location in VacuumWorldLocation::ALL {
        for a in statuses {
            for b in statuses {
                configurations.push((location, [a, b]));
            }
        }
    }
    configurations
}

/// Agents that can be chosen by name on the command line.
pub fn agent_registry() -> AgentRegistry<VacuumWorldAction, VacuumWorldPercept> {
    let mut registry = AgentRegistry::new();
    registry.register("reflex", || Box::new(ReflexVacuumAgent::new()));
    registry.register("sucky", || Box::new(SuckyAgent::new()));
    registry
}
