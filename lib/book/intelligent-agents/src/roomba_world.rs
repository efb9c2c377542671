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

//! Roomba world: the vacuum world generalised to a grid floor with obstacles.
//!
//! The floor is read from text, one row per line:
//!
//! - `.` a clean square
//! - `+` a dirty square
//! - `x` an obstacle
//!
//! A location is `(x, y)` where `x` is the line and `y` the column, both starting at 0. Moving up
//! decrements `x`, moving left decrements `y`.

use std::collections::BTreeSet;
use std::str::FromStr;

use rand::{Rng as _, SeedableRng};
use serde::Serialize;

use crate::{Agent, AgentRegistry, Environment, Evaluator, HashMap, Rng};

/// Roomba world error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoombaWorldError {
    /// The floor text contains something other than `.`, `+` or `x`.
    #[error("unexpected character in floor state file: '{0}'")]
    IllegalFloorCharacter(char),

    /// The agent was asked to start somewhere it cannot be.
    #[error("invalid parameter for 'agent_location': '{location}' ({reason})")]
    InvalidAgentLocation {
        /// The rejected location.
        location: RoombaLocation,

        /// Why it was rejected.
        reason: InvalidLocationReason,
    },
}

/// Why a starting location was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLocationReason {
    /// Not on the floor at all.
    OutOfBounds,

    /// On the floor, but an obstacle.
    Impassable,
}

impl std::fmt::Display for InvalidLocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidLocationReason::OutOfBounds => write!(f, "out of bounds"),
            InvalidLocationReason::Impassable => write!(f, "impassable"),
        }
    }
}

/// A square on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoombaLocation {
    /// Row.
    pub x: i32,

    /// Column.
    pub y: i32,
}

impl RoombaLocation {
    /// Create a location.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The location one step away in `action`'s direction. Sucking stays put.
    pub fn step(&self, action: RoombaAction) -> Self {
        match action {
            RoombaAction::Up => Self::new(self.x - 1, self.y),
            RoombaAction::Down => Self::new(self.x + 1, self.y),
            RoombaAction::Left => Self::new(self.x, self.y - 1),
            RoombaAction::Right => Self::new(self.x, self.y + 1),
            RoombaAction::Suck => *self,
        }
    }
}

impl std::fmt::Display for RoombaLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What a floor square holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FloorSquare {
    /// Passable, no dirt.
    Clean,

    /// Passable, needs sucking.
    Dirty,

    /// Cannot be entered. Never dirty.
    Obstacle,
}

impl FloorSquare {
    /// Whether there is dirt here.
    pub fn is_dirty(&self) -> bool {
        *self == FloorSquare::Dirty
    }

    /// Whether the agent may stand here.
    pub fn is_passable(&self) -> bool {
        *self != FloorSquare::Obstacle
    }
}

impl TryFrom<char> for FloorSquare {
    type Error = RoombaWorldError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(FloorSquare::Clean),
            '+' => Ok(FloorSquare::Dirty),
            'x' => Ok(FloorSquare::Obstacle),
            _ => Err(RoombaWorldError::IllegalFloorCharacter(c)),
        }
    }
}

/// The floor plan: every square and what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Floor {
    squares: HashMap<RoombaLocation, FloorSquare>,
}

impl FromStr for Floor {
    type Err = RoombaWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = HashMap::default();
        for (x, line) in s.lines().enumerate() {
            for (y, c) in line.trim_end().chars().enumerate() {
                squares.insert(
                    RoombaLocation::new(x as i32, y as i32),
                    FloorSquare::try_from(c)?,
                );
            }
        }
        Ok(Self { squares })
    }
}

impl Floor {
    /// What is at `location`, if it is on the floor.
    pub fn get(&self, location: &RoombaLocation) -> Option<FloorSquare> {
        self.squares.get(location).copied()
    }

    /// Every square the agent can stand on.
    pub fn passable_locations(&self) -> BTreeSet<RoombaLocation> {
        self.squares
            .iter()
            .filter(|(_, square)| square.is_passable())
            .map(|(location, _)| *location)
            .collect()
    }

    /// Number of squares that are not dirty. Obstacles count as clean.
    pub fn count_clean_squares(&self) -> i32 {
        self.squares.values().filter(|s| !s.is_dirty()).count() as i32
    }

    /// Number of squares on the floor.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Whether the floor has no squares.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    fn suck(&mut self, location: &RoombaLocation) {
        if let Some(square) = self.squares.get_mut(location) {
            if square.is_dirty() {
                *square = FloorSquare::Clean;
            }
        }
    }
}

/// What the roomba can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoombaAction {
    /// Decrement `x`.
    Up,

    /// Increment `x`.
    Down,

    /// Decrement `y`.
    Left,

    /// Increment `y`.
    Right,

    /// Clean the current square.
    Suck,
}

impl RoombaAction {
    /// The four movement actions.
    pub const DIRECTIONS: [RoombaAction; 4] = [
        RoombaAction::Up,
        RoombaAction::Down,
        RoombaAction::Left,
        RoombaAction::Right,
    ];
}

/// What the roomba senses: where it is and whether it is standing on dirt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoombaPercept {
    /// Where the agent is.
    pub agent_location: RoombaLocation,

    /// Whether there is dirt where the agent is.
    pub is_dirty: bool,
}

/// Full state of the roomba world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoombaWorldState {
    /// The floor, with its current dirt.
    pub floor: Floor,

    /// Where the agent is.
    pub agent_location: RoombaLocation,
}

/// The grid environment.
#[derive(Debug, Clone)]
pub struct RoombaWorld {
    floor: Floor,
    agent_location: RoombaLocation,
}

impl RoombaWorld {
    /// Create a world with the agent at `agent_location`, which must be a passable floor square.
    pub fn new(floor: Floor, agent_location: RoombaLocation) -> Result<Self, RoombaWorldError> {
        let reason = match floor.get(&agent_location) {
            None => Some(InvalidLocationReason::OutOfBounds),
            Some(square) if !square.is_passable() => Some(InvalidLocationReason::Impassable),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            return Err(RoombaWorldError::InvalidAgentLocation {
                location: agent_location,
                reason,
            });
        }
        Ok(Self {
            floor,
            agent_location,
        })
    }

    /// The floor as it currently is.
    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    /// Where the agent currently is.
    pub fn agent_location(&self) -> RoombaLocation {
        self.agent_location
    }
}

impl Environment for RoombaWorld {
    type Action = RoombaAction;
    type Percept = RoombaPercept;
    type State = RoombaWorldState;

    fn percept(&self) -> Self::Percept {
        RoombaPercept {
            agent_location: self.agent_location,
            is_dirty: self
                .floor
                .get(&self.agent_location)
                .is_some_and(|s| s.is_dirty()),
        }
    }

    fn state(&self) -> Self::State {
        RoombaWorldState {
            floor: self.floor.clone(),
            agent_location: self.agent_location,
        }
    }

    // Moves into obstacles or off the floor leave the agent where it is.
    fn execute_action(&mut self, action: &Self::Action) {
        if *action == RoombaAction::Suck {
            self.floor.suck(&self.agent_location);
            return;
        }
        let new_location = self.agent_location.step(*action);
        if self
            .floor
            .get(&new_location)
            .is_some_and(|s| s.is_passable())
        {
            self.agent_location = new_location;
        }
    }
}

/// One point per non-dirty square per time step.
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
    type State = RoombaWorldState;
    type Score = i32;

    fn update(&mut self, state: &Self::State) {
        self.score += state.floor.count_clean_squares();
    }

    fn score(&self) -> Self::Score {
        self.score
    }
}

/// Sucks when standing on dirt, otherwise wanders in a uniformly random direction.
pub struct RandomReflexAgent {
    rng: Rng,
}

impl RandomReflexAgent {
    /// Create an agent whose wandering is reproducible from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomReflexAgent {
    type Action = RoombaAction;
    type Percept = RoombaPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        if percept.is_dirty {
            RoombaAction::Suck
        } else {
            RoombaAction::DIRECTIONS[self.rng.gen_range(0..RoombaAction::DIRECTIONS.len())]
        }
    }
}

/// Agents that need nothing beyond a seed. Callers may register more.
pub fn agent_registry(seed: u64) -> AgentRegistry<RoombaAction, RoombaPercept> {
    let mut registry = AgentRegistry::new();
    registry.register("random-reflex", move || {
        Box::new(RandomReflexAgent::new(seed))
    });
    registry
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const FLOOR: &str = ".+x\n+..\n";

    fn world_at(x: i32, y: i32) -> RoombaWorld {
        RoombaWorld::new(FLOOR.parse().unwrap(), RoombaLocation::new(x, y)).unwrap()
    }

    #[test]
    fn test_floor_parses_every_square() {
        let floor: Floor = FLOOR.parse().unwrap();
        assert_eq!(floor.len(), 6);
        assert_eq!(floor.get(&RoombaLocation::new(0, 0)), Some(FloorSquare::Clean));
        assert_eq!(floor.get(&RoombaLocation::new(0, 1)), Some(FloorSquare::Dirty));
        assert_eq!(
            floor.get(&RoombaLocation::new(0, 2)),
            Some(FloorSquare::Obstacle)
        );
        assert_eq!(floor.get(&RoombaLocation::new(1, 0)), Some(FloorSquare::Dirty));
        assert_eq!(floor.get(&RoombaLocation::new(2, 0)), None);
    }

    #[test]
    fn test_floor_ignores_trailing_whitespace() {
        let floor: Floor = "..  \r\n.+\t\n".parse().unwrap();
        assert_eq!(floor.len(), 4);
    }

    #[test]
    fn test_floor_rejects_unknown_characters() {
        assert_eq!(
            "..\n.?".parse::<Floor>(),
            Err(RoombaWorldError::IllegalFloorCharacter('?'))
        );
    }

    #[test]
    fn test_passable_locations_exclude_obstacles() {
        let floor: Floor = FLOOR.parse().unwrap();
        let passable = floor.passable_locations();
        assert_eq!(passable.len(), 5);
        assert!(!passable.contains(&RoombaLocation::new(0, 2)));
    }

    #[test]
    fn test_agent_must_start_on_passable_floor() {
        let floor: Floor = FLOOR.parse().unwrap();
        let error = RoombaWorld::new(floor.clone(), RoombaLocation::new(5, 5)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter for 'agent_location': '(5, 5)' (out of bounds)"
        );
        let error = RoombaWorld::new(floor, RoombaLocation::new(0, 2)).unwrap_err();
        assert_eq!(
            error,
            RoombaWorldError::InvalidAgentLocation {
                location: RoombaLocation::new(0, 2),
                reason: InvalidLocationReason::Impassable,
            }
        );
    }

    #[test]
    fn test_moves_follow_row_column_convention() {
        let mut world = world_at(1, 1);
        world.execute_action(&RoombaAction::Up);
        assert_eq!(world.agent_location(), RoombaLocation::new(0, 1));
        world.execute_action(&RoombaAction::Down);
        world.execute_action(&RoombaAction::Left);
        assert_eq!(world.agent_location(), RoombaLocation::new(1, 0));
        world.execute_action(&RoombaAction::Right);
        world.execute_action(&RoombaAction::Right);
        assert_eq!(world.agent_location(), RoombaLocation::new(1, 2));
    }

    #[test]
    fn test_obstacles_and_edges_block_movement() {
        let mut world = world_at(0, 1);
        world.execute_action(&RoombaAction::Right);
        assert_eq!(world.agent_location(), RoombaLocation::new(0, 1));
        world.execute_action(&RoombaAction::Up);
        assert_eq!(world.agent_location(), RoombaLocation::new(0, 1));
    }

    #[test]
    fn test_suck_cleans_only_current_square() {
        let mut world = world_at(0, 1);
        assert!(world.percept().is_dirty);
        world.execute_action(&RoombaAction::Suck);
        assert!(!world.percept().is_dirty);
        assert_eq!(
            world.floor().get(&RoombaLocation::new(1, 0)),
            Some(FloorSquare::Dirty)
        );
    }

    #[test]
    fn test_clean_floor_evaluator_counts_obstacles_as_clean() {
        let mut world = world_at(0, 1);
        let mut evaluator = CleanFloorEvaluator::new();
        evaluator.update(&world.state());
        assert_eq!(evaluator.score(), 4);
        world.execute_action(&RoombaAction::Suck);
        evaluator.update(&world.state());
        assert_eq!(evaluator.score(), 4 + 5);
    }

    #[test]
    fn test_random_reflex_agent_sucks_dirt() {
        let mut agent = RandomReflexAgent::new(42);
        let percept = RoombaPercept {
            agent_location: RoombaLocation::new(0, 0),
            is_dirty: true,
        };
        for _ in 0..10 {
            assert_eq!(agent.act(&percept), RoombaAction::Suck);
        }
    }

    #[test]
    fn test_random_reflex_agent_is_reproducible() {
        let percept = RoombaPercept {
            agent_location: RoombaLocation::new(0, 0),
            is_dirty: false,
        };
        let mut first = RandomReflexAgent::new(7);
        let mut second = RandomReflexAgent::new(7);
        for _ in 0..20 {
            let action = first.act(&percept);
            assert_ne!(action, RoombaAction::Suck);
            assert_eq!(action, second.act(&percept));
        }
    }

    #[test]
    fn test_registry_knows_random_reflex() {
        let registry = agent_registry(1);
        assert_eq!(registry.names(), vec!["random-reflex".to_string()]);
    }

    proptest! {
        #[test]
        fn test_agent_never_leaves_passable_floor(
            actions in prop::collection::vec(0..5usize, 0..50),
        ) {
            let all_actions = [
                RoombaAction::Up,
                RoombaAction::Down,
                RoombaAction::Left,
                RoombaAction::Right,
                RoombaAction::Suck,
            ];
            let mut world = world_at(1, 1);
            for i in actions {
                world.execute_action(&all_actions[i]);
                let square = world.floor().get(&world.agent_location());
                prop_assert!(square.is_some_and(|s| s.is_passable()));
            }
        }
    }
}
