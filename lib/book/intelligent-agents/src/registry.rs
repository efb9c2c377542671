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

//! Named agent constructors, so a simulator can pick its agent from a command-line flag.

use crate::{Agent, HashMap};

/// A boxed agent for a given action and percept.
pub type BoxedAgent<_Action, _Percept> = Box<dyn Agent<Action = _Action, Percept = _Percept>>;

type AgentConstructor<_Action, _Percept> = Box<dyn Fn() -> BoxedAgent<_Action, _Percept>>;

/// Registry error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Nothing was registered under this name.
    #[error("could not load agent '{name}', known agents: {known}")]
    AgentNotFound {
        /// The requested name.
        name: String,

        /// Comma separated list of registered names.
        known: String,
    },
}

/// Maps agent names to constructors. Build it once at startup and look agents up by name.
pub struct AgentRegistry<_Action, _Percept> {
    constructors: HashMap<String, AgentConstructor<_Action, _Percept>>,
}

impl<_Action, _Percept> Default for AgentRegistry<_Action, _Percept> {
    fn default() -> Self {
        Self {
            constructors: HashMap::default(),
        }
    }
}

impl<_Action, _Percept> AgentRegistry<_Action, _Percept> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor. A later registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn() -> BoxedAgent<_Action, _Percept> + 'static,
    {
        self.constructors
            .insert(name.to_string(), Box::new(constructor));
    }

    /// Construct a fresh agent by name.
    pub fn build(&self, name: &str) -> Result<BoxedAgent<_Action, _Percept>, RegistryError> {
        match self.constructors.get(name) {
            Some(constructor) => Ok(constructor()),
            None => Err(RegistryError::AgentNotFound {
                name: name.to_string(),
                known: self.names().join(", "),
            }),
        }
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
