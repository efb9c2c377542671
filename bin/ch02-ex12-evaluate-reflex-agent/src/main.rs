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

//! Chapter 2, Exercise 12, Evaluate Reflex Agent.

// Exercise 12:
//
// Implement a simple reflex agent for the vacuum environment in Exercise 2.10. Run the environment
// with this agent for all possible initial dirt configurations and agent locations. Record the
// performance score for each configuration and the overall average score.

use anyhow::{Context, Result};
use clap::Parser;
use intelligent_agents::vacuum_world::{
    agent_registry, all_initial_configurations, CleanFloorEvaluator, SquareState,
    VacuumWorldEnvironment, VacuumWorldLocation,
};
use intelligent_agents::{Simulation, SimulationConfig, NUM_TRIALS};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Score an agent on every starting configuration of the vacuum world.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Agent to evaluate: reflex or sucky.
    #[arg(long, default_value = "reflex")]
    agent: String,

    /// Number of time steps per configuration.
    #[arg(long, default_value_t = NUM_TRIALS)]
    time_steps: u32,

    /// Print the scores as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug output, including every agent decision.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConfigurationScore {
    agent_location: VacuumWorldLocation,
    dirt_status: [SquareState; 2],
    score: i32,
}

#[derive(Debug, Serialize)]
struct Evaluation {
    agent: String,
    time_steps: u32,
    configurations: Vec<ConfigurationScore>,
    average_score: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Per step decisions are logged at INFO, which is too much for eight full runs, so only this
    // binary's own events get INFO unless verbose.
    let filter = Targets::new()
        .with_target(module_path!(), Level::INFO)
        .with_default(if cli.verbose { Level::INFO } else { Level::WARN });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let registry = agent_registry();
    let mut configurations = vec![];
    for (agent_location, dirt_status) in all_initial_configurations() {
        let agent = registry
            .build(&cli.agent)
            .with_context(|| format!("Could not load agent '{}'", cli.agent))?;
        let mut simulation = Simulation::new(
            VacuumWorldEnvironment::new(agent_location, dirt_status),
            agent,
            CleanFloorEvaluator::new(),
            SimulationConfig::new(cli.time_steps),
        );
        simulation.run();
        configurations.push(ConfigurationScore {
            agent_location,
            dirt_status,
            score: simulation.score(),
        });
    }

    let total: i32 = configurations.iter().map(|c| c.score).sum();
    let evaluation = Evaluation {
        agent: cli.agent,
        time_steps: cli.time_steps,
        average_score: f64::from(total) / configurations.len() as f64,
        configurations,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        for c in &evaluation.configurations {
            info!(
                location = %c.agent_location,
                dirt = ?c.dirt_status,
                score = c.score,
                "configuration score"
            );
        }
        info!(average_score = evaluation.average_score, "evaluation complete");
    }
    Ok(())
}
