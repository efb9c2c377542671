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

//! Chapter 2, Exercise 11, Vacuum World Simulator.

// Exercise 11:
//
// Implement a performance-measuring environment simulator for the vacuum-cleaner world depicted in
// Figure 2.8 and specified on page 38. Your implementation should be modular so that the sensors,
// actuators, and environment characteristics (size, shape, dirt placement, etc.) can be changed
// easily.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use intelligent_agents::vacuum_world::{
    agent_registry, CleanFloorEvaluator, SquareState, VacuumWorldEnvironment, VacuumWorldLocation,
};
use intelligent_agents::{Simulation, SimulationConfig, NUM_TRIALS};
use tracing::{info, Level};

/// Run one agent in the two square vacuum world and report its score.
#[derive(Parser, Debug)]
#[command(name = "vacuum-world", version)]
struct Cli {
    /// Agent to run: reflex or sucky.
    #[arg(long, default_value = "sucky")]
    agent: String,

    /// Dirt status of squares A and B, e.g. `dirty clean` or `y n`.
    #[arg(
        long,
        num_args = 2,
        value_names = ["A", "B"],
        default_values = ["dirty", "dirty"]
    )]
    dirt_status: Vec<SquareState>,

    /// Where the agent starts: A or B.
    #[arg(long, default_value = "A")]
    agent_location: VacuumWorldLocation,

    /// Number of time steps to simulate.
    #[arg(long, default_value_t = NUM_TRIALS)]
    time_steps: u32,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    info!("Vacuum World Simulator v1.0");

    let agent = agent_registry()
        .build(&cli.agent)
        .with_context(|| format!("Could not load agent '{}'", cli.agent))?;
    let dirt_status: [SquareState; 2] = cli
        .dirt_status
        .try_into()
        .map_err(|_| anyhow!("expected exactly two dirt statuses"))?;
    let environment = VacuumWorldEnvironment::new(cli.agent_location, dirt_status);

    let mut simulation = Simulation::new(
        environment,
        agent,
        CleanFloorEvaluator::new(),
        SimulationConfig::new(cli.time_steps),
    );
    simulation.run();
    info!("Simulation complete.");

    let report = simulation.report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("Agent Score: {}", report.score);
    }
    Ok(())
}
