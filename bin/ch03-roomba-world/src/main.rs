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

//! Roomba world simulator: a grid floor with dirt and obstacles, read from a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use intelligent_agents::roomba_world::{
    agent_registry, CleanFloorEvaluator, Floor, RoombaLocation, RoombaWorld,
};
use intelligent_agents::{Simulation, SimulationConfig, SimulationReport, NUM_TRIALS};
use search_agents::roomba_coverage::register_coverage_agent;
use serde::Serialize;
use tracing::{info, Level};

/// Run one agent on a roomba world floor and report its score.
///
/// The floor file has one row per line: `.` is clean, `+` is dirty and `x` is an obstacle.
#[derive(Parser, Debug)]
#[command(name = "roomba-world", version)]
struct Cli {
    /// Floor layout file.
    #[arg(long)]
    floor: PathBuf,

    /// Starting row and column of the agent.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values = ["0", "0"])]
    agent_location: Vec<i32>,

    /// Agent to run: random-reflex or coverage.
    #[arg(long, default_value = "random-reflex")]
    agent: String,

    /// Seed for agents that make random choices.
    #[arg(long, default_value_t = 0)]
    seed: u64,

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

#[derive(Debug, Serialize)]
struct RoombaReport {
    agent: String,
    #[serde(flatten)]
    simulation: SimulationReport<i32>,
    clean_squares: i32,
    total_squares: usize,
}

fn load_world(cli: &Cli) -> Result<RoombaWorld> {
    let text = std::fs::read_to_string(&cli.floor)
        .with_context(|| format!("failed to read floor file {}", cli.floor.display()))?;
    let floor: Floor = text
        .parse()
        .with_context(|| format!("failed to parse floor file {}", cli.floor.display()))?;
    let agent_location = match cli.agent_location.as_slice() {
        [x, y] => RoombaLocation::new(*x, *y),
        other => anyhow::bail!("expected an agent location of two numbers, got {:?}", other),
    };
    RoombaWorld::new(floor, agent_location).context("failed to create roomba world")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    info!("Roomba World Simulator v1.0");

    let world = load_world(&cli)?;
    let total_squares = world.floor().len();

    let mut registry = agent_registry(cli.seed);
    register_coverage_agent(&mut registry, &world);
    let agent = registry
        .build(&cli.agent)
        .with_context(|| format!("Could not load agent '{}'", cli.agent))?;

    let mut simulation = Simulation::new(
        world,
        agent,
        CleanFloorEvaluator::new(),
        SimulationConfig::new(cli.time_steps),
    );
    simulation.run();
    info!("Simulation complete.");

    let report = RoombaReport {
        agent: cli.agent,
        simulation: simulation.report(),
        clean_squares: simulation.environment().floor().count_clean_squares(),
        total_squares,
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            clean_squares = report.clean_squares,
            total_squares = report.total_squares,
            "Agent Score: {}",
            report.simulation.score
        );
    }
    Ok(())
}
