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

//! Missionaries and cannibals: plan the crossing by search, then carry it out.

use anyhow::{Context, Result};
use clap::Parser;
use graph_search::{Problem, SearchStatistics};
use intelligent_agents::{Environment, Simulation, SimulationConfig, SimulationReport};
use search_agents::missionary_cannibal::{
    crossing_heuristic, search_agent, BoatLoad, CrossingEvaluator, MissionaryCannibalEnvironment,
    MissionaryCannibalProblem, RiverState,
};
use search_agents::{solve, SearchStrategy};
use serde::Serialize;
use tracing::{info, warn, Level};

/// Solve the missionaries and cannibals river crossing.
#[derive(Parser, Debug)]
#[command(name = "missionary-cannibal", version)]
struct Cli {
    /// Frontier to search with: fifo, lifo or a-star.
    #[arg(long, default_value = "fifo")]
    frontier: SearchStrategy,

    /// Number of time steps to simulate. Must cover the plan for the goal to be reached.
    #[arg(long, default_value_t = 20)]
    time_steps: u32,

    /// Print the plan and final report as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct CrossingReport {
    frontier: SearchStrategy,
    plan: Vec<BoatLoad>,
    statistics: SearchStatistics,
    final_state: RiverState,
    #[serde(flatten)]
    simulation: SimulationReport<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let problem = MissionaryCannibalProblem;
    let outcome = solve(&problem, cli.frontier, crossing_heuristic)
        .context("search for a crossing failed")?;
    let plan = outcome
        .path
        .with_context(|| format!("no crossing found with the {} frontier", cli.frontier))?;

    let mut state = problem.initial_state();
    info!(%state, "start");
    for (step, load) in plan.iter().enumerate() {
        state = problem.next_state(&state, load)?;
        info!(step = step + 1, %load, %state, "crossing");
    }

    let mut simulation = Simulation::new(
        MissionaryCannibalEnvironment::new(),
        search_agent(cli.frontier),
        CrossingEvaluator::new(),
        SimulationConfig::new(cli.time_steps),
    );
    simulation.run();
    let final_state = simulation.environment().state();
    if !problem.is_goal(&final_state) {
        warn!(%final_state, "everyone did not make it across in the time allowed");
    }

    let report = CrossingReport {
        frontier: cli.frontier,
        plan,
        statistics: outcome.statistics,
        final_state,
        simulation: simulation.report(),
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            crossings = report.plan.len(),
            expanded = report.statistics.expanded,
            "Agent Score: {}",
            report.simulation.score
        );
    }
    Ok(())
}
