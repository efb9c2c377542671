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

//! Simple problem-solving agent, Figure 3.1 page 67.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::vec;

use intelligent_agents::Agent;
use tracing::{debug, warn};

enum Plan<_Solver, _Action> {
    /// The solver has not been called yet.
    Uninitialized(_Solver),
    Replaying(vec::IntoIter<_Action>),
    Failed,
    Completed,
}

/// An agent that searches once, on its first percept, and then replays the solution one action
/// per step, ignoring what it perceives.
///
/// Once the solution is used up the agent returns `completion_decision` forever. If the solver
/// found no solution it returns `failure_decision` forever instead.
pub struct ProblemSolvingAgent<_Solver, _Action, _Percept> {
    plan: Plan<_Solver, _Action>,
    completion_decision: _Action,
    failure_decision: _Action,
    _percept: PhantomData<fn(&_Percept)>,
}

impl<_Solver, _Action, _Percept> ProblemSolvingAgent<_Solver, _Action, _Percept>
where
    _Solver: FnOnce() -> Option<Vec<_Action>>,
{
    /// Create an agent that calls `solver` lazily, the first time it has to act.
    pub fn new(solver: _Solver, completion_decision: _Action, failure_decision: _Action) -> Self {
        Self {
            plan: Plan::Uninitialized(solver),
            completion_decision,
            failure_decision,
            _percept: PhantomData,
        }
    }

    /// Whether the solver has been called.
    pub fn is_initialized(&self) -> bool {
        !matches!(self.plan, Plan::Uninitialized(_))
    }

    /// Whether the solver was called and found no solution.
    pub fn has_failed(&self) -> bool {
        matches!(self.plan, Plan::Failed)
    }
}

impl<_Solver, _Action, _Percept> Agent for ProblemSolvingAgent<_Solver, _Action, _Percept>
where
    _Solver: FnOnce() -> Option<Vec<_Action>>,
    _Action: Clone,
{
    type Action = _Action;
    type Percept = _Percept;

    fn act(&mut self, _percept: &Self::Percept) -> Self::Action {
        if let Plan::Uninitialized(_) = self.plan {
            self.plan = match std::mem::replace(&mut self.plan, Plan::Failed) {
                Plan::Uninitialized(solver) => match solver() {
                    Some(solution) => {
                        debug!(solution_length = solution.len(), "solver found a solution");
                        Plan::Replaying(solution.into_iter())
                    }
                    None => {
                        warn!("solver found no solution");
                        Plan::Failed
                    }
                },
                plan => plan,
            };
        }

        match &mut self.plan {
            Plan::Replaying(actions) => match actions.next() {
                Some(action) => action,
                None => {
                    self.plan = Plan::Completed;
                    self.completion_decision.clone()
                }
            },
            Plan::Completed => self.completion_decision.clone(),
            Plan::Failed | Plan::Uninitialized(_) => self.failure_decision.clone(),
        }
    }
}

impl<_Solver, _Action, _Percept> Debug for ProblemSolvingAgent<_Solver, _Action, _Percept>
where
    _Action: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = match &self.plan {
            Plan::Uninitialized(_) => "uninitialized",
            Plan::Replaying(_) => "replaying",
            Plan::Failed => "failed",
            Plan::Completed => "completed",
        };
        f.debug_struct("ProblemSolvingAgent")
            .field("plan", &plan)
            .field("completion_decision", &self.completion_decision)
            .field("failure_decision", &self.failure_decision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn agent_for(
        solution: Option<Vec<&'static str>>,
    ) -> ProblemSolvingAgent<impl FnOnce() -> Option<Vec<&'static str>>, &'static str, u8> {
        ProblemSolvingAgent::new(move || solution, "done", "failed")
    }

    #[test]
    fn test_replays_solution_then_completion_decision() {
        let mut agent = agent_for(Some(vec!["left", "right", "suck"]));
        assert!(!agent.is_initialized());
        let decisions: Vec<_> = [0, 7, 255, 7, 0]
            .iter()
            .map(|percept| agent.act(percept))
            .collect();
        assert_eq!(decisions, vec!["left", "right", "suck", "done", "done"]);
        assert!(agent.is_initialized());
        assert!(!agent.has_failed());
    }

    #[test]
    fn test_empty_solution_completes_immediately() {
        let mut agent = agent_for(Some(vec![]));
        assert_eq!(agent.act(&3), "done");
        assert_eq!(agent.act(&4), "done");
    }

    #[test]
    fn test_no_solution_returns_failure_decision_forever() {
        let mut agent = agent_for(None);
        for percept in [0, 1, 128, 255] {
            assert_eq!(agent.act(&percept), "failed");
        }
        assert!(agent.has_failed());
    }

    #[test]
    fn test_solver_is_called_once_and_only_when_acting() {
        let calls = Cell::new(0);
        let mut agent: ProblemSolvingAgent<_, u8, ()> = ProblemSolvingAgent::new(
            || {
                calls.set(calls.get() + 1);
                Some(vec![1, 2])
            },
            0,
            9,
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(agent.act(&()), 1);
        assert_eq!(agent.act(&()), 2);
        assert_eq!(agent.act(&()), 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_debug_shows_plan_stage() {
        let mut agent = agent_for(Some(vec!["a"]));
        assert!(format!("{:?}", agent).contains("uninitialized"));
        agent.act(&0);
        assert!(format!("{:?}", agent).contains("replaying"));
        agent.act(&0);
        assert!(format!("{:?}", agent).contains("completed"));
    }
}
