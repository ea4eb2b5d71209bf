use std::time::Instant;

use itertools::Itertools;
use rand::Rng;
use rayon::prelude::*;

use model::base_types::Cost;
use model::config::Config;
use solution::objective::{cost_improves, costs_equal, EvaluatedAssignment};
use solution::Assignment;

/// Progress of the search, emitted once per iteration to the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub iteration: usize,
    pub current_cost: Cost,
    pub best_cost: Cost,
}

/// The stochastic local search: iterated descent over the neighborhood with
/// probability-gated acceptance of worsening steps and stagnation-triggered
/// random perturbation.
///
/// Acceptance rule: every iteration moves to a uniformly random member of
/// the tolerance-tied set of cheapest neighbors; only when the cheapest
/// neighbor is strictly worse than the current assignment is the current
/// assignment kept instead, with the configured probability. Local-best
/// tracking runs on every iteration.
pub struct LocalSearch<'a> {
    config: &'a Config,
    deadline: Option<Instant>,
    observer: Option<&'a mut dyn FnMut(ProgressEvent)>,
}

impl<'a> LocalSearch<'a> {
    pub fn initialize(
        config: &'a Config,
        deadline: Option<Instant>,
        observer: Option<&'a mut dyn FnMut(ProgressEvent)>,
    ) -> LocalSearch<'a> {
        LocalSearch {
            config,
            deadline,
            observer,
        }
    }

    /// Runs the search from the given start assignment. Returns the best
    /// assignment seen and the number of iterations performed.
    ///
    /// The search never fails: reaching the iteration budget, the global
    /// stagnation bound or the deadline just ends it, and the best
    /// assignment found so far is returned (possibly the start assignment).
    pub fn solve<R: Rng + ?Sized>(
        mut self,
        start: Assignment,
        rng: &mut R,
    ) -> (EvaluatedAssignment, usize) {
        let mut current = EvaluatedAssignment::evaluate(start);
        let mut best = current.clone();
        let mut local_best_cost = current.cost();
        let mut global_stagnation = 0;
        let mut local_stagnation = 0;
        let mut iteration = 0;

        while iteration < self.config.max_iterations
            && global_stagnation < self.config.max_global_stagnation
        {
            if self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                break;
            }

            if local_stagnation >= self.config.max_local_stagnation {
                // trapped in a local optimum: take cost-blind random steps,
                // then restart the local tracking from wherever we landed
                for _ in 0..self.config.perturbation_steps {
                    let mut neighbors = current.assignment().neighborhood(rng);
                    if neighbors.is_empty() {
                        break;
                    }
                    let pick = rng.random_range(0..neighbors.len());
                    current = EvaluatedAssignment::evaluate(neighbors.swap_remove(pick));
                }
                local_best_cost = current.cost();
                local_stagnation = 0;
            } else {
                let neighbors = current.assignment().neighborhood(rng);
                if neighbors.is_empty() {
                    // no structural move exists; the search cannot leave this
                    // assignment, so stop here
                    break;
                }

                // scoring the candidates is pure and independent, only the
                // selection below draws from the random stream
                let mut evaluated: Vec<EvaluatedAssignment> = neighbors
                    .into_par_iter()
                    .map(EvaluatedAssignment::evaluate)
                    .collect();

                let cheapest = evaluated
                    .iter()
                    .map(EvaluatedAssignment::cost)
                    .fold(f64::INFINITY, f64::min);
                let tied: Vec<usize> = evaluated
                    .iter()
                    .positions(|candidate| costs_equal(candidate.cost(), cheapest))
                    .collect();

                let keep_current = cost_improves(current.cost(), cheapest)
                    && rng.random_range(0.0..1.0) < self.config.acceptance_probability;
                if !keep_current {
                    let pick = tied[rng.random_range(0..tied.len())];
                    current = evaluated.swap_remove(pick);
                }
            }

            if cost_improves(current.cost(), local_best_cost) {
                local_best_cost = current.cost();
                local_stagnation = 0;
            } else {
                local_stagnation += 1;
            }

            if cost_improves(current.cost(), best.cost()) {
                best = current.clone();
                global_stagnation = 0;
            } else {
                global_stagnation += 1;
            }

            if let Some(observer) = self.observer.as_mut() {
                observer(ProgressEvent {
                    iteration,
                    current_cost: current.cost(),
                    best_cost: best.cost(),
                });
            }

            iteration += 1;
        }

        (best, iteration)
    }
}
