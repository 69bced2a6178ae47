// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::engine::Engine;
use crate::state::network::Network;
use crate::strategy::SelectionStrategy;
use facloc_model::prelude::FacilityIdentifier;
use num_traits::Float;
use std::cmp::Ordering;

/// Why the savings loop stopped. Iteration-limit termination is a
/// normal, reported outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// No open facility admits a feasible closure.
    Exhausted,
    /// The current network failed its invariant check.
    InvariantViolation,
    /// The best feasible closure no longer improves the cost.
    Converged,
    /// The iteration cap was reached with improvements still pending.
    IterationLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "no feasible closure remains"),
            StopReason::InvariantViolation => write!(f, "network invariant check failed"),
            StopReason::Converged => write!(f, "no improving closure remains"),
            StopReason::IterationLimit => write!(f, "iteration limit reached"),
        }
    }
}

/// Speculatively evaluates the closure of every open facility and
/// returns the feasible ones with their cost balances, sorted ascending
/// by balance (largest saving first), ties by facility id. Nothing is
/// committed.
pub fn evaluate_savings<'p, T, S>(
    engine: &Engine<T>,
    net: &Network<'p, T>,
    strategy: &S,
) -> Vec<(FacilityIdentifier, T)>
where
    T: Float,
    S: SelectionStrategy<T>,
{
    let mut savings: Vec<(FacilityIdentifier, T)> = net
        .open_facilities()
        .filter_map(|facility| {
            let action = engine.close_facility(net, facility, strategy);
            action
                .is_feasible()
                .then(|| (facility, action.balance()))
        })
        .collect();
    savings.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    savings
}

/// The savings loop: repeatedly closes the facility whose removal
/// yields the largest cost reduction until no improving closure
/// remains or the iteration cap is hit.
#[derive(Debug, Clone, Copy)]
pub struct SavingsImprovement {
    max_iterations: usize,
}

impl SavingsImprovement {
    #[inline]
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Runs the loop, threading the current network forward by value.
    /// Each committed closure has a strictly negative balance, so the
    /// total cost is strictly decreasing across iterations.
    pub fn run<'p, T, S>(
        &self,
        engine: &Engine<T>,
        mut net: Network<'p, T>,
        strategy: &S,
    ) -> (Network<'p, T>, StopReason)
    where
        T: Float + std::fmt::Display,
        S: SelectionStrategy<T>,
    {
        for iteration in 0..self.max_iterations {
            let savings = evaluate_savings(engine, &net, strategy);
            let Some(&(facility, balance)) = savings.first() else {
                return (net, StopReason::Exhausted);
            };
            if !net.check() {
                return (net, StopReason::InvariantViolation);
            }
            if balance >= T::zero() {
                return (net, StopReason::Converged);
            }
            let action = engine.close_facility(&net, facility, strategy);
            debug_assert!(action.is_feasible());
            net = action.into_network();
            tracing::debug!(
                iteration,
                facility = %facility,
                balance = %balance,
                total_cost = %net.total_cost(),
                "committed facility closure"
            );
        }
        (net, StopReason::IterationLimit)
    }
}
