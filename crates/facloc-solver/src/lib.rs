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

//! Heuristic solver for the capacitated facility location problem.
//!
//! The solver is layered bottom-up: [`state`] holds the mutable
//! assignment network, [`strategy`] picks candidate facilities,
//! [`engine`] turns networks into new networks via feasibility-checked
//! actions, and [`heuristic`] composes the greedy construction and the
//! savings-based improvement loop on top. The convenience entry points
//! [`construct`] and [`improve`] wire the layers together for callers
//! that do not need custom observers.

pub mod engine;
pub mod heuristic;
pub mod state;
pub mod strategy;

use crate::engine::Engine;
use crate::heuristic::{GreedyConstruction, InfeasibleInstanceError, SavingsImprovement, StopReason};
use crate::state::network::Network;
use crate::strategy::StrategyKind;
use facloc_model::prelude::Problem;
use num_traits::Float;

/// Builds an initial complete, feasible network with the greedy
/// construction heuristic.
pub fn construct<T>(
    problem: &Problem<T>,
    strategy: StrategyKind,
) -> Result<Network<'_, T>, InfeasibleInstanceError>
where
    T: Float,
{
    let engine = Engine::new();
    GreedyConstruction::new().build(&engine, problem, &strategy)
}

/// Runs the savings loop on `net` for at most `max_iterations`
/// closures and reports why it stopped.
pub fn improve<'p, T>(
    net: Network<'p, T>,
    strategy: StrategyKind,
    max_iterations: usize,
) -> (Network<'p, T>, StopReason)
where
    T: Float + std::fmt::Display,
{
    let engine = Engine::new();
    SavingsImprovement::new(max_iterations).run(&engine, net, &strategy)
}

pub mod prelude {
    pub use crate::engine::{
        Action, ActionEvent, ActionKind, ActionObserver, ActionRejection, Engine, NoopObserver,
        TracingObserver,
    };
    pub use crate::heuristic::{
        evaluate_savings, GreedyConstruction, InfeasibleInstanceError, SavingsImprovement,
        StopReason,
    };
    pub use crate::state::{Network, NetworkValidator};
    pub use crate::strategy::{MinCost, MinMarginalRank, SelectionStrategy, StrategyKind};
    pub use crate::{construct, improve};
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_model::prelude::{
        Client, ClientContainer, ClientIdentifier, CostMatrix, Facility, FacilityContainer,
        FacilityIdentifier,
    };

    #[inline]
    fn fid(n: usize) -> FacilityIdentifier {
        FacilityIdentifier::new(n)
    }
    #[inline]
    fn cid(n: usize) -> ClientIdentifier {
        ClientIdentifier::new(n)
    }

    fn scenario() -> Problem<f64> {
        let facilities: FacilityContainer<f64> = [
            Facility::new(fid(1), 10.0, 5.0),
            Facility::new(fid(2), 10.0, 8.0),
        ]
        .into_iter()
        .collect();
        let clients: ClientContainer<f64> = [
            Client::new(cid(1), 4.0),
            Client::new(cid(2), 5.0),
            Client::new(cid(3), 3.0),
        ]
        .into_iter()
        .collect();
        let costs = CostMatrix::from_rows(
            vec![cid(1), cid(2), cid(3)],
            vec![fid(1), fid(2)],
            vec![vec![2.0, 3.0], vec![1.0, 6.0], vec![4.0, 1.0]],
        )
        .unwrap();
        Problem::new(facilities, clients, costs).unwrap()
    }

    #[test]
    fn construct_then_improve_end_to_end() {
        let problem = scenario();
        let net = construct(&problem, StrategyKind::MinCost).unwrap();
        assert_eq!(net.total_cost(), 17.0);
        assert!(net.check());

        let (after, reason) = improve(net, StrategyKind::MinCost, 100);
        assert_eq!(reason, StopReason::Exhausted);
        assert_eq!(after.total_cost(), 17.0);
        assert!(after.check());
    }
}
