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
use crate::heuristic::err::InfeasibleInstanceError;
use crate::state::network::Network;
use crate::strategy::SelectionStrategy;
use facloc_model::prelude::{FacilityIdentifier, Problem};
use num_traits::Float;

/// Greedy construction: places every client, in ascending id order,
/// into the best facility the strategy picks from a per-client shrinking
/// candidate set. Produces a complete, capacity-feasible, single-source
/// network or fails with [`InfeasibleInstanceError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyConstruction;

impl GreedyConstruction {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn build<'p, T, S>(
        &self,
        engine: &Engine<T>,
        problem: &'p Problem<T>,
        strategy: &S,
    ) -> Result<Network<'p, T>, InfeasibleInstanceError>
    where
        T: Float,
        S: SelectionStrategy<T>,
    {
        let mut net = Network::new(problem);
        for client in problem.clients().ids() {
            let mut candidates: Vec<FacilityIdentifier> = problem.facilities().ids().collect();
            loop {
                let chosen = match strategy.select(problem, client, &candidates) {
                    Ok(chosen) => chosen,
                    Err(_) => return Err(InfeasibleInstanceError::new(client)),
                };
                let action = engine.assign(&net, client, chosen);
                if action.is_feasible() {
                    net = action.into_network();
                    break;
                }
                candidates.retain(|&f| f != chosen);
            }
        }
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{MinCost, MinMarginalRank};
    use facloc_model::prelude::{
        Client, ClientContainer, ClientIdentifier, CostMatrix, Facility, FacilityContainer,
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
    fn min_cost_construction_matches_reference_assignment() {
        let problem = scenario();
        let engine = Engine::new();
        let net = GreedyConstruction::new()
            .build(&engine, &problem, &MinCost)
            .unwrap();

        assert_eq!(net.assignment_of(cid(1)), Some(fid(1)));
        assert_eq!(net.assignment_of(cid(2)), Some(fid(1)));
        assert_eq!(net.assignment_of(cid(3)), Some(fid(2)));
        assert_eq!(net.total_cost(), 17.0); // 5 + 8 + 2 + 1 + 1
        assert!(net.check());
        assert!(net.is_cost_consistent());
    }

    #[test]
    fn construction_retries_after_capacity_rejection() {
        // One facility too small for everyone; the overflow client must
        // fall through to the second-best candidate.
        let facilities: FacilityContainer<f64> = [
            Facility::new(fid(1), 9.0, 1.0),
            Facility::new(fid(2), 9.0, 1.0),
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
            vec![vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0, 2.0]],
        )
        .unwrap();
        let problem = Problem::new(facilities, clients, costs).unwrap();

        let engine = Engine::new();
        let net = GreedyConstruction::new()
            .build(&engine, &problem, &MinCost)
            .unwrap();
        assert_eq!(net.assignment_of(cid(1)), Some(fid(1)));
        assert_eq!(net.assignment_of(cid(2)), Some(fid(1)));
        assert_eq!(net.assignment_of(cid(3)), Some(fid(2)));
        assert!(net.check());
    }

    #[test]
    fn construction_fails_on_insufficient_capacity() {
        let facilities: FacilityContainer<f64> =
            [Facility::new(fid(1), 5.0, 1.0)].into_iter().collect();
        let clients: ClientContainer<f64> = [
            Client::new(cid(1), 4.0),
            Client::new(cid(2), 4.0),
        ]
        .into_iter()
        .collect();
        let costs = CostMatrix::from_rows(
            vec![cid(1), cid(2)],
            vec![fid(1)],
            vec![vec![1.0], vec![1.0]],
        )
        .unwrap();
        let problem = Problem::new(facilities, clients, costs).unwrap();

        let engine = Engine::new();
        let err = GreedyConstruction::new()
            .build(&engine, &problem, &MinCost)
            .unwrap_err();
        assert_eq!(err.client(), cid(2));
    }

    #[test]
    fn min_marginal_rank_construction_is_feasible() {
        let problem = scenario();
        let engine = Engine::new();
        let net = GreedyConstruction::new()
            .build(&engine, &problem, &MinMarginalRank)
            .unwrap();
        assert!(net.check());
        assert!(net.is_cost_consistent());
    }
}
