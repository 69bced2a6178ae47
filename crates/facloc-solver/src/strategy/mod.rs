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

pub mod err;

use crate::strategy::err::NoCandidateError;
use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier, Problem};
use num_traits::Float;

/// Picks one facility for a client out of a restricted candidate set.
/// Pure: no access to network state, only to the immutable problem
/// data. Both implementations break ties by the lowest facility id so
/// that candidate order never influences the result.
pub trait SelectionStrategy<T: Float> {
    fn select(
        &self,
        problem: &Problem<T>,
        client: ClientIdentifier,
        candidates: &[FacilityIdentifier],
    ) -> Result<FacilityIdentifier, NoCandidateError>;
}

/// Chooses the candidate with the lowest direct assignment cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinCost;

impl<T: Float> SelectionStrategy<T> for MinCost {
    fn select(
        &self,
        problem: &Problem<T>,
        client: ClientIdentifier,
        candidates: &[FacilityIdentifier],
    ) -> Result<FacilityIdentifier, NoCandidateError> {
        let mut best: Option<(T, FacilityIdentifier)> = None;
        for &facility in candidates {
            let cost = problem.cost(client, facility);
            let better = match best {
                None => true,
                Some((best_cost, best_facility)) => {
                    cost < best_cost || (cost == best_cost && facility < best_facility)
                }
            };
            if better {
                best = Some((cost, facility));
            }
        }
        best.map(|(_, facility)| facility)
            .ok_or_else(|| NoCandidateError::new(client))
    }
}

/// Chooses the candidate in whose preference list the client ranks
/// best, i.e. the facility for which this client is most distinctively
/// the right customer relative to its alternatives.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMarginalRank;

impl<T: Float> SelectionStrategy<T> for MinMarginalRank {
    fn select(
        &self,
        problem: &Problem<T>,
        client: ClientIdentifier,
        candidates: &[FacilityIdentifier],
    ) -> Result<FacilityIdentifier, NoCandidateError> {
        let mut best: Option<(usize, FacilityIdentifier)> = None;
        for &facility in candidates {
            let rank = problem.preferences().rank(facility, client).expect(
                "Preference tables cover every (facility, client) pair by construction.",
            );
            let better = match best {
                None => true,
                Some((best_rank, best_facility)) => {
                    rank < best_rank || (rank == best_rank && facility < best_facility)
                }
            };
            if better {
                best = Some((rank, facility));
            }
        }
        best.map(|(_, facility)| facility)
            .ok_or_else(|| NoCandidateError::new(client))
    }
}

/// Value-level strategy selector for the crate's invocation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    MinCost,
    MinMarginalRank,
}

impl<T: Float> SelectionStrategy<T> for StrategyKind {
    fn select(
        &self,
        problem: &Problem<T>,
        client: ClientIdentifier,
        candidates: &[FacilityIdentifier],
    ) -> Result<FacilityIdentifier, NoCandidateError> {
        match self {
            StrategyKind::MinCost => MinCost.select(problem, client, candidates),
            StrategyKind::MinMarginalRank => MinMarginalRank.select(problem, client, candidates),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::MinCost => write!(f, "min-cost"),
            StrategyKind::MinMarginalRank => write!(f, "min-marginal-rank"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_model::prelude::{
        Client, ClientContainer, CostMatrix, Facility, FacilityContainer,
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
    fn min_cost_picks_cheapest_candidate() {
        let problem = scenario();
        let candidates = [fid(1), fid(2)];
        assert_eq!(
            MinCost.select(&problem, cid(1), &candidates).unwrap(),
            fid(1)
        );
        assert_eq!(
            MinCost.select(&problem, cid(3), &candidates).unwrap(),
            fid(2)
        );
        // Restricted candidate set.
        assert_eq!(MinCost.select(&problem, cid(3), &[fid(1)]).unwrap(), fid(1));
    }

    #[test]
    fn min_cost_breaks_ties_by_lowest_facility_id() {
        let facilities: FacilityContainer<f64> = [
            Facility::new(fid(1), 10.0, 1.0),
            Facility::new(fid(2), 10.0, 1.0),
        ]
        .into_iter()
        .collect();
        let clients: ClientContainer<f64> = [Client::new(cid(1), 1.0)].into_iter().collect();
        let costs = CostMatrix::from_rows(
            vec![cid(1)],
            vec![fid(1), fid(2)],
            vec![vec![3.0, 3.0]],
        )
        .unwrap();
        let problem = Problem::new(facilities, clients, costs).unwrap();

        // Candidate order must not matter.
        assert_eq!(
            MinCost.select(&problem, cid(1), &[fid(2), fid(1)]).unwrap(),
            fid(1)
        );
    }

    #[test]
    fn min_marginal_rank_prefers_distinctive_facility() {
        let problem = scenario();
        let candidates = [fid(1), fid(2)];
        // C2 tops F1's preference list (marginal 5).
        assert_eq!(
            MinMarginalRank
                .select(&problem, cid(2), &candidates)
                .unwrap(),
            fid(1)
        );
        // C3 tops F2's preference list (marginal 3).
        assert_eq!(
            MinMarginalRank
                .select(&problem, cid(3), &candidates)
                .unwrap(),
            fid(2)
        );
        // C1 ranks second in both lists; the tie goes to F1.
        assert_eq!(
            MinMarginalRank
                .select(&problem, cid(1), &candidates)
                .unwrap(),
            fid(1)
        );
    }

    #[test]
    fn empty_candidate_set_fails() {
        let problem = scenario();
        let err = MinCost.select(&problem, cid(1), &[]).unwrap_err();
        assert_eq!(err.client(), cid(1));
        let err = MinMarginalRank.select(&problem, cid(1), &[]).unwrap_err();
        assert_eq!(err.client(), cid(1));
    }

    #[test]
    fn strategy_kind_delegates() {
        let problem = scenario();
        let candidates = [fid(1), fid(2)];
        assert_eq!(
            StrategyKind::MinCost
                .select(&problem, cid(3), &candidates)
                .unwrap(),
            fid(2)
        );
        assert_eq!(
            StrategyKind::MinMarginalRank
                .select(&problem, cid(2), &candidates)
                .unwrap(),
            fid(1)
        );
    }
}
