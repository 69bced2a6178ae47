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

use crate::problem::{
    client::{ClientContainer, ClientIdentifier},
    err::{
        NegativeCapacityError, NegativeDemandError, ProblemError, UnknownClientError,
        UnknownFacilityError,
    },
    facility::{FacilityContainer, FacilityIdentifier},
    matrix::{CostMatrix, MarginalCostMatrix, PreferenceTable},
};
use num_traits::Float;

/// Immutable CFLP instance: facilities, clients, the assignment-cost
/// matrix, and the matrices derived from it (marginal costs and the
/// per-facility preference tables). Everything a heuristic needs is
/// computed once here; solver state only ever borrows a `Problem`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem<T> {
    facilities: FacilityContainer<T>,
    clients: ClientContainer<T>,
    costs: CostMatrix<T>,
    marginals: MarginalCostMatrix<T>,
    preferences: PreferenceTable,
}

impl<T: Float> Problem<T> {
    /// Validates that the cost matrix covers exactly the supplied
    /// facilities and clients and that capacities and demands are
    /// non-negative, then derives the marginal-cost matrix and the
    /// preference tables.
    pub fn new(
        facilities: FacilityContainer<T>,
        clients: ClientContainer<T>,
        costs: CostMatrix<T>,
    ) -> Result<Self, ProblemError<T>> {
        for facility in facilities.iter() {
            if facility.capacity() < T::zero() {
                return Err(NegativeCapacityError::new(facility.id(), facility.capacity()).into());
            }
            if !costs.contains_facility(facility.id()) {
                return Err(UnknownFacilityError::new(facility.id()).into());
            }
        }
        for client in clients.iter() {
            if client.demand() < T::zero() {
                return Err(NegativeDemandError::new(client.id(), client.demand()).into());
            }
            if !costs.contains_client(client.id()) {
                return Err(UnknownClientError::new(client.id()).into());
            }
        }
        for &facility in costs.facilities() {
            if !facilities.contains_id(facility) {
                return Err(UnknownFacilityError::new(facility).into());
            }
        }
        for &client in costs.clients() {
            if !clients.contains_id(client) {
                return Err(UnknownClientError::new(client).into());
            }
        }

        let marginals = MarginalCostMatrix::derive(&costs);
        let preferences = PreferenceTable::derive(&marginals);

        Ok(Self {
            facilities,
            clients,
            costs,
            marginals,
            preferences,
        })
    }

    #[inline]
    pub fn facilities(&self) -> &FacilityContainer<T> {
        &self.facilities
    }

    #[inline]
    pub fn clients(&self) -> &ClientContainer<T> {
        &self.clients
    }

    #[inline]
    pub fn costs(&self) -> &CostMatrix<T> {
        &self.costs
    }

    #[inline]
    pub fn marginals(&self) -> &MarginalCostMatrix<T> {
        &self.marginals
    }

    #[inline]
    pub fn preferences(&self) -> &PreferenceTable {
        &self.preferences
    }

    /// Assignment cost of serving `client` from `facility`.
    #[inline]
    pub fn cost(&self, client: ClientIdentifier, facility: FacilityIdentifier) -> T {
        self.costs.cost(client, facility).expect(
            "The cost matrix covers every (client, facility) pair, as Problem::new validated it.",
        )
    }

    /// Demand of `client`.
    #[inline]
    pub fn demand(&self, client: ClientIdentifier) -> T {
        self.clients
            .get(client)
            .expect("The client belongs to this problem, as Problem::new validated the containers.")
            .demand()
    }

    /// Capacity of `facility`.
    #[inline]
    pub fn capacity(&self, facility: FacilityIdentifier) -> T {
        self.facilities
            .get(facility)
            .expect(
                "The facility belongs to this problem, as Problem::new validated the containers.",
            )
            .capacity()
    }

    /// Fixed opening cost of `facility`.
    #[inline]
    pub fn opening_cost(&self, facility: FacilityIdentifier) -> T {
        self.facilities
            .get(facility)
            .expect(
                "The facility belongs to this problem, as Problem::new validated the containers.",
            )
            .opening_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{client::Client, facility::Facility};

    #[inline]
    fn fid(n: usize) -> FacilityIdentifier {
        FacilityIdentifier::new(n)
    }
    #[inline]
    fn cid(n: usize) -> ClientIdentifier {
        ClientIdentifier::new(n)
    }

    fn facilities(entries: &[(usize, f64, f64)]) -> FacilityContainer<f64> {
        entries
            .iter()
            .map(|&(id, cap, cost)| Facility::new(fid(id), cap, cost))
            .collect()
    }

    fn clients(entries: &[(usize, f64)]) -> ClientContainer<f64> {
        entries
            .iter()
            .map(|&(id, demand)| Client::new(cid(id), demand))
            .collect()
    }

    fn scenario() -> Problem<f64> {
        let costs = CostMatrix::from_rows(
            vec![cid(1), cid(2), cid(3)],
            vec![fid(1), fid(2)],
            vec![vec![2.0, 3.0], vec![1.0, 6.0], vec![4.0, 1.0]],
        )
        .unwrap();
        Problem::new(
            facilities(&[(1, 10.0, 5.0), (2, 10.0, 8.0)]),
            clients(&[(1, 4.0), (2, 5.0), (3, 3.0)]),
            costs,
        )
        .unwrap()
    }

    #[test]
    fn new_derives_marginals_and_preferences() {
        let problem = scenario();
        assert_eq!(problem.marginals().marginal(cid(2), fid(1)), Some(5.0));
        assert_eq!(problem.preferences().rank(fid(1), cid(2)), Some(0));
        assert_eq!(problem.cost(cid(3), fid(2)), 1.0);
        assert_eq!(problem.demand(cid(2)), 5.0);
        assert_eq!(problem.capacity(fid(1)), 10.0);
        assert_eq!(problem.opening_cost(fid(2)), 8.0);
    }

    #[test]
    fn new_rejects_negative_capacity() {
        let costs =
            CostMatrix::from_rows(vec![cid(1)], vec![fid(1)], vec![vec![1.0]]).unwrap();
        let err = Problem::new(
            facilities(&[(1, -1.0, 5.0)]),
            clients(&[(1, 1.0)]),
            costs,
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::NegativeCapacity(_)));
    }

    #[test]
    fn new_rejects_negative_demand() {
        let costs =
            CostMatrix::from_rows(vec![cid(1)], vec![fid(1)], vec![vec![1.0]]).unwrap();
        let err = Problem::new(
            facilities(&[(1, 1.0, 5.0)]),
            clients(&[(1, -1.0)]),
            costs,
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::NegativeDemand(_)));
    }

    #[test]
    fn new_rejects_uncovered_client() {
        let costs =
            CostMatrix::from_rows(vec![cid(1)], vec![fid(1)], vec![vec![1.0]]).unwrap();
        let err = Problem::new(
            facilities(&[(1, 1.0, 5.0)]),
            clients(&[(1, 1.0), (2, 1.0)]),
            costs,
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::UnknownClient(_)));
    }

    #[test]
    fn new_rejects_extra_matrix_facility() {
        let costs = CostMatrix::from_rows(
            vec![cid(1)],
            vec![fid(1), fid(2)],
            vec![vec![1.0, 2.0]],
        )
        .unwrap();
        let err = Problem::new(facilities(&[(1, 1.0, 5.0)]), clients(&[(1, 1.0)]), costs)
            .unwrap_err();
        assert!(matches!(err, ProblemError::UnknownFacility(_)));
    }
}

#[cfg(test)]
mod static_assertions {
    use super::*;
    use ::static_assertions::assert_impl_all;

    assert_impl_all!(Problem<f64>: Send, Sync);
}
