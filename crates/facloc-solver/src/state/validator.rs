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

use crate::state::{
    err::{
        CapacityExceededError, CostMismatchError, IncompleteNetworkError, InconsistentViewsError,
        NetworkValidationError,
    },
    network::Network,
};
use facloc_model::prelude::ClientIdentifier;
use num_traits::Float;

/// Strict invariant checking for networks. Violations are reported as
/// structured errors; a network is never "repaired" as a side effect of
/// being inspected.
#[derive(Debug, Clone)]
pub struct NetworkValidator;

impl NetworkValidator {
    pub fn validate_complete<T: Float>(
        network: &Network<'_, T>,
    ) -> Result<(), IncompleteNetworkError> {
        let missing: Vec<ClientIdentifier> = network
            .problem()
            .clients()
            .ids()
            .filter(|&c| network.assignment_of(c).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IncompleteNetworkError::new(missing))
        }
    }

    pub fn validate_views<T: Float>(
        network: &Network<'_, T>,
    ) -> Result<(), InconsistentViewsError> {
        match network.first_inconsistent_facility() {
            Some(facility) => Err(InconsistentViewsError::new(facility)),
            None => Ok(()),
        }
    }

    pub fn validate_capacity<T: Float>(
        network: &Network<'_, T>,
    ) -> Result<(), CapacityExceededError<T>> {
        for facility in network.open_facilities() {
            let load = network.aggregate_demand(facility);
            let capacity = network.problem().capacity(facility);
            if load > capacity {
                return Err(CapacityExceededError::new(facility, load, capacity));
            }
        }
        Ok(())
    }

    pub fn validate_cost<T: Float>(network: &Network<'_, T>) -> Result<(), CostMismatchError<T>> {
        if network.is_cost_consistent() {
            Ok(())
        } else {
            Err(CostMismatchError::new(
                network.total_cost(),
                network.recompute_cost(),
            ))
        }
    }

    /// All invariants at once; the first violation wins.
    pub fn validate<T: Float>(
        network: &Network<'_, T>,
    ) -> Result<(), NetworkValidationError<T>> {
        Self::validate_complete(network)?;
        Self::validate_views(network)?;
        Self::validate_capacity(network)?;
        Self::validate_cost(network)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_model::prelude::{
        Client, ClientContainer, ClientIdentifier, CostMatrix, Facility, FacilityContainer,
        FacilityIdentifier, Problem,
    };

    #[inline]
    fn fid(n: usize) -> FacilityIdentifier {
        FacilityIdentifier::new(n)
    }
    #[inline]
    fn cid(n: usize) -> ClientIdentifier {
        ClientIdentifier::new(n)
    }

    fn two_facility_problem() -> Problem<f64> {
        let facilities: FacilityContainer<f64> = [
            Facility::new(fid(1), 10.0, 5.0),
            Facility::new(fid(2), 4.0, 8.0),
        ]
        .into_iter()
        .collect();
        let clients: ClientContainer<f64> =
            [Client::new(cid(1), 4.0), Client::new(cid(2), 5.0)]
                .into_iter()
                .collect();
        let costs = CostMatrix::from_rows(
            vec![cid(1), cid(2)],
            vec![fid(1), fid(2)],
            vec![vec![2.0, 3.0], vec![1.0, 6.0]],
        )
        .unwrap();
        Problem::new(facilities, clients, costs).unwrap()
    }

    #[test]
    fn validate_reports_missing_clients() {
        let problem = two_facility_problem();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));

        let err = NetworkValidator::validate(&net).unwrap_err();
        match err {
            NetworkValidationError::Incomplete(e) => assert_eq!(e.missing(), &[cid(2)]),
            other => panic!("expected Incomplete, got {other:?}"),
        }
    }

    #[test]
    fn validate_reports_capacity_violation() {
        let problem = two_facility_problem();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(2)); // load 4 of 4
        net.insert_assignment(cid(2), fid(2)); // load 9 of 4

        let err = NetworkValidator::validate(&net).unwrap_err();
        match err {
            NetworkValidationError::CapacityExceeded(e) => {
                assert_eq!(e.facility(), fid(2));
                assert_eq!(e.load(), 9.0);
                assert_eq!(e.capacity(), 4.0);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_consistent_network() {
        let problem = two_facility_problem();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));
        net.insert_assignment(cid(2), fid(1));
        NetworkValidator::validate(&net).unwrap();
    }
}
