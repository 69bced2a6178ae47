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

use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier, Problem};
use num_traits::Float;
use std::collections::{BTreeMap, BTreeSet};

/// A candidate solution: the mutable assignment state threaded through
/// the action engine. The assignment relation (client to facility) is
/// the primary state; the open-facility set, per-facility served sets,
/// aggregate loads and the running total cost are kept in sync
/// incrementally by the crate-internal mutators. Actions always operate
/// on clones, so a `Network` held by a caller is never mutated behind
/// its back.
#[derive(Debug, Clone)]
pub struct Network<'p, T: Float> {
    problem: &'p Problem<T>,
    assignments: BTreeMap<ClientIdentifier, FacilityIdentifier>,
    served: BTreeMap<FacilityIdentifier, BTreeSet<ClientIdentifier>>,
    open: BTreeSet<FacilityIdentifier>,
    loads: BTreeMap<FacilityIdentifier, T>,
    total_cost: T,
}

impl<'p, T: Float> Network<'p, T> {
    /// The empty network: no assignments, every facility closed.
    #[inline]
    pub fn new(problem: &'p Problem<T>) -> Self {
        Self {
            problem,
            assignments: BTreeMap::new(),
            served: BTreeMap::new(),
            open: BTreeSet::new(),
            loads: BTreeMap::new(),
            total_cost: T::zero(),
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem<T> {
        self.problem
    }

    #[inline]
    pub fn open_facilities(&self) -> impl Iterator<Item = FacilityIdentifier> + '_ {
        self.open.iter().copied()
    }

    #[inline]
    pub fn is_open(&self, facility: FacilityIdentifier) -> bool {
        self.open.contains(&facility)
    }

    #[inline]
    pub fn assigned_clients(&self) -> impl Iterator<Item = ClientIdentifier> + '_ {
        self.assignments.keys().copied()
    }

    #[inline]
    pub fn assignment_of(&self, client: ClientIdentifier) -> Option<FacilityIdentifier> {
        self.assignments.get(&client).copied()
    }

    /// Clients assigned to `facility`, in ascending client-id order.
    #[inline]
    pub fn assigned_to(
        &self,
        facility: FacilityIdentifier,
    ) -> impl Iterator<Item = ClientIdentifier> + '_ {
        self.served
            .get(&facility)
            .into_iter()
            .flat_map(|clients| clients.iter().copied())
    }

    #[inline]
    pub fn iter_assignments(
        &self,
    ) -> impl Iterator<Item = (ClientIdentifier, FacilityIdentifier)> + '_ {
        self.assignments.iter().map(|(&c, &f)| (c, f))
    }

    #[inline]
    pub fn num_assignments(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn num_open_facilities(&self) -> usize {
        self.open.len()
    }

    /// Sum of the demands of the clients assigned to `facility`.
    #[inline]
    pub fn aggregate_demand(&self, facility: FacilityIdentifier) -> T {
        self.loads.get(&facility).copied().unwrap_or_else(T::zero)
    }

    /// Running total cost, maintained incrementally by the mutators.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Recomputes the total cost from scratch: fixed costs of the open
    /// facilities plus the cost of every assignment. Used by the cost
    /// consistency check; O(assignments).
    pub fn recompute_cost(&self) -> T {
        let fixed = self
            .open
            .iter()
            .fold(T::zero(), |acc, &f| acc + self.problem.opening_cost(f));
        let variable = self
            .assignments
            .iter()
            .fold(T::zero(), |acc, (&c, &f)| acc + self.problem.cost(c, f));
        fixed + variable
    }

    /// Every client of the problem appears in the assignment relation.
    pub fn is_complete(&self) -> bool {
        self.problem
            .clients()
            .ids()
            .all(|c| self.assignments.contains_key(&c))
    }

    /// The derived views agree with the assignment relation: the served
    /// sets partition exactly the assigned clients and every serving
    /// facility is open. Derived state is checked, never resynchronized
    /// on the fly.
    pub fn is_single_source_valid(&self) -> bool {
        let mut seen = 0usize;
        for (&facility, clients) in &self.served {
            if !self.open.contains(&facility) {
                return false;
            }
            for &client in clients {
                if self.assignments.get(&client) != Some(&facility) {
                    return false;
                }
                seen += 1;
            }
        }
        seen == self.assignments.len()
    }

    /// No open facility's aggregate demand exceeds its capacity.
    pub fn is_capacity_feasible(&self) -> bool {
        self.open
            .iter()
            .all(|&f| self.aggregate_demand(f) <= self.problem.capacity(f))
    }

    /// The running total cost matches a recomputation within floating
    /// point tolerance.
    pub fn is_cost_consistent(&self) -> bool {
        let recomputed = self.recompute_cost();
        let tolerance = T::epsilon().sqrt() * (T::one() + recomputed.abs());
        (self.total_cost - recomputed).abs() <= tolerance
    }

    /// Conjunction of completeness, single-source validity and capacity
    /// feasibility.
    pub fn check(&self) -> bool {
        self.is_complete() && self.is_single_source_valid() && self.is_capacity_feasible()
    }

    /// Adds the (client, facility) pair, opening the facility if it was
    /// closed. Callers validate beforehand; this only maintains state.
    pub(crate) fn insert_assignment(
        &mut self,
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    ) {
        debug_assert!(!self.assignments.contains_key(&client));
        if self.open.insert(facility) {
            self.total_cost = self.total_cost + self.problem.opening_cost(facility);
        }
        self.assignments.insert(client, facility);
        self.served.entry(facility).or_default().insert(client);
        let load = self.aggregate_demand(facility) + self.problem.demand(client);
        self.loads.insert(facility, load);
        self.total_cost = self.total_cost + self.problem.cost(client, facility);
    }

    /// Removes the (client, facility) pair. Removing the last client of
    /// a facility closes it and releases its fixed cost.
    pub(crate) fn remove_assignment(
        &mut self,
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    ) {
        debug_assert_eq!(self.assignments.get(&client), Some(&facility));
        self.assignments.remove(&client);
        let empty = match self.served.get_mut(&facility) {
            Some(clients) => {
                clients.remove(&client);
                clients.is_empty()
            }
            None => true,
        };
        self.total_cost = self.total_cost - self.problem.cost(client, facility);
        if empty {
            self.served.remove(&facility);
            self.loads.remove(&facility);
            self.open.remove(&facility);
            self.total_cost = self.total_cost - self.problem.opening_cost(facility);
        } else {
            let load = self.aggregate_demand(facility) - self.problem.demand(client);
            self.loads.insert(facility, load);
        }
    }

    /// Opens `facility` without assigning anyone to it.
    pub(crate) fn open_facility(&mut self, facility: FacilityIdentifier) {
        debug_assert!(!self.open.contains(&facility));
        self.open.insert(facility);
        self.total_cost = self.total_cost + self.problem.opening_cost(facility);
    }

    /// Closes `facility`; only valid once it serves no clients.
    pub(crate) fn close_facility(&mut self, facility: FacilityIdentifier) {
        debug_assert!(self.assigned_to(facility).next().is_none());
        if self.open.remove(&facility) {
            self.total_cost = self.total_cost - self.problem.opening_cost(facility);
        }
    }

    /// First facility whose derived views disagree with the assignment
    /// relation, if any. Used by the validator to report a culprit.
    pub(crate) fn first_inconsistent_facility(&self) -> Option<FacilityIdentifier> {
        for (&facility, clients) in &self.served {
            if !self.open.contains(&facility) {
                return Some(facility);
            }
            for &client in clients {
                if self.assignments.get(&client) != Some(&facility) {
                    return Some(facility);
                }
            }
        }
        let counted: usize = self.served.values().map(|s| s.len()).sum();
        if counted != self.assignments.len() {
            for (&client, &facility) in &self.assignments {
                match self.served.get(&facility) {
                    Some(clients) if clients.contains(&client) => {}
                    _ => return Some(facility),
                }
            }
        }
        None
    }

    /// Structural equality: same assignment relation and open set.
    pub fn same_assignment(&self, other: &Self) -> bool {
        self.assignments == other.assignments && self.open == other.open
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
    fn empty_network_has_zero_cost_and_is_incomplete() {
        let problem = scenario();
        let net = Network::new(&problem);
        assert_eq!(net.total_cost(), 0.0);
        assert_eq!(net.num_assignments(), 0);
        assert_eq!(net.num_open_facilities(), 0);
        assert!(!net.is_complete());
        assert!(net.is_single_source_valid());
        assert!(net.is_capacity_feasible());
        assert!(net.is_cost_consistent());
    }

    #[test]
    fn insert_opens_facility_and_tracks_cost() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));
        assert!(net.is_open(fid(1)));
        assert_eq!(net.total_cost(), 7.0); // 5 fixed + 2 assignment
        assert_eq!(net.aggregate_demand(fid(1)), 4.0);

        net.insert_assignment(cid(2), fid(1));
        assert_eq!(net.total_cost(), 8.0); // fixed cost charged once
        assert_eq!(net.aggregate_demand(fid(1)), 9.0);
        assert!(net.is_cost_consistent());
    }

    #[test]
    fn removing_last_client_closes_facility() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));
        net.insert_assignment(cid(3), fid(2));

        net.remove_assignment(cid(3), fid(2));
        assert!(!net.is_open(fid(2)));
        assert_eq!(net.aggregate_demand(fid(2)), 0.0);
        assert_eq!(net.total_cost(), 7.0);
        assert!(net.is_cost_consistent());
    }

    #[test]
    fn open_and_close_without_clients() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        net.open_facility(fid(2));
        assert!(net.is_open(fid(2)));
        assert_eq!(net.total_cost(), 8.0);

        net.close_facility(fid(2));
        assert!(!net.is_open(fid(2)));
        assert_eq!(net.total_cost(), 0.0);
    }

    #[test]
    fn capacity_predicate_detects_overload() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        // The mutators do not police capacity; that is the engine's job.
        net.insert_assignment(cid(1), fid(2));
        net.insert_assignment(cid(2), fid(2));
        net.insert_assignment(cid(3), fid(2));
        assert_eq!(net.aggregate_demand(fid(2)), 12.0);
        assert!(!net.is_capacity_feasible());
        assert!(net.is_complete());
    }

    #[test]
    fn cost_consistency_detects_drift() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));
        assert!(net.is_cost_consistent());
        net.total_cost = net.total_cost + 1.0;
        assert!(!net.is_cost_consistent());
    }

    #[test]
    fn single_source_check_detects_mismatched_views() {
        let problem = scenario();
        let mut net = Network::new(&problem);
        net.insert_assignment(cid(1), fid(1));
        assert!(net.is_single_source_valid());

        // Corrupt a derived view; the predicate reports it instead of
        // repairing it.
        net.served.entry(fid(1)).or_default().insert(cid(2));
        assert!(!net.is_single_source_valid());
    }
}

#[cfg(test)]
mod static_assertions {
    use super::*;
    use ::static_assertions::assert_impl_all;

    assert_impl_all!(Network<'static, f64>: Send, Sync);
}
