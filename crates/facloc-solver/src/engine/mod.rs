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

pub mod action;
pub mod observer;

pub use action::{Action, ActionRejection};
pub use observer::{ActionEvent, ActionKind, ActionObserver, NoopObserver, TracingObserver};

use crate::state::network::Network;
use crate::strategy::SelectionStrategy;
use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier};
use num_traits::Float;

/// The state-transition engine. Every operation takes a network by
/// reference, works on clones and returns an [`Action`] reporting
/// feasibility and cost balance; the input network is never mutated.
/// An [`ActionObserver`] is notified after every attempt.
pub struct Engine<T: Float> {
    observer: Box<dyn ActionObserver<T> + Send + Sync>,
}

impl<T: Float> Engine<T> {
    /// Engine with a no-op observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            observer: Box::new(NoopObserver),
        }
    }

    #[inline]
    pub fn with_observer(observer: Box<dyn ActionObserver<T> + Send + Sync>) -> Self {
        Self { observer }
    }

    #[inline]
    fn notify(&self, event: ActionEvent<T>) {
        self.observer.on_action(&event);
    }

    /// Attempts to assign `client` to `facility`. Rejected when the pair
    /// already exists, when the client is served elsewhere, or when the
    /// facility cannot absorb the client's demand. On success the new
    /// network gains the pair; an assignment into a closed facility
    /// opens it and charges its fixed cost.
    pub fn assign<'p>(
        &self,
        net: &Network<'p, T>,
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    ) -> Action<'p, T> {
        let kind = ActionKind::Assign { client, facility };
        if let Some(assigned_to) = net.assignment_of(client) {
            let reason = if assigned_to == facility {
                ActionRejection::AlreadyAssigned { client, facility }
            } else {
                ActionRejection::SingleSourceViolation {
                    client,
                    assigned_to,
                }
            };
            self.notify(ActionEvent::Rejected { kind, reason });
            return Action::rejected(net.clone(), reason);
        }
        let problem = net.problem();
        let load = net.aggregate_demand(facility) + problem.demand(client);
        if load > problem.capacity(facility) {
            let reason = ActionRejection::CapacityExceeded { client, facility };
            self.notify(ActionEvent::Rejected { kind, reason });
            return Action::rejected(net.clone(), reason);
        }
        let mut after = net.clone();
        after.insert_assignment(client, facility);
        let action = Action::committed(net.clone(), after);
        self.notify(ActionEvent::Committed {
            kind,
            balance: action.balance(),
        });
        action
    }

    /// Attempts to remove the (client, facility) pair. Rejected when the
    /// pair is not currently assigned. Removing a facility's last client
    /// closes it and releases its fixed cost.
    pub fn unassign<'p>(
        &self,
        net: &Network<'p, T>,
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    ) -> Action<'p, T> {
        let kind = ActionKind::Unassign { client, facility };
        if net.assignment_of(client) != Some(facility) {
            let reason = ActionRejection::AlreadyUnassigned { client, facility };
            self.notify(ActionEvent::Rejected { kind, reason });
            return Action::rejected(net.clone(), reason);
        }
        let mut after = net.clone();
        after.remove_assignment(client, facility);
        let action = Action::committed(net.clone(), after);
        self.notify(ActionEvent::Committed {
            kind,
            balance: action.balance(),
        });
        action
    }

    /// Attempts to open `facility` without assigning any client to it.
    /// Rejected when the facility is already open.
    pub fn open_facility<'p>(
        &self,
        net: &Network<'p, T>,
        facility: FacilityIdentifier,
    ) -> Action<'p, T> {
        let kind = ActionKind::Open { facility };
        if net.is_open(facility) {
            let reason = ActionRejection::FacilityAlreadyOpen { facility };
            self.notify(ActionEvent::Rejected { kind, reason });
            return Action::rejected(net.clone(), reason);
        }
        let mut after = net.clone();
        after.open_facility(facility);
        let action = Action::committed(net.clone(), after);
        self.notify(ActionEvent::Committed {
            kind,
            balance: action.balance(),
        });
        action
    }

    /// Attempts to close `facility`, relocating its clients to the other
    /// open facilities. Rejected when the facility is already closed.
    ///
    /// Each victim client is taken in ascending id order and offered to
    /// the best remaining candidate per `strategy`; a candidate whose
    /// capacity cannot absorb the victim is struck from the candidate
    /// set for the rest of the repair. If the candidates run out before
    /// a victim finds a home, the whole action is rejected with
    /// [`ActionRejection::CapacityInfeasible`] and the pre-state is
    /// returned untouched; a half-closed network is never surfaced.
    pub fn close_facility<'p, S>(
        &self,
        net: &Network<'p, T>,
        facility: FacilityIdentifier,
        strategy: &S,
    ) -> Action<'p, T>
    where
        S: SelectionStrategy<T>,
    {
        let kind = ActionKind::Close { facility };
        if !net.is_open(facility) {
            let reason = ActionRejection::FacilityAlreadyClosed { facility };
            self.notify(ActionEvent::Rejected { kind, reason });
            return Action::rejected(net.clone(), reason);
        }

        let victims: Vec<ClientIdentifier> = net.assigned_to(facility).collect();
        let mut candidates: Vec<FacilityIdentifier> =
            net.open_facilities().filter(|&f| f != facility).collect();

        let mut work = net.clone();
        for &victim in &victims {
            work.remove_assignment(victim, facility);
        }
        // Removing the last victim closes the facility implicitly; a
        // facility without clients still needs the explicit close.
        if work.is_open(facility) {
            work.close_facility(facility);
        }

        let problem = net.problem();
        for &victim in &victims {
            loop {
                let chosen = match strategy.select(problem, victim, &candidates) {
                    Ok(chosen) => chosen,
                    Err(_) => {
                        let reason = ActionRejection::CapacityInfeasible {
                            facility,
                            client: victim,
                        };
                        self.notify(ActionEvent::Rejected { kind, reason });
                        return Action::rejected(net.clone(), reason);
                    }
                };
                let attempt = self.assign(&work, victim, chosen);
                if attempt.is_feasible() {
                    work = attempt.into_network();
                    break;
                }
                candidates.retain(|&f| f != chosen);
            }
        }

        let action = Action::committed(net.clone(), work);
        self.notify(ActionEvent::Committed {
            kind,
            balance: action.balance(),
        });
        action
    }
}

impl<T: Float> Default for Engine<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
