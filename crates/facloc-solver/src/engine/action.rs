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

use crate::state::network::Network;
use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier};
use num_traits::Float;

/// Why an attempted transition was rejected. Local, expected conditions
/// that the caller handles by picking a different move; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRejection {
    /// The (client, facility) pair is already assigned.
    AlreadyAssigned {
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    },
    /// The client is already served by another facility.
    SingleSourceViolation {
        client: ClientIdentifier,
        assigned_to: FacilityIdentifier,
    },
    /// Admitting the client would exceed the facility's capacity.
    CapacityExceeded {
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    },
    /// The (client, facility) pair is not currently assigned.
    AlreadyUnassigned {
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    },
    FacilityAlreadyOpen { facility: FacilityIdentifier },
    FacilityAlreadyClosed { facility: FacilityIdentifier },
    /// The close-facility repair exhausted all candidate facilities
    /// before finding a feasible home for `client`.
    CapacityInfeasible {
        facility: FacilityIdentifier,
        client: ClientIdentifier,
    },
}

impl std::fmt::Display for ActionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionRejection::AlreadyAssigned { client, facility } => {
                write!(f, "Client {} is already assigned to facility {}", client, facility)
            }
            ActionRejection::SingleSourceViolation {
                client,
                assigned_to,
            } => write!(
                f,
                "Client {} is already served by facility {}",
                client, assigned_to
            ),
            ActionRejection::CapacityExceeded { client, facility } => write!(
                f,
                "Assigning client {} would exceed the capacity of facility {}",
                client, facility
            ),
            ActionRejection::AlreadyUnassigned { client, facility } => {
                write!(f, "Client {} is not assigned to facility {}", client, facility)
            }
            ActionRejection::FacilityAlreadyOpen { facility } => {
                write!(f, "Facility {} is already open", facility)
            }
            ActionRejection::FacilityAlreadyClosed { facility } => {
                write!(f, "Facility {} is already closed", facility)
            }
            ActionRejection::CapacityInfeasible { facility, client } => write!(
                f,
                "Closing facility {} is infeasible: no remaining candidate can take client {}",
                facility, client
            ),
        }
    }
}

impl std::error::Error for ActionRejection {}

/// One attempted state transition: the untouched pre-state, the
/// post-state (equal to the pre-state when rejected), a feasibility
/// flag and the cost balance `cost(post) - cost(pre)`. Negative balance
/// means improvement. Created per attempt, consumed by the caller,
/// then discarded.
#[derive(Debug, Clone)]
pub struct Action<'p, T: Float> {
    before: Network<'p, T>,
    after: Network<'p, T>,
    feasible: bool,
    balance: T,
    rejection: Option<ActionRejection>,
}

impl<'p, T: Float> Action<'p, T> {
    pub(crate) fn committed(before: Network<'p, T>, after: Network<'p, T>) -> Self {
        let balance = after.total_cost() - before.total_cost();
        Self {
            before,
            after,
            feasible: true,
            balance,
            rejection: None,
        }
    }

    pub(crate) fn rejected(before: Network<'p, T>, rejection: ActionRejection) -> Self {
        let after = before.clone();
        Self {
            before,
            after,
            feasible: false,
            balance: T::zero(),
            rejection: Some(rejection),
        }
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// `cost(post) - cost(pre)`; zero for rejected actions.
    #[inline]
    pub fn balance(&self) -> T {
        self.balance
    }

    #[inline]
    pub fn before(&self) -> &Network<'p, T> {
        &self.before
    }

    #[inline]
    pub fn after(&self) -> &Network<'p, T> {
        &self.after
    }

    #[inline]
    pub fn rejection(&self) -> Option<&ActionRejection> {
        self.rejection.as_ref()
    }

    /// Consumes the action, yielding the post-state.
    #[inline]
    pub fn into_network(self) -> Network<'p, T> {
        self.after
    }
}
