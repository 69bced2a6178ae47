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

use crate::engine::action::ActionRejection;
use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier};
use num_traits::Float;

/// Which transition was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Assign {
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    },
    Unassign {
        client: ClientIdentifier,
        facility: FacilityIdentifier,
    },
    Open { facility: FacilityIdentifier },
    Close { facility: FacilityIdentifier },
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Assign { client, facility } => {
                write!(f, "assign({}, {})", client, facility)
            }
            ActionKind::Unassign { client, facility } => {
                write!(f, "unassign({}, {})", client, facility)
            }
            ActionKind::Open { facility } => write!(f, "open({})", facility),
            ActionKind::Close { facility } => write!(f, "close({})", facility),
        }
    }
}

/// Outcome of one attempted transition, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionEvent<T: Float> {
    Committed { kind: ActionKind, balance: T },
    Rejected {
        kind: ActionKind,
        reason: ActionRejection,
    },
}

/// Hook invoked by the engine after every attempted transition.
/// Observation only; the engine never lets an observer alter the
/// outcome.
pub trait ActionObserver<T: Float> {
    fn on_action(&self, event: &ActionEvent<T>);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T: Float> ActionObserver<T> for NoopObserver {
    #[inline]
    fn on_action(&self, _event: &ActionEvent<T>) {}
}

/// Observer that emits every event through `tracing`: committed
/// transitions at debug, rejections at trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<T: Float + std::fmt::Display> ActionObserver<T> for TracingObserver {
    fn on_action(&self, event: &ActionEvent<T>) {
        match event {
            ActionEvent::Committed { kind, balance } => {
                tracing::debug!(action = %kind, balance = %balance, "action committed");
            }
            ActionEvent::Rejected { kind, reason } => {
                tracing::trace!(action = %kind, reason = %reason, "action rejected");
            }
        }
    }
}
