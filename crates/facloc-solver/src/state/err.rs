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

use facloc_model::prelude::{ClientIdentifier, FacilityIdentifier};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncompleteNetworkError {
    missing: Vec<ClientIdentifier>,
}

impl IncompleteNetworkError {
    pub fn new(missing: Vec<ClientIdentifier>) -> Self {
        Self { missing }
    }

    pub fn missing(&self) -> &[ClientIdentifier] {
        &self.missing
    }
}

impl std::fmt::Display for IncompleteNetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} client(s) are unassigned", self.missing.len())
    }
}

impl std::error::Error for IncompleteNetworkError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InconsistentViewsError {
    facility: FacilityIdentifier,
}

impl InconsistentViewsError {
    pub fn new(facility: FacilityIdentifier) -> Self {
        Self { facility }
    }

    pub fn facility(&self) -> FacilityIdentifier {
        self.facility
    }
}

impl std::fmt::Display for InconsistentViewsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Derived views for facility {} disagree with the assignment relation",
            self.facility
        )
    }
}

impl std::error::Error for InconsistentViewsError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityExceededError<T> {
    facility: FacilityIdentifier,
    load: T,
    capacity: T,
}

impl<T: Copy> CapacityExceededError<T> {
    pub fn new(facility: FacilityIdentifier, load: T, capacity: T) -> Self {
        Self {
            facility,
            load,
            capacity,
        }
    }

    pub fn facility(&self) -> FacilityIdentifier {
        self.facility
    }

    pub fn load(&self) -> T {
        self.load
    }

    pub fn capacity(&self) -> T {
        self.capacity
    }
}

impl<T: std::fmt::Display> std::fmt::Display for CapacityExceededError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Facility {} carries load {} over capacity {}",
            self.facility, self.load, self.capacity
        )
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for CapacityExceededError<T> {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostMismatchError<T> {
    stored: T,
    recomputed: T,
}

impl<T: Copy> CostMismatchError<T> {
    pub fn new(stored: T, recomputed: T) -> Self {
        Self { stored, recomputed }
    }

    pub fn stored(&self) -> T {
        self.stored
    }

    pub fn recomputed(&self) -> T {
        self.recomputed
    }
}

impl<T: std::fmt::Display> std::fmt::Display for CostMismatchError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stored total cost {} disagrees with recomputed cost {}",
            self.stored, self.recomputed
        )
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for CostMismatchError<T> {}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkValidationError<T> {
    Incomplete(IncompleteNetworkError),
    InconsistentViews(InconsistentViewsError),
    CapacityExceeded(CapacityExceededError<T>),
    CostMismatch(CostMismatchError<T>),
}

impl<T: std::fmt::Display> std::fmt::Display for NetworkValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkValidationError::Incomplete(e) => write!(f, "{}", e),
            NetworkValidationError::InconsistentViews(e) => write!(f, "{}", e),
            NetworkValidationError::CapacityExceeded(e) => write!(f, "{}", e),
            NetworkValidationError::CostMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for NetworkValidationError<T> {}

impl<T> From<IncompleteNetworkError> for NetworkValidationError<T> {
    fn from(err: IncompleteNetworkError) -> Self {
        NetworkValidationError::Incomplete(err)
    }
}

impl<T> From<InconsistentViewsError> for NetworkValidationError<T> {
    fn from(err: InconsistentViewsError) -> Self {
        NetworkValidationError::InconsistentViews(err)
    }
}

impl<T> From<CapacityExceededError<T>> for NetworkValidationError<T> {
    fn from(err: CapacityExceededError<T>) -> Self {
        NetworkValidationError::CapacityExceeded(err)
    }
}

impl<T> From<CostMismatchError<T>> for NetworkValidationError<T> {
    fn from(err: CostMismatchError<T>) -> Self {
        NetworkValidationError::CostMismatch(err)
    }
}
