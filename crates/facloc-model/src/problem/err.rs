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

use crate::problem::{client::ClientIdentifier, facility::FacilityIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateClientError {
    id: ClientIdentifier,
}

impl DuplicateClientError {
    pub fn new(id: ClientIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ClientIdentifier {
        self.id
    }
}

impl std::fmt::Display for DuplicateClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate client {}", self.id)
    }
}

impl std::error::Error for DuplicateClientError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateFacilityError {
    id: FacilityIdentifier,
}

impl DuplicateFacilityError {
    pub fn new(id: FacilityIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> FacilityIdentifier {
        self.id
    }
}

impl std::fmt::Display for DuplicateFacilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate facility {}", self.id)
    }
}

impl std::error::Error for DuplicateFacilityError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowCountMismatchError {
    expected: usize,
    found: usize,
}

impl RowCountMismatchError {
    pub fn new(expected: usize, found: usize) -> Self {
        Self { expected, found }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn found(&self) -> usize {
        self.found
    }
}

impl std::fmt::Display for RowCountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cost matrix has {} rows but {} clients were supplied",
            self.found, self.expected
        )
    }
}

impl std::error::Error for RowCountMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLengthMismatchError {
    client: ClientIdentifier,
    expected: usize,
    found: usize,
}

impl RowLengthMismatchError {
    pub fn new(client: ClientIdentifier, expected: usize, found: usize) -> Self {
        Self {
            client,
            expected,
            found,
        }
    }

    pub fn client(&self) -> ClientIdentifier {
        self.client
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn found(&self) -> usize {
        self.found
    }
}

impl std::fmt::Display for RowLengthMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cost row for client {} has {} entries but {} facilities were supplied",
            self.client, self.found, self.expected
        )
    }
}

impl std::error::Error for RowLengthMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostMatrixError {
    DuplicateClient(DuplicateClientError),
    DuplicateFacility(DuplicateFacilityError),
    RowCount(RowCountMismatchError),
    RowLength(RowLengthMismatchError),
}

impl std::fmt::Display for CostMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostMatrixError::DuplicateClient(e) => write!(f, "{}", e),
            CostMatrixError::DuplicateFacility(e) => write!(f, "{}", e),
            CostMatrixError::RowCount(e) => write!(f, "{}", e),
            CostMatrixError::RowLength(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CostMatrixError {}

impl From<DuplicateClientError> for CostMatrixError {
    fn from(err: DuplicateClientError) -> Self {
        CostMatrixError::DuplicateClient(err)
    }
}

impl From<DuplicateFacilityError> for CostMatrixError {
    fn from(err: DuplicateFacilityError) -> Self {
        CostMatrixError::DuplicateFacility(err)
    }
}

impl From<RowCountMismatchError> for CostMatrixError {
    fn from(err: RowCountMismatchError) -> Self {
        CostMatrixError::RowCount(err)
    }
}

impl From<RowLengthMismatchError> for CostMatrixError {
    fn from(err: RowLengthMismatchError) -> Self {
        CostMatrixError::RowLength(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownClientError {
    id: ClientIdentifier,
}

impl UnknownClientError {
    pub fn new(id: ClientIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ClientIdentifier {
        self.id
    }
}

impl std::fmt::Display for UnknownClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client {} is not covered by the cost matrix", self.id)
    }
}

impl std::error::Error for UnknownClientError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownFacilityError {
    id: FacilityIdentifier,
}

impl UnknownFacilityError {
    pub fn new(id: FacilityIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> FacilityIdentifier {
        self.id
    }
}

impl std::fmt::Display for UnknownFacilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Facility {} is not covered by the cost matrix", self.id)
    }
}

impl std::error::Error for UnknownFacilityError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeCapacityError<T> {
    id: FacilityIdentifier,
    capacity: T,
}

impl<T: Copy> NegativeCapacityError<T> {
    pub fn new(id: FacilityIdentifier, capacity: T) -> Self {
        Self { id, capacity }
    }

    pub fn id(&self) -> FacilityIdentifier {
        self.id
    }

    pub fn capacity(&self) -> T {
        self.capacity
    }
}

impl<T: std::fmt::Display> std::fmt::Display for NegativeCapacityError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Facility {} has negative capacity {}",
            self.id, self.capacity
        )
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for NegativeCapacityError<T> {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeDemandError<T> {
    id: ClientIdentifier,
    demand: T,
}

impl<T: Copy> NegativeDemandError<T> {
    pub fn new(id: ClientIdentifier, demand: T) -> Self {
        Self { id, demand }
    }

    pub fn id(&self) -> ClientIdentifier {
        self.id
    }

    pub fn demand(&self) -> T {
        self.demand
    }
}

impl<T: std::fmt::Display> std::fmt::Display for NegativeDemandError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client {} has negative demand {}", self.id, self.demand)
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for NegativeDemandError<T> {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProblemError<T> {
    CostMatrix(CostMatrixError),
    UnknownClient(UnknownClientError),
    UnknownFacility(UnknownFacilityError),
    NegativeCapacity(NegativeCapacityError<T>),
    NegativeDemand(NegativeDemandError<T>),
}

impl<T: std::fmt::Display> std::fmt::Display for ProblemError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::CostMatrix(e) => write!(f, "{}", e),
            ProblemError::UnknownClient(e) => write!(f, "{}", e),
            ProblemError::UnknownFacility(e) => write!(f, "{}", e),
            ProblemError::NegativeCapacity(e) => write!(f, "{}", e),
            ProblemError::NegativeDemand(e) => write!(f, "{}", e),
        }
    }
}

impl<T: std::fmt::Debug + std::fmt::Display> std::error::Error for ProblemError<T> {}

impl<T> From<CostMatrixError> for ProblemError<T> {
    fn from(err: CostMatrixError) -> Self {
        ProblemError::CostMatrix(err)
    }
}

impl<T> From<UnknownClientError> for ProblemError<T> {
    fn from(err: UnknownClientError) -> Self {
        ProblemError::UnknownClient(err)
    }
}

impl<T> From<UnknownFacilityError> for ProblemError<T> {
    fn from(err: UnknownFacilityError) -> Self {
        ProblemError::UnknownFacility(err)
    }
}

impl<T> From<NegativeCapacityError<T>> for ProblemError<T> {
    fn from(err: NegativeCapacityError<T>) -> Self {
        ProblemError::NegativeCapacity(err)
    }
}

impl<T> From<NegativeDemandError<T>> for ProblemError<T> {
    fn from(err: NegativeDemandError<T>) -> Self {
        ProblemError::NegativeDemand(err)
    }
}
