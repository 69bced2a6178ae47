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

use crate::common::{Identifier, IdentifierMarkerName};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacilityIdentifierMarker;

impl IdentifierMarkerName for FacilityIdentifierMarker {
    const NAME: &'static str = "FacilityId";
}

pub type FacilityIdentifier = Identifier<usize, FacilityIdentifierMarker>;

/// A candidate facility site with a service capacity and the fixed cost
/// incurred when it is opened. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facility<T> {
    id: FacilityIdentifier,
    capacity: T,
    opening_cost: T,
}

impl<T: Copy> Facility<T> {
    #[inline]
    pub fn new(id: FacilityIdentifier, capacity: T, opening_cost: T) -> Self {
        Self {
            id,
            capacity,
            opening_cost,
        }
    }

    #[inline]
    pub fn id(&self) -> FacilityIdentifier {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    #[inline]
    pub fn opening_cost(&self) -> T {
        self.opening_cost
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Facility<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Facility({}, capacity: {}, opening cost: {})",
            self.id, self.capacity, self.opening_cost
        )
    }
}

/// Id-keyed facility container with deterministic (id-ordered) iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FacilityContainer<T>(BTreeMap<FacilityIdentifier, Facility<T>>);

impl<T: Copy> FacilityContainer<T> {
    #[inline]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[inline]
    pub fn insert(&mut self, facility: Facility<T>) -> Option<Facility<T>> {
        self.0.insert(facility.id(), facility)
    }

    #[inline]
    pub fn get(&self, id: FacilityIdentifier) -> Option<&Facility<T>> {
        self.0.get(&id)
    }

    #[inline]
    pub fn contains_id(&self, id: FacilityIdentifier) -> bool {
        self.0.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Facility<T>> {
        self.0.values()
    }

    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = FacilityIdentifier> + '_ {
        self.0.keys().copied()
    }
}

impl<T: Copy> FromIterator<Facility<T>> for FacilityContainer<T> {
    fn from_iter<I: IntoIterator<Item = Facility<T>>>(iter: I) -> Self {
        let mut container = Self::new();
        for facility in iter {
            container.insert(facility);
        }
        container
    }
}
