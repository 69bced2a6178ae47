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
pub struct ClientIdentifierMarker;

impl IdentifierMarkerName for ClientIdentifierMarker {
    const NAME: &'static str = "ClientId";
}

pub type ClientIdentifier = Identifier<usize, ClientIdentifierMarker>;

/// A demand point that must be served by exactly one open facility.
/// Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Client<T> {
    id: ClientIdentifier,
    demand: T,
}

impl<T: Copy> Client<T> {
    #[inline]
    pub fn new(id: ClientIdentifier, demand: T) -> Self {
        Self { id, demand }
    }

    #[inline]
    pub fn id(&self) -> ClientIdentifier {
        self.id
    }

    #[inline]
    pub fn demand(&self) -> T {
        self.demand
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client({}, demand: {})", self.id, self.demand)
    }
}

/// Id-keyed client container with deterministic (id-ordered) iteration.
/// Instance importers number clients in input order, so id order doubles
/// as input order for the construction heuristic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientContainer<T>(BTreeMap<ClientIdentifier, Client<T>>);

impl<T: Copy> ClientContainer<T> {
    #[inline]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[inline]
    pub fn insert(&mut self, client: Client<T>) -> Option<Client<T>> {
        self.0.insert(client.id(), client)
    }

    #[inline]
    pub fn get(&self, id: ClientIdentifier) -> Option<&Client<T>> {
        self.0.get(&id)
    }

    #[inline]
    pub fn contains_id(&self, id: ClientIdentifier) -> bool {
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
    pub fn iter(&self) -> impl Iterator<Item = &Client<T>> {
        self.0.values()
    }

    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = ClientIdentifier> + '_ {
        self.0.keys().copied()
    }
}

impl<T: Copy> FromIterator<Client<T>> for ClientContainer<T> {
    fn from_iter<I: IntoIterator<Item = Client<T>>>(iter: I) -> Self {
        let mut container = Self::new();
        for client in iter {
            container.insert(client);
        }
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn cid(n: usize) -> ClientIdentifier {
        ClientIdentifier::new(n)
    }

    #[test]
    fn container_iterates_in_id_order() {
        let container: ClientContainer<f64> = [
            Client::new(cid(2), 5.0),
            Client::new(cid(1), 4.0),
            Client::new(cid(3), 3.0),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = container.ids().map(|id| id.into_inner()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let demands: Vec<_> = container.iter().map(|c| c.demand()).collect();
        assert_eq!(demands, vec![4.0, 5.0, 3.0]);
    }
}
