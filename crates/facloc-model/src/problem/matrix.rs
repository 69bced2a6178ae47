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
    client::ClientIdentifier,
    err::{
        CostMatrixError, DuplicateClientError, DuplicateFacilityError, RowCountMismatchError,
        RowLengthMismatchError,
    },
    facility::FacilityIdentifier,
};
use num_traits::Float;
use std::collections::BTreeMap;

/// Dense client x facility assignment-cost matrix. Row order is client
/// input order, column order is facility input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<T> {
    clients: Vec<ClientIdentifier>,
    facilities: Vec<FacilityIdentifier>,
    client_index: BTreeMap<ClientIdentifier, usize>,
    facility_index: BTreeMap<FacilityIdentifier, usize>,
    values: Vec<T>,
}

impl<T: Float> CostMatrix<T> {
    pub fn from_rows(
        clients: Vec<ClientIdentifier>,
        facilities: Vec<FacilityIdentifier>,
        rows: Vec<Vec<T>>,
    ) -> Result<Self, CostMatrixError> {
        let mut client_index = BTreeMap::new();
        for (i, &c) in clients.iter().enumerate() {
            if client_index.insert(c, i).is_some() {
                return Err(DuplicateClientError::new(c).into());
            }
        }
        let mut facility_index = BTreeMap::new();
        for (j, &f) in facilities.iter().enumerate() {
            if facility_index.insert(f, j).is_some() {
                return Err(DuplicateFacilityError::new(f).into());
            }
        }
        if rows.len() != clients.len() {
            return Err(RowCountMismatchError::new(clients.len(), rows.len()).into());
        }

        let mut values = Vec::with_capacity(clients.len() * facilities.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != facilities.len() {
                return Err(
                    RowLengthMismatchError::new(clients[i], facilities.len(), row.len()).into(),
                );
            }
            values.extend(row);
        }

        Ok(Self {
            clients,
            facilities,
            client_index,
            facility_index,
            values,
        })
    }

    #[inline]
    pub fn cost(&self, client: ClientIdentifier, facility: FacilityIdentifier) -> Option<T> {
        let i = *self.client_index.get(&client)?;
        let j = *self.facility_index.get(&facility)?;
        Some(self.values[i * self.facilities.len() + j])
    }

    #[inline]
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.facilities.len()
    }

    #[inline]
    pub fn clients(&self) -> &[ClientIdentifier] {
        &self.clients
    }

    #[inline]
    pub fn facilities(&self) -> &[FacilityIdentifier] {
        &self.facilities
    }

    #[inline]
    pub fn contains_client(&self, client: ClientIdentifier) -> bool {
        self.client_index.contains_key(&client)
    }

    #[inline]
    pub fn contains_facility(&self, facility: FacilityIdentifier) -> bool {
        self.facility_index.contains_key(&facility)
    }

    fn row(&self, i: usize) -> &[T] {
        let width = self.facilities.len();
        &self.values[i * width..(i + 1) * width]
    }
}

/// Derived matrix: `marginal(c, f) = min(cost(c, f') for f' != f) - cost(c, f)`.
/// Larger values mean `f` is more distinctively the good option for `c`
/// relative to the client's best alternative. With a single facility the
/// minimum over the empty set is taken as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalCostMatrix<T>(CostMatrix<T>);

impl<T: Float> MarginalCostMatrix<T> {
    pub fn derive(costs: &CostMatrix<T>) -> Self {
        let width = costs.num_facilities();
        let mut values = Vec::with_capacity(costs.num_clients() * width);

        for i in 0..costs.num_clients() {
            let row = costs.row(i);
            // Smallest and second-smallest entry of the row; the best
            // alternative to column j is `min` unless j itself holds it.
            let mut min = T::infinity();
            let mut second = T::infinity();
            let mut min_col = usize::MAX;
            for (j, &c) in row.iter().enumerate() {
                if c < min {
                    second = min;
                    min = c;
                    min_col = j;
                } else if c < second {
                    second = c;
                }
            }
            for (j, &c) in row.iter().enumerate() {
                let best_other = if width == 1 {
                    T::zero()
                } else if j == min_col {
                    second
                } else {
                    min
                };
                values.push(best_other - c);
            }
        }

        Self(CostMatrix {
            clients: costs.clients.clone(),
            facilities: costs.facilities.clone(),
            client_index: costs.client_index.clone(),
            facility_index: costs.facility_index.clone(),
            values,
        })
    }

    #[inline]
    pub fn marginal(&self, client: ClientIdentifier, facility: FacilityIdentifier) -> Option<T> {
        self.0.cost(client, facility)
    }

    #[inline]
    pub fn clients(&self) -> &[ClientIdentifier] {
        self.0.clients()
    }

    #[inline]
    pub fn facilities(&self) -> &[FacilityIdentifier] {
        self.0.facilities()
    }
}

/// Per-facility client preference lists: clients sorted by descending
/// marginal cost (ties by ascending client id), with an O(log n) rank
/// lookup. Positions are zero-based; smaller is better.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceTable {
    lists: BTreeMap<FacilityIdentifier, Vec<ClientIdentifier>>,
    ranks: BTreeMap<FacilityIdentifier, BTreeMap<ClientIdentifier, usize>>,
}

impl PreferenceTable {
    pub fn derive<T: Float>(marginals: &MarginalCostMatrix<T>) -> Self {
        let mut lists = BTreeMap::new();
        let mut ranks = BTreeMap::new();

        for &facility in marginals.facilities() {
            let mut entries: Vec<(ClientIdentifier, T)> = marginals
                .clients()
                .iter()
                .map(|&client| {
                    let m = marginals
                        .marginal(client, facility)
                        .expect("marginal matrix covers every pair by construction");
                    (client, m)
                })
                .collect();

            entries.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });

            let list: Vec<ClientIdentifier> = entries.into_iter().map(|(c, _)| c).collect();
            let rank: BTreeMap<ClientIdentifier, usize> = list
                .iter()
                .enumerate()
                .map(|(pos, &c)| (c, pos))
                .collect();

            lists.insert(facility, list);
            ranks.insert(facility, rank);
        }

        Self { lists, ranks }
    }

    #[inline]
    pub fn list(&self, facility: FacilityIdentifier) -> Option<&[ClientIdentifier]> {
        self.lists.get(&facility).map(|l| l.as_slice())
    }

    #[inline]
    pub fn rank(&self, facility: FacilityIdentifier, client: ClientIdentifier) -> Option<usize> {
        self.ranks.get(&facility)?.get(&client).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn fid(n: usize) -> FacilityIdentifier {
        FacilityIdentifier::new(n)
    }
    #[inline]
    fn cid(n: usize) -> ClientIdentifier {
        ClientIdentifier::new(n)
    }

    fn scenario_matrix() -> CostMatrix<f64> {
        CostMatrix::from_rows(
            vec![cid(1), cid(2), cid(3)],
            vec![fid(1), fid(2)],
            vec![vec![2.0, 3.0], vec![1.0, 6.0], vec![4.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn cost_lookup() {
        let m = scenario_matrix();
        assert_eq!(m.cost(cid(2), fid(1)), Some(1.0));
        assert_eq!(m.cost(cid(3), fid(2)), Some(1.0));
        assert_eq!(m.cost(cid(4), fid(1)), None);
        assert_eq!(m.cost(cid(1), fid(3)), None);
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let err = CostMatrix::<f64>::from_rows(
            vec![cid(1), cid(2)],
            vec![fid(1)],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, CostMatrixError::RowCount(_)));
    }

    #[test]
    fn row_length_mismatch_is_rejected() {
        let err = CostMatrix::<f64>::from_rows(
            vec![cid(1)],
            vec![fid(1), fid(2)],
            vec![vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, CostMatrixError::RowLength(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CostMatrix::<f64>::from_rows(
            vec![cid(1), cid(1)],
            vec![fid(1)],
            vec![vec![1.0], vec![2.0]],
        )
        .unwrap_err();
        assert!(matches!(err, CostMatrixError::DuplicateClient(_)));
    }

    #[test]
    fn marginal_is_gap_to_best_alternative() {
        let marginals = MarginalCostMatrix::derive(&scenario_matrix());
        assert_eq!(marginals.marginal(cid(1), fid(1)), Some(1.0)); // 3 - 2
        assert_eq!(marginals.marginal(cid(1), fid(2)), Some(-1.0)); // 2 - 3
        assert_eq!(marginals.marginal(cid(2), fid(1)), Some(5.0)); // 6 - 1
        assert_eq!(marginals.marginal(cid(2), fid(2)), Some(-5.0)); // 1 - 6
        assert_eq!(marginals.marginal(cid(3), fid(1)), Some(-3.0)); // 1 - 4
        assert_eq!(marginals.marginal(cid(3), fid(2)), Some(3.0)); // 4 - 1
    }

    #[test]
    fn single_facility_marginal_uses_zero_alternative() {
        let costs = CostMatrix::from_rows(vec![cid(1)], vec![fid(1)], vec![vec![4.0]]).unwrap();
        let marginals = MarginalCostMatrix::derive(&costs);
        assert_eq!(marginals.marginal(cid(1), fid(1)), Some(-4.0));
    }

    #[test]
    fn preference_lists_sort_by_descending_marginal() {
        let marginals = MarginalCostMatrix::derive(&scenario_matrix());
        let prefs = PreferenceTable::derive(&marginals);

        // F1 attracts C2 most (marginal 5), then C1 (1), then C3 (-3).
        assert_eq!(prefs.list(fid(1)), Some(&[cid(2), cid(1), cid(3)][..]));
        // F2 attracts C3 most (marginal 3), then C1 (-1), then C2 (-5).
        assert_eq!(prefs.list(fid(2)), Some(&[cid(3), cid(1), cid(2)][..]));

        assert_eq!(prefs.rank(fid(1), cid(2)), Some(0));
        assert_eq!(prefs.rank(fid(2), cid(2)), Some(2));
        assert_eq!(prefs.rank(fid(3), cid(1)), None);
    }

    #[test]
    fn preference_ties_break_by_client_id() {
        // Two clients with identical rows produce identical marginals.
        let costs = CostMatrix::from_rows(
            vec![cid(2), cid(1)],
            vec![fid(1), fid(2)],
            vec![vec![1.0, 2.0], vec![1.0, 2.0]],
        )
        .unwrap();
        let prefs = PreferenceTable::derive(&MarginalCostMatrix::derive(&costs));
        assert_eq!(prefs.list(fid(1)), Some(&[cid(1), cid(2)][..]));
    }
}
