use crate::{Error, Result};
use faer::{
    Mat,
    prelude::Solve,
    sparse::{SparseColMat, Triplet},
};
use std::collections::HashMap;

/// The assembled MNA system for one Newton iteration: conductance matrix and
/// excitation vector, with ground already eliminated (stamps on the ground
/// row or column are never emitted).
pub struct MnaMatrix {
    pub conductance_matrix: SparseColMat<usize, f64>,
    pub excitation_vector: Mat<f64>,
}

/// Aggregates a list of stamp contributions, summing the values of triplets
/// that target the same cell.
pub fn sum_triplets(triplets: &[Triplet<usize, usize, f64>]) -> Vec<Triplet<usize, usize, f64>> {
    let mut map: HashMap<(usize, usize), f64> = HashMap::new();
    for triplet in triplets {
        *map.entry((triplet.row, triplet.col)).or_default() += triplet.val;
    }
    map.into_iter()
        .map(|((row, col), val)| Triplet { row, col, val })
        .collect()
}

impl MnaMatrix {
    /// Builds the system of the given size from raw (unsummed) conductance
    /// and excitation stamps. Excitation triplets use column 0.
    pub fn from_stamps(
        size: usize,
        conductance_stamps: &[Triplet<usize, usize, f64>],
        excitation_stamps: &[Triplet<usize, usize, f64>],
    ) -> Result<Self> {
        let summed = sum_triplets(conductance_stamps);
        let conductance_matrix =
            SparseColMat::try_new_from_triplets(size, size, &summed).map_err(|_| Error::Build)?;

        let mut excitation_vector = Mat::zeros(size, 1);
        for &Triplet { row, col, val } in excitation_stamps {
            if row >= size || col != 0 {
                return Err(Error::Build);
            }
            excitation_vector[(row, 0)] += val;
        }

        Ok(MnaMatrix {
            conductance_matrix,
            excitation_vector,
        })
    }

    /// Solves `G x = i` by sparse LU with partial pivoting.
    ///
    /// A factorization failure or a non-finite entry in the solution is
    /// reported as [`Error::Singular`].
    pub fn solve(self) -> Result<Vec<f64>> {
        let size = self.conductance_matrix.nrows();
        let lu = self
            .conductance_matrix
            .sp_lu()
            .map_err(|_| Error::Singular)?;
        let x = lu.solve(&self.excitation_vector);

        let solution: Vec<f64> = (0..size).map(|i| x[(i, 0)]).collect();
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(Error::Singular);
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_triplets_merges_cells() {
        let triplets = vec![
            Triplet::new(0, 0, 1.0),
            Triplet::new(0, 0, 2.0),
            Triplet::new(1, 0, -1.0),
        ];
        let summed = sum_triplets(&triplets);
        assert_eq!(summed.len(), 2);
        let diag = summed.iter().find(|t| t.row == 0 && t.col == 0).unwrap();
        assert_eq!(diag.val, 3.0);
    }

    #[test]
    fn test_solve_two_by_two() {
        // [2 1; 1 3] x = [3; 5]  =>  x = [0.8, 1.4]
        let g = vec![
            Triplet::new(0, 0, 2.0),
            Triplet::new(0, 1, 1.0),
            Triplet::new(1, 0, 1.0),
            Triplet::new(1, 1, 3.0),
        ];
        let i = vec![Triplet::new(0, 0, 3.0), Triplet::new(1, 0, 5.0)];
        let x = MnaMatrix::from_stamps(2, &g, &i).unwrap().solve().unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_is_reported() {
        let g = vec![
            Triplet::new(0, 0, 1.0),
            Triplet::new(0, 1, 1.0),
            Triplet::new(1, 0, 1.0),
            Triplet::new(1, 1, 1.0),
        ];
        let i = vec![Triplet::new(0, 0, 1.0)];
        let result = MnaMatrix::from_stamps(2, &g, &i).unwrap().solve();
        assert!(matches!(result, Err(Error::Singular)));
    }

    #[test]
    fn test_out_of_bounds_stamp_is_rejected() {
        let g = vec![Triplet::new(5, 5, 1.0)];
        assert!(MnaMatrix::from_stamps(2, &g, &[]).is_err());
    }
}
