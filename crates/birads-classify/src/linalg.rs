//! Small dense linear algebra on fixed-size arrays
//!
//! Everything here works on `[f64; N]` vectors and `[[f64; N]; N]` matrices
//! with `N` known at compile time, so no allocation happens per sample.

/// A square matrix stored row-major
pub type Matrix<const N: usize> = [[f64; N]; N];

/// The identity matrix
pub fn identity<const N: usize>() -> Matrix<N> {
    let mut m = [[0.0; N]; N];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

/// Arithmetic mean of each component. Returns zeros for no samples.
pub fn mean<const N: usize>(samples: &[[f64; N]]) -> [f64; N] {
    let mut mean = [0.0; N];
    if samples.is_empty() {
        return mean;
    }
    for row in samples {
        for (m, &v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    let n = samples.len() as f64;
    for m in &mut mean {
        *m /= n;
    }
    mean
}

/// Sample covariance around `mean`, normalized by `n - 1`.
///
/// Returns zeros for fewer than two samples.
pub fn covariance<const N: usize>(samples: &[[f64; N]], mean: &[f64; N]) -> Matrix<N> {
    let mut cov = [[0.0; N]; N];
    if samples.len() < 2 {
        return cov;
    }
    for row in samples {
        let mut diff = [0.0; N];
        for i in 0..N {
            diff[i] = row[i] - mean[i];
        }
        for i in 0..N {
            for j in i..N {
                cov[i][j] += diff[i] * diff[j];
            }
        }
    }
    let denom = (samples.len() - 1) as f64;
    for i in 0..N {
        for j in i..N {
            cov[i][j] /= denom;
            cov[j][i] = cov[i][j];
        }
    }
    cov
}

/// Add `ridge` to every diagonal entry.
pub fn add_ridge<const N: usize>(m: &mut Matrix<N>, ridge: f64) {
    for (i, row) in m.iter_mut().enumerate() {
        row[i] += ridge;
    }
}

/// `vᵀ · m · v`
#[inline]
pub fn quadratic_form<const N: usize>(m: &Matrix<N>, v: &[f64; N]) -> f64 {
    let mut sum = 0.0;
    for i in 0..N {
        let mut row = 0.0;
        for j in 0..N {
            row += m[i][j] * v[j];
        }
        sum += v[i] * row;
    }
    sum
}

/// Matrix product `a · b`
pub fn multiply<const N: usize>(a: &Matrix<N>, b: &Matrix<N>) -> Matrix<N> {
    let mut out = [[0.0; N]; N];
    for i in 0..N {
        for k in 0..N {
            let aik = a[i][k];
            if aik == 0.0 {
                continue;
            }
            for j in 0..N {
                out[i][j] += aik * b[k][j];
            }
        }
    }
    out
}

/// Invert a general matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `None` when a pivot falls below `ε · N · max|m|`, i.e. the matrix
/// is singular to working precision.
pub fn invert<const N: usize>(m: &Matrix<N>) -> Option<Matrix<N>> {
    let max_abs = m
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |acc, &v| acc.max(v.abs()));
    if max_abs == 0.0 || !max_abs.is_finite() {
        return None;
    }
    let tolerance = f64::EPSILON * N as f64 * max_abs;

    let mut a = *m;
    let mut inv = identity::<N>();
    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() <= tolerance {
            return None;
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for j in 0..N {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }
        for r in 0..N {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..N {
                a[r][j] -= factor * a[col][j];
                inv[r][j] -= factor * inv[col][j];
            }
        }
    }
    Some(inv)
}

/// Invert a covariance matrix.
///
/// The matrix is first scaled to unit diagonal so the singularity test does
/// not depend on the units of each feature. A non-positive diagonal entry
/// (a feature with no variance) makes the matrix singular.
pub fn invert_covariance<const N: usize>(cov: &Matrix<N>) -> Option<Matrix<N>> {
    let mut scale = [0.0; N];
    for i in 0..N {
        let d = cov[i][i];
        if d <= 0.0 || !d.is_finite() {
            return None;
        }
        scale[i] = 1.0 / d.sqrt();
    }

    let mut corr = [[0.0; N]; N];
    for i in 0..N {
        for j in 0..N {
            corr[i][j] = cov[i][j] * scale[i] * scale[j];
        }
    }
    let mut inv = invert(&corr)?;
    for i in 0..N {
        for j in 0..N {
            inv[i][j] *= scale[i] * scale[j];
        }
    }
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close<const N: usize>(a: &Matrix<N>, b: &Matrix<N>, tol: f64) {
        for i in 0..N {
            for j in 0..N {
                assert!(
                    (a[i][j] - b[i][j]).abs() < tol,
                    "[{i}][{j}]: {} vs {}",
                    a[i][j],
                    b[i][j]
                );
            }
        }
    }

    #[test]
    fn test_mean_and_covariance() {
        let samples = [[1.0, 2.0], [3.0, 6.0], [5.0, 10.0]];
        let m = mean(&samples);
        assert_eq!(m, [3.0, 6.0]);
        let c = covariance(&samples, &m);
        // var(x) = 4, var(y) = 16, cov = 8
        assert_close(&c, &[[4.0, 8.0], [8.0, 16.0]], 1e-12);
    }

    #[test]
    fn test_covariance_too_few_samples() {
        let samples = [[1.0, 2.0]];
        assert_eq!(covariance(&samples, &mean(&samples)), [[0.0; 2]; 2]);
    }

    #[test]
    fn test_invert_roundtrip() {
        let m = [[4.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 2.0]];
        let inv = invert(&m).unwrap();
        assert_close(&multiply(&m, &inv), &identity(), 1e-12);
    }

    #[test]
    fn test_invert_needs_pivoting() {
        let m = [[0.0, 1.0], [1.0, 0.0]];
        let inv = invert(&m).unwrap();
        assert_close(&inv, &m, 1e-15);
    }

    #[test]
    fn test_invert_singular() {
        assert!(invert(&[[1.0, 2.0], [2.0, 4.0]]).is_none());
        assert!(invert(&[[0.0; 3]; 3]).is_none());
    }

    #[test]
    fn test_invert_covariance_mixed_scales() {
        let cov = [[1.0e6, 5.0], [5.0, 1.0e-4]];
        let inv = invert_covariance(&cov).unwrap();
        assert_close(&multiply(&cov, &inv), &identity(), 1e-9);
    }

    #[test]
    fn test_invert_covariance_zero_variance() {
        let cov = [[1.0, 0.0], [0.0, 0.0]];
        assert!(invert_covariance(&cov).is_none());
    }

    #[test]
    fn test_collinear_samples_singular() {
        let samples = [[1.0, 1.0], [2.0, 2.0], [4.0, 4.0], [7.0, 7.0]];
        let cov = covariance(&samples, &mean(&samples));
        assert!(invert_covariance(&cov).is_none());
    }

    #[test]
    fn test_quadratic_form() {
        let m = [[2.0, 0.0], [0.0, 3.0]];
        assert_eq!(quadratic_form(&m, &[1.0, 2.0]), 14.0);
        assert_eq!(quadratic_form(&identity::<4>(), &[1.0, 1.0, 1.0, 1.0]), 4.0);
    }

    #[test]
    fn test_ridge() {
        let mut m = [[1.0, 2.0], [2.0, 4.0]];
        add_ridge(&mut m, 0.5);
        assert_eq!(m, [[1.5, 2.0], [2.0, 4.5]]);
        assert!(invert(&m).is_some());
    }
}
