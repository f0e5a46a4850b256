use super::*;

fn sample() -> CsrMatrix {
    // [ 1 0 2 ]
    // [ 0 3 0 ]
    // [ 0 0 0 ]
    CsrMatrix::from_row_entries(3, vec![vec![(0, 1.0), (2, 2.0)], vec![(1, 3.0)], vec![]])
        .expect("valid entries")
}

#[test]
fn test_shape_and_nnz() {
    let m = sample();
    assert_eq!(m.shape(), (3, 3));
    assert_eq!(m.n_rows(), 3);
    assert_eq!(m.n_cols(), 3);
    assert_eq!(m.nnz(), 3);
}

#[test]
fn test_get() {
    let m = sample();
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((m.get(0, 2) - 2.0).abs() < 1e-6);
    assert!((m.get(0, 1)).abs() < 1e-6);
    assert!((m.get(2, 2)).abs() < 1e-6);
}

#[test]
fn test_row_slices() {
    let m = sample();
    let (cols, vals) = m.row(0);
    assert_eq!(cols, &[0, 2]);
    assert_eq!(vals.len(), 2);
    let (cols, _) = m.row(2);
    assert!(cols.is_empty());
}

#[test]
fn test_out_of_bounds_column_rejected() {
    let result = CsrMatrix::from_row_entries(2, vec![vec![(2, 1.0)]]);
    assert!(result.is_err());
}

#[test]
fn test_unsorted_row_rejected() {
    let result = CsrMatrix::from_row_entries(3, vec![vec![(2, 1.0), (0, 1.0)]]);
    assert!(result.is_err());
}

#[test]
fn test_duplicate_column_rejected() {
    let result = CsrMatrix::from_row_entries(3, vec![vec![(1, 1.0), (1, 2.0)]]);
    assert!(result.is_err());
}

#[test]
fn test_column_sums() {
    let m = sample();
    let sums = m.column_sums();
    assert!((sums[0] - 1.0).abs() < 1e-6);
    assert!((sums[1] - 3.0).abs() < 1e-6);
    assert!((sums[2] - 2.0).abs() < 1e-6);
}

#[test]
fn test_row_dot() {
    let m = sample();
    let w = [2.0, 1.0, 0.5];
    assert!((m.row_dot(0, &w) - 3.0).abs() < 1e-6); // 1*2 + 2*0.5
    assert!((m.row_dot(1, &w) - 3.0).abs() < 1e-6);
    assert!((m.row_dot(2, &w)).abs() < 1e-6);
}

#[test]
fn test_l2_normalize_rows() {
    let mut m = CsrMatrix::from_row_entries(2, vec![vec![(0, 3.0), (1, 4.0)], vec![]])
        .expect("valid entries");
    m.l2_normalize_rows();
    assert!((m.get(0, 0) - 0.6).abs() < 1e-6);
    assert!((m.get(0, 1) - 0.8).abs() < 1e-6);
    // Empty row stays empty
    assert_eq!(m.row(1).0.len(), 0);
}

#[test]
fn test_select_columns() {
    let m = sample();
    let projected = m.select_columns(&[0, 2]).expect("valid selection");
    assert_eq!(projected.shape(), (3, 2));
    assert!((projected.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((projected.get(0, 1) - 2.0).abs() < 1e-6);
    // Column 1 (value 3.0) was dropped
    assert_eq!(projected.row(1).0.len(), 0);
}

#[test]
fn test_select_columns_rejects_unsorted() {
    let m = sample();
    assert!(m.select_columns(&[2, 0]).is_err());
    assert!(m.select_columns(&[1, 1]).is_err());
    assert!(m.select_columns(&[3]).is_err());
}

#[test]
fn test_zeros() {
    let m = CsrMatrix::zeros(4, 7);
    assert_eq!(m.shape(), (4, 7));
    assert_eq!(m.nnz(), 0);
}
