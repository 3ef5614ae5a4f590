use glam::{DMat3, DMat4};

/// Utility function to convert a row-major 4x4 array to a glam matrix.
///
/// # Arguments
///
/// * `array` - A 4x4 array, indexed as `array[row][col]`.
///
/// # Returns
///
/// A glam column-major 4x4 matrix.
pub fn array44_to_dmat4(array: &[[f64; 4]; 4]) -> DMat4 {
    // glam takes columns, so build from rows and transpose
    DMat4::from_cols_array_2d(array).transpose()
}

/// Utility function to convert a glam 4x4 matrix back to a row-major array.
pub fn dmat4_to_array44(mat: &DMat4) -> [[f64; 4]; 4] {
    mat.transpose().to_cols_array_2d()
}

/// Utility function to convert a row-major 3x3 array to a glam matrix.
///
/// # Arguments
///
/// * `array` - A 3x3 array, indexed as `array[row][col]`.
///
/// # Returns
///
/// A glam column-major 3x3 matrix.
pub fn array33_to_dmat3(array: &[[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols_array_2d(array).transpose()
}

/// Utility function to convert a glam 3x3 matrix back to a row-major array.
pub fn dmat3_to_array33(mat: &DMat3) -> [[f64; 3]; 3] {
    mat.transpose().to_cols_array_2d()
}
