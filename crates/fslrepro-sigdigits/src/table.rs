use std::path::Path;

use crate::error::SigDigitsError;

/// A dense row-major table of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// [`SigDigitsError::ShapeMismatch`] when `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, SigDigitsError> {
        if data.len() != rows * cols {
            return Err(SigDigitsError::ShapeMismatch {
                expected: (rows, cols),
                found: (data.len(), 1),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `(rows, cols)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The element at `row`, `col`.
    ///
    /// PRECONDITION: `row < rows` and `col < cols`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// The values in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols.max(1))
    }

    /// Element-wise mean of matrices sharing one shape.
    ///
    /// # Errors
    ///
    /// [`SigDigitsError::NotEnoughSamples`] for an empty slice and
    /// [`SigDigitsError::ShapeMismatch`] for differing shapes.
    pub fn mean(samples: &[Matrix]) -> Result<Matrix, SigDigitsError> {
        let first = samples
            .first()
            .ok_or(SigDigitsError::NotEnoughSamples(0))?;
        let (rows, cols) = first.shape();

        let mut mean = Matrix::zeros(rows, cols);
        for sample in samples {
            check_shape(first, sample)?;
            for (acc, value) in mean.data.iter_mut().zip(sample.data.iter()) {
                *acc += value;
            }
        }

        let n = samples.len() as f64;
        mean.data.iter_mut().for_each(|v| *v /= n);

        Ok(mean)
    }

    /// Format the table as `%.18e` values separated by a space, one row per line.
    ///
    /// NOTE: a single-row table is written one value per line, the layout existing
    /// significant digits files use for vectors.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        if self.rows == 1 {
            for value in &self.data {
                text.push_str(&format_scientific(*value));
                text.push('\n');
            }
            return text;
        }
        for row in self.iter_rows() {
            let line = row
                .iter()
                .map(|v| format_scientific(*v))
                .collect::<Vec<_>>()
                .join(" ");
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

/// Check that two matrices share a shape.
pub(crate) fn check_shape(expected: &Matrix, found: &Matrix) -> Result<(), SigDigitsError> {
    if expected.shape() != found.shape() {
        return Err(SigDigitsError::ShapeMismatch {
            expected: expected.shape(),
            found: found.shape(),
        });
    }
    Ok(())
}

/// Parse a whitespace delimited numeric table.
///
/// Text after `#` is a comment. Blank lines are skipped. All rows must have the same
/// number of columns.
pub fn parse_table(text: &str, path: impl AsRef<Path>) -> Result<Matrix, SigDigitsError> {
    let path = path.as_ref();
    let mut data = Vec::new();
    let mut rows = 0;
    let mut cols = None;

    for line in text.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| SigDigitsError::Parse {
                    token: token.to_string(),
                    path: path.to_path_buf(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match cols {
            None => cols = Some(values.len()),
            Some(expected) if expected != values.len() => {
                return Err(SigDigitsError::ShapeMismatch {
                    expected: (rows + 1, expected),
                    found: (rows + 1, values.len()),
                });
            }
            Some(_) => {}
        }

        data.extend(values);
        rows += 1;
    }

    Matrix::new(rows, cols.unwrap_or(0), data)
}

/// Format a value like C's `%.18e`, e.g. `1.000000000000000000e+00`.
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{value:.18e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() -> Result<(), SigDigitsError> {
        let text = "# header\n1 2 3\n4 5 6  # trailing\n\n";
        let table = parse_table(text, "table.txt")?;
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.get(1, 2), 6.0);
        assert_eq!(table.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_parse_table_ragged() {
        let err = parse_table("1 2 3\n4 5\n", "ragged.txt").unwrap_err();
        assert!(matches!(
            err,
            SigDigitsError::ShapeMismatch {
                expected: (2, 3),
                found: (2, 2)
            }
        ));
    }

    #[test]
    fn test_parse_table_bad_token() {
        let err = parse_table("1 2;\n", "semi.txt").unwrap_err();
        assert!(matches!(err, SigDigitsError::Parse { ref token, .. } if token == "2;"));
    }

    #[test]
    fn test_parse_empty() -> Result<(), SigDigitsError> {
        let table = parse_table("\n\n", "empty.txt")?;
        assert_eq!(table.shape(), (0, 0));
        assert_eq!(table.to_text(), "");
        Ok(())
    }

    #[test]
    fn test_mean() -> Result<(), SigDigitsError> {
        let a = Matrix::new(1, 2, vec![1.0, 2.0])?;
        let b = Matrix::new(1, 2, vec![3.0, 6.0])?;
        assert_eq!(Matrix::mean(&[a, b])?.as_slice(), &[2.0, 4.0]);
        assert!(Matrix::mean(&[]).is_err());
        Ok(())
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.0), "1.000000000000000000e+00");
        assert_eq!(format_scientific(-0.125), "-1.250000000000000000e-01");
        assert_eq!(format_scientific(0.0009765625), "9.765625000000000000e-04");
        assert_eq!(format_scientific(1024.0), "1.024000000000000000e+03");
        assert_eq!(format_scientific(f64::NAN), "nan");
        assert_eq!(format_scientific(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_to_text() -> Result<(), SigDigitsError> {
        let table = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!(
            table.to_text(),
            "1.000000000000000000e+00 2.000000000000000000e+00\n\
             3.000000000000000000e+00 4.000000000000000000e+00\n"
        );

        let row = Matrix::new(1, 2, vec![1.0, 2.0])?;
        assert_eq!(
            row.to_text(),
            "1.000000000000000000e+00\n2.000000000000000000e+00\n"
        );
        Ok(())
    }
}
