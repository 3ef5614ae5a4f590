use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::TransformError;
use crate::matrix::TransformMatrix;

/// Read a 4x4 transformation matrix produced by FSL.
///
/// The file holds four lines of four whitespace separated numbers. Tokens may carry
/// trailing semicolons, which are stripped. Blank lines are only allowed after the
/// last row.
///
/// The fourth row is read but the returned matrix always has `[0, 0, 0, 1]` as its
/// bottom row; a warning is logged when the file disagrees.
///
/// # Arguments
///
/// * `path` - The path to the transformation file.
///
/// # Returns
///
/// The transformation matrix with a canonical bottom row.
///
/// Example:
///
/// ```no_run
/// use fslrepro_transform::read_transform;
///
/// let mat = read_transform("results/ieee/sub-0025531.mat").unwrap();
/// println!("translation: {:?}", mat.translation());
/// ```
pub fn read_transform(path: impl AsRef<Path>) -> Result<TransformMatrix, TransformError> {
    let path = path.as_ref();

    let io_error = |source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    };

    // open the file and create a buffered reader
    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);

    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;

    parse_lines(lines.iter().map(String::as_str), path)
}

/// Parse the content of an FSL transformation file.
///
/// Same rules as [`read_transform`]; `path` is only used in error messages.
pub fn parse_transform(
    text: &str,
    path: impl AsRef<Path>,
) -> Result<TransformMatrix, TransformError> {
    parse_lines(text.lines(), path.as_ref())
}

fn parse_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    path: &Path,
) -> Result<TransformMatrix, TransformError> {
    let mut lines = lines.map(str::trim).collect::<Vec<_>>();
    // flirt ends its matrices with an empty line
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let rows = lines
        .into_iter()
        .map(|line| parse_row(line, path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: [[f64; 4]; 4] = rows
        .try_into()
        .map_err(|rows: Vec<[f64; 4]>| TransformError::RowCount {
            found: rows.len(),
            path: path.to_path_buf(),
        })?;

    if rows[3] != TransformMatrix::BOTTOM_ROW {
        log::warn!(
            "Discarding bottom row {:?} of {}, using [0, 0, 0, 1]",
            rows[3],
            path.display()
        );
    }
    rows[3] = TransformMatrix::BOTTOM_ROW;

    Ok(TransformMatrix::from_rows(rows))
}

/// Parse one matrix row.
/// NOTE: the row must hold exactly four tokens.
fn parse_row(line: &str, path: &Path) -> Result<[f64; 4], TransformError> {
    // split the line into parts by whitespace
    let parts = line.split_whitespace().collect::<Vec<_>>();

    if parts.len() != 4 {
        return Err(TransformError::Format {
            line: line.to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut row = [0.0; 4];
    for (value, part) in row.iter_mut().zip(parts) {
        *value = parse_token(part, path)?;
    }

    Ok(row)
}

fn parse_token(token: &str, path: &Path) -> Result<f64, TransformError> {
    token
        .trim()
        .replace(';', "")
        .parse::<f64>()
        .map_err(|_| TransformError::Parse {
            token: token.to_string(),
            path: path.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const IDENTITY: &str = "1 0 0 0\n0 1 0 0\n0 0 1 0\n0 0 0 1\n";

    #[test]
    fn test_parse_identity() -> Result<(), TransformError> {
        let mat = parse_transform(IDENTITY, "identity.mat")?;
        assert_eq!(mat, TransformMatrix::IDENTITY);
        Ok(())
    }

    #[test]
    fn test_parse_flirt_output() -> Result<(), TransformError> {
        // layout written by flirt -omat, two trailing spaces and a blank last line
        let text = "0.9998  0.0175  -0.0052  -2.3814  \n\
                    -0.0174  0.9997  0.0163  1.0921  \n\
                    0.0055  -0.0162  0.9998  4.5073  \n\
                    0  0  0  1  \n\n";
        let mat = parse_transform(text, "sub-01.mat")?;
        assert_eq!(mat.rows()[0], [0.9998, 0.0175, -0.0052, -2.3814]);
        assert_eq!(mat.translation(), [-2.3814, 1.0921, 4.5073]);
        Ok(())
    }

    #[test]
    fn test_parse_semicolons() -> Result<(), TransformError> {
        let text = "1; 0; 0; 5;\n0; 1; 0; 6;\n0; 0; 1; 7;\n0; 0; 0; 1;\n";
        let mat = parse_transform(text, "semi.mat")?;
        assert_eq!(mat.translation(), [5.0, 6.0, 7.0]);
        assert_eq!(mat.rotation(), TransformMatrix::IDENTITY.rotation());
        Ok(())
    }

    #[test]
    fn test_bottom_row_is_overwritten() -> Result<(), TransformError> {
        let text = "1 0 0 0\n0 1 0 0\n0 0 1 0\n0.5 0.5 0.5 2\n";
        let mat = parse_transform(text, "odd.mat")?;
        assert_eq!(mat.rows()[3], TransformMatrix::BOTTOM_ROW);
        Ok(())
    }

    #[test]
    fn test_wrong_token_count() {
        let text = "1 0 0 0\n0 1 0\n0 0 1 0\n0 0 0 1\n";
        let err = parse_transform(text, "bad.mat").unwrap_err();
        match &err {
            TransformError::Format { line, path } => {
                assert_eq!(line, "0 1 0");
                assert_eq!(path, Path::new("bad.mat"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("0 1 0"));
        assert!(message.contains("bad.mat"));
    }

    #[test]
    fn test_blank_line_inside_matrix() {
        let text = "1 0 0 0\n\n0 1 0 0\n0 0 1 0\n0 0 0 1\n";
        let err = parse_transform(text, "gap.mat").unwrap_err();
        assert!(matches!(
            err,
            TransformError::Format { ref line, .. } if line.is_empty()
        ));

        let leading = format!("\n{IDENTITY}");
        assert!(matches!(
            parse_transform(&leading, "gap.mat"),
            Err(TransformError::Format { .. })
        ));
    }

    #[test]
    fn test_trailing_whitespace_lines() -> Result<(), TransformError> {
        let text = format!("{IDENTITY}  \n\t\n");
        assert_eq!(parse_transform(&text, "tail.mat")?, TransformMatrix::IDENTITY);
        Ok(())
    }

    #[test]
    fn test_non_numeric_token() {
        let text = "1 0 0 0\n0 1 x 0\n0 0 1 0\n0 0 0 1\n";
        let err = parse_transform(text, "nan.mat").unwrap_err();
        assert!(matches!(err, TransformError::Parse { ref token, .. } if token == "x"));
    }

    #[test]
    fn test_row_count() {
        let short = "1 0 0 0\n0 1 0 0\n0 0 1 0\n";
        assert!(matches!(
            parse_transform(short, "short.mat"),
            Err(TransformError::RowCount { found: 3, .. })
        ));

        let long = format!("{IDENTITY}0 0 0 1\n");
        assert!(matches!(
            parse_transform(&long, "long.mat"),
            Err(TransformError::RowCount { found: 5, .. })
        ));
    }

    #[test]
    fn test_read_transform_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"1 0 0 10\n0 1 0 20\n0 0 1 30\n0 0 0 1\n")?;
        let mat = read_transform(file.path())?;
        assert_eq!(mat.translation(), [10.0, 20.0, 30.0]);
        Ok(())
    }

    #[test]
    fn test_read_missing_file() {
        let missing = Path::new("/nonexistent/path/transform.mat");
        let err = read_transform(missing).unwrap_err();
        assert!(matches!(err, TransformError::Io { ref path, .. } if path == missing));
        assert!(err.to_string().contains("/nonexistent/path/transform.mat"));
    }
}
