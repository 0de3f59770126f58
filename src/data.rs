use std::io::{self, Write};
use std::path::Path;

use cast::From as _0;
use itertools::Itertools;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::traits::Data;

macro_rules! impl_data {
    ($($ty:ty),+) => {
        $(
            impl Data for $ty {
                fn f64(self) -> f64 {
                    f64::cast(self)
                }
            }

            impl<'a> Data for &'a $ty {
                fn f64(self) -> f64 {
                    f64::cast(*self)
                }
            }
        )+
    }
}

impl_data!(f32, f64, i16, i32, i64, i8, isize, u16, u32, u64, u8, usize);

/// Minimum width of a formatted sample, sign included
const FIELD_WIDTH: usize = 23;
/// Digits after the decimal point
const PRECISION: usize = 16;

/// Formats `value` as signed scientific notation, right aligned on `FIELD_WIDTH` columns, with a
/// two digit (minimum) signed exponent: ` 1.2345678901234568e+00`
pub fn format_sample(value: f64) -> String {
    let body = if value.is_nan() {
        String::from("nan")
    } else if value.is_infinite() {
        String::from(if value > 0. { "inf" } else { "-inf" })
    } else {
        let raw = format!("{:.*e}", PRECISION, value);
        // `{:e}` renders the exponent as `e0`/`e-7`; gnuplot data files conventionally use `e+00`
        match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => raw,
        }
    };

    format!("{:>width$}", body, width = FIELD_WIDTH)
}

/// Checks that every column has the same number of rows, returning that number
pub fn check_shape(columns: &[&[f64]]) -> Result<usize> {
    let nrows = columns.first().map_or(0, |column| column.len());

    if columns.iter().any(|column| column.len() != nrows) {
        return Err(Error::ShapeMismatch {
            lengths: columns.iter().map(|column| column.len()).collect(),
        });
    }

    Ok(nrows)
}

/// Writes `columns` as a whitespace separated table, one row per sample
pub fn write_columns<W>(sink: &mut W, columns: &[&[f64]]) -> io::Result<()>
where
    W: Write,
{
    let nrows = columns.first().map_or(0, |column| column.len());

    for row in 0..nrows {
        let line = columns
            .iter()
            .map(|column| format_sample(column[row]))
            .join(" ");
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
    }

    Ok(())
}

/// A temporary data file, deleted when dropped
pub struct DataFile {
    file: NamedTempFile,
}

impl DataFile {
    /// Saves `columns` into a fresh temporary file
    ///
    /// The shape is validated before the file is created, so a mismatch never leaves a file
    /// behind. The contents are flushed before this returns.
    pub fn save(columns: &[&[f64]]) -> Result<DataFile> {
        let nrows = check_shape(columns)?;

        let mut file = tempfile::Builder::new()
            .prefix("gnupipe-")
            .suffix(".dat")
            .tempfile()
            .map_err(|inner| Error::DataFile {
                path: std::env::temp_dir(),
                inner,
            })?;

        let path = file.path().to_path_buf();
        let written = {
            let mut writer = io::BufWriter::new(file.as_file_mut());
            write_columns(&mut writer, columns).and_then(|_| writer.flush())
        };
        written.map_err(|inner| Error::DataFile { path, inner })?;

        debug!(
            "Wrote {} rows x {} columns to {:?}",
            nrows,
            columns.len(),
            file.path()
        );

        Ok(DataFile { file })
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The path as a single quoted gnuplot string literal
    pub fn quoted(&self) -> String {
        format!(
            "'{}'",
            self.file.path().display().to_string().replace('\'', "''")
        )
    }
}
