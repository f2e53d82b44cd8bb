use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const ROW_BUFFER_COUNT: usize = 1000;

/// Buffered writer for delimiter-separated rows.
///
/// Values are written as their `Display` form, joined by the delimiter, with
/// no trailing delimiter and a `\n` after each row.
pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
    delimiter: String,
    write_count: usize,
    max_row_buffer: usize,
}

impl CsvWriter<File> {
    pub fn create(filename: &Path, delimiter: &str) -> std::io::Result<Self> {
        let file = File::create(filename)?;
        Ok(Self::new(file, delimiter))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W, delimiter: &str) -> Self {
        Self {
            writer: BufWriter::with_capacity(WRITER_BUFFER_SIZE, inner),
            delimiter: delimiter.to_string(),
            write_count: 0,
            max_row_buffer: ROW_BUFFER_COUNT,
        }
    }

    pub fn write_row<I, T>(&mut self, fields: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.writer.write_all(self.delimiter.as_bytes())?;
            }
            write!(self.writer, "{}", field)?;
        }
        self.writer.write_all(b"\n")?;

        self.write_count += 1;
        if self.write_count >= self.max_row_buffer {
            self.write_count = 0;
            self.writer.flush()?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.write_count = 0;
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
