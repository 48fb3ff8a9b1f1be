//! Buffered Reader wrapper, for efficient data reading
//! and integrated .gz decompression.
#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use std::fs::File;
use std::io::{BufRead, BufReader, Error as IoError, Read};
use std::path::Path;

use crate::error::{Error, ParsingError};

/// Width every line is padded to
pub(crate) const LINE_WIDTH: usize = 80;

/// Label columns
const LABEL_START: usize = 60;
const LABEL_END: usize = 80;

#[derive(Debug)]
pub enum BufferedReader {
    /// Readable (plain) file
    PlainFile(BufReader<File>),
    /// gzip compressed RINEX
    #[cfg(feature = "flate2")]
    GzFile(BufReader<GzDecoder<File>>),
}

impl BufferedReader {
    /// Builds a new BufferedReader for efficient file interation,
    /// with possible .gz decompression
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        if gzip {
            Self::gzip(path)
        } else {
            let f = File::open(path)?;
            Ok(Self::PlainFile(BufReader::new(f)))
        }
    }
    /// Opens a gzip compressed file, whatever its extension.
    #[cfg(feature = "flate2")]
    pub fn gzip(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let f = File::open(path)?;
        Ok(Self::GzFile(BufReader::new(GzDecoder::new(f))))
    }
    #[cfg(not(feature = "flate2"))]
    pub fn gzip(_path: impl AsRef<Path>) -> std::io::Result<Self> {
        Err(IoError::new(
            std::io::ErrorKind::Unsupported,
            ".gz data requires the flate2 feature",
        ))
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        match self {
            Self::PlainFile(ref mut h) => h.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut h) => h.read(buf),
        }
    }
}

impl BufRead for BufferedReader {
    fn fill_buf(&mut self) -> Result<&[u8], IoError> {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.consume(s),
        }
    }
}

/// One input line, stripped of trailing blanks and right padded
/// to [LINE_WIDTH] columns. Non ASCII characters are replaced so that
/// one character always occupies one column.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    /// 1-based line number
    pub number: usize,
    content: String,
}

impl Line {
    pub fn new(number: usize, raw: &str) -> Self {
        let mut content = raw
            .trim_end()
            .chars()
            .map(|c| if c.is_ascii() { c } else { '?' })
            .collect::<String>();
        if content.len() < LINE_WIDTH {
            let pad = LINE_WIDTH - content.len();
            content.extend(std::iter::repeat(' ').take(pad));
        }
        Self { number, content }
    }
    /// Returns columns `start..end` (0-based, end excluded).
    /// Columns past the end of the line read as empty.
    pub fn field(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.content.len());
        if start >= end {
            ""
        } else {
            &self.content[start..end]
        }
    }
    /// Returns column `index`, blank past the end of the line.
    pub fn char_at(&self, index: usize) -> char {
        self.content
            .as_bytes()
            .get(index)
            .map(|b| *b as char)
            .unwrap_or(' ')
    }
    pub fn label(&self) -> &str {
        self.field(LABEL_START, LABEL_END)
    }
    /// True if label matches `label`, ignoring trailing blanks.
    pub fn is(&self, label: &str) -> bool {
        self.label().trim_end() == label
    }
    /// Header and epoch marker lines carry a label starting with a letter or '#'.
    /// Data lines never do.
    pub fn is_marker(&self) -> bool {
        let c = self.char_at(LABEL_START);
        c.is_ascii_alphabetic() || c == '#'
    }
    /// Wraps a [ParsingError] with the position of this line.
    pub fn error(&self, source: ParsingError) -> Error {
        Error::Format {
            line: self.number,
            label: self.label().trim_end().to_string(),
            source,
        }
    }
}

/// Numbered [Line] iterator over any [BufRead]able interface.
/// Invalid UTF-8 content is replaced rather than rejected.
pub(crate) struct Lines<'a, R: BufRead> {
    reader: &'a mut R,
    number: usize,
    buf: Vec<u8>,
}

impl<'a, R: BufRead> Lines<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            number: 0,
            buf: Vec::with_capacity(LINE_WIDTH + 2),
        }
    }
}

impl<'a, R: BufRead> Iterator for Lines<'a, R> {
    type Item = std::io::Result<Line>;
    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                let raw = String::from_utf8_lossy(&self.buf);
                Some(Ok(Line::new(self.number, &raw)))
            },
            Err(e) => Some(Err(e)),
        }
    }
}
