//! File handles that transparently gunzip/gzip paths ending in `.gz`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use retrofit_core::errors::LoadError;

/// Whether a path names a gzip file.
pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open a path for buffered line reading, decompressing `.gz` files.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(BufReader::new(file)))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Output sink that must be explicitly finished so the gzip trailer and
/// buffered bytes are flushed with errors surfaced.
pub enum OutputSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Create (or truncate) a path, compressing if it ends in `.gz`.
    pub fn create(path: &Path) -> Result<Self, LoadError> {
        Self::create_with(path, is_gzip(path))
    }

    /// Create (or truncate) a path with explicit compression.
    pub fn create_with(path: &Path, gzip: bool) -> Result<Self, LoadError> {
        let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
        let writer = BufWriter::new(file);
        if gzip {
            Ok(Self::Gzip(GzEncoder::new(writer, Compression::default())))
        } else {
            Ok(Self::Plain(writer))
        }
    }

    /// Flush everything to disk.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Read one line as lossy UTF-8 into `buf`, returning `false` at EOF.
///
/// Invalid byte sequences in embedding dumps are common enough that a
/// single bad word must not abort the whole load.
pub fn read_line_lossy(reader: &mut dyn BufRead, raw: &mut Vec<u8>, buf: &mut String) -> io::Result<bool> {
    raw.clear();
    buf.clear();
    if reader.read_until(b'\n', raw)? == 0 {
        return Ok(false);
    }
    buf.push_str(&String::from_utf8_lossy(raw));
    Ok(true)
}
