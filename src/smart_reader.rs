use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Nested gzip layers peeled before giving up.
const MAX_GZIP_LAYERS: usize = 4;

/// Opens a file and transparently strips gzip and BGZF layers.
///
/// Compression is detected from the magic bytes rather than the file name,
/// so a `.txt` that is really gzip still reads as text.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    decompress(Box::new(BufReader::new(file)))
}

/// Wraps an already-open stream, peeling any gzip layers.
pub fn decompress(mut reader: Box<dyn BufRead + Send>) -> io::Result<Box<dyn BufRead + Send>> {
    for _ in 0..MAX_GZIP_LAYERS {
        if !is_gzip(reader.fill_buf()?) {
            break;
        }
        tracing::debug!("Detected GZIP/BGZF layer");
        // MultiGzDecoder reads every member, which BGZF relies on
        reader = Box::new(BufReader::new(MultiGzDecoder::new(reader)));
    }
    Ok(reader)
}

fn is_gzip(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == 0x1f && buf[1] == 0x8b
}
