use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

/// ```
/// use std::io::BufRead;
/// let reader = anno::reader("tests/gff/augustus.gff3");
/// assert!(reader.lines().collect::<Vec<_>>().len() > 10);
/// ```
pub fn reader(input: &str) -> Box<dyn BufRead> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = match std::fs::File::open(path) {
            Err(why) => panic!("could not open {}: {}", path.display(), why),
            Ok(file) => file,
        };

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    reader
}

/// Loads a text artifact as a vector of lines, terminators stripped.
///
/// The fallible twin of `reader()`; a missing or unreadable path surfaces as
/// an error instead of a panic. Transparently decompresses `.gz`.
///
/// ```
/// let lines = anno::read_lines("tests/gff/augustus.gff3").unwrap();
/// assert!(lines.len() > 10);
/// ```
pub fn read_lines(input: &str) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn Read> = if input == "stdin" {
        Box::new(std::io::stdin())
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(flate2::read::MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        }
    };

    BufReader::new(reader)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("could not read {}", input))
}

pub fn writer(output: &str) -> Box<dyn Write> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output).unwrap()))
    };

    writer
}
