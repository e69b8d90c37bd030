use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Write};

/// Open an input for buffered reading.
///
/// `stdin` (or `-`) reads standard input; a `.gz` suffix is decompressed
/// transparently.
pub fn reader(input: &str) -> Result<Box<dyn BufRead>> {
    if input == "stdin" || input == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }

    let path = std::path::Path::new(input);
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;

    let reader: Box<dyn BufRead> = if path.extension() == Some(std::ffi::OsStr::new("gz")) {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Open an output for buffered writing. `stdout` writes standard output.
pub fn writer(output: &str) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use tempfile::tempdir;

    #[test]
    fn test_reader_plain_and_gz() {
        let dir = tempdir().unwrap();

        let plain = dir.path().join("rows.tsv");
        std::fs::write(&plain, "a\tb\n").unwrap();
        let lines: Vec<String> = reader(plain.to_str().unwrap())
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a\tb"]);

        let gz = dir.path().join("rows.tsv.gz");
        {
            let file = std::fs::File::create(&gz).unwrap();
            let mut encoder = GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, "a\tb").unwrap();
            encoder.finish().unwrap();
        }
        let lines: Vec<String> = reader(gz.to_str().unwrap())
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a\tb"]);
    }

    #[test]
    fn test_reader_missing_file() {
        let res = reader("no/such/file.txt");
        assert!(res.is_err());
        assert!(res.err().unwrap().to_string().contains("could not open"));
    }

    #[test]
    fn test_writer_roundtrip() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.txt");
        {
            let mut w = writer(out.to_str().unwrap()).unwrap();
            writeln!(w, "hello").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello\n");
    }
}
