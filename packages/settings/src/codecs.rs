// ABOUTME: Compression capability detection for backup filetypes
// ABOUTME: Probes the codecs compiled into this build with a trial compression

use autobackup_core::Filetype;
use std::collections::BTreeSet;
use std::io;
use tracing::{debug, warn};

use crate::services::CompressionProbe;

const PROBE_PAYLOAD: &[u8] = b"-- auto db backup codec probe\n";

/// Probes the gzip and bzip2 codecs enabled through cargo features
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeCodecProbe;

impl CompressionProbe for RuntimeCodecProbe {
    fn available(&self) -> BTreeSet<Filetype> {
        let mut available = BTreeSet::from([Filetype::Text]);

        for filetype in [Filetype::Gzip, Filetype::Bzip2] {
            match compress(filetype, PROBE_PAYLOAD) {
                Ok(output) if has_magic(filetype, &output) => {
                    available.insert(filetype);
                }
                Ok(_) => {
                    warn!(filetype = %filetype, "Codec produced unexpected output, disabling");
                }
                Err(e) if e.kind() == io::ErrorKind::Unsupported => {
                    debug!(filetype = %filetype, "Codec not compiled in");
                }
                Err(e) => {
                    warn!(filetype = %filetype, error = %e, "Codec probe failed, disabling");
                }
            }
        }

        available
    }
}

/// Compress `data` into the given backup filetype
pub fn compress(filetype: Filetype, data: &[u8]) -> io::Result<Vec<u8>> {
    match filetype {
        Filetype::Text => Ok(data.to_vec()),
        Filetype::Gzip => compress_gzip(data),
        Filetype::Bzip2 => compress_bzip2(data),
    }
}

fn has_magic(filetype: Filetype, output: &[u8]) -> bool {
    match filetype {
        Filetype::Gzip => output.starts_with(&[0x1f, 0x8b]),
        Filetype::Bzip2 => output.starts_with(b"BZh"),
        Filetype::Text => true,
    }
}

#[cfg(feature = "gzip")]
fn compress_gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(not(feature = "gzip"))]
fn compress_gzip(_data: &[u8]) -> io::Result<Vec<u8>> {
    Err(unsupported(Filetype::Gzip))
}

#[cfg(feature = "bzip2")]
fn compress_bzip2(data: &[u8]) -> io::Result<Vec<u8>> {
    use bzip2::write::BzEncoder;
    use bzip2::Compression;
    use std::io::Write;

    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(not(feature = "bzip2"))]
fn compress_bzip2(_data: &[u8]) -> io::Result<Vec<u8>> {
    Err(unsupported(Filetype::Bzip2))
}

#[cfg(any(not(feature = "gzip"), not(feature = "bzip2")))]
fn unsupported(filetype: Filetype) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{} support is not compiled in", filetype),
    )
}
