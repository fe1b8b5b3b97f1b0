//! dictzip: gzip with a random-access chunk table.
//!
//! The payload is deflated in fixed-size chunks with a full flush between
//! them, and the compressed size of each chunk is stored in the `RA` extra
//! field of the gzip header. Any gzip reader can still inflate the file.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use flate2::{Compress, Compression, Crc, FlushCompress, Status};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Uncompressed chunk length used by dictzip(1); small enough that a deflated
/// chunk always fits a u16 size slot.
pub const CHUNK_LEN: usize = 58315;

const FEXTRA: u8 = 0x04;
const XFL_BEST: u8 = 2;
const OS_UNIX: u8 = 3;

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let pieces: Vec<&[u8]> = if data.is_empty() {
        vec![data]
    } else {
        data.chunks(CHUNK_LEN).collect()
    };

    let mut compressor = Compress::new(Compression::best(), false);
    let mut sizes = Vec::with_capacity(pieces.len());
    let mut body = Vec::new();
    let last = pieces.len() - 1;

    for (i, piece) in pieces.iter().enumerate() {
        let flush = if i == last {
            FlushCompress::Finish
        } else {
            FlushCompress::Full
        };
        let chunk = deflate_chunk(&mut compressor, piece, flush)?;
        let size = u16::try_from(chunk.len()).map_err(|_| Error::ChunkTooLarge { size: chunk.len() })?;
        sizes.push(size);
        body.extend_from_slice(&chunk);
    }

    // VER, CHLEN, CHCNT, then one u16 per chunk
    let too_many = || Error::TooManyChunks { count: sizes.len() };
    let chunk_count = u16::try_from(sizes.len()).map_err(|_| too_many())?;
    let subfield_len = u16::try_from(6 + 2 * sizes.len()).map_err(|_| too_many())?;
    let extra_len = subfield_len.checked_add(4).ok_or_else(too_many)?;

    let mut out = Vec::with_capacity(body.len() + extra_len as usize + 18);
    out.extend_from_slice(&[0x1f, 0x8b, 8, FEXTRA, 0, 0, 0, 0, XFL_BEST, OS_UNIX]);
    out.extend_from_slice(&extra_len.to_le_bytes());
    out.extend_from_slice(b"RA");
    out.extend_from_slice(&subfield_len.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&(CHUNK_LEN as u16).to_le_bytes());
    out.extend_from_slice(&chunk_count.to_le_bytes());
    for size in &sizes {
        out.extend_from_slice(&size.to_le_bytes());
    }
    out.extend_from_slice(&body);

    let mut crc = Crc::new();
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_le_bytes());
    // ISIZE is the length modulo 2^32
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    Ok(out)
}

fn deflate_chunk(compressor: &mut Compress, input: &[u8], flush: FlushCompress) -> Result<Vec<u8>> {
    let start = compressor.total_in();
    let mut out = Vec::with_capacity(input.len() / 2 + 64);
    loop {
        if out.len() == out.capacity() {
            out.reserve(4096);
        }
        let consumed = (compressor.total_in() - start) as usize;
        let status = compressor.compress_vec(&input[consumed..], &mut out, flush)?;
        let consumed = (compressor.total_in() - start) as usize;

        let done = match flush {
            FlushCompress::Finish => status == Status::StreamEnd,
            // the flush is complete once zlib leaves output space unused
            _ => consumed == input.len() && out.len() < out.capacity(),
        };
        if done {
            return Ok(out);
        }
    }
}

pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Inflate `name.dz` into `name` and remove the compressed file.
pub fn decompress_file(path: &Path) -> Result<PathBuf> {
    let target = path.with_extension("");
    let packed = fs::read(path).map_err(|e| Error::io(path, e))?;
    let plain = decompress(&packed).map_err(|source| Error::Inflate {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(&target, plain).map_err(|e| Error::io(&target, e))?;
    fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    log::debug!("decompressed {} -> {}", path.display(), target.display());
    Ok(target)
}
