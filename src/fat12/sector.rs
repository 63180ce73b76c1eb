use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

use crate::error::{Fat12Error, Geometry, Result};

/// Reads `count` whole sectors starting at `lba`.
///
/// The source is positioned absolutely at `lba * bytes_per_sector`. Either the
/// full `count * bytes_per_sector` bytes come back or the call fails; a range
/// running past the end of the image is rejected before anything is allocated.
pub fn read_sectors<R: Read + Seek>(
    source: &mut R,
    lba: u64,
    count: u32,
    bytes_per_sector: u16,
) -> Result<Vec<u8>> {
    if bytes_per_sector == 0 {
        return Err(Fat12Error::InvalidGeometry(Geometry::ZeroBytesPerSector));
    }

    let offset = lba
        .checked_mul(bytes_per_sector as u64)
        .ok_or_else(|| invalid_input("sector offset overflows u64"))?;
    let len = (count as u64) * (bytes_per_sector as u64);
    let len_usize = usize::try_from(len)
        .map_err(|_| invalid_input("sector range does not fit in memory"))?;

    let end = source.seek(SeekFrom::End(0))?;
    if offset > end || end - offset < len {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "sectors {}..{} run past the end of the image ({} bytes)",
                lba,
                lba.saturating_add(count as u64),
                end
            ),
        )
        .into());
    }

    source.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; len_usize];
    source.read_exact(&mut buf)?;
    Ok(buf)
}

fn invalid_input(msg: &str) -> Fat12Error {
    io::Error::new(ErrorKind::InvalidInput, msg.to_string()).into()
}
