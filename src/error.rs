use core::fmt;
use std::error::Error;
use std::io;

pub type Result<T> = core::result::Result<T, Fat12Error>;

/// Boot sector field that makes a region degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    ZeroBytesPerSector,
    ZeroSectorsPerFat,
    ZeroDirEntries,
}

#[derive(Debug)]
pub enum Fat12Error {
    Io(io::Error),
    InvalidGeometry(Geometry),
}

impl Fat12Error {
    pub fn is_io(&self) -> bool {
        matches!(self, Fat12Error::Io(_))
    }

    pub fn geometry(&self) -> Option<Geometry> {
        match self {
            Fat12Error::InvalidGeometry(g) => Some(*g),
            Fat12Error::Io(_) => None,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::ZeroBytesPerSector => write!(f, "bytes per sector is zero"),
            Geometry::ZeroSectorsPerFat => write!(f, "sectors per FAT is zero"),
            Geometry::ZeroDirEntries => write!(f, "root directory entry count is zero"),
        }
    }
}

impl fmt::Display for Fat12Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fat12Error::Io(e) => write!(f, "i/o error: {}", e),
            Fat12Error::InvalidGeometry(g) => write!(f, "invalid geometry: {}", g),
        }
    }
}

impl Error for Fat12Error {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Fat12Error::Io(e) => Some(e),
            Fat12Error::InvalidGeometry(_) => None,
        }
    }
}

impl From<io::Error> for Fat12Error {
    fn from(e: io::Error) -> Self {
        Fat12Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_source() {
        let err: Fat12Error = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert_eq!(err.geometry(), None);
    }

    #[test]
    fn geometry_errors_name_the_field() {
        let err = Fat12Error::InvalidGeometry(Geometry::ZeroSectorsPerFat);
        assert_eq!(err.to_string(), "invalid geometry: sectors per FAT is zero");
        assert!(err.source().is_none());
    }
}
