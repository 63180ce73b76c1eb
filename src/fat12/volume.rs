use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use super::sector::read_sectors;
use super::structs::{DirectoryEntry, DIR_ENTRY_SIZE, NAME_LEN};
use crate::bpb::{load_boot_sector, BootSector};
use crate::error::Result;

/// Raw bytes of the first FAT copy. The 12-bit entries are not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatTable(Vec<u8>);

impl FatTable {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The root directory entries in on-disk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDirectory {
    entries: Vec<DirectoryEntry>,
}

impl RootDirectory {
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &[u8; NAME_LEN]) -> Option<&DirectoryEntry> {
        find_file(&self.entries, name)
    }

    /// Entries a listing would show: up to the end marker, without deleted,
    /// long-name or volume-label records.
    pub fn live(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries
            .iter()
            .take_while(|e| !e.is_free())
            .filter(|e| !e.is_deleted() && !e.is_long_name() && !e.is_volume_label())
    }
}

/// Loads the first FAT copy, `sectors_per_fat` sectors at `reserved_sectors`.
pub fn load_fat<R: Read + Seek>(source: &mut R, boot_sector: &BootSector) -> Result<FatTable> {
    let region = boot_sector.fat_region()?;
    let bytes = read_sectors(source, region.lba, region.sectors, boot_sector.bytes_per_sector)?;
    Ok(FatTable(bytes))
}

/// Loads the root directory that follows every FAT copy.
///
/// The read is rounded up to whole sectors; bytes past the last of the
/// `dir_entry_count` entries are dropped.
pub fn load_root_directory<R: Read + Seek>(
    source: &mut R,
    boot_sector: &BootSector,
) -> Result<RootDirectory> {
    let region = boot_sector.root_directory_region()?;
    let bytes = read_sectors(source, region.lba, region.sectors, boot_sector.bytes_per_sector)?;

    let entries = bytes[..boot_sector.root_directory_bytes()]
        .chunks_exact(DIR_ENTRY_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; DIR_ENTRY_SIZE];
            raw.copy_from_slice(chunk);
            DirectoryEntry::decode(&raw)
        })
        .collect();

    Ok(RootDirectory { entries })
}

/// First entry whose 11-byte name equals `name`, byte for byte.
///
/// The scan stops at an end-of-directory marker and skips deleted entries.
pub fn find_file<'a>(
    entries: &'a [DirectoryEntry],
    name: &[u8; NAME_LEN],
) -> Option<&'a DirectoryEntry> {
    entries
        .iter()
        .take_while(|e| !e.is_free())
        .filter(|e| !e.is_deleted())
        .find(|e| &e.name == name)
}

/// Boot sector, FAT and root directory of an image.
///
/// The source is only borrowed while loading; nothing here keeps it open.
#[derive(Debug)]
pub struct Fat12Volume {
    pub boot_sector: BootSector,
    pub fat: FatTable,
    pub root_directory: RootDirectory,
}

impl Fat12Volume {
    /// Opens `path`, loads every region and closes the file again.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::open(file)
    }

    /// Runs boot sector, FAT and root directory loading in order; the first
    /// failing stage aborts the rest.
    pub fn open<R: Read + Seek>(mut source: R) -> Result<Self> {
        let boot_sector = load_boot_sector(&mut source)?;
        let fat = load_fat(&mut source, &boot_sector)?;
        let root_directory = load_root_directory(&mut source, &boot_sector)?;

        Ok(Fat12Volume {
            boot_sector,
            fat,
            root_directory,
        })
    }

    pub fn find_file(&self, name: &[u8; NAME_LEN]) -> Option<&DirectoryEntry> {
        self.root_directory.find(name)
    }
}
