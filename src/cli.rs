//! The `runner` front end: turns a `Config` into a lookup and an exit code.
//!
//! This layer logs through the `log` facade; the loaders it drives do not.

use std::fs::File;
use std::io::{self, Write};

use log::{debug, error, info};

use crate::bpb::{load_boot_sector, BootSector};
use crate::config::Config;
use crate::fat12::structs::{short_name, DirectoryEntry};
use crate::fat12::volume::{load_fat, load_root_directory};

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_OPEN: i32 = 2;
pub const EXIT_BOOT_SECTOR: i32 = 3;
pub const EXIT_FAT: i32 = 4;
pub const EXIT_ROOT_DIRECTORY: i32 = 5;
pub const EXIT_NOT_FOUND: i32 = 6;

/// Runs every stage against `config.image`, writing the report to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> i32 {
    // Resolve the key before touching the image so a bad name costs nothing.
    let key = match config.target.as_deref() {
        Some(name) => match short_name(name) {
            Some(key) => Some(key),
            None => {
                error!("'{}' is not a valid 8.3 file name", name);
                return EXIT_USAGE;
            }
        },
        None => None,
    };

    let mut disk = match File::open(&config.image) {
        Ok(f) => f,
        Err(e) => {
            error!("Cannot open disk image {}: {}", config.image.display(), e);
            return EXIT_OPEN;
        }
    };

    let boot_sector = match load_boot_sector(&mut disk) {
        Ok(bs) => bs,
        Err(e) => {
            error!("Could not read boot sector: {}", e);
            return EXIT_BOOT_SECTOR;
        }
    };
    debug!(
        "{} bytes/sector, {} reserved, {} FATs of {} sectors, {} root entries",
        boot_sector.bytes_per_sector,
        boot_sector.reserved_sectors,
        boot_sector.fat_count,
        boot_sector.sectors_per_fat,
        boot_sector.dir_entry_count
    );

    let fat = match load_fat(&mut disk, &boot_sector) {
        Ok(fat) => fat,
        Err(e) => {
            error!("Could not read file allocation table: {}", e);
            return EXIT_FAT;
        }
    };
    debug!("FAT loaded: {} bytes", fat.len());

    let root = match load_root_directory(&mut disk, &boot_sector) {
        Ok(root) => root,
        Err(e) => {
            error!("Could not read root directory: {}", e);
            return EXIT_ROOT_DIRECTORY;
        }
    };
    debug!("Root directory loaded: {} entries", root.len());
    drop(disk);

    let (code, shown) = match key {
        None => (EXIT_OK, root.live().collect::<Vec<_>>()),
        Some(key) => match root.find(&key) {
            Some(entry) => {
                info!("Found {}", entry.display_name());
                (EXIT_OK, vec![entry])
            }
            None => {
                error!("Could not find file {}.", config.target.as_deref().unwrap_or(""));
                (EXIT_NOT_FOUND, Vec::new())
            }
        },
    };

    if let Err(e) = report(out, &boot_sector, &shown) {
        error!("Could not write report: {}", e);
    }
    code
}

fn report<W: Write>(
    out: &mut W,
    boot_sector: &BootSector,
    entries: &[&DirectoryEntry],
) -> io::Result<()> {
    writeln!(
        out,
        "Volume '{}' ({}), serial {:04X}-{:04X}",
        boot_sector.volume_label_str(),
        boot_sector.system_id_str(),
        boot_sector.volume_id >> 16,
        boot_sector.volume_id & 0xFFFF
    )?;
    for entry in entries {
        write_entry(out, entry)?;
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, entry: &DirectoryEntry) -> io::Result<()> {
    let kind = if entry.is_directory() { "<DIR>" } else { "     " };
    writeln!(
        out,
        "{} {:<12} {:>10} bytes  attr 0x{:02X}  cluster {}",
        kind,
        entry.display_name(),
        entry.size,
        entry.attributes,
        entry.first_cluster()
    )
}
