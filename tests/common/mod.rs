#![allow(dead_code)]

use fat12::fat12::structs::{DirectoryEntry, ATTR_ARCHIVE, DIR_ENTRY_SIZE};
use fat12::BootSector;

pub fn floppy_boot_sector() -> BootSector {
    BootSector {
        boot_jump_instruction: [0xEB, 0x3C, 0x90],
        oem_identifier: *b"MSWIN4.1",
        bytes_per_sector: 512,
        sectors_per_cluster: 1,
        reserved_sectors: 1,
        fat_count: 2,
        dir_entry_count: 224,
        total_sectors: 2880,
        media_descriptor_type: 0xF0,
        sectors_per_fat: 9,
        sectors_per_track: 18,
        heads: 2,
        hidden_sectors: 0,
        large_sector_count: 0,
        drive_number: 0,
        reserved: 0,
        signature: 0x29,
        volume_id: 0x2A87_6543,
        volume_label: *b"NBOS       ",
        system_id: *b"FAT12   ",
    }
}

pub fn file(name: &[u8; 11], first_cluster: u32, size: u32) -> DirectoryEntry {
    DirectoryEntry::new(*name, ATTR_ARCHIVE, first_cluster, size)
}

/// Lays out boot sector, every FAT copy and the root directory.
///
/// FAT copy `n` is filled with byte `0xF0 + n` so tests can tell which copy
/// was read. The image ends right after the root directory sectors.
pub fn build_image(bs: &BootSector, entries: &[DirectoryEntry]) -> Vec<u8> {
    let bps = bs.bytes_per_sector as usize;
    let fat_bytes = bs.sectors_per_fat as usize * bps;
    let root_bytes = bs.dir_entry_count as usize * DIR_ENTRY_SIZE;
    let root_sectors = root_bytes.div_ceil(bps);
    let fat_sectors = bs.sectors_per_fat as usize * bs.fat_count as usize;
    let total = (bs.reserved_sectors as usize + fat_sectors + root_sectors) * bps;

    let mut image = vec![0u8; total.max(BootSector::SIZE)];
    image[..BootSector::SIZE].copy_from_slice(&bs.encode());

    let fat_start = bs.reserved_sectors as usize * bps;
    for copy in 0..bs.fat_count as usize {
        let start = fat_start + copy * fat_bytes;
        image[start..start + fat_bytes].fill(0xF0 + copy as u8);
    }

    let root_start = fat_start + bs.fat_count as usize * fat_bytes;
    for (i, entry) in entries.iter().enumerate() {
        let off = root_start + i * DIR_ENTRY_SIZE;
        image[off..off + DIR_ENTRY_SIZE].copy_from_slice(&entry.encode());
    }
    image
}
