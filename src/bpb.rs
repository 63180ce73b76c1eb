use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{Fat12Error, Geometry, Result};
use crate::fat12::structs::DIR_ENTRY_SIZE;

/// FAT12 header plus the Extended Boot Record, exactly as laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootSector {
    pub boot_jump_instruction: [u8; 3],
    pub oem_identifier: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fat_count: u8,
    pub dir_entry_count: u16,
    pub total_sectors: u16,
    pub media_descriptor_type: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub heads: u16,
    pub hidden_sectors: u32,
    pub large_sector_count: u32,

    // Extended Boot Record
    pub drive_number: u8,
    pub reserved: u8,
    pub signature: u8,
    pub volume_id: u32,
    pub volume_label: [u8; 11],
    pub system_id: [u8; 8],
}

/// A run of whole sectors starting at `lba`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub lba: u64,
    pub sectors: u32,
}

impl BootSector {
    /// Encoded size of the header and EBR, without boot code.
    pub const SIZE: usize = 62;

    /// Reads the header from the current position of `reader`, field by field.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut boot_jump_instruction = [0u8; 3];
        reader.read_exact(&mut boot_jump_instruction)?;
        let mut oem_identifier = [0u8; 8];
        reader.read_exact(&mut oem_identifier)?;

        let bytes_per_sector = reader.read_u16::<LittleEndian>()?;
        let sectors_per_cluster = reader.read_u8()?;
        let reserved_sectors = reader.read_u16::<LittleEndian>()?;
        let fat_count = reader.read_u8()?;
        let dir_entry_count = reader.read_u16::<LittleEndian>()?;
        let total_sectors = reader.read_u16::<LittleEndian>()?;
        let media_descriptor_type = reader.read_u8()?;
        let sectors_per_fat = reader.read_u16::<LittleEndian>()?;
        let sectors_per_track = reader.read_u16::<LittleEndian>()?;
        let heads = reader.read_u16::<LittleEndian>()?;
        let hidden_sectors = reader.read_u32::<LittleEndian>()?;
        let large_sector_count = reader.read_u32::<LittleEndian>()?;

        let drive_number = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        let signature = reader.read_u8()?;
        let volume_id = reader.read_u32::<LittleEndian>()?;
        let mut volume_label = [0u8; 11];
        reader.read_exact(&mut volume_label)?;
        let mut system_id = [0u8; 8];
        reader.read_exact(&mut system_id)?;

        Ok(BootSector {
            boot_jump_instruction,
            oem_identifier,
            bytes_per_sector,
            sectors_per_cluster,
            reserved_sectors,
            fat_count,
            dir_entry_count,
            total_sectors,
            media_descriptor_type,
            sectors_per_fat,
            sectors_per_track,
            heads,
            hidden_sectors,
            large_sector_count,
            drive_number,
            reserved,
            signature,
            volume_id,
            volume_label,
            system_id,
        })
    }

    /// Decodes the header from the first `SIZE` bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = buf;
        Self::read_from(&mut reader)
    }

    /// Canonical little-endian encoding, the inverse of `decode`.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..3].copy_from_slice(&self.boot_jump_instruction);
        buf[3..11].copy_from_slice(&self.oem_identifier);
        LittleEndian::write_u16(&mut buf[11..13], self.bytes_per_sector);
        buf[13] = self.sectors_per_cluster;
        LittleEndian::write_u16(&mut buf[14..16], self.reserved_sectors);
        buf[16] = self.fat_count;
        LittleEndian::write_u16(&mut buf[17..19], self.dir_entry_count);
        LittleEndian::write_u16(&mut buf[19..21], self.total_sectors);
        buf[21] = self.media_descriptor_type;
        LittleEndian::write_u16(&mut buf[22..24], self.sectors_per_fat);
        LittleEndian::write_u16(&mut buf[24..26], self.sectors_per_track);
        LittleEndian::write_u16(&mut buf[26..28], self.heads);
        LittleEndian::write_u32(&mut buf[28..32], self.hidden_sectors);
        LittleEndian::write_u32(&mut buf[32..36], self.large_sector_count);
        buf[36] = self.drive_number;
        buf[37] = self.reserved;
        buf[38] = self.signature;
        LittleEndian::write_u32(&mut buf[39..43], self.volume_id);
        buf[43..54].copy_from_slice(&self.volume_label);
        buf[54..62].copy_from_slice(&self.system_id);
        buf
    }

    /// Location of the first FAT copy.
    pub fn fat_region(&self) -> Result<Region> {
        self.check_fat_geometry()?;

        Ok(Region {
            lba: self.reserved_sectors as u64,
            sectors: self.sectors_per_fat as u32,
        })
    }

    /// Location of the root directory, right after every FAT copy, rounded up
    /// to whole sectors.
    pub fn root_directory_region(&self) -> Result<Region> {
        self.check_fat_geometry()?;
        if self.dir_entry_count == 0 {
            return Err(Fat12Error::InvalidGeometry(Geometry::ZeroDirEntries));
        }

        let lba = self.reserved_sectors as u64
            + self.sectors_per_fat as u64 * self.fat_count as u64;
        let size = self.root_directory_bytes() as u32;
        let bps = self.bytes_per_sector as u32;

        Ok(Region {
            lba,
            sectors: size.div_ceil(bps),
        })
    }

    /// Bytes covered by `dir_entry_count` entries, before sector rounding.
    pub fn root_directory_bytes(&self) -> usize {
        self.dir_entry_count as usize * DIR_ENTRY_SIZE
    }

    pub fn volume_label_str(&self) -> String {
        String::from_utf8_lossy(&self.volume_label).trim_end().to_string()
    }

    pub fn system_id_str(&self) -> String {
        String::from_utf8_lossy(&self.system_id).trim_end().to_string()
    }

    /// Both regions are placed by the sector size and the FAT size.
    fn check_fat_geometry(&self) -> Result<()> {
        if self.bytes_per_sector == 0 {
            return Err(Fat12Error::InvalidGeometry(Geometry::ZeroBytesPerSector));
        }
        if self.sectors_per_fat == 0 {
            return Err(Fat12Error::InvalidGeometry(Geometry::ZeroSectorsPerFat));
        }
        Ok(())
    }
}

/// Reads the boot sector from offset 0 of `source`.
///
/// The signature bytes are not checked; a non-FAT image decodes into whatever
/// its first bytes say and later stages reject it.
pub fn load_boot_sector<R: Read + Seek>(source: &mut R) -> Result<BootSector> {
    source.seek(SeekFrom::Start(0))?;
    BootSector::read_from(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, ErrorKind};

    fn floppy() -> BootSector {
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
            volume_id: 0x1234_ABCD,
            volume_label: *b"NBOS       ",
            system_id: *b"FAT12   ",
        }
    }

    #[test]
    fn encode_then_decode_keeps_every_field() {
        let mut bs = floppy();
        bs.hidden_sectors = 0x0102_0304;
        bs.large_sector_count = 0xA0B0_C0D0;
        bs.heads = 0xBEEF;

        let decoded = BootSector::decode(&bs.encode()).expect("decode");
        assert_eq!(decoded, bs);
    }

    #[test]
    fn fields_sit_at_packed_offsets() {
        let buf = floppy().encode();
        assert_eq!(&buf[11..13], &[0x00, 0x02]);
        assert_eq!(buf[16], 2);
        assert_eq!(&buf[17..19], &224u16.to_le_bytes());
        assert_eq!(&buf[22..24], &9u16.to_le_bytes());
        assert_eq!(buf[38], 0x29);
        assert_eq!(&buf[39..43], &[0xCD, 0xAB, 0x34, 0x12]);
        assert_eq!(&buf[43..54], b"NBOS       ");
        assert_eq!(&buf[54..62], b"FAT12   ");
    }

    #[test]
    fn short_header_is_an_io_error() {
        let buf = floppy().encode();
        let mut source = Cursor::new(buf[..40].to_vec());
        match load_boot_sector(&mut source) {
            Err(Fat12Error::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn regions_follow_the_geometry() {
        let bs = floppy();
        assert_eq!(bs.fat_region().unwrap(), Region { lba: 1, sectors: 9 });
        assert_eq!(
            bs.root_directory_region().unwrap(),
            Region { lba: 19, sectors: 14 }
        );
    }

    #[test]
    fn partial_root_sector_rounds_up() {
        let mut bs = floppy();
        bs.dir_entry_count = 17;
        assert_eq!(bs.root_directory_bytes(), 544);
        assert_eq!(bs.root_directory_region().unwrap().sectors, 2);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut bs = floppy();
        bs.bytes_per_sector = 0;
        assert_eq!(
            bs.fat_region().unwrap_err().geometry(),
            Some(Geometry::ZeroBytesPerSector)
        );
        assert_eq!(
            bs.root_directory_region().unwrap_err().geometry(),
            Some(Geometry::ZeroBytesPerSector)
        );

        let mut bs = floppy();
        bs.sectors_per_fat = 0;
        assert_eq!(
            bs.fat_region().unwrap_err().geometry(),
            Some(Geometry::ZeroSectorsPerFat)
        );
        assert_eq!(
            bs.root_directory_region().unwrap_err().geometry(),
            Some(Geometry::ZeroSectorsPerFat)
        );

        let mut bs = floppy();
        bs.dir_entry_count = 0;
        assert_eq!(
            bs.root_directory_region().unwrap_err().geometry(),
            Some(Geometry::ZeroDirEntries)
        );
    }

    #[test]
    fn label_helpers_trim_padding() {
        let bs = floppy();
        assert_eq!(bs.volume_label_str(), "NBOS");
        assert_eq!(bs.system_id_str(), "FAT12");
    }
}
