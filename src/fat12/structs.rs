use byteorder::{ByteOrder, LittleEndian};

pub const DIR_ENTRY_SIZE: usize = 32;
pub const NAME_LEN: usize = 11;

pub const ATTR_READ_ONLY: u8 = 0x01;
pub const ATTR_HIDDEN: u8 = 0x02;
pub const ATTR_SYSTEM: u8 = 0x04;
pub const ATTR_VOLUME_ID: u8 = 0x08;
pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_ARCHIVE: u8 = 0x20;
pub const ATTR_LONG_NAME: u8 = ATTR_READ_ONLY | ATTR_HIDDEN | ATTR_SYSTEM | ATTR_VOLUME_ID;

/// First name byte of an entry that ends the directory.
pub const END_OF_DIRECTORY: u8 = 0x00;
/// First name byte of a deleted entry.
pub const DELETED_ENTRY: u8 = 0xE5;

/// One 32-byte root directory record, fields kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: [u8; NAME_LEN],
    pub attributes: u8,
    pub reserved: u8,
    pub created_time_tenths: u8,
    pub creation_time: u16,
    pub creation_date: u16,
    pub accessed_date: u16,
    pub first_cluster_high: u16,
    pub modified_time: u16,
    pub modified_date: u16,
    pub first_cluster_low: u16,
    pub size: u32,
}

impl DirectoryEntry {
    pub fn decode(raw: &[u8; DIR_ENTRY_SIZE]) -> Self {
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&raw[0..11]);

        DirectoryEntry {
            name,
            attributes: raw[11],
            reserved: raw[12],
            created_time_tenths: raw[13],
            creation_time: LittleEndian::read_u16(&raw[14..16]),
            creation_date: LittleEndian::read_u16(&raw[16..18]),
            accessed_date: LittleEndian::read_u16(&raw[18..20]),
            first_cluster_high: LittleEndian::read_u16(&raw[20..22]),
            modified_time: LittleEndian::read_u16(&raw[22..24]),
            modified_date: LittleEndian::read_u16(&raw[24..26]),
            first_cluster_low: LittleEndian::read_u16(&raw[26..28]),
            size: LittleEndian::read_u32(&raw[28..32]),
        }
    }

    pub fn encode(&self) -> [u8; DIR_ENTRY_SIZE] {
        let mut raw = [0u8; DIR_ENTRY_SIZE];
        raw[0..11].copy_from_slice(&self.name);
        raw[11] = self.attributes;
        raw[12] = self.reserved;
        raw[13] = self.created_time_tenths;
        LittleEndian::write_u16(&mut raw[14..16], self.creation_time);
        LittleEndian::write_u16(&mut raw[16..18], self.creation_date);
        LittleEndian::write_u16(&mut raw[18..20], self.accessed_date);
        LittleEndian::write_u16(&mut raw[20..22], self.first_cluster_high);
        LittleEndian::write_u16(&mut raw[22..24], self.modified_time);
        LittleEndian::write_u16(&mut raw[24..26], self.modified_date);
        LittleEndian::write_u16(&mut raw[26..28], self.first_cluster_low);
        LittleEndian::write_u32(&mut raw[28..32], self.size);
        raw
    }

    /// Builds an otherwise empty entry, handy for crafting images.
    pub fn new(name: [u8; NAME_LEN], attributes: u8, first_cluster: u32, size: u32) -> Self {
        DirectoryEntry {
            name,
            attributes,
            reserved: 0,
            created_time_tenths: 0,
            creation_time: 0,
            creation_date: 0,
            accessed_date: 0,
            first_cluster_high: (first_cluster >> 16) as u16,
            modified_time: 0,
            modified_date: 0,
            first_cluster_low: first_cluster as u16,
            size,
        }
    }

    #[inline]
    pub fn first_cluster(&self) -> u32 {
        ((self.first_cluster_high as u32) << 16) | self.first_cluster_low as u32
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.name[0] == END_OF_DIRECTORY
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.name[0] == DELETED_ENTRY
    }

    #[inline]
    pub fn is_long_name(&self) -> bool {
        self.attributes & ATTR_LONG_NAME == ATTR_LONG_NAME
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.attributes & ATTR_DIRECTORY != 0
    }

    #[inline]
    pub fn is_volume_label(&self) -> bool {
        !self.is_long_name() && self.attributes & ATTR_VOLUME_ID != 0
    }

    /// `NAME.EXT` with the padding removed; no dot when the extension is blank.
    pub fn display_name(&self) -> String {
        let name_str = String::from_utf8_lossy(&self.name[0..8]).trim_end().to_string();
        let ext_str = String::from_utf8_lossy(&self.name[8..11]).trim_end().to_string();

        if ext_str.is_empty() {
            name_str
        } else {
            format!("{}.{}", name_str, ext_str)
        }
    }
}

/// Converts `foo.txt` into the padded on-disk key `FOO     TXT`.
///
/// Returns `None` for names that do not fit 8.3: an empty base, more than one
/// dot, a base over 8 or an extension over 3 characters, or non-ASCII input.
pub fn short_name(filename: &str) -> Option<[u8; NAME_LEN]> {
    if !filename.is_ascii() {
        return None;
    }

    let mut parts = filename.splitn(2, '.');
    let name = parts.next().unwrap_or("");
    let ext = parts.next().unwrap_or("");

    if name.is_empty() || name.len() > 8 || ext.len() > 3 || ext.contains('.') {
        return None;
    }
    if name.contains(' ') || ext.contains(' ') {
        return None;
    }

    let mut name_field = [b' '; NAME_LEN];
    for (i, b) in name.bytes().enumerate() {
        name_field[i] = b.to_ascii_uppercase();
    }
    for (i, b) in ext.bytes().enumerate() {
        name_field[8 + i] = b.to_ascii_uppercase();
    }
    Some(name_field)
}
