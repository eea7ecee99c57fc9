//! Little-endian integer helpers used by the dictionary file formats.

use byteorder::{ByteOrder, LittleEndian as LE};

pub fn get_u16(b: &[u8]) -> u16 {
    LE::read_u16(b)
}

pub fn get_u32(b: &[u8]) -> u32 {
    LE::read_u32(b)
}

pub fn put_u16(b: &mut [u8], v: u16) {
    LE::write_u16(b, v)
}

pub fn put_u32(b: &mut [u8], v: u32) {
    LE::write_u32(b, v)
}
