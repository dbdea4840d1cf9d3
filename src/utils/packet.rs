//! `xpacket` processing-instruction helpers
//!
//! The opening `<?xpacket begin="..." id="..."?>` carries a byte-order mark in
//! its `begin` attribute, which hints at the encoding the packet was written
//! in, and the fixed XMP packet id.

use crate::core::error::{XmpError, XmpResult};

/// The `id` every XMP packet wrapper carries
pub const STANDARD_PACKET_ID: &str = "W5M0MpCehiHzreSzNTczkc9d";

/// Encoding announced by the `begin` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrderMark {
    Utf8,
    Utf16BigEndian,
    Utf16LittleEndian,
    Utf32BigEndian,
    Utf32LittleEndian,
}

impl ByteOrderMark {
    /// Recognize a mark from the raw attribute bytes
    pub fn from_bytes(raw: &[u8]) -> Option<Self> {
        // 32-bit forms first: FF FE 00 00 starts like the UTF-16 LE mark
        match raw {
            [0x00, 0x00, 0xFE, 0xFF] => Some(ByteOrderMark::Utf32BigEndian),
            [0xFF, 0xFE, 0x00, 0x00] => Some(ByteOrderMark::Utf32LittleEndian),
            [0xEF, 0xBB, 0xBF] => Some(ByteOrderMark::Utf8),
            [0xFE, 0xFF] => Some(ByteOrderMark::Utf16BigEndian),
            [0xFF, 0xFE] => Some(ByteOrderMark::Utf16LittleEndian),
            _ => None,
        }
    }

    /// IANA-style encoding label
    pub fn encoding_name(&self) -> &'static str {
        match self {
            ByteOrderMark::Utf8 => "UTF-8",
            ByteOrderMark::Utf16BigEndian => "UTF-16BE",
            ByteOrderMark::Utf16LittleEndian => "UTF-16LE",
            ByteOrderMark::Utf32BigEndian => "UTF-32BE",
            ByteOrderMark::Utf32LittleEndian => "UTF-32LE",
        }
    }
}

/// What the opening `xpacket` instruction told us
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketHeader {
    /// `None` when `begin` is empty or unrecognized
    pub bom: Option<ByteOrderMark>,
}

impl PacketHeader {
    /// Validate the pseudo-attributes of an opening `xpacket` instruction
    ///
    /// Both `begin` and `id` are required and `id` must be the standard packet
    /// id. `begin` is only an encoding hint: the reader has already decoded
    /// the text, so an unrecognized mark is logged at `warn` and leaves
    /// [`PacketHeader::bom`] empty instead of failing the packet.
    pub fn from_attributes<'a, I>(attributes: I) -> XmpResult<Self>
    where
        I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
    {
        let mut begin = None;
        let mut id = None;
        for (key, value) in attributes {
            match key {
                b"begin" => begin = Some(value),
                b"id" => id = Some(value),
                _ => {}
            }
        }

        let (Some(begin), Some(id)) = (begin, id) else {
            return Err(XmpError::Packet(
                "'begin' or 'id' attributes of xpacket tag missing".to_string(),
            ));
        };
        if id != STANDARD_PACKET_ID.as_bytes() {
            return Err(XmpError::Packet(format!(
                "xpacket ID not expected: [{}]",
                String::from_utf8_lossy(id)
            )));
        }

        let bom = if begin.is_empty() {
            None
        } else {
            let bom = ByteOrderMark::from_bytes(begin);
            if bom.is_none() {
                log::warn!("unrecognized xpacket byte-order mark: {:02X?}", begin);
            }
            bom
        };
        Ok(Self { bom })
    }
}
