//! Utility helpers: XMP date/time handling and `xpacket` header parsing

pub mod datetime;
pub mod packet;

pub use datetime::XmpDateTime;
pub use packet::{ByteOrderMark, PacketHeader, STANDARD_PACKET_ID};
