//! CBOR plumbing for schema-driven bodies.
//!
//! Every schema-driven body is the two-element array `[msg_type, map | nil]`
//! with definite-length containers, integer map keys in ascending order and
//! integers in their shortest form. Encoding goes through a slice-backed
//! `minicbor` writer; decoding distinguishes malformed structure
//! (`FramingError`) from out-of-range values (`InvalidArgument`).

use minicbor::data::Type;
use minicbor::Encoder;

use crate::message::MsgType;
use crate::{Error, Result};

/// Definite-length array of two, the first byte of every schema-driven body.
pub(crate) const ARRAY2_HEADER: u8 = 0x82;

#[derive(Debug)]
pub(crate) struct OutOfSpace;

/// Slice-backed writer for the `minicbor` encoder.
pub(crate) struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> SliceWriter<'b> {
    fn new(buf: &'b mut [u8]) -> SliceWriter<'b> {
        SliceWriter { buf, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }
}

impl minicbor::encode::Write for SliceWriter<'_> {
    type Error = OutOfSpace;

    fn write_all(&mut self, data: &[u8]) -> core::result::Result<(), OutOfSpace> {
        if self.pos + data.len() > self.buf.len() {
            return Err(OutOfSpace);
        }
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
        Ok(())
    }
}

fn overflow<E>(_: E) -> Error {
    Error::BufferOverflow
}

/// Builds one schema-driven body into a caller-provided slice.
pub(crate) struct BodyWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

macro_rules! keyed {
    ($name:ident, $ty:ty, $method:ident) => {
        pub fn $name(&mut self, key: u8, value: $ty) -> Result<()> {
            let mut writer = SliceWriter::new(&mut self.buf[self.pos..]);
            let mut encoder = Encoder::new(&mut writer);
            encoder.u8(key).map_err(overflow)?;
            encoder.$method(value).map_err(overflow)?;
            self.pos += writer.pos();
            Ok(())
        }
    };
}

impl<'b> BodyWriter<'b> {
    pub fn new(buf: &'b mut [u8]) -> BodyWriter<'b> {
        BodyWriter { buf, pos: 0 }
    }

    /// `[msg_type, {` with a definite entry count.
    pub fn begin_map(&mut self, msg_type: MsgType, entries: u64) -> Result<()> {
        let mut writer = SliceWriter::new(&mut self.buf[self.pos..]);
        let mut encoder = Encoder::new(&mut writer);
        encoder.array(2).map_err(overflow)?;
        encoder.u8(msg_type.0).map_err(overflow)?;
        encoder.map(entries).map_err(overflow)?;
        self.pos += writer.pos();
        Ok(())
    }

    /// `[msg_type, nil]`, the whole body of an empty-payload message.
    pub fn unit(&mut self, msg_type: MsgType) -> Result<()> {
        let mut writer = SliceWriter::new(&mut self.buf[self.pos..]);
        let mut encoder = Encoder::new(&mut writer);
        encoder.array(2).map_err(overflow)?;
        encoder.u8(msg_type.0).map_err(overflow)?;
        encoder.null().map_err(overflow)?;
        self.pos += writer.pos();
        Ok(())
    }

    keyed!(key_bool, bool, bool);
    keyed!(key_u8, u8, u8);
    keyed!(key_u16, u16, u16);
    keyed!(key_u32, u32, u32);
    keyed!(key_u64, u64, u64);
    keyed!(key_i32, i32, i32);
    keyed!(key_f64, f64, f64);

    pub fn finish(self) -> usize {
        self.pos
    }
}

/// Second element of the body array.
pub(crate) enum BodyKind<'b> {
    /// `nil`: the message carries no payload.
    Empty,
    /// A field map keyed by small integers.
    Map(MapReader<'b>),
}

/// Read the message type without decoding the payload.
pub(crate) fn peek_type(body: &[u8]) -> Result<MsgType> {
    let mut decoder = minicbor::Decoder::new(body);
    match decoder.array() {
        Ok(Some(2)) => {}
        _ => return Err(Error::FramingError),
    }
    read_type(&mut decoder)
}

/// Open a schema-driven body, yielding the message type and its payload.
pub(crate) fn open_body(body: &[u8]) -> Result<(MsgType, BodyKind<'_>)> {
    let mut decoder = minicbor::Decoder::new(body);
    match decoder.array() {
        Ok(Some(2)) => {}
        _ => return Err(Error::FramingError),
    }
    let msg_type = read_type(&mut decoder)?;
    match decoder.datatype() {
        Ok(Type::Null) => Ok((msg_type, BodyKind::Empty)),
        Ok(Type::Map) => {
            let remaining = match decoder.map() {
                Ok(Some(n)) => n,
                // indefinite-length maps are not canonical on this wire
                _ => return Err(Error::FramingError),
            };
            Ok((msg_type, BodyKind::Map(MapReader { decoder, remaining })))
        }
        _ => Err(Error::FramingError),
    }
}

fn read_type(decoder: &mut minicbor::Decoder<'_>) -> Result<MsgType> {
    let value = decoder.u64().map_err(|_| Error::FramingError)?;
    u8::try_from(value)
        .map(MsgType)
        .map_err(|_| Error::FramingError)
}

/// Walks the entries of a payload map.
pub(crate) struct MapReader<'b> {
    decoder: minicbor::Decoder<'b>,
    remaining: u64,
}

impl MapReader<'_> {
    /// The next key, or `None` once the map is exhausted. Non-integer keys
    /// are a framing error.
    pub fn next_key(&mut self) -> Result<Option<u64>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.decoder
            .u64()
            .map(Some)
            .map_err(|_| Error::FramingError)
    }

    /// Skip the value of an unknown key (forward compatibility).
    pub fn skip_value(&mut self) -> Result<()> {
        self.decoder.skip().map_err(|_| Error::FramingError)
    }

    pub fn bool(&mut self) -> Result<bool> {
        self.decoder.bool().map_err(|_| Error::FramingError)
    }

    pub fn u8(&mut self) -> Result<u8> {
        let value = self.u64()?;
        u8::try_from(value).map_err(|_| Error::InvalidArgument)
    }

    pub fn u16(&mut self) -> Result<u16> {
        let value = self.u64()?;
        u16::try_from(value).map_err(|_| Error::InvalidArgument)
    }

    pub fn u32(&mut self) -> Result<u32> {
        let value = self.u64()?;
        u32::try_from(value).map_err(|_| Error::InvalidArgument)
    }

    pub fn u64(&mut self) -> Result<u64> {
        self.decoder.u64().map_err(|_| Error::FramingError)
    }

    pub fn i32(&mut self) -> Result<i32> {
        let value = self.decoder.i64().map_err(|_| Error::FramingError)?;
        i32::try_from(value).map_err(|_| Error::InvalidArgument)
    }

    pub fn f64(&mut self) -> Result<f64> {
        self.decoder.f64().map_err(|_| Error::FramingError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message;

    #[test]
    fn unit_body_bytes() {
        let mut buf = [0u8; 8];
        let mut writer = BodyWriter::new(&mut buf);
        writer.unit(message::PING_REQUEST).unwrap();
        let used = writer.finish();
        assert_eq!(&buf[..used], [0x82, 0x18, 0x2F, 0xF6]);
    }

    #[test]
    fn small_type_uses_compact_form() {
        let mut buf = [0u8; 8];
        let mut writer = BodyWriter::new(&mut buf);
        // 0x10 = 16 <= 23, so the type encodes in a single byte
        writer.begin_map(message::MOTOR_CONFIG, 1).unwrap();
        writer.key_u8(0, 2).unwrap();
        let used = writer.finish();
        assert_eq!(&buf[..used], [0x82, 0x10, 0xA1, 0x00, 0x02]);
    }

    #[test]
    fn peek_matches_open() {
        let mut buf = [0u8; 16];
        let mut writer = BodyWriter::new(&mut buf);
        writer.begin_map(message::STATE_DATA, 1).unwrap();
        writer.key_u32(3, 1000).unwrap();
        let used = writer.finish();

        assert_eq!(peek_type(&buf[..used]).unwrap(), message::STATE_DATA);
        let (msg_type, kind) = open_body(&buf[..used]).unwrap();
        assert_eq!(msg_type, message::STATE_DATA);
        let mut map = match kind {
            BodyKind::Map(map) => map,
            BodyKind::Empty => panic!("expected a map"),
        };
        assert_eq!(map.next_key().unwrap(), Some(3));
        assert_eq!(map.u32().unwrap(), 1000);
        assert_eq!(map.next_key().unwrap(), None);
    }

    #[test]
    fn bad_array_header_is_framing_error() {
        assert_eq!(peek_type(&[0xA1, 0x00]), Err(Error::FramingError));
        assert_eq!(peek_type(&[0x83, 0x10]), Err(Error::FramingError));
        assert!(matches!(open_body(&[0x82]), Err(Error::FramingError)));
    }

    #[test]
    fn range_violation_is_invalid_argument() {
        // [0x10, {0: 256}] where key 0 must fit u8
        let body = [0x82, 0x10, 0xA1, 0x00, 0x19, 0x01, 0x00];
        let (_, kind) = open_body(&body).unwrap();
        let mut map = match kind {
            BodyKind::Map(map) => map,
            BodyKind::Empty => panic!("expected a map"),
        };
        assert_eq!(map.next_key().unwrap(), Some(0));
        assert_eq!(map.u8(), Err(Error::InvalidArgument));
    }

    #[test]
    fn overflow_reported_when_slice_full() {
        let mut buf = [0u8; 2];
        let mut writer = BodyWriter::new(&mut buf);
        assert_eq!(
            writer.unit(message::PING_REQUEST),
            Err(Error::BufferOverflow)
        );
    }
}
