//! The in-memory, unstuffed form of one frame.

use crate::message::MsgType;
use crate::{payload, Error, Result, MAX_PAYLOAD_SIZE};

/// A decoded (or to-be-encoded) packet: body length, 64-bit appliance
/// address and the raw body bytes. Plain data, returned by value; the frame
/// CRC is validated by the decoder and recomputed by the encoder rather than
/// carried here.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    length: u8,
    address: u64,
    payload: [u8; MAX_PAYLOAD_SIZE],
}

impl Packet {
    /// Wrap an address and body. Fails with `InvalidArgument` when the body
    /// exceeds [`MAX_PAYLOAD_SIZE`](crate::MAX_PAYLOAD_SIZE).
    pub fn new(address: u64, body: &[u8]) -> Result<Packet> {
        if body.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidArgument);
        }
        Ok(Packet::from_parts(address, body))
    }

    /// Length already validated by the caller.
    pub(crate) fn from_parts(address: u64, body: &[u8]) -> Packet {
        let mut payload = [0u8; MAX_PAYLOAD_SIZE];
        payload[..body.len()].copy_from_slice(body);
        Packet {
            length: body.len() as u8,
            address,
            payload,
        }
    }

    /// Body length in bytes, `0..=MAX_PAYLOAD_SIZE`.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The appliance address, little-endian on the wire.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// The body bytes (message type plus payload, in either discipline).
    pub fn body(&self) -> &[u8] {
        &self.payload[..self.length as usize]
    }

    /// The message type, read from the body head without decoding the rest.
    /// `FramingError` if the body is empty or starts with neither a CBOR
    /// two-element array nor a fixed-layout type byte.
    pub fn msg_type(&self) -> Result<MsgType> {
        payload::peek_msg_type(self.body())
    }
}

// stale bytes past `length` must not affect comparisons
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.body() == other.body()
    }
}

impl Eq for Packet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_length_limited() {
        let packet = Packet::new(7, &[1, 2, 3]).unwrap();
        assert_eq!(packet.length(), 3);
        assert_eq!(packet.address(), 7);
        assert_eq!(packet.body(), [1, 2, 3]);
    }

    #[test]
    fn oversize_body_rejected() {
        let body = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Packet::new(0, &body), Err(Error::InvalidArgument));
        assert!(Packet::new(0, &body[..MAX_PAYLOAD_SIZE]).is_ok());
    }

    #[test]
    fn equality_ignores_stale_tail() {
        let a = Packet::from_parts(1, &[0x82, 0x18, 0x2F, 0xF6]);
        let mut b = a;
        b.payload[10] = 0xAA; // past the body
        assert_eq!(a, b);

        let c = Packet::from_parts(2, &[0x82, 0x18, 0x2F, 0xF6]);
        assert_ne!(a, c);
    }
}
