//! Frame assembly: `START | LEN | ADDR | BODY | CRC | END` with byte
//! stuffing applied to everything between the delimiters.

use byteorder::{ByteOrder, LittleEndian};
use crc16::{State, CCITT_FALSE};

use crate::stuff::Stuffer;
use crate::{Error, Packet, Result, END_BYTE, MAX_PAYLOAD_SIZE, MIN_PACKET_SIZE, START_BYTE};

/// Encode `packet` into `out`, returning the number of bytes written.
///
/// The CRC covers the unstuffed `LEN || ADDR || BODY` and is transmitted
/// big-endian. Every interior byte, `LEN` included, goes through the
/// stuffer; the delimiters never do. Fails with `InvalidArgument` when the
/// packet length is out of range or `out` cannot hold even a minimum frame,
/// and with `BufferOverflow` when stuffing outgrows `out`.
pub fn encode(packet: &Packet, out: &mut [u8]) -> Result<usize> {
    if packet.length() as usize > MAX_PAYLOAD_SIZE || out.len() < MIN_PACKET_SIZE {
        return Err(Error::InvalidArgument);
    }

    let mut address = [0u8; 8];
    LittleEndian::write_u64(&mut address, packet.address());

    let mut crc = State::<CCITT_FALSE>::new();
    crc.update(&[packet.length()]);
    crc.update(&address);
    crc.update(packet.body());
    let crc = crc.get();

    let mut stuffer = Stuffer::new(out);
    stuffer.raw(START_BYTE)?;
    stuffer.push(packet.length())?;
    for &byte in &address {
        stuffer.push(byte)?;
    }
    for &byte in packet.body() {
        stuffer.push(byte)?;
    }
    stuffer.push((crc >> 8) as u8)?;
    stuffer.push(crc as u8)?;
    stuffer.raw(END_BYTE)?;
    Ok(stuffer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{crc16, ESC_BYTE, MIN_PACKET_SIZE};

    #[test]
    fn empty_body_frame_layout() {
        let packet = Packet::new(0x0102030405060708, &[]).unwrap();
        let mut wire = [0u8; 32];
        let used = encode(&packet, &mut wire).unwrap();

        assert_eq!(used, MIN_PACKET_SIZE);
        assert_eq!(wire[0], START_BYTE);
        assert_eq!(wire[1], 0); // LEN
        assert_eq!(&wire[2..10], [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(wire[used - 1], END_BYTE);

        let expected = crc16(&wire[1..10]);
        assert_eq!(u16::from_be_bytes([wire[10], wire[11]]), expected);
    }

    #[test]
    fn reserved_address_bytes_are_stuffed() {
        let packet = Packet::new(u64::from_le_bytes([0x7E; 8]), &[0x01]).unwrap();
        let mut wire = [0u8; 48];
        let used = encode(&packet, &mut wire).unwrap();

        // 8 address bytes become 16, so the frame grows by 8
        assert_eq!(used, MIN_PACKET_SIZE + 1 + 8);
        assert_eq!(&wire[2..6], [ESC_BYTE, 0x5E, ESC_BYTE, 0x5E]);
        // no unescaped delimiter inside the frame
        assert!(!wire[1..used - 1].contains(&START_BYTE));
        assert!(!wire[1..used - 1].contains(&END_BYTE));
    }

    #[test]
    fn undersized_output_is_invalid_argument() {
        let packet = Packet::new(0, &[]).unwrap();
        let mut wire = [0u8; MIN_PACKET_SIZE - 1];
        assert_eq!(encode(&packet, &mut wire), Err(Error::InvalidArgument));
    }

    #[test]
    fn tight_output_overflows_when_stuffing() {
        // body of reserved bytes doubles in size on the wire
        let packet = Packet::new(0, &[0x7D; 8]).unwrap();
        let mut wire = [0u8; MIN_PACKET_SIZE + 8];
        assert_eq!(encode(&packet, &mut wire), Err(Error::BufferOverflow));

        let mut wire = [0u8; MIN_PACKET_SIZE + 16];
        assert!(encode(&packet, &mut wire).is_ok());
    }

    #[test]
    fn max_payload_encodes() {
        let body = [0x41u8; MAX_PAYLOAD_SIZE];
        let packet = Packet::new(0xAABB, &body).unwrap();
        let mut wire = [0u8; 2 * crate::MAX_PACKET_SIZE];
        let used = encode(&packet, &mut wire).unwrap();
        assert_eq!(used, MIN_PACKET_SIZE + MAX_PAYLOAD_SIZE);
    }
}
