//! Error report payloads (`0xE0..=0xE3`). An appliance sends these back to
//! the controller when a received frame or command cannot be acted on;
//! generating them is the device's job, the codec only provides the shapes.

use crate::message;
use crate::payload::cbor::{BodyWriter, MapReader};
use crate::{Error, Result};

/// ERROR_INVALID_MSG (`0xE0`): echoes the unrecognized message type.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidMessageReport {
    pub msg_type: u8,
}

impl InvalidMessageReport {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::ERROR_INVALID_MSG, 1)?;
        writer.key_u8(0, self.msg_type)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<InvalidMessageReport> {
        let mut msg_type = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => msg_type = Some(map.u8()?),
                _ => map.skip_value()?,
            }
        }
        Ok(InvalidMessageReport {
            msg_type: msg_type.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// ERROR_CRC_FAIL (`0xE1`): both sides of the failed comparison, for link
/// diagnostics.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrcFailReport {
    pub received: u16,
    pub computed: u16,
}

impl CrcFailReport {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::ERROR_CRC_FAIL, 2)?;
        writer.key_u16(0, self.received)?;
        writer.key_u16(1, self.computed)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<CrcFailReport> {
        let mut received = None;
        let mut computed = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => received = Some(map.u16()?),
                1 => computed = Some(map.u16()?),
                _ => map.skip_value()?,
            }
        }
        Ok(CrcFailReport {
            received: received.ok_or(Error::InvalidArgument)?,
            computed: computed.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// ERROR_INVALID_CMD (`0xE2`): the command that could not be executed.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidCommandReport {
    pub command: i32,
}

impl InvalidCommandReport {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::ERROR_INVALID_CMD, 1)?;
        writer.key_i32(0, self.command)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<InvalidCommandReport> {
        let mut command = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => command = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(InvalidCommandReport {
            command: command.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// ERROR_STATE_REJECT (`0xE3`): the appliance state that refused the
/// command.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateRejectReport {
    pub state: u8,
}

impl StateRejectReport {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::ERROR_STATE_REJECT, 1)?;
        writer.key_u8(0, self.state)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<StateRejectReport> {
        let mut state = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => state = Some(map.u8()?),
                _ => map.skip_value()?,
            }
        }
        Ok(StateRejectReport {
            state: state.ok_or(Error::InvalidArgument)?,
        })
    }
}
