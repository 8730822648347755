//! Control command payloads (`0x20..=0x25`).

use crate::message;
use crate::payload::cbor::{BodyWriter, MapReader};
use crate::{Error, Result};

/// STATE_COMMAND (`0x20`): request a mode change. `mode` carries a
/// [`Mode`](crate::message::Mode) value; the parameter is the FAN target RPM
/// and is meaningless for the other modes.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateCommand {
    pub mode: u8,
    pub parameter: Option<i32>,
}

impl StateCommand {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1 + self.parameter.is_some() as u64;
        writer.begin_map(message::STATE_COMMAND, entries)?;
        writer.key_u8(0, self.mode)?;
        if let Some(value) = self.parameter {
            writer.key_i32(1, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<StateCommand> {
        let mut mode = None;
        let mut parameter = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => mode = Some(map.u8()?),
                1 => parameter = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(StateCommand {
            mode: mode.ok_or(Error::InvalidArgument)?,
            parameter,
        })
    }
}

/// MOTOR_COMMAND (`0x21`): set one motor's target RPM.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub motor: u8,
    pub target_rpm: i32,
}

impl MotorCommand {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::MOTOR_COMMAND, 2)?;
        writer.key_u8(0, self.motor)?;
        writer.key_i32(1, self.target_rpm)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<MotorCommand> {
        let mut motor = None;
        let mut target_rpm = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => motor = Some(map.u8()?),
                1 => target_rpm = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(MotorCommand {
            motor: motor.ok_or(Error::InvalidArgument)?,
            target_rpm: target_rpm.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// PUMP_COMMAND (`0x22`): set one pump's pulse interval.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PumpCommand {
    pub pump: u8,
    pub rate_ms: i32,
}

impl PumpCommand {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::PUMP_COMMAND, 2)?;
        writer.key_u8(0, self.pump)?;
        writer.key_i32(1, self.rate_ms)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<PumpCommand> {
        let mut pump = None;
        let mut rate_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => pump = Some(map.u8()?),
                1 => rate_ms = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(PumpCommand {
            pump: pump.ok_or(Error::InvalidArgument)?,
            rate_ms: rate_ms.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// GLOW_COMMAND (`0x23`): fire one glow plug for `duration_ms`.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlowCommand {
    pub glow: u8,
    pub duration_ms: i32,
}

impl GlowCommand {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::GLOW_COMMAND, 2)?;
        writer.key_u8(0, self.glow)?;
        writer.key_i32(1, self.duration_ms)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<GlowCommand> {
        let mut glow = None;
        let mut duration_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => glow = Some(map.u8()?),
                1 => duration_ms = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(GlowCommand {
            glow: glow.ok_or(Error::InvalidArgument)?,
            duration_ms: duration_ms.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// TEMP_COMMAND (`0x24`): thermometer control. `command` selects the
/// operation; a PID attach names the driven motor, a setpoint change carries
/// the new target temperature.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempCommand {
    pub thermometer: u8,
    pub command: u8,
    pub motor: Option<u8>,
    pub setpoint: Option<f64>,
}

impl TempCommand {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 2 + self.motor.is_some() as u64 + self.setpoint.is_some() as u64;
        writer.begin_map(message::TEMP_COMMAND, entries)?;
        writer.key_u8(0, self.thermometer)?;
        writer.key_u8(1, self.command)?;
        if let Some(value) = self.motor {
            writer.key_u8(2, value)?;
        }
        if let Some(value) = self.setpoint {
            writer.key_f64(3, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<TempCommand> {
        let mut thermometer = None;
        let mut command = None;
        let mut motor = None;
        let mut setpoint = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => thermometer = Some(map.u8()?),
                1 => command = Some(map.u8()?),
                2 => motor = Some(map.u8()?),
                3 => setpoint = Some(map.f64()?),
                _ => map.skip_value()?,
            }
        }
        Ok(TempCommand {
            thermometer: thermometer.ok_or(Error::InvalidArgument)?,
            command: command.ok_or(Error::InvalidArgument)?,
            motor,
            setpoint,
        })
    }
}

/// SEND_TELEMETRY (`0x25`): one-shot request for a telemetry message.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendTelemetry {
    pub telemetry_type: u8,
    pub parameter: Option<u32>,
}

impl SendTelemetry {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1 + self.parameter.is_some() as u64;
        writer.begin_map(message::SEND_TELEMETRY, entries)?;
        writer.key_u8(0, self.telemetry_type)?;
        if let Some(value) = self.parameter {
            writer.key_u32(1, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<SendTelemetry> {
        let mut telemetry_type = None;
        let mut parameter = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => telemetry_type = Some(map.u8()?),
                1 => parameter = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(SendTelemetry {
            telemetry_type: telemetry_type.ok_or(Error::InvalidArgument)?,
            parameter,
        })
    }
}
