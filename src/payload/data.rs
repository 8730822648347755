//! Telemetry payloads (`0x30..=0x34`, `0x36`, `0x3F`). The bundled form
//! (`0x35`) lives in [`bundle`](crate::payload::bundle).

use crate::message;
use crate::payload::cbor::{BodyWriter, MapReader};
use crate::{Error, Result};

/// STATE_DATA (`0x30`): appliance state-machine snapshot. `state` and
/// `error_code` carry [`State`](crate::message::State) and
/// [`ErrorCode`](crate::message::ErrorCode) values.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateData {
    pub ok: bool,
    pub error_code: u8,
    pub state: u8,
    pub timestamp: u32,
}

impl StateData {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::STATE_DATA, 4)?;
        writer.key_bool(0, self.ok)?;
        writer.key_u8(1, self.error_code)?;
        writer.key_u8(2, self.state)?;
        writer.key_u32(3, self.timestamp)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<StateData> {
        let mut ok = None;
        let mut error_code = None;
        let mut state = None;
        let mut timestamp = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => ok = Some(map.bool()?),
                1 => error_code = Some(map.u8()?),
                2 => state = Some(map.u8()?),
                3 => timestamp = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(StateData {
            ok: ok.ok_or(Error::InvalidArgument)?,
            error_code: error_code.ok_or(Error::InvalidArgument)?,
            state: state.ok_or(Error::InvalidArgument)?,
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// MOTOR_DATA (`0x31`): one motor sample. The PWM and limit keys are only
/// sent when the subscriber asked for the verbose form.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorData {
    pub motor: u8,
    pub timestamp: u32,
    pub rpm: i32,
    pub target_rpm: i32,
    pub pwm_duty: Option<i32>,
    pub pwm_period: Option<i32>,
    pub min_rpm: Option<u32>,
    pub max_rpm: Option<u32>,
}

impl MotorData {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 4
            + self.pwm_duty.is_some() as u64
            + self.pwm_period.is_some() as u64
            + self.min_rpm.is_some() as u64
            + self.max_rpm.is_some() as u64;
        writer.begin_map(message::MOTOR_DATA, entries)?;
        writer.key_u8(0, self.motor)?;
        writer.key_u32(1, self.timestamp)?;
        writer.key_i32(2, self.rpm)?;
        writer.key_i32(3, self.target_rpm)?;
        if let Some(value) = self.pwm_duty {
            writer.key_i32(4, value)?;
        }
        if let Some(value) = self.pwm_period {
            writer.key_i32(5, value)?;
        }
        if let Some(value) = self.min_rpm {
            writer.key_u32(6, value)?;
        }
        if let Some(value) = self.max_rpm {
            writer.key_u32(7, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<MotorData> {
        let mut motor = None;
        let mut timestamp = None;
        let mut rpm = None;
        let mut target_rpm = None;
        let mut pwm_duty = None;
        let mut pwm_period = None;
        let mut min_rpm = None;
        let mut max_rpm = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => motor = Some(map.u8()?),
                1 => timestamp = Some(map.u32()?),
                2 => rpm = Some(map.i32()?),
                3 => target_rpm = Some(map.i32()?),
                4 => pwm_duty = Some(map.i32()?),
                5 => pwm_period = Some(map.i32()?),
                6 => min_rpm = Some(map.u32()?),
                7 => max_rpm = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(MotorData {
            motor: motor.ok_or(Error::InvalidArgument)?,
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
            rpm: rpm.ok_or(Error::InvalidArgument)?,
            target_rpm: target_rpm.ok_or(Error::InvalidArgument)?,
            pwm_duty,
            pwm_period,
            min_rpm,
            max_rpm,
        })
    }
}

/// PUMP_DATA (`0x32`): one pump event, optionally with an event value.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PumpData {
    pub pump: u8,
    pub timestamp: u32,
    pub event: u8,
    pub value: Option<i32>,
}

impl PumpData {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 3 + self.value.is_some() as u64;
        writer.begin_map(message::PUMP_DATA, entries)?;
        writer.key_u8(0, self.pump)?;
        writer.key_u32(1, self.timestamp)?;
        writer.key_u8(2, self.event)?;
        if let Some(value) = self.value {
            writer.key_i32(3, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<PumpData> {
        let mut pump = None;
        let mut timestamp = None;
        let mut event = None;
        let mut value = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => pump = Some(map.u8()?),
                1 => timestamp = Some(map.u32()?),
                2 => event = Some(map.u8()?),
                3 => value = Some(map.i32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(PumpData {
            pump: pump.ok_or(Error::InvalidArgument)?,
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
            event: event.ok_or(Error::InvalidArgument)?,
            value,
        })
    }
}

/// GLOW_DATA (`0x33`): glow plug lit/unlit transition.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlowData {
    pub glow: u8,
    pub timestamp: u32,
    pub lit: bool,
}

impl GlowData {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::GLOW_DATA, 3)?;
        writer.key_u8(0, self.glow)?;
        writer.key_u32(1, self.timestamp)?;
        writer.key_bool(2, self.lit)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<GlowData> {
        let mut glow = None;
        let mut timestamp = None;
        let mut lit = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => glow = Some(map.u8()?),
                1 => timestamp = Some(map.u32()?),
                2 => lit = Some(map.bool()?),
                _ => map.skip_value()?,
            }
        }
        Ok(GlowData {
            glow: glow.ok_or(Error::InvalidArgument)?,
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
            lit: lit.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// TEMP_DATA (`0x34`): one thermometer sample with optional PID context.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempData {
    pub thermometer: u8,
    pub timestamp: u32,
    pub temperature: f64,
    pub pid_enabled: Option<bool>,
    pub pid_output_rpm: Option<i32>,
    pub pid_setpoint: Option<f64>,
}

impl TempData {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 3
            + self.pid_enabled.is_some() as u64
            + self.pid_output_rpm.is_some() as u64
            + self.pid_setpoint.is_some() as u64;
        writer.begin_map(message::TEMP_DATA, entries)?;
        writer.key_u8(0, self.thermometer)?;
        writer.key_u32(1, self.timestamp)?;
        writer.key_f64(2, self.temperature)?;
        if let Some(value) = self.pid_enabled {
            writer.key_bool(3, value)?;
        }
        if let Some(value) = self.pid_output_rpm {
            writer.key_i32(4, value)?;
        }
        if let Some(value) = self.pid_setpoint {
            writer.key_f64(5, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<TempData> {
        let mut thermometer = None;
        let mut timestamp = None;
        let mut temperature = None;
        let mut pid_enabled = None;
        let mut pid_output_rpm = None;
        let mut pid_setpoint = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => thermometer = Some(map.u8()?),
                1 => timestamp = Some(map.u32()?),
                2 => temperature = Some(map.f64()?),
                3 => pid_enabled = Some(map.bool()?),
                4 => pid_output_rpm = Some(map.i32()?),
                5 => pid_setpoint = Some(map.f64()?),
                _ => map.skip_value()?,
            }
        }
        Ok(TempData {
            thermometer: thermometer.ok_or(Error::InvalidArgument)?,
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
            temperature: temperature.ok_or(Error::InvalidArgument)?,
            pid_enabled,
            pid_output_rpm,
            pid_setpoint,
        })
    }
}

/// DEVICE_ANNOUNCE (`0x36`): discovery answer.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAnnounce {
    pub device_type: u8,
    pub capabilities: u8,
    pub version_major: u8,
    pub version_minor: u8,
}

impl DeviceAnnounce {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::DEVICE_ANNOUNCE, 4)?;
        writer.key_u8(0, self.device_type)?;
        writer.key_u8(1, self.capabilities)?;
        writer.key_u8(2, self.version_major)?;
        writer.key_u8(3, self.version_minor)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<DeviceAnnounce> {
        let mut device_type = None;
        let mut capabilities = None;
        let mut version_major = None;
        let mut version_minor = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => device_type = Some(map.u8()?),
                1 => capabilities = Some(map.u8()?),
                2 => version_major = Some(map.u8()?),
                3 => version_minor = Some(map.u8()?),
                _ => map.skip_value()?,
            }
        }
        Ok(DeviceAnnounce {
            device_type: device_type.ok_or(Error::InvalidArgument)?,
            capabilities: capabilities.ok_or(Error::InvalidArgument)?,
            version_major: version_major.ok_or(Error::InvalidArgument)?,
            version_minor: version_minor.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// PING_RESPONSE (`0x3F`): appliance uptime echo.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingResponse {
    pub timestamp: u32,
}

impl PingResponse {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::PING_RESPONSE, 1)?;
        writer.key_u32(0, self.timestamp)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<PingResponse> {
        let mut timestamp = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => timestamp = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(PingResponse {
            timestamp: timestamp.ok_or(Error::InvalidArgument)?,
        })
    }
}
