//! Configuration command payloads (`0x10..=0x17`, `0x1F`).
//!
//! Every optional tuning key that is absent on the wire leaves the
//! appliance's current setting untouched, so the structs model absence
//! explicitly instead of sending sentinel values.

use crate::message;
use crate::payload::cbor::{BodyWriter, MapReader};
use crate::{Error, Result};

/// MOTOR_CONFIG (`0x10`): PID and PWM limits for one motor.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    pub motor: u8,
    pub pwm_period: Option<u32>,
    pub pid_kp: Option<f64>,
    pub pid_ki: Option<f64>,
    pub pid_kd: Option<f64>,
    pub max_rpm: Option<i32>,
    pub min_rpm: Option<i32>,
    pub min_pwm_duty: Option<u32>,
}

impl MotorConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1
            + self.pwm_period.is_some() as u64
            + self.pid_kp.is_some() as u64
            + self.pid_ki.is_some() as u64
            + self.pid_kd.is_some() as u64
            + self.max_rpm.is_some() as u64
            + self.min_rpm.is_some() as u64
            + self.min_pwm_duty.is_some() as u64;
        writer.begin_map(message::MOTOR_CONFIG, entries)?;
        writer.key_u8(0, self.motor)?;
        if let Some(value) = self.pwm_period {
            writer.key_u32(1, value)?;
        }
        if let Some(value) = self.pid_kp {
            writer.key_f64(2, value)?;
        }
        if let Some(value) = self.pid_ki {
            writer.key_f64(3, value)?;
        }
        if let Some(value) = self.pid_kd {
            writer.key_f64(4, value)?;
        }
        if let Some(value) = self.max_rpm {
            writer.key_i32(5, value)?;
        }
        if let Some(value) = self.min_rpm {
            writer.key_i32(6, value)?;
        }
        if let Some(value) = self.min_pwm_duty {
            writer.key_u32(7, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<MotorConfig> {
        let mut motor = None;
        let mut pwm_period = None;
        let mut pid_kp = None;
        let mut pid_ki = None;
        let mut pid_kd = None;
        let mut max_rpm = None;
        let mut min_rpm = None;
        let mut min_pwm_duty = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => motor = Some(map.u8()?),
                1 => pwm_period = Some(map.u32()?),
                2 => pid_kp = Some(map.f64()?),
                3 => pid_ki = Some(map.f64()?),
                4 => pid_kd = Some(map.f64()?),
                5 => max_rpm = Some(map.i32()?),
                6 => min_rpm = Some(map.i32()?),
                7 => min_pwm_duty = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(MotorConfig {
            motor: motor.ok_or(Error::InvalidArgument)?,
            pwm_period,
            pid_kp,
            pid_ki,
            pid_kd,
            max_rpm,
            min_rpm,
            min_pwm_duty,
        })
    }
}

/// PUMP_CONFIG (`0x11`): dosing rate window for one pump.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PumpConfig {
    pub pump: u8,
    pub min_rate_ms: Option<u32>,
    pub max_rate_ms: Option<u32>,
}

impl PumpConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1 + self.min_rate_ms.is_some() as u64 + self.max_rate_ms.is_some() as u64;
        writer.begin_map(message::PUMP_CONFIG, entries)?;
        writer.key_u8(0, self.pump)?;
        if let Some(value) = self.min_rate_ms {
            writer.key_u32(1, value)?;
        }
        if let Some(value) = self.max_rate_ms {
            writer.key_u32(2, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<PumpConfig> {
        let mut pump = None;
        let mut min_rate_ms = None;
        let mut max_rate_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => pump = Some(map.u8()?),
                1 => min_rate_ms = Some(map.u32()?),
                2 => max_rate_ms = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(PumpConfig {
            pump: pump.ok_or(Error::InvalidArgument)?,
            min_rate_ms,
            max_rate_ms,
        })
    }
}

/// TEMP_CONFIG (`0x12`): PID tuning for one thermometer.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempConfig {
    pub thermometer: u8,
    pub pid_kp: Option<f64>,
    pub pid_ki: Option<f64>,
    pub pid_kd: Option<f64>,
}

impl TempConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1
            + self.pid_kp.is_some() as u64
            + self.pid_ki.is_some() as u64
            + self.pid_kd.is_some() as u64;
        writer.begin_map(message::TEMP_CONFIG, entries)?;
        writer.key_u8(0, self.thermometer)?;
        if let Some(value) = self.pid_kp {
            writer.key_f64(1, value)?;
        }
        if let Some(value) = self.pid_ki {
            writer.key_f64(2, value)?;
        }
        if let Some(value) = self.pid_kd {
            writer.key_f64(3, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<TempConfig> {
        let mut thermometer = None;
        let mut pid_kp = None;
        let mut pid_ki = None;
        let mut pid_kd = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => thermometer = Some(map.u8()?),
                1 => pid_kp = Some(map.f64()?),
                2 => pid_ki = Some(map.f64()?),
                3 => pid_kd = Some(map.f64()?),
                _ => map.skip_value()?,
            }
        }
        Ok(TempConfig {
            thermometer: thermometer.ok_or(Error::InvalidArgument)?,
            pid_kp,
            pid_ki,
            pid_kd,
        })
    }
}

/// GLOW_CONFIG (`0x13`): burn duration limit for one glow plug.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlowConfig {
    pub glow: u8,
    pub max_duration_ms: Option<u32>,
}

impl GlowConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        let entries = 1 + self.max_duration_ms.is_some() as u64;
        writer.begin_map(message::GLOW_CONFIG, entries)?;
        writer.key_u8(0, self.glow)?;
        if let Some(value) = self.max_duration_ms {
            writer.key_u32(1, value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<GlowConfig> {
        let mut glow = None;
        let mut max_duration_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => glow = Some(map.u8()?),
                1 => max_duration_ms = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(GlowConfig {
            glow: glow.ok_or(Error::InvalidArgument)?,
            max_duration_ms,
        })
    }
}

/// DATA_SUBSCRIBE (`0x14`): start forwarding telemetry from `address`.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataSubscribe {
    pub address: u64,
}

impl DataSubscribe {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::DATA_SUBSCRIBE, 1)?;
        writer.key_u64(0, self.address)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<DataSubscribe> {
        let mut address = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => address = Some(map.u64()?),
                _ => map.skip_value()?,
            }
        }
        Ok(DataSubscribe {
            address: address.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// DATA_UNSUBSCRIBE (`0x15`): stop forwarding telemetry from `address`.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataUnsubscribe {
    pub address: u64,
}

impl DataUnsubscribe {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::DATA_UNSUBSCRIBE, 1)?;
        writer.key_u64(0, self.address)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<DataUnsubscribe> {
        let mut address = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => address = Some(map.u64()?),
                _ => map.skip_value()?,
            }
        }
        Ok(DataUnsubscribe {
            address: address.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// TELEMETRY_CONFIG (`0x16`): periodic telemetry switch and interval.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub interval_ms: u32,
}

impl TelemetryConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::TELEMETRY_CONFIG, 2)?;
        writer.key_bool(0, self.enabled)?;
        writer.key_u32(1, self.interval_ms)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<TelemetryConfig> {
        let mut enabled = None;
        let mut interval_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => enabled = Some(map.bool()?),
                1 => interval_ms = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(TelemetryConfig {
            enabled: enabled.ok_or(Error::InvalidArgument)?,
            interval_ms: interval_ms.ok_or(Error::InvalidArgument)?,
        })
    }
}

/// TIMEOUT_CONFIG (`0x17`): link watchdog switch and interval.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeoutConfig {
    pub enabled: bool,
    pub timeout_ms: u32,
}

impl TimeoutConfig {
    pub(crate) fn encode(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        writer.begin_map(message::TIMEOUT_CONFIG, 2)?;
        writer.key_bool(0, self.enabled)?;
        writer.key_u32(1, self.timeout_ms)
    }

    pub(crate) fn decode(map: &mut MapReader<'_>) -> Result<TimeoutConfig> {
        let mut enabled = None;
        let mut timeout_ms = None;
        while let Some(key) = map.next_key()? {
            match key {
                0 => enabled = Some(map.bool()?),
                1 => timeout_ms = Some(map.u32()?),
                _ => map.skip_value()?,
            }
        }
        Ok(TimeoutConfig {
            enabled: enabled.ok_or(Error::InvalidArgument)?,
            timeout_ms: timeout_ms.ok_or(Error::InvalidArgument)?,
        })
    }
}
