//! TELEMETRY_BUNDLE (`0x35`): the one fixed-layout body in the catalog.
//!
//! Layout after the type byte, all fields little-endian:
//! `state(4) || error(1) || motor_count(1) || temp_count(1)` followed by
//! `motor_count` motor records and `temp_count` temperature records. Fields
//! are serialized one by one; the body is never a reinterpreted struct
//! image.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result, MAX_PAYLOAD_SIZE};

/// Most motors one bundle can carry.
pub const MAX_MOTORS: usize = 5;
/// Most thermometers one bundle can carry.
pub const MAX_TEMPERATURES: usize = 4;

const HEADER_SIZE: usize = 4 + 1 + 1 + 1;
const MOTOR_RECORD_SIZE: usize = 4 * 4;
const TEMP_RECORD_SIZE: usize = 8;

/// One motor sample inside a bundle.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorSample {
    pub rpm: i32,
    pub target_rpm: i32,
    pub pwm_duty: i32,
    pub pwm_period: i32,
}

/// One thermometer sample inside a bundle.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempSample {
    pub temperature: f64,
}

/// Aggregated appliance telemetry. `state` and `error` carry
/// [`State`](crate::message::State) and [`ErrorCode`](crate::message::ErrorCode)
/// values.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryBundle {
    pub state: u32,
    pub error: u8,
    motors: [MotorSample; MAX_MOTORS],
    motor_count: u8,
    temperatures: [TempSample; MAX_TEMPERATURES],
    temp_count: u8,
}

impl TelemetryBundle {
    /// Assemble a bundle. Fails with `InvalidArgument` when either slice is
    /// empty, exceeds its maximum, or the resulting body would not fit a
    /// frame (a full complement of motors and thermometers does not).
    pub fn new(
        state: u32,
        error: u8,
        motors: &[MotorSample],
        temperatures: &[TempSample],
    ) -> Result<TelemetryBundle> {
        if motors.is_empty() || motors.len() > MAX_MOTORS {
            return Err(Error::InvalidArgument);
        }
        if temperatures.is_empty() || temperatures.len() > MAX_TEMPERATURES {
            return Err(Error::InvalidArgument);
        }
        if 1 + record_len(motors.len(), temperatures.len()) > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidArgument);
        }
        let mut bundle = TelemetryBundle {
            state,
            error,
            motors: [MotorSample::default(); MAX_MOTORS],
            motor_count: motors.len() as u8,
            temperatures: [TempSample::default(); MAX_TEMPERATURES],
            temp_count: temperatures.len() as u8,
        };
        bundle.motors[..motors.len()].copy_from_slice(motors);
        bundle.temperatures[..temperatures.len()].copy_from_slice(temperatures);
        Ok(bundle)
    }

    pub fn motors(&self) -> &[MotorSample] {
        &self.motors[..self.motor_count as usize]
    }

    pub fn temperatures(&self) -> &[TempSample] {
        &self.temperatures[..self.temp_count as usize]
    }

    /// Body size including the leading type byte.
    pub fn body_len(&self) -> usize {
        1 + record_len(self.motor_count as usize, self.temp_count as usize)
    }

    pub(crate) fn encode_record(&self, out: &mut [u8]) -> Result<usize> {
        let needed = record_len(self.motor_count as usize, self.temp_count as usize);
        if out.len() < needed {
            return Err(Error::BufferOverflow);
        }
        LittleEndian::write_u32(&mut out[0..], self.state);
        out[4] = self.error;
        out[5] = self.motor_count;
        out[6] = self.temp_count;
        let mut idx = HEADER_SIZE;
        for motor in self.motors() {
            LittleEndian::write_i32(&mut out[idx..], motor.rpm);
            LittleEndian::write_i32(&mut out[idx + 4..], motor.target_rpm);
            LittleEndian::write_i32(&mut out[idx + 8..], motor.pwm_duty);
            LittleEndian::write_i32(&mut out[idx + 12..], motor.pwm_period);
            idx += MOTOR_RECORD_SIZE;
        }
        for temp in self.temperatures() {
            LittleEndian::write_f64(&mut out[idx..], temp.temperature);
            idx += TEMP_RECORD_SIZE;
        }
        Ok(idx)
    }

    /// Decode the record following the type byte. The record length must
    /// match the embedded counts exactly.
    pub(crate) fn decode_record(record: &[u8]) -> Result<TelemetryBundle> {
        if record.len() < HEADER_SIZE {
            return Err(Error::InvalidArgument);
        }
        let state = LittleEndian::read_u32(&record[0..]);
        let error = record[4];
        let motor_count = record[5] as usize;
        let temp_count = record[6] as usize;
        if motor_count == 0 || motor_count > MAX_MOTORS {
            return Err(Error::InvalidArgument);
        }
        if temp_count == 0 || temp_count > MAX_TEMPERATURES {
            return Err(Error::InvalidArgument);
        }
        if record.len() != record_len(motor_count, temp_count) {
            return Err(Error::InvalidArgument);
        }

        let mut motors = [MotorSample::default(); MAX_MOTORS];
        let mut idx = HEADER_SIZE;
        for motor in motors.iter_mut().take(motor_count) {
            motor.rpm = LittleEndian::read_i32(&record[idx..]);
            motor.target_rpm = LittleEndian::read_i32(&record[idx + 4..]);
            motor.pwm_duty = LittleEndian::read_i32(&record[idx + 8..]);
            motor.pwm_period = LittleEndian::read_i32(&record[idx + 12..]);
            idx += MOTOR_RECORD_SIZE;
        }
        let mut temperatures = [TempSample::default(); MAX_TEMPERATURES];
        for temp in temperatures.iter_mut().take(temp_count) {
            temp.temperature = LittleEndian::read_f64(&record[idx..]);
            idx += TEMP_RECORD_SIZE;
        }

        Ok(TelemetryBundle {
            state,
            error,
            motors,
            motor_count: motor_count as u8,
            temperatures,
            temp_count: temp_count as u8,
        })
    }
}

fn record_len(motor_count: usize, temp_count: usize) -> usize {
    HEADER_SIZE + motor_count * MOTOR_RECORD_SIZE + temp_count * TEMP_RECORD_SIZE
}

// unused array slots must not affect comparisons
impl PartialEq for TelemetryBundle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.error == other.error
            && self.motors() == other.motors()
            && self.temperatures() == other.temperatures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor(rpm: i32) -> MotorSample {
        MotorSample {
            rpm,
            target_rpm: rpm + 100,
            pwm_duty: 512,
            pwm_period: 1024,
        }
    }

    #[test]
    fn record_round_trip() {
        let motors = [motor(1000), motor(2000), motor(3000)];
        let temps = [TempSample { temperature: 81.5 }, TempSample { temperature: -12.25 }];
        let bundle = TelemetryBundle::new(5, 0, &motors, &temps).unwrap();

        let mut record = [0u8; MAX_PAYLOAD_SIZE];
        let used = bundle.encode_record(&mut record).unwrap();
        assert_eq!(used, 7 + 3 * 16 + 2 * 8);

        let decoded = TelemetryBundle::decode_record(&record[..used]).unwrap();
        assert_eq!(decoded, bundle);
        assert_eq!(decoded.motors(), motors);
        assert_eq!(decoded.temperatures(), temps);
    }

    #[test]
    fn zero_counts_rejected() {
        let motors = [motor(1)];
        let temps = [TempSample { temperature: 20.0 }];
        assert_eq!(
            TelemetryBundle::new(0, 0, &[], &temps).unwrap_err(),
            Error::InvalidArgument
        );
        assert_eq!(
            TelemetryBundle::new(0, 0, &motors, &[]).unwrap_err(),
            Error::InvalidArgument
        );
    }

    #[test]
    fn counts_over_maximum_rejected() {
        let motors = [motor(1); MAX_MOTORS + 1];
        let temps = [TempSample { temperature: 20.0 }];
        assert_eq!(
            TelemetryBundle::new(0, 0, &motors, &temps).unwrap_err(),
            Error::InvalidArgument
        );
        let temps_over = [TempSample { temperature: 20.0 }; MAX_TEMPERATURES + 1];
        assert_eq!(
            TelemetryBundle::new(0, 0, &motors[..1], &temps_over).unwrap_err(),
            Error::InvalidArgument
        );
    }

    #[test]
    fn oversize_body_rejected() {
        // 5 motors and 4 thermometers would need 120 body bytes
        let motors = [motor(1); MAX_MOTORS];
        let temps = [TempSample { temperature: 20.0 }; MAX_TEMPERATURES];
        assert_eq!(
            TelemetryBundle::new(0, 0, &motors, &temps).unwrap_err(),
            Error::InvalidArgument
        );
        // dropping one thermometer fits
        assert!(TelemetryBundle::new(0, 0, &motors, &temps[..3]).is_ok());
    }

    #[test]
    fn truncated_record_rejected() {
        let motors = [motor(1)];
        let temps = [TempSample { temperature: 20.0 }];
        let bundle = TelemetryBundle::new(1, 0, &motors, &temps).unwrap();
        let mut record = [0u8; 64];
        let used = bundle.encode_record(&mut record).unwrap();

        assert_eq!(
            TelemetryBundle::decode_record(&record[..used - 1]).unwrap_err(),
            Error::InvalidArgument
        );
        assert_eq!(
            TelemetryBundle::decode_record(&record[..3]).unwrap_err(),
            Error::InvalidArgument
        );
    }
}
