//! The closed catalog of Helios message types and the semantic enums the
//! appliances exchange through them.

/// Message type discriminant carried in every frame body. The leading nibble
/// selects the band (configuration, control, telemetry, error report).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MsgType(pub u8);

impl From<u8> for MsgType {
    fn from(t: u8) -> Self {
        MsgType(t)
    }
}

impl From<MsgType> for u8 {
    fn from(t: MsgType) -> Self {
        t.0
    }
}

/// Message band, derived from the type's leading nibble.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// Controller → appliance setup (`0x10..=0x1F`).
    Configuration,
    /// Controller → appliance runtime commands (`0x20..=0x2F`).
    Control,
    /// Appliance → controller data (`0x30..=0x3F`).
    Telemetry,
    /// Bidirectional error reports (`0xE0..=0xEF`).
    Error,
}

impl MsgType {
    pub fn band(self) -> Option<Band> {
        match self.0 >> 4 {
            0x1 => Some(Band::Configuration),
            0x2 => Some(Band::Control),
            0x3 => Some(Band::Telemetry),
            0xE => Some(Band::Error),
            _ => None,
        }
    }

    /// Whether this value names a catalog entry. The frame layer never gates
    /// on this; it exists so callers can raise `InvalidMessage` themselves.
    pub fn is_known(self) -> bool {
        matches!(
            self,
            MOTOR_CONFIG
                | PUMP_CONFIG
                | TEMP_CONFIG
                | GLOW_CONFIG
                | DATA_SUBSCRIBE
                | DATA_UNSUBSCRIBE
                | TELEMETRY_CONFIG
                | TIMEOUT_CONFIG
                | DISCOVERY_REQUEST
                | STATE_COMMAND
                | MOTOR_COMMAND
                | PUMP_COMMAND
                | GLOW_COMMAND
                | TEMP_COMMAND
                | SEND_TELEMETRY
                | PING_REQUEST
                | STATE_DATA
                | MOTOR_DATA
                | PUMP_DATA
                | GLOW_DATA
                | TEMP_DATA
                | TELEMETRY_BUNDLE
                | DEVICE_ANNOUNCE
                | PING_RESPONSE
                | ERROR_INVALID_MSG
                | ERROR_CRC_FAIL
                | ERROR_INVALID_CMD
                | ERROR_STATE_REJECT
        )
    }
}

/// Per-motor PID and PWM limits. All tuning keys are optional; absent keys
/// leave the appliance's current setting untouched.
pub const MOTOR_CONFIG: MsgType = MsgType(0x10);
/// Dosing pump rate window.
pub const PUMP_CONFIG: MsgType = MsgType(0x11);
/// Thermometer PID tuning.
pub const TEMP_CONFIG: MsgType = MsgType(0x12);
/// Glow plug burn limit.
pub const GLOW_CONFIG: MsgType = MsgType(0x13);
/// Subscribe to telemetry from an appliance address.
pub const DATA_SUBSCRIBE: MsgType = MsgType(0x14);
/// Drop a telemetry subscription.
pub const DATA_UNSUBSCRIBE: MsgType = MsgType(0x15);
/// Enable/disable periodic telemetry and set its broadcast interval.
pub const TELEMETRY_CONFIG: MsgType = MsgType(0x16);
/// Enable/disable the link watchdog and set its interval.
pub const TIMEOUT_CONFIG: MsgType = MsgType(0x17);
/// Ask every listening appliance to announce itself. Empty payload.
pub const DISCOVERY_REQUEST: MsgType = MsgType(0x1F);

/// Request a mode change (see [`Mode`]); the optional parameter carries the
/// target RPM for FAN mode.
pub const STATE_COMMAND: MsgType = MsgType(0x20);
/// Set a motor's target RPM.
pub const MOTOR_COMMAND: MsgType = MsgType(0x21);
/// Set a pump's pulse interval.
pub const PUMP_COMMAND: MsgType = MsgType(0x22);
/// Fire a glow plug for a bounded duration.
pub const GLOW_COMMAND: MsgType = MsgType(0x23);
/// Thermometer control (setpoint changes, PID attach to a motor).
pub const TEMP_COMMAND: MsgType = MsgType(0x24);
/// One-shot request for a telemetry message of the given kind.
pub const SEND_TELEMETRY: MsgType = MsgType(0x25);
/// Liveness probe. Empty payload; answered by [`PING_RESPONSE`].
pub const PING_REQUEST: MsgType = MsgType(0x2F);

/// Appliance state-machine snapshot.
pub const STATE_DATA: MsgType = MsgType(0x30);
/// Per-motor sample.
pub const MOTOR_DATA: MsgType = MsgType(0x31);
/// Per-pump event.
pub const PUMP_DATA: MsgType = MsgType(0x32);
/// Per-glow-plug state change.
pub const GLOW_DATA: MsgType = MsgType(0x33);
/// Per-thermometer sample.
pub const TEMP_DATA: MsgType = MsgType(0x34);
/// Aggregated motor and thermometer samples in one fixed-layout body; the
/// only catalog entry that does not use the schema-driven payload form.
pub const TELEMETRY_BUNDLE: MsgType = MsgType(0x35);
/// Discovery answer carrying device type, capabilities and firmware version.
pub const DEVICE_ANNOUNCE: MsgType = MsgType(0x36);
/// Answer to [`PING_REQUEST`] with the appliance uptime.
pub const PING_RESPONSE: MsgType = MsgType(0x3F);

/// Peer sent a type outside the catalog.
pub const ERROR_INVALID_MSG: MsgType = MsgType(0xE0);
/// Peer frame failed CRC validation; payload echoes both CRC values.
pub const ERROR_CRC_FAIL: MsgType = MsgType(0xE1);
/// Command was understood but cannot be executed.
pub const ERROR_INVALID_CMD: MsgType = MsgType(0xE2);
/// Command rejected in the current appliance state.
pub const ERROR_STATE_REJECT: MsgType = MsgType(0xE3);

/// Operating mode requested through [`STATE_COMMAND`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Idle = 0x00,
    Fan = 0x01,
    Heat = 0x02,
    Emergency = 0xFF,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Fan => "FAN",
            Mode::Heat => "HEAT",
            Mode::Emergency => "EMERGENCY",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0x00 => Ok(Mode::Idle),
            0x01 => Ok(Mode::Fan),
            0x02 => Ok(Mode::Heat),
            0xFF => Ok(Mode::Emergency),
            other => Err(other),
        }
    }
}

/// Appliance state machine position reported through [`STATE_DATA`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum State {
    Initializing = 0x00,
    Idle = 0x01,
    Blowing = 0x02,
    Preheat = 0x03,
    PreheatStage2 = 0x04,
    Heating = 0x05,
    Cooling = 0x06,
    Error = 0x07,
    EStop = 0x08,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Initializing => "INITIALIZING",
            State::Idle => "IDLE",
            State::Blowing => "BLOWING",
            State::Preheat => "PREHEAT",
            State::PreheatStage2 => "PREHEAT_STAGE_2",
            State::Heating => "HEATING",
            State::Cooling => "COOLING",
            State::Error => "ERROR",
            State::EStop => "E_STOP",
        }
    }
}

impl TryFrom<u8> for State {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0x00 => Ok(State::Initializing),
            0x01 => Ok(State::Idle),
            0x02 => Ok(State::Blowing),
            0x03 => Ok(State::Preheat),
            0x04 => Ok(State::PreheatStage2),
            0x05 => Ok(State::Heating),
            0x06 => Ok(State::Cooling),
            0x07 => Ok(State::Error),
            0x08 => Ok(State::EStop),
            other => Err(other),
        }
    }
}

/// Appliance fault codes reported through [`STATE_DATA`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    None = 0x00,
    PreheatFailed = 0x01,
    FlameOut = 0x02,
    Overheat = 0x03,
    PumpFault = 0x04,
    Timeout = 0x05,
}

impl TryFrom<u8> for ErrorCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0x00 => Ok(ErrorCode::None),
            0x01 => Ok(ErrorCode::PreheatFailed),
            0x02 => Ok(ErrorCode::FlameOut),
            0x03 => Ok(ErrorCode::Overheat),
            0x04 => Ok(ErrorCode::PumpFault),
            0x05 => Ok(ErrorCode::Timeout),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_leading_nibble() {
        assert_eq!(MOTOR_CONFIG.band(), Some(Band::Configuration));
        assert_eq!(PING_REQUEST.band(), Some(Band::Control));
        assert_eq!(TELEMETRY_BUNDLE.band(), Some(Band::Telemetry));
        assert_eq!(ERROR_CRC_FAIL.band(), Some(Band::Error));
        assert_eq!(MsgType(0x40).band(), None);
    }

    #[test]
    fn catalog_membership() {
        assert!(PING_REQUEST.is_known());
        assert!(ERROR_STATE_REJECT.is_known());
        assert!(!MsgType(0x1E).is_known());
        assert!(!MsgType(0xE4).is_known());
        assert!(!MsgType(0x00).is_known());
    }

    #[test]
    fn mode_round_trip() {
        for mode in [Mode::Idle, Mode::Fan, Mode::Heat, Mode::Emergency] {
            assert_eq!(Mode::try_from(mode as u8), Ok(mode));
        }
        assert_eq!(Mode::try_from(0x03), Err(0x03));
        assert_eq!(Mode::Emergency.name(), "EMERGENCY");
    }

    #[test]
    fn state_values_match_wire() {
        assert_eq!(State::EStop as u8, 0x08);
        assert_eq!(State::try_from(0x09), Err(0x09));
        assert_eq!(State::PreheatStage2.name(), "PREHEAT_STAGE_2");
    }
}
