//! Typed encoding and decoding of frame bodies.
//!
//! The frame layer moves opaque bodies; this module gives each catalog entry
//! a typed shape. Schema-driven bodies are the CBOR pair `[msg_type,
//! map | nil]`; the telemetry bundle is a fixed-layout record behind a raw
//! type byte. The two are told apart by the first body byte: a CBOR
//! two-element array always starts `0x82`, which no fixed-layout type value
//! collides with.

pub mod bundle;
pub(crate) mod cbor;
pub mod command;
pub mod config;
pub mod data;
pub mod report;

pub use bundle::{MotorSample, TelemetryBundle, TempSample, MAX_MOTORS, MAX_TEMPERATURES};
pub use command::{GlowCommand, MotorCommand, PumpCommand, SendTelemetry, StateCommand, TempCommand};
pub use config::{
    DataSubscribe, DataUnsubscribe, GlowConfig, MotorConfig, PumpConfig, TelemetryConfig,
    TempConfig, TimeoutConfig,
};
pub use data::{DeviceAnnounce, GlowData, MotorData, PingResponse, PumpData, StateData, TempData};
pub use report::{CrcFailReport, InvalidCommandReport, InvalidMessageReport, StateRejectReport};

use crate::message::{self, MsgType};
use crate::payload::cbor::{BodyKind, BodyWriter};
use crate::{Error, Packet, Result, MAX_PAYLOAD_SIZE};

/// Read the message type from a body head without decoding the payload.
pub(crate) fn peek_msg_type(body: &[u8]) -> Result<MsgType> {
    match body.first() {
        Some(&cbor::ARRAY2_HEADER) => cbor::peek_type(body),
        Some(&value) if value == message::TELEMETRY_BUNDLE.0 => Ok(message::TELEMETRY_BUNDLE),
        _ => Err(Error::FramingError),
    }
}

/// One decoded (or to-be-encoded) catalog message.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    MotorConfig(MotorConfig),
    PumpConfig(PumpConfig),
    TempConfig(TempConfig),
    GlowConfig(GlowConfig),
    DataSubscribe(DataSubscribe),
    DataUnsubscribe(DataUnsubscribe),
    TelemetryConfig(TelemetryConfig),
    TimeoutConfig(TimeoutConfig),
    DiscoveryRequest,
    StateCommand(StateCommand),
    MotorCommand(MotorCommand),
    PumpCommand(PumpCommand),
    GlowCommand(GlowCommand),
    TempCommand(TempCommand),
    SendTelemetry(SendTelemetry),
    PingRequest,
    StateData(StateData),
    MotorData(MotorData),
    PumpData(PumpData),
    GlowData(GlowData),
    TempData(TempData),
    TelemetryBundle(TelemetryBundle),
    DeviceAnnounce(DeviceAnnounce),
    PingResponse(PingResponse),
    InvalidMessageReport(InvalidMessageReport),
    CrcFailReport(CrcFailReport),
    InvalidCommandReport(InvalidCommandReport),
    StateRejectReport(StateRejectReport),
}

impl Message {
    pub fn msg_type(&self) -> MsgType {
        match self {
            Message::MotorConfig(_) => message::MOTOR_CONFIG,
            Message::PumpConfig(_) => message::PUMP_CONFIG,
            Message::TempConfig(_) => message::TEMP_CONFIG,
            Message::GlowConfig(_) => message::GLOW_CONFIG,
            Message::DataSubscribe(_) => message::DATA_SUBSCRIBE,
            Message::DataUnsubscribe(_) => message::DATA_UNSUBSCRIBE,
            Message::TelemetryConfig(_) => message::TELEMETRY_CONFIG,
            Message::TimeoutConfig(_) => message::TIMEOUT_CONFIG,
            Message::DiscoveryRequest => message::DISCOVERY_REQUEST,
            Message::StateCommand(_) => message::STATE_COMMAND,
            Message::MotorCommand(_) => message::MOTOR_COMMAND,
            Message::PumpCommand(_) => message::PUMP_COMMAND,
            Message::GlowCommand(_) => message::GLOW_COMMAND,
            Message::TempCommand(_) => message::TEMP_COMMAND,
            Message::SendTelemetry(_) => message::SEND_TELEMETRY,
            Message::PingRequest => message::PING_REQUEST,
            Message::StateData(_) => message::STATE_DATA,
            Message::MotorData(_) => message::MOTOR_DATA,
            Message::PumpData(_) => message::PUMP_DATA,
            Message::GlowData(_) => message::GLOW_DATA,
            Message::TempData(_) => message::TEMP_DATA,
            Message::TelemetryBundle(_) => message::TELEMETRY_BUNDLE,
            Message::DeviceAnnounce(_) => message::DEVICE_ANNOUNCE,
            Message::PingResponse(_) => message::PING_RESPONSE,
            Message::InvalidMessageReport(_) => message::ERROR_INVALID_MSG,
            Message::CrcFailReport(_) => message::ERROR_CRC_FAIL,
            Message::InvalidCommandReport(_) => message::ERROR_INVALID_CMD,
            Message::StateRejectReport(_) => message::ERROR_STATE_REJECT,
        }
    }

    /// Serialize the body (type included) into `out`, returning the byte
    /// count.
    pub fn encode_body(&self, out: &mut [u8]) -> Result<usize> {
        match self {
            Message::TelemetryBundle(bundle) => {
                if out.is_empty() {
                    return Err(Error::BufferOverflow);
                }
                out[0] = message::TELEMETRY_BUNDLE.0;
                Ok(1 + bundle.encode_record(&mut out[1..])?)
            }
            _ => {
                let mut writer = BodyWriter::new(out);
                self.encode_schema(&mut writer)?;
                Ok(writer.finish())
            }
        }
    }

    fn encode_schema(&self, writer: &mut BodyWriter<'_>) -> Result<()> {
        match self {
            Message::MotorConfig(payload) => payload.encode(writer),
            Message::PumpConfig(payload) => payload.encode(writer),
            Message::TempConfig(payload) => payload.encode(writer),
            Message::GlowConfig(payload) => payload.encode(writer),
            Message::DataSubscribe(payload) => payload.encode(writer),
            Message::DataUnsubscribe(payload) => payload.encode(writer),
            Message::TelemetryConfig(payload) => payload.encode(writer),
            Message::TimeoutConfig(payload) => payload.encode(writer),
            Message::DiscoveryRequest => writer.unit(message::DISCOVERY_REQUEST),
            Message::StateCommand(payload) => payload.encode(writer),
            Message::MotorCommand(payload) => payload.encode(writer),
            Message::PumpCommand(payload) => payload.encode(writer),
            Message::GlowCommand(payload) => payload.encode(writer),
            Message::TempCommand(payload) => payload.encode(writer),
            Message::SendTelemetry(payload) => payload.encode(writer),
            Message::PingRequest => writer.unit(message::PING_REQUEST),
            Message::StateData(payload) => payload.encode(writer),
            Message::MotorData(payload) => payload.encode(writer),
            Message::PumpData(payload) => payload.encode(writer),
            Message::GlowData(payload) => payload.encode(writer),
            Message::TempData(payload) => payload.encode(writer),
            Message::DeviceAnnounce(payload) => payload.encode(writer),
            Message::PingResponse(payload) => payload.encode(writer),
            Message::InvalidMessageReport(payload) => payload.encode(writer),
            Message::CrcFailReport(payload) => payload.encode(writer),
            Message::InvalidCommandReport(payload) => payload.encode(writer),
            Message::StateRejectReport(payload) => payload.encode(writer),
            // the bundle never takes the schema path
            Message::TelemetryBundle(_) => Err(Error::InvalidArgument),
        }
    }

    /// Decode a body (type included) into its typed form.
    ///
    /// `InvalidMessage` is reported for a well-formed body whose type is not
    /// in the catalog; structural damage is `FramingError`; range and
    /// missing-key violations are `InvalidArgument`.
    pub fn decode_body(body: &[u8]) -> Result<Message> {
        match body.first() {
            Some(&cbor::ARRAY2_HEADER) => Message::decode_schema(body),
            Some(&value) if value == message::TELEMETRY_BUNDLE.0 => {
                TelemetryBundle::decode_record(&body[1..]).map(Message::TelemetryBundle)
            }
            _ => Err(Error::FramingError),
        }
    }

    fn decode_schema(body: &[u8]) -> Result<Message> {
        let (msg_type, kind) = cbor::open_body(body)?;
        match kind {
            BodyKind::Empty => match msg_type {
                message::PING_REQUEST => Ok(Message::PingRequest),
                message::DISCOVERY_REQUEST => Ok(Message::DiscoveryRequest),
                // nil where the schema demands a field map
                other if other.is_known() => Err(Error::InvalidArgument),
                other => Err(Error::InvalidMessage(other.0)),
            },
            BodyKind::Map(mut map) => match msg_type {
                message::MOTOR_CONFIG => MotorConfig::decode(&mut map).map(Message::MotorConfig),
                message::PUMP_CONFIG => PumpConfig::decode(&mut map).map(Message::PumpConfig),
                message::TEMP_CONFIG => TempConfig::decode(&mut map).map(Message::TempConfig),
                message::GLOW_CONFIG => GlowConfig::decode(&mut map).map(Message::GlowConfig),
                message::DATA_SUBSCRIBE => {
                    DataSubscribe::decode(&mut map).map(Message::DataSubscribe)
                }
                message::DATA_UNSUBSCRIBE => {
                    DataUnsubscribe::decode(&mut map).map(Message::DataUnsubscribe)
                }
                message::TELEMETRY_CONFIG => {
                    TelemetryConfig::decode(&mut map).map(Message::TelemetryConfig)
                }
                message::TIMEOUT_CONFIG => {
                    TimeoutConfig::decode(&mut map).map(Message::TimeoutConfig)
                }
                message::STATE_COMMAND => StateCommand::decode(&mut map).map(Message::StateCommand),
                message::MOTOR_COMMAND => MotorCommand::decode(&mut map).map(Message::MotorCommand),
                message::PUMP_COMMAND => PumpCommand::decode(&mut map).map(Message::PumpCommand),
                message::GLOW_COMMAND => GlowCommand::decode(&mut map).map(Message::GlowCommand),
                message::TEMP_COMMAND => TempCommand::decode(&mut map).map(Message::TempCommand),
                message::SEND_TELEMETRY => {
                    SendTelemetry::decode(&mut map).map(Message::SendTelemetry)
                }
                message::STATE_DATA => StateData::decode(&mut map).map(Message::StateData),
                message::MOTOR_DATA => MotorData::decode(&mut map).map(Message::MotorData),
                message::PUMP_DATA => PumpData::decode(&mut map).map(Message::PumpData),
                message::GLOW_DATA => GlowData::decode(&mut map).map(Message::GlowData),
                message::TEMP_DATA => TempData::decode(&mut map).map(Message::TempData),
                message::DEVICE_ANNOUNCE => {
                    DeviceAnnounce::decode(&mut map).map(Message::DeviceAnnounce)
                }
                message::PING_RESPONSE => PingResponse::decode(&mut map).map(Message::PingResponse),
                message::ERROR_INVALID_MSG => {
                    InvalidMessageReport::decode(&mut map).map(Message::InvalidMessageReport)
                }
                message::ERROR_CRC_FAIL => {
                    CrcFailReport::decode(&mut map).map(Message::CrcFailReport)
                }
                message::ERROR_INVALID_CMD => {
                    InvalidCommandReport::decode(&mut map).map(Message::InvalidCommandReport)
                }
                message::ERROR_STATE_REJECT => {
                    StateRejectReport::decode(&mut map).map(Message::StateRejectReport)
                }
                // the bundle is fixed-layout; a CBOR rendition is malformed
                message::TELEMETRY_BUNDLE => Err(Error::FramingError),
                // a field map where the schema demands nil
                message::PING_REQUEST | message::DISCOVERY_REQUEST => Err(Error::InvalidArgument),
                other => Err(Error::InvalidMessage(other.0)),
            },
        }
    }

    /// Serialize into a packet bound for `address`.
    pub fn to_packet(&self, address: u64) -> Result<Packet> {
        let mut body = [0u8; MAX_PAYLOAD_SIZE];
        let used = self.encode_body(&mut body)?;
        Packet::new(address, &body[..used])
    }

    /// Typed view of a decoded packet's body.
    pub fn from_packet(packet: &Packet) -> Result<Message> {
        Message::decode_body(packet.body())
    }
}

/// One constructor per catalog entry, mirroring the message parameters.
impl Packet {
    pub fn motor_config(address: u64, config: MotorConfig) -> Result<Packet> {
        Message::MotorConfig(config).to_packet(address)
    }

    pub fn pump_config(address: u64, config: PumpConfig) -> Result<Packet> {
        Message::PumpConfig(config).to_packet(address)
    }

    pub fn temp_config(address: u64, config: TempConfig) -> Result<Packet> {
        Message::TempConfig(config).to_packet(address)
    }

    pub fn glow_config(address: u64, config: GlowConfig) -> Result<Packet> {
        Message::GlowConfig(config).to_packet(address)
    }

    pub fn data_subscribe(address: u64, target: u64) -> Result<Packet> {
        Message::DataSubscribe(DataSubscribe { address: target }).to_packet(address)
    }

    pub fn data_unsubscribe(address: u64, target: u64) -> Result<Packet> {
        Message::DataUnsubscribe(DataUnsubscribe { address: target }).to_packet(address)
    }

    pub fn telemetry_config(address: u64, enabled: bool, interval_ms: u32) -> Result<Packet> {
        Message::TelemetryConfig(TelemetryConfig {
            enabled,
            interval_ms,
        })
        .to_packet(address)
    }

    pub fn timeout_config(address: u64, enabled: bool, timeout_ms: u32) -> Result<Packet> {
        Message::TimeoutConfig(TimeoutConfig {
            enabled,
            timeout_ms,
        })
        .to_packet(address)
    }

    pub fn discovery_request(address: u64) -> Result<Packet> {
        Message::DiscoveryRequest.to_packet(address)
    }

    pub fn state_command(address: u64, mode: u8, parameter: Option<i32>) -> Result<Packet> {
        Message::StateCommand(StateCommand { mode, parameter }).to_packet(address)
    }

    pub fn motor_command(address: u64, motor: u8, target_rpm: i32) -> Result<Packet> {
        Message::MotorCommand(MotorCommand { motor, target_rpm }).to_packet(address)
    }

    pub fn pump_command(address: u64, pump: u8, rate_ms: i32) -> Result<Packet> {
        Message::PumpCommand(PumpCommand { pump, rate_ms }).to_packet(address)
    }

    pub fn glow_command(address: u64, glow: u8, duration_ms: i32) -> Result<Packet> {
        Message::GlowCommand(GlowCommand { glow, duration_ms }).to_packet(address)
    }

    pub fn temp_command(address: u64, command: TempCommand) -> Result<Packet> {
        Message::TempCommand(command).to_packet(address)
    }

    pub fn send_telemetry(address: u64, telemetry_type: u8, parameter: Option<u32>) -> Result<Packet> {
        Message::SendTelemetry(SendTelemetry {
            telemetry_type,
            parameter,
        })
        .to_packet(address)
    }

    pub fn ping_request(address: u64) -> Result<Packet> {
        Message::PingRequest.to_packet(address)
    }

    pub fn state_data(
        address: u64,
        ok: bool,
        error_code: u8,
        state: u8,
        timestamp: u32,
    ) -> Result<Packet> {
        Message::StateData(StateData {
            ok,
            error_code,
            state,
            timestamp,
        })
        .to_packet(address)
    }

    pub fn motor_data(address: u64, data: MotorData) -> Result<Packet> {
        Message::MotorData(data).to_packet(address)
    }

    pub fn pump_data(address: u64, data: PumpData) -> Result<Packet> {
        Message::PumpData(data).to_packet(address)
    }

    pub fn glow_data(address: u64, glow: u8, timestamp: u32, lit: bool) -> Result<Packet> {
        Message::GlowData(GlowData {
            glow,
            timestamp,
            lit,
        })
        .to_packet(address)
    }

    pub fn temp_data(address: u64, data: TempData) -> Result<Packet> {
        Message::TempData(data).to_packet(address)
    }

    pub fn telemetry_bundle(
        address: u64,
        state: u32,
        error: u8,
        motors: &[MotorSample],
        temperatures: &[TempSample],
    ) -> Result<Packet> {
        let bundle = TelemetryBundle::new(state, error, motors, temperatures)?;
        Message::TelemetryBundle(bundle).to_packet(address)
    }

    pub fn device_announce(
        address: u64,
        device_type: u8,
        capabilities: u8,
        version_major: u8,
        version_minor: u8,
    ) -> Result<Packet> {
        Message::DeviceAnnounce(DeviceAnnounce {
            device_type,
            capabilities,
            version_major,
            version_minor,
        })
        .to_packet(address)
    }

    pub fn ping_response(address: u64, timestamp: u32) -> Result<Packet> {
        Message::PingResponse(PingResponse { timestamp }).to_packet(address)
    }

    pub fn error_invalid_msg(address: u64, msg_type: u8) -> Result<Packet> {
        Message::InvalidMessageReport(InvalidMessageReport { msg_type }).to_packet(address)
    }

    pub fn error_crc_fail(address: u64, received: u16, computed: u16) -> Result<Packet> {
        Message::CrcFailReport(CrcFailReport { received, computed }).to_packet(address)
    }

    pub fn error_invalid_cmd(address: u64, command: i32) -> Result<Packet> {
        Message::InvalidCommandReport(InvalidCommandReport { command }).to_packet(address)
    }

    pub fn error_state_reject(address: u64, state: u8) -> Result<Packet> {
        Message::StateRejectReport(StateRejectReport { state }).to_packet(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Mode;

    fn round_trip(message: Message) -> Message {
        let mut body = [0u8; MAX_PAYLOAD_SIZE];
        let used = message.encode_body(&mut body).unwrap();
        Message::decode_body(&body[..used]).unwrap()
    }

    #[test]
    fn ping_request_body_bytes() {
        let packet = Packet::ping_request(0x0102030405060708).unwrap();
        assert_eq!(packet.body(), [0x82, 0x18, 0x2F, 0xF6]);
        assert_eq!(packet.length(), 4);
        assert_eq!(packet.msg_type().unwrap(), message::PING_REQUEST);
        assert_eq!(Message::from_packet(&packet).unwrap(), Message::PingRequest);
    }

    #[test]
    fn discovery_request_is_nil_payload() {
        let packet = Packet::discovery_request(0).unwrap();
        assert_eq!(packet.body(), [0x82, 0x18, 0x1F, 0xF6]);
        assert_eq!(
            Message::from_packet(&packet).unwrap(),
            Message::DiscoveryRequest
        );
    }

    #[test]
    fn motor_config_round_trip_full() {
        let config = MotorConfig {
            motor: 2,
            pwm_period: Some(1000),
            pid_kp: Some(4.0),
            pid_ki: Some(12.0),
            pid_kd: Some(0.1),
            max_rpm: Some(3400),
            min_rpm: Some(800),
            min_pwm_duty: Some(10),
        };
        assert_eq!(
            round_trip(Message::MotorConfig(config)),
            Message::MotorConfig(config)
        );
    }

    #[test]
    fn motor_config_absent_options_stay_absent() {
        let config = MotorConfig {
            motor: 0,
            pwm_period: None,
            pid_kp: None,
            pid_ki: None,
            pid_kd: None,
            max_rpm: Some(-1),
            min_rpm: None,
            min_pwm_duty: None,
        };
        match round_trip(Message::MotorConfig(config)) {
            Message::MotorConfig(decoded) => {
                assert_eq!(decoded.pwm_period, None);
                assert_eq!(decoded.pid_kp, None);
                assert_eq!(decoded.max_rpm, Some(-1));
                assert_eq!(decoded, config);
            }
            other => panic!("wrong message: {other:?}"),
        }
    }

    #[test]
    fn state_command_with_mode_enum() {
        let message = Message::StateCommand(StateCommand {
            mode: Mode::Fan as u8,
            parameter: Some(2500),
        });
        assert_eq!(round_trip(message), message);
    }

    #[test]
    fn every_schema_message_round_trips() {
        let messages = [
            Message::PumpConfig(PumpConfig {
                pump: 0,
                min_rate_ms: Some(100),
                max_rate_ms: Some(1000),
            }),
            Message::TempConfig(TempConfig {
                thermometer: 1,
                pid_kp: Some(100.0),
                pid_ki: None,
                pid_kd: Some(5.0),
            }),
            Message::GlowConfig(GlowConfig {
                glow: 0,
                max_duration_ms: Some(300_000),
            }),
            Message::DataSubscribe(DataSubscribe {
                address: 0x1234_5678_9ABC_DEF0,
            }),
            Message::DataUnsubscribe(DataUnsubscribe {
                address: 0x1234_5678_9ABC_DEF0,
            }),
            Message::TelemetryConfig(TelemetryConfig {
                enabled: true,
                interval_ms: 100,
            }),
            Message::TimeoutConfig(TimeoutConfig {
                enabled: false,
                timeout_ms: 3000,
            }),
            Message::StateCommand(StateCommand {
                mode: 0xFF,
                parameter: None,
            }),
            Message::MotorCommand(MotorCommand {
                motor: 0,
                target_rpm: 3000,
            }),
            Message::PumpCommand(PumpCommand {
                pump: 1,
                rate_ms: 250,
            }),
            Message::GlowCommand(GlowCommand {
                glow: 0,
                duration_ms: 30_000,
            }),
            Message::TempCommand(TempCommand {
                thermometer: 0,
                command: 1,
                motor: Some(2),
                setpoint: Some(82.5),
            }),
            Message::SendTelemetry(SendTelemetry {
                telemetry_type: 3,
                parameter: None,
            }),
            Message::StateData(StateData {
                ok: true,
                error_code: 0,
                state: 5,
                timestamp: 123_456,
            }),
            Message::MotorData(MotorData {
                motor: 0,
                timestamp: 42,
                rpm: 2980,
                target_rpm: 3000,
                pwm_duty: Some(512),
                pwm_period: None,
                min_rpm: Some(800),
                max_rpm: Some(3400),
            }),
            Message::PumpData(PumpData {
                pump: 0,
                timestamp: 43,
                event: 1,
                value: Some(-2),
            }),
            Message::GlowData(GlowData {
                glow: 0,
                timestamp: 44,
                lit: true,
            }),
            Message::TempData(TempData {
                thermometer: 0,
                timestamp: 45,
                temperature: -40.25,
                pid_enabled: Some(true),
                pid_output_rpm: Some(1500),
                pid_setpoint: None,
            }),
            Message::DeviceAnnounce(DeviceAnnounce {
                device_type: 1,
                capabilities: 0x0F,
                version_major: 2,
                version_minor: 0,
            }),
            Message::PingResponse(PingResponse { timestamp: 99_999 }),
            Message::InvalidMessageReport(InvalidMessageReport { msg_type: 0x44 }),
            Message::CrcFailReport(CrcFailReport {
                received: 0xDEAD,
                computed: 0xBEEF,
            }),
            Message::InvalidCommandReport(InvalidCommandReport { command: -7 }),
            Message::StateRejectReport(StateRejectReport { state: 8 }),
        ];
        for message in messages {
            assert_eq!(round_trip(message), message);
        }
    }

    #[test]
    fn bundle_takes_the_fixed_layout_path() {
        let motors = [MotorSample {
            rpm: 100,
            target_rpm: 200,
            pwm_duty: 50,
            pwm_period: 100,
        }];
        let temps = [TempSample { temperature: 21.0 }];
        let packet = Packet::telemetry_bundle(5, 2, 0, &motors, &temps).unwrap();
        assert_eq!(packet.body()[0], 0x35);
        assert_eq!(packet.msg_type().unwrap(), message::TELEMETRY_BUNDLE);

        match Message::from_packet(&packet).unwrap() {
            Message::TelemetryBundle(bundle) => {
                assert_eq!(bundle.state, 2);
                assert_eq!(bundle.motors(), motors);
                assert_eq!(bundle.temperatures(), temps);
            }
            other => panic!("wrong message: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_invalid_message() {
        // [0x44, {0: 1}]: well-formed, type outside the catalog
        let body = [0x82, 0x18, 0x44, 0xA1, 0x00, 0x01];
        assert_eq!(
            Message::decode_body(&body),
            Err(Error::InvalidMessage(0x44))
        );
        // nil payload variant
        let body = [0x82, 0x18, 0x44, 0xF6];
        assert_eq!(
            Message::decode_body(&body),
            Err(Error::InvalidMessage(0x44))
        );
    }

    #[test]
    fn unknown_map_keys_are_ignored() {
        // PING_RESPONSE with an extra future key 9
        let body = [
            0x82, 0x18, 0x3F, 0xA2, 0x00, 0x18, 0x63, 0x09, 0x18, 0x2A,
        ];
        assert_eq!(
            Message::decode_body(&body).unwrap(),
            Message::PingResponse(PingResponse { timestamp: 0x63 })
        );
    }

    #[test]
    fn missing_required_key_is_invalid_argument() {
        // MOTOR_COMMAND with only the target and no motor index
        let body = [0x82, 0x18, 0x21, 0xA1, 0x01, 0x0A];
        assert_eq!(Message::decode_body(&body), Err(Error::InvalidArgument));
    }

    #[test]
    fn wrong_discipline_bodies_rejected() {
        // empty body
        assert_eq!(Message::decode_body(&[]), Err(Error::FramingError));
        // neither CBOR array nor bundle type byte
        assert_eq!(Message::decode_body(&[0x10, 0x00]), Err(Error::FramingError));
        // nil payload on a map-carrying type
        let body = [0x82, 0x18, 0x21, 0xF6];
        assert_eq!(Message::decode_body(&body), Err(Error::InvalidArgument));
        // CBOR rendition of the fixed-layout bundle
        let body = [0x82, 0x18, 0x35, 0xA1, 0x00, 0x01];
        assert_eq!(Message::decode_body(&body), Err(Error::FramingError));
    }

    #[test]
    fn constructor_surface_smoke_test() {
        let address = 0xA5;
        assert!(Packet::temp_command(
            address,
            TempCommand {
                thermometer: 0,
                command: 2,
                motor: None,
                setpoint: Some(75.0),
            }
        )
        .is_ok());
        assert!(Packet::state_command(address, Mode::Heat as u8, Some(2500)).is_ok());
        assert!(Packet::error_crc_fail(address, 0x1234, 0x5678).is_ok());
        assert!(Packet::data_subscribe(address, 0xFFFF_FFFF_FFFF_FFFF).is_ok());
        assert!(Packet::glow_data(address, 0, 1000, false).is_ok());
        assert!(Packet::device_announce(address, 1, 0xFF, 2, 1).is_ok());
    }
}
