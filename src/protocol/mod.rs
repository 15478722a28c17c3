//! # Wire Protocol
//!
//! The two client → authority messages carried on the vein-mining channel.
//!
//! | Message       | Payload                                                   |
//! |---------------|-----------------------------------------------------------|
//! | `KeyState`    | 1 byte: `0` released, `1` held                            |
//! | `MineRequest` | 16 bytes: big-endian `x`, `y`, `z` (`i32`) and hint (`u32`) |
//!
//! Both shapes share one channel and are told apart by payload length. Older clients sent
//! the mine request without the hint (12 bytes); those still decode, with an empty hint.

use bytemuck::{Pod, Zeroable};
use cgmath::Point3;
use thiserror::Error;

use crate::voxels::{Cell, MaterialId};

/// Name of the logical channel both messages travel on.
pub const CHANNEL: &str = "OVM|VM";

/// Payload length of a key state message.
pub const KEY_STATE_LEN: usize = 1;
/// Payload length of a mine request.
pub const MINE_REQUEST_LEN: usize = std::mem::size_of::<MineRequestFrame>();
/// Payload length of a mine request from clients that predate the material hint.
pub const LEGACY_MINE_REQUEST_LEN: usize = std::mem::size_of::<LegacyMineRequestFrame>();

/// Errors raised while decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unexpected payload length {0}")]
    UnexpectedLength(usize),

    #[error("invalid key state byte {0}")]
    InvalidKeyState(u8),
}

/// Asks the authority to vein-mine starting at `anchor`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MineRequest {
    pub anchor: Cell,
    /// The material the client saw at the anchor before it broke.
    pub hint: MaterialId,
}

/// A decoded message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Message {
    KeyState { held: bool },
    MineRequest(MineRequest),
}

/// On-wire layout of a mine request. Every field is a big-endian word.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MineRequestFrame {
    x: [u8; 4],
    y: [u8; 4],
    z: [u8; 4],
    hint: [u8; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LegacyMineRequestFrame {
    x: [u8; 4],
    y: [u8; 4],
    z: [u8; 4],
}

impl Message {
    /// Serializes the message into its payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::KeyState { held } => vec![u8::from(*held)],
            Message::MineRequest(request) => {
                let frame = MineRequestFrame {
                    x: request.anchor.x.to_be_bytes(),
                    y: request.anchor.y.to_be_bytes(),
                    z: request.anchor.z.to_be_bytes(),
                    hint: request.hint.0.to_be_bytes(),
                };
                bytemuck::bytes_of(&frame).to_vec()
            }
        }
    }

    /// Parses a payload received on [`CHANNEL`].
    ///
    /// # Errors
    /// [`ProtocolError::UnexpectedLength`] for a payload matching neither shape and
    /// [`ProtocolError::InvalidKeyState`] for a key byte other than 0 or 1
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        match payload.len() {
            KEY_STATE_LEN => match payload[0] {
                0 => Ok(Message::KeyState { held: false }),
                1 => Ok(Message::KeyState { held: true }),
                other => Err(ProtocolError::InvalidKeyState(other)),
            },
            MINE_REQUEST_LEN => {
                let frame: MineRequestFrame = bytemuck::pod_read_unaligned(payload);
                Ok(Message::MineRequest(MineRequest {
                    anchor: Point3::new(
                        i32::from_be_bytes(frame.x),
                        i32::from_be_bytes(frame.y),
                        i32::from_be_bytes(frame.z),
                    ),
                    hint: MaterialId(u32::from_be_bytes(frame.hint)),
                }))
            }
            LEGACY_MINE_REQUEST_LEN => {
                let frame: LegacyMineRequestFrame = bytemuck::pod_read_unaligned(payload);
                Ok(Message::MineRequest(MineRequest {
                    anchor: Point3::new(
                        i32::from_be_bytes(frame.x),
                        i32::from_be_bytes(frame.y),
                        i32::from_be_bytes(frame.z),
                    ),
                    hint: MaterialId::EMPTY,
                }))
            }
            other => Err(ProtocolError::UnexpectedLength(other)),
        }
    }
}

impl From<MineRequest> for Message {
    fn from(request: MineRequest) -> Self {
        Message::MineRequest(request)
    }
}
