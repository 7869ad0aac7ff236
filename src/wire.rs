//! Transport codec: length-delimited frames of actions and state syncs.
//!
//! The engine does not own a socket; drivers push whatever bytes arrive into
//! a [`FrameReader`] and forward decoded frames to the resolver. Channels
//! are assumed at-least-once-ordered, but the codec itself only cares about
//! well-formed frames.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Action;
use crate::state::GameState;

/// Frames exchanged between two drivers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Frame {
    /// One submitted action, mirrored to the peer.
    Action(Action),
    /// Full-state sync, used once at match start.
    Sync(Box<GameState>),
}

/// Refuse frames past this size; a full state sync stays well under it.
const MAX_FRAME: usize = 1 << 20;

/// Length-prefix header size.
const HEADER: usize = 4;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("frame of {0} bytes exceeds the 1 MiB limit")]
    FrameTooLarge(usize),
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Encode one frame as a length-prefixed byte block.
pub fn encode_frame(frame: &Frame) -> Result<Vec<u8>, WireError> {
    let body = bincode::serialize(frame)?;
    if body.len() > MAX_FRAME {
        return Err(WireError::FrameTooLarge(body.len()));
    }
    let mut out = Vec::with_capacity(HEADER + body.len());
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode one frame from the front of a buffer.
///
/// Returns the frame and the number of bytes consumed, or `None` when the
/// buffer does not yet hold a complete frame.
pub fn decode_frame(buf: &[u8]) -> Result<Option<(Frame, usize)>, WireError> {
    if buf.len() < HEADER {
        return Ok(None);
    }
    let len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    if len > MAX_FRAME {
        return Err(WireError::FrameTooLarge(len));
    }
    if buf.len() < HEADER + len {
        return Ok(None);
    }
    let frame = bincode::deserialize(&buf[HEADER..HEADER + len])?;
    Ok(Some((frame, HEADER + len)))
}

/// Incremental frame reassembly over a byte stream.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed freshly received bytes.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the next complete frame, if one has fully arrived.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, WireError> {
        match decode_frame(&self.buf)? {
            Some((frame, consumed)) => {
                self.buf.drain(..consumed);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Habitat};
    use crate::factory;
    use crate::state::PlayerId;
    use smallvec::smallvec;

    fn sample_action() -> Action {
        Action::EndTurn {
            player: PlayerId::new(0),
            rng: smallvec![0.25, 0.75],
        }
    }

    #[test]
    fn test_action_frame_round_trip() {
        let frame = Frame::Action(sample_action());
        let bytes = encode_frame(&frame).unwrap();
        let (decoded, consumed) = decode_frame(&bytes).unwrap().unwrap();

        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_sync_frame_round_trip() {
        let catalog = Catalog::builtin();
        let state = factory::new_match(&catalog, Habitat::Water, ["A", "B"], 77);
        let frame = Frame::Sync(Box::new(state));

        let bytes = encode_frame(&frame).unwrap();
        let (decoded, _) = decode_frame(&bytes).unwrap().unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_partial_frames_wait_for_more_bytes() {
        let bytes = encode_frame(&Frame::Action(sample_action())).unwrap();
        let mut reader = FrameReader::new();

        let (head, tail) = bytes.split_at(bytes.len() / 2);
        reader.push(head);
        assert!(reader.next_frame().unwrap().is_none());

        reader.push(tail);
        assert!(reader.next_frame().unwrap().is_some());
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_back_to_back_frames() {
        let a = encode_frame(&Frame::Action(sample_action())).unwrap();
        let b = encode_frame(&Frame::Action(Action::AcknowledgeCoinFlip)).unwrap();

        let mut reader = FrameReader::new();
        reader.push(&a);
        reader.push(&b);

        assert_eq!(
            reader.next_frame().unwrap(),
            Some(Frame::Action(sample_action()))
        );
        assert_eq!(
            reader.next_frame().unwrap(),
            Some(Frame::Action(Action::AcknowledgeCoinFlip))
        );
    }

    #[test]
    fn test_oversized_length_rejected() {
        let mut bytes = vec![0u8; 8];
        bytes[..4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            decode_frame(&bytes),
            Err(WireError::FrameTooLarge(_))
        ));
    }
}
