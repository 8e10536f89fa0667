//! Data events carried by the link
//!
//! A data event announces that the item at a path changed (carrying the new
//! map) or was deleted (path only). Over a byte stream each event is one
//! frame whose body is the postcard encoding of the event contents.

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_BODY_SIZE};
use crate::payload::{encode_snapshot, DataMap, PayloadError, MAX_PATH_LEN, WEATHER_PATH};
use crate::snapshot::WeatherSnapshot;

// Frame kinds
pub const MSG_DATA_CHANGED: u8 = 0x10;
pub const MSG_DATA_DELETED: u8 = 0x11;

/// What happened to a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeKind {
    Changed,
    Deleted,
}

/// Errors converting between events and frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Framing failed
    Frame(FrameError),
    /// Payload could not be built
    Payload(PayloadError),
    /// Path longer than [`MAX_PATH_LEN`]
    PathTooLong,
    /// Body failed to serialize into [`MAX_BODY_SIZE`] bytes
    Encode,
    /// Body is not a valid event encoding
    Decode,
    /// Frame kind is not a data event
    UnknownKind(u8),
}

impl From<FrameError> for MessageError {
    fn from(e: FrameError) -> Self {
        MessageError::Frame(e)
    }
}

impl From<PayloadError> for MessageError {
    fn from(e: PayloadError) -> Self {
        MessageError::Payload(e)
    }
}

impl core::fmt::Display for MessageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MessageError::Frame(e) => write!(f, "{e}"),
            MessageError::Payload(e) => write!(f, "{e}"),
            MessageError::PathTooLong => f.write_str("path too long"),
            MessageError::Encode => f.write_str("event does not fit in a frame"),
            MessageError::Decode => f.write_str("malformed event body"),
            MessageError::UnknownKind(kind) => write!(f, "unknown frame kind {kind:#04x}"),
        }
    }
}

/// A change notification for one data item
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent {
    pub path: String<MAX_PATH_LEN>,
    pub kind: ChangeKind,
    /// New contents; empty for deletions
    pub map: DataMap,
}

impl DataEvent {
    /// Item at `path` now holds `map`
    pub fn changed(path: &str, map: DataMap) -> Result<Self, MessageError> {
        Ok(Self {
            path: path_string(path)?,
            kind: ChangeKind::Changed,
            map,
        })
    }

    /// Item at `path` was removed
    pub fn deleted(path: &str) -> Result<Self, MessageError> {
        Ok(Self {
            path: path_string(path)?,
            kind: ChangeKind::Deleted,
            map: DataMap::new(),
        })
    }

    /// Weather item changed to `snapshot`
    pub fn weather(snapshot: &WeatherSnapshot) -> Result<Self, MessageError> {
        Self::changed(WEATHER_PATH, encode_snapshot(snapshot)?)
    }

    pub fn is_for(&self, path: &str) -> bool {
        self.path.as_str() == path
    }

    /// Encode this event into a frame
    pub fn to_frame(&self) -> Result<Frame, MessageError> {
        let mut body = [0u8; MAX_BODY_SIZE];
        let used = match self.kind {
            ChangeKind::Changed => postcard::to_slice(&(self.path.as_str(), &self.map), &mut body),
            ChangeKind::Deleted => postcard::to_slice(self.path.as_str(), &mut body),
        }
        .map_err(|_| MessageError::Encode)?;

        let kind = match self.kind {
            ChangeKind::Changed => MSG_DATA_CHANGED,
            ChangeKind::Deleted => MSG_DATA_DELETED,
        };
        Ok(Frame::new(kind, used)?)
    }

    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, MessageError> {
        match frame.kind {
            MSG_DATA_CHANGED => {
                let (path, map): (String<MAX_PATH_LEN>, DataMap) =
                    postcard::from_bytes(&frame.body).map_err(|_| MessageError::Decode)?;
                Ok(Self {
                    path,
                    kind: ChangeKind::Changed,
                    map,
                })
            }
            MSG_DATA_DELETED => {
                let path: String<MAX_PATH_LEN> =
                    postcard::from_bytes(&frame.body).map_err(|_| MessageError::Decode)?;
                Ok(Self {
                    path,
                    kind: ChangeKind::Deleted,
                    map: DataMap::new(),
                })
            }
            other => Err(MessageError::UnknownKind(other)),
        }
    }
}

fn path_string(path: &str) -> Result<String<MAX_PATH_LEN>, MessageError> {
    String::try_from(path).map_err(|_| MessageError::PathTooLong)
}
