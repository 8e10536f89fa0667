//! Byte-stream data link
//!
//! Each data event travels as one frame (see `nimbus_protocol::frame`). The
//! writer is blocking `embedded-io`; the reader is async `embedded-io-async`
//! so the watch side can await incoming bytes.

use embedded_io::Write;
use embedded_io_async::Read;

use nimbus_core::traits::{ChangeStream, ChannelError, DataChannel};
use nimbus_protocol::{DataEvent, DataMap, FrameParser, MAX_FRAME_SIZE};

/// Buffer size for serial receive
const RX_BUF_SIZE: usize = 64;

/// Publishes data items as frames on a byte stream
pub struct SerialPublisher<W> {
    writer: W,
    connected: bool,
}

impl<W: Write> SerialPublisher<W> {
    /// Wrap `writer`; the link starts connected
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            connected: true,
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Announce that the item at `path` was removed
    pub fn delete(&mut self, path: &str) -> Result<(), ChannelError> {
        let event = DataEvent::deleted(path).map_err(|_| ChannelError::Encode)?;
        self.send(&event)
    }

    fn send(&mut self, event: &DataEvent) -> Result<(), ChannelError> {
        if !self.connected {
            return Err(ChannelError::Disconnected);
        }
        let frame = event.to_frame().map_err(|e| {
            warn!("Failed to frame data event: {:?}", e);
            ChannelError::Encode
        })?;

        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buf).map_err(|_| ChannelError::Encode)?;
        trace!("TX: {} bytes", len);

        self.writer
            .write_all(&buf[..len])
            .map_err(|_| ChannelError::Transport)?;
        self.writer.flush().map_err(|_| ChannelError::Transport)
    }
}

impl<W: Write> DataChannel for SerialPublisher<W> {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, path: &str, map: &DataMap) -> Result<(), ChannelError> {
        let event = DataEvent::changed(path, map.clone()).map_err(|_| ChannelError::Encode)?;
        self.send(&event)
    }
}

/// Counters kept by [`SerialChanges`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxStats {
    pub events: u32,
    pub frame_errors: u32,
    pub bad_events: u32,
}

/// Change stream decoded from a byte stream
///
/// Corrupt frames and undecodable events are counted and skipped. The
/// stream ends on end-of-file or a read error.
pub struct SerialChanges<R> {
    reader: R,
    parser: FrameParser,
    buf: [u8; RX_BUF_SIZE],
    pos: usize,
    len: usize,
    stats: RxStats,
}

impl<R: Read> SerialChanges<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: FrameParser::new(),
            buf: [0u8; RX_BUF_SIZE],
            pos: 0,
            len: 0,
            stats: RxStats::default(),
        }
    }

    pub fn stats(&self) -> RxStats {
        self.stats
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    /// Feed buffered bytes until a complete event is decoded
    fn drain(&mut self) -> Option<DataEvent> {
        while self.pos < self.len {
            let byte = self.buf[self.pos];
            self.pos += 1;

            match self.parser.feed(byte) {
                Ok(Some(frame)) => match DataEvent::from_frame(&frame) {
                    Ok(event) => {
                        self.stats.events += 1;
                        return Some(event);
                    }
                    Err(e) => {
                        warn!("Failed to parse data event: {:?}", e);
                        self.stats.bad_events += 1;
                    }
                },
                Ok(None) => {
                    // Need more bytes
                }
                Err(e) => {
                    warn!("Frame parse error: {:?}", e);
                    self.stats.frame_errors += 1;
                }
            }
        }
        None
    }
}

impl<R: Read> ChangeStream for SerialChanges<R> {
    async fn next_event(&mut self) -> Option<DataEvent> {
        loop {
            if let Some(event) = self.drain() {
                return Some(event);
            }

            match self.reader.read(&mut self.buf).await {
                Ok(0) => {
                    debug!("Serial stream closed");
                    return None;
                }
                Ok(n) => {
                    trace!("RX: {} bytes", n);
                    self.pos = 0;
                    self.len = n;
                }
                Err(_) => {
                    warn!("Serial read error, closing stream");
                    return None;
                }
            }
        }
    }
}
