//! Splat Stream Decoding (.splt)
//!
//! Incremental decoder for the binary splat stream.
//! Layout: fixed 16-byte header | densely packed 20-byte point records.
//!
//! The decoder accepts chunks at arbitrary byte boundaries (as a network
//! stream would deliver them), appends whole records to the [`SplatCloud`],
//! and reports update/loaded notifications so the viewer can track progress.

use bytemuck::{Pod, Zeroable};

use super::cloud::{SplatCloud, SplatPoint};

/// Magic bytes identifying a .splt stream.
pub const SPLT_MAGIC: [u8; 4] = *b"SPLT";

/// Current stream format version.
const SPLT_VERSION: u32 = 1;

/// Size of the header in bytes. Must always be 16.
const HEADER_SIZE: usize = 16;

/// Size of one point record in bytes.
const POINT_SIZE: usize = std::mem::size_of::<SplatPoint>();

/// Fixed-size binary header for the .splt stream.
///
/// Total size: exactly 16 bytes.
/// `magic` (4) + `version` (4) + `point_count` (4) + `flags` (4) = 16.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SpltHeader {
    /// Magic bytes: always `b"SPLT"`.
    pub magic: [u8; 4],
    /// Stream format version (currently 1).
    pub version: u32,
    /// Total number of point records the stream will deliver.
    pub point_count: u32,
    /// Reserved for future use; must be zeroed.
    pub flags: u32,
}

static_assertions::assert_eq_size!(SpltHeader, [u8; 16]);

/// Errors that can occur while decoding a .splt stream.
#[derive(Debug)]
pub enum SplatStreamError {
    /// Magic bytes do not match `b"SPLT"`.
    InvalidMagic,
    /// Stream version is not supported.
    UnsupportedVersion(u32),
    /// More point records arrived than the header promised.
    TrailingData,
    /// Standard I/O error while reading the source.
    IoError(std::io::Error),
}

impl std::fmt::Display for SplatStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplatStreamError::InvalidMagic => write!(f, "invalid magic bytes (expected SPLT)"),
            SplatStreamError::UnsupportedVersion(v) => {
                write!(f, "unsupported splt version: {v}")
            }
            SplatStreamError::TrailingData => write!(f, "stream continues past promised points"),
            SplatStreamError::IoError(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for SplatStreamError {}

impl From<std::io::Error> for SplatStreamError {
    fn from(e: std::io::Error) -> Self {
        SplatStreamError::IoError(e)
    }
}

/// Notifications produced while feeding the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplatEvent {
    /// New points became resident; the next frame should show them.
    /// (With the always-redraw loop this is informational.)
    Update,
    /// Progress notification with the running counters.
    Loaded {
        total_loaded: u64,
        num_displayed: u64,
    },
}

/// Incremental .splt decoder.
///
/// Holds the undecoded remainder between chunks so records split across
/// chunk boundaries decode once their tail arrives.
#[derive(Debug, Default)]
pub struct SplatStream {
    /// Bytes received but not yet decoded (always shorter than one record
    /// once the header is parsed).
    pending: Vec<u8>,
    header: Option<SpltHeader>,
    decoded: u64,
}

impl SplatStream {
    /// Create a decoder expecting a fresh stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every promised point has been decoded.
    pub fn is_complete(&self) -> bool {
        match &self.header {
            Some(header) => self.decoded >= header.point_count as u64,
            None => false,
        }
    }

    /// Number of points decoded so far.
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Feed a chunk of stream bytes, appending decoded points to `cloud`.
    ///
    /// Returns the notifications this chunk produced. Chunks may split the
    /// header or any record at any byte offset.
    pub fn feed(
        &mut self,
        bytes: &[u8],
        cloud: &mut SplatCloud,
    ) -> Result<Vec<SplatEvent>, SplatStreamError> {
        self.pending.extend_from_slice(bytes);
        let mut events = Vec::new();

        if self.header.is_none() {
            if self.pending.len() < HEADER_SIZE {
                return Ok(events);
            }
            let header: SpltHeader = bytemuck::pod_read_unaligned(&self.pending[..HEADER_SIZE]);
            if header.magic != SPLT_MAGIC {
                return Err(SplatStreamError::InvalidMagic);
            }
            if header.version != SPLT_VERSION {
                return Err(SplatStreamError::UnsupportedVersion(header.version));
            }
            cloud.set_total_size(header.point_count as u64);
            self.header = Some(header);
            self.pending.drain(..HEADER_SIZE);
        }

        let Some(header) = &self.header else {
            return Ok(events);
        };
        let remaining = (header.point_count as u64).saturating_sub(self.decoded);
        let available = (self.pending.len() / POINT_SIZE) as u64;
        if available > remaining {
            return Err(SplatStreamError::TrailingData);
        }

        let count = available.min(remaining) as usize;
        if count > 0 {
            let consumed = count * POINT_SIZE;
            let points: Vec<SplatPoint> = self.pending[..consumed]
                .chunks_exact(POINT_SIZE)
                .map(bytemuck::pod_read_unaligned)
                .collect();
            cloud.push_points(&points);
            self.pending.drain(..consumed);
            self.decoded += count as u64;

            events.push(SplatEvent::Update);
            // Every resident point is displayed; there is no LOD cut here.
            events.push(SplatEvent::Loaded {
                total_loaded: self.decoded,
                num_displayed: self.decoded,
            });
        }

        Ok(events)
    }
}

/// Encode a point set as a .splt byte stream (header + records).
///
/// Used by the viewer to synthesize a demo stream when no splat file is
/// configured, and by tests to drive the decoder.
pub fn encode_splt(points: &[SplatPoint]) -> Vec<u8> {
    let header = SpltHeader {
        magic: SPLT_MAGIC,
        version: SPLT_VERSION,
        point_count: points.len() as u32,
        flags: 0,
    };
    let mut bytes = Vec::with_capacity(HEADER_SIZE + points.len() * POINT_SIZE);
    bytes.extend_from_slice(bytemuck::bytes_of(&header));
    bytes.extend_from_slice(bytemuck::cast_slice(points));
    bytes
}

/// An in-memory byte source drained a bounded chunk at a time.
///
/// Keeps streaming cooperative with the frame loop: the viewer pulls one
/// chunk per frame instead of blocking on the whole stream.
#[derive(Debug)]
pub struct ChunkedSource {
    data: Vec<u8>,
    cursor: usize,
}

impl ChunkedSource {
    /// Wrap an in-memory byte stream.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Read a whole .splt file into a source.
    pub fn from_file(path: &std::path::Path) -> Result<Self, SplatStreamError> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    /// Next chunk of at most `max_bytes`, or `None` when drained.
    pub fn next_chunk(&mut self, max_bytes: usize) -> Option<&[u8]> {
        if self.cursor >= self.data.len() {
            return None;
        }
        let end = (self.cursor + max_bytes).min(self.data.len());
        let chunk = &self.data[self.cursor..end];
        self.cursor = end;
        Some(chunk)
    }

    /// Whether every byte has been handed out.
    pub fn is_drained(&self) -> bool {
        self.cursor >= self.data.len()
    }
}
