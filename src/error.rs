use thiserror::Error;

#[doc = r#"
An error describing why a sequence of bytes could not be understood as MIDI file data
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The file header is unusable
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// A chunk or the data inside it is unusable
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// The time division cannot be used to compute delays
    #[error("Timing: {0}")]
    Timing(#[from] TimingError),
    /// A variable-length quantity does not fit in 32 bits
    #[error("Variable-length quantity overflows 32 bits")]
    VlqOverflow,
}

/// Errors validating the 14-byte `MThd` header.
///
/// Either of these aborts the whole file before any output is touched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The file does not begin with `MThd`
    #[error("Invalid magic {0:02X?}, expected \"MThd\"")]
    InvalidMagic([u8; 4]),
    /// The declared header length is not 6
    #[error("Invalid header length {0}, expected 6")]
    InvalidLength(u32),
}

/// Errors local to a single track chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// The chunk does not begin with `MTrk`
    #[error("Invalid track magic {0:02X?}, expected \"MTrk\"")]
    InvalidMagic([u8; 4]),
    /// A data byte was found where a status byte was expected and no running status was in effect
    #[error("Data byte without a running status")]
    MissingStatus,
}

/// The header's time division cannot produce finite delays
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    /// Metrical division with zero ticks per quarter note
    #[error("Zero ticks per quarter note")]
    ZeroTicksPerQuarterNote,
    /// SMPTE division whose frame rate byte negates to zero or less
    #[error("SMPTE frame rate byte {0:#04X} does not encode a positive frame rate")]
    InvalidFramesPerSecond(u8),
    /// SMPTE division with zero ticks per frame
    #[error("Zero ticks per SMPTE frame")]
    ZeroTicksPerFrame,
}
