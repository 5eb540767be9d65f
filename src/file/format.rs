use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The known values of the header's format field.

Playback treats every format the same way: tracks are played one after
another in file order. The format is only reported.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks meant to sound simultaneously
    Simultaneous = 1,
    /// Format 2: independent sequences
    SequentiallyIndependent = 2,
}

#[test]
fn format_from_raw() {
    use pretty_assertions::assert_eq;
    assert_eq!(FormatType::try_from(1u16).unwrap(), FormatType::Simultaneous);
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(u16::from(FormatType::SequentiallyIndependent), 2);
}
