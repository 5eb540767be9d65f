mod common;

use common::vlq;
use midinoid::reader::decode_vlq;
use pretty_assertions::assert_eq;

#[test]
fn encoded_quantities_decode_to_themselves() {
    let edges = [
        0,
        0x7F,
        0x80,
        0x3FFF,
        0x4000,
        0x1F_FFFF,
        0x20_0000,
        0x0FFF_FFFF,
        0x1000_0000,
        u32::MAX - 1,
        u32::MAX,
    ];
    let sampled = (0..=u32::MAX).step_by(0x0101_0101);
    for value in edges.into_iter().chain(sampled) {
        let mut bytes = vec![0x90];
        bytes.extend(vlq(value));
        let len = bytes.len();
        assert_eq!(decode_vlq(&bytes, 1).unwrap(), (value, len), "{value:#X}");
    }
}

#[test]
fn encoder_length_follows_significant_bits() {
    assert_eq!(vlq(0x7F).len(), 1);
    assert_eq!(vlq(0x80).len(), 2);
    assert_eq!(vlq(0x0FFF_FFFF).len(), 4);
    assert_eq!(vlq(u32::MAX).len(), 5);
}
