//! Low-level tag-length-value wire primitives.
//!
//! Claims are carried in a protobuf-style wire format: every field is a
//! varint key (field number << 3 | wire type) followed by a type-specific
//! payload. This module provides the byte-level reader and writer; the
//! schema-aware codec lives in [`crate::codec`].
//!
//! Decoding is strict so that re-encoding is byte-exact:
//! - varints must use the minimal encoding
//! - length prefixes may not overrun the buffer
//! - only wire types 0 (varint), 1 (fixed64), 2 (length-delimited) and
//!   5 (fixed32) are accepted

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire type 0: varint.
pub const WIRE_VARINT: u8 = 0;
/// Wire type 1: 64-bit little-endian.
pub const WIRE_FIXED64: u8 = 1;
/// Wire type 2: length-delimited.
pub const WIRE_LEN: u8 = 2;
/// Wire type 5: 32-bit little-endian.
pub const WIRE_FIXED32: u8 = 5;

/// A decoded wire value, tagged by wire type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireValue {
    Varint(u64),
    Fixed64(u64),
    Bytes(Vec<u8>),
    Fixed32(u32),
}

impl WireValue {
    /// The wire type this value encodes as.
    pub fn wire_type(&self) -> u8 {
        match self {
            WireValue::Varint(_) => WIRE_VARINT,
            WireValue::Fixed64(_) => WIRE_FIXED64,
            WireValue::Bytes(_) => WIRE_LEN,
            WireValue::Fixed32(_) => WIRE_FIXED32,
        }
    }
}

/// A single field as it appeared on the wire: number plus raw value.
///
/// Fields the schema does not know are kept as RawField so they survive
/// re-encoding untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub number: u64,
    pub value: WireValue,
}

/// A bounds-checked cursor over wire bytes.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader over the full buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// True once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read the next field key and payload.
    pub fn read_field(&mut self) -> Result<RawField, CoreError> {
        let key = self.read_varint()?;
        let number = key >> 3;
        if number == 0 {
            return Err(CoreError::Malformed("field number zero".into()));
        }
        let wire = (key & 0x7) as u8;

        let value = match wire {
            WIRE_VARINT => WireValue::Varint(self.read_varint()?),
            WIRE_FIXED64 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(self.take(8)?);
                WireValue::Fixed64(u64::from_le_bytes(bytes))
            }
            WIRE_LEN => {
                let len = self.read_varint()?;
                let len = usize::try_from(len)
                    .map_err(|_| CoreError::Malformed("length prefix too large".into()))?;
                WireValue::Bytes(self.take(len)?.to_vec())
            }
            WIRE_FIXED32 => {
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(self.take(4)?);
                WireValue::Fixed32(u32::from_le_bytes(bytes))
            }
            other => {
                return Err(CoreError::Malformed(format!(
                    "unsupported wire type {other} for field {number}"
                )));
            }
        };

        Ok(RawField { number, value })
    }

    /// Read a minimally-encoded varint.
    fn read_varint(&mut self) -> Result<u64, CoreError> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        let mut count = 0usize;
        loop {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or_else(|| CoreError::Malformed("truncated varint".into()))?;
            self.pos += 1;
            count += 1;
            if count == 10 && byte > 0x01 {
                return Err(CoreError::Malformed("varint overflow".into()));
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                if count > 1 && byte == 0 {
                    return Err(CoreError::Malformed("non-minimal varint".into()));
                }
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Take exactly `n` bytes.
    fn take(&mut self, n: usize) -> Result<&'a [u8], CoreError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| CoreError::Malformed("length prefix overruns buffer".into()))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

/// Append a varint.
pub fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Append a field key.
pub fn put_key(buf: &mut Vec<u8>, number: u64, wire: u8) {
    put_varint(buf, number << 3 | u64::from(wire));
}

/// Append a varint field.
pub fn put_varint_field(buf: &mut Vec<u8>, number: u64, value: u64) {
    put_key(buf, number, WIRE_VARINT);
    put_varint(buf, value);
}

/// Append a length-delimited field.
pub fn put_bytes_field(buf: &mut Vec<u8>, number: u64, bytes: &[u8]) {
    put_key(buf, number, WIRE_LEN);
    put_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Append a fixed32 field.
pub fn put_fixed32_field(buf: &mut Vec<u8>, number: u64, bits: u32) {
    put_key(buf, number, WIRE_FIXED32);
    buf.extend_from_slice(&bits.to_le_bytes());
}

/// Append a fixed64 field.
pub fn put_fixed64_field(buf: &mut Vec<u8>, number: u64, bits: u64) {
    put_key(buf, number, WIRE_FIXED64);
    buf.extend_from_slice(&bits.to_le_bytes());
}

/// Re-emit a raw field exactly as it was read.
pub fn put_raw_field(buf: &mut Vec<u8>, field: &RawField) {
    match &field.value {
        WireValue::Varint(v) => put_varint_field(buf, field.number, *v),
        WireValue::Fixed64(bits) => put_fixed64_field(buf, field.number, *bits),
        WireValue::Bytes(bytes) => put_bytes_field(buf, field.number, bytes),
        WireValue::Fixed32(bits) => put_fixed32_field(buf, field.number, *bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        put_varint(&mut buf, value);
        buf
    }

    #[test]
    fn test_varint_encoding_boundaries() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7f]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(varint_bytes(u64::MAX).len(), 10);
    }

    #[test]
    fn test_varint_roundtrip() {
        for value in [0u64, 1, 127, 128, 255, 300, 1 << 21, 1 << 42, u64::MAX] {
            let buf = varint_bytes(value);
            let mut reader = WireReader::new(&buf);
            assert_eq!(reader.read_varint().unwrap(), value);
            assert!(reader.is_at_end());
        }
    }

    #[test]
    fn test_varint_rejects_truncation() {
        let mut reader = WireReader::new(&[0x80]);
        assert!(matches!(reader.read_varint(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_varint_rejects_non_minimal() {
        // 0x80 0x00 encodes zero in two bytes
        let mut reader = WireReader::new(&[0x80, 0x00]);
        assert!(matches!(reader.read_varint(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_varint_rejects_overflow() {
        let mut reader = WireReader::new(&[0xff; 11]);
        assert!(matches!(reader.read_varint(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_field_roundtrip() {
        let mut buf = Vec::new();
        put_varint_field(&mut buf, 1, 1);
        put_bytes_field(&mut buf, 3, b"abc");
        put_fixed32_field(&mut buf, 4, 0x3f800000);

        let mut reader = WireReader::new(&buf);
        let f1 = reader.read_field().unwrap();
        assert_eq!(f1.number, 1);
        assert_eq!(f1.value, WireValue::Varint(1));

        let f3 = reader.read_field().unwrap();
        assert_eq!(f3.number, 3);
        assert_eq!(f3.value, WireValue::Bytes(b"abc".to_vec()));

        let f4 = reader.read_field().unwrap();
        assert_eq!(f4.number, 4);
        assert_eq!(f4.value, WireValue::Fixed32(0x3f800000));
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_length_overrun() {
        // field 2, wire type 2, claimed length 5, only 2 bytes follow
        let buf = [0x12, 0x05, 0xaa, 0xbb];
        let mut reader = WireReader::new(&buf);
        assert!(matches!(reader.read_field(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_rejects_group_wire_types() {
        // field 1, wire type 3 (start group)
        let mut reader = WireReader::new(&[0x0b]);
        assert!(matches!(reader.read_field(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_rejects_field_number_zero() {
        let mut reader = WireReader::new(&[0x00, 0x00]);
        assert!(matches!(reader.read_field(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_raw_field_reemit_identical() {
        let mut buf = Vec::new();
        put_bytes_field(&mut buf, 9, &[1, 2, 3, 4]);
        put_fixed64_field(&mut buf, 12, 0xdeadbeef);

        let mut reader = WireReader::new(&buf);
        let mut out = Vec::new();
        while !reader.is_at_end() {
            put_raw_field(&mut out, &reader.read_field().unwrap());
        }
        assert_eq!(out, buf);
    }
}
