// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Protocol Buffers wire primitives.
//!
//! Only what the export schema needs: varints, field keys and
//! length-delimited payloads on the way out; the same plus skipping of
//! unknown fields on the way in.

use crate::core::constants::export::MAX_VARINT_BYTES;
use crate::core::errors::DecodeError;
use bytes::{Buf, BufMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
}

impl WireType {
    fn from_raw(raw: u8, offset: usize) -> Result<Self, DecodeError> {
        match raw {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            // 3/4 are deprecated groups, 6/7 are undefined
            other => Err(DecodeError::UnsupportedWireType {
                wire_type: other,
                offset,
            }),
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::Fixed32 => 5,
        }
    }
}

pub fn put_varint(buf: &mut impl BufMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

pub fn put_key(buf: &mut impl BufMut, field: u32, wire_type: WireType) {
    put_varint(buf, (u64::from(field) << 3) | u64::from(wire_type.as_raw()));
}

pub fn put_bytes_field(buf: &mut impl BufMut, field: u32, value: &[u8]) {
    put_key(buf, field, WireType::LengthDelimited);
    put_varint(buf, value.len() as u64);
    buf.put_slice(value);
}

pub fn put_string_field(buf: &mut impl BufMut, field: u32, value: &str) {
    put_bytes_field(buf, field, value.as_bytes());
}

/// Cursor over an encoded message
pub struct WireReader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            total: buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Position relative to the start of this reader
    pub fn offset(&self) -> usize {
        self.total - self.buf.remaining()
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.offset();
        let mut value = 0u64;
        for i in 0..MAX_VARINT_BYTES {
            if !self.buf.has_remaining() {
                return Err(DecodeError::Truncated {
                    offset: self.offset(),
                });
            }
            let byte = self.buf.get_u8();
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte < 0x80 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintOverflow { offset: start })
    }

    /// Read a field key, returning `(field_number, wire_type)`
    pub fn read_key(&mut self) -> Result<(u32, WireType), DecodeError> {
        let offset = self.offset();
        let key = self.read_varint()?;
        let field = u32::try_from(key >> 3)
            .ok()
            .filter(|field| *field != 0)
            .ok_or(DecodeError::InvalidFieldNumber { offset })?;
        let wire_type = WireType::from_raw((key & 0x7) as u8, offset)?;
        Ok((field, wire_type))
    }

    pub fn read_length_delimited(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= self.buf.remaining())
            .ok_or(DecodeError::Truncated {
                offset: self.offset(),
            })?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub fn read_string(&mut self, field: u32) -> Result<String, DecodeError> {
        let raw = self.read_length_delimited()?;
        std::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Skip the value of an unknown field
    pub fn skip(&mut self, wire_type: WireType) -> Result<(), DecodeError> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => self.skip_fixed(8)?,
            WireType::Fixed32 => self.skip_fixed(4)?,
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
        }
        Ok(())
    }

    fn skip_fixed(&mut self, width: usize) -> Result<(), DecodeError> {
        if self.buf.remaining() < width {
            return Err(DecodeError::Truncated {
                offset: self.offset(),
            });
        }
        self.buf.advance(width);
        Ok(())
    }
}
