use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::error::{CodecError, CodecResult};

// https://kafka.apache.org/protocol.html#protocol_types

/// Bounds-checked big-endian reads. `bytes::Buf` panics on underflow; every read
/// in the codec goes through these so a short frame surfaces as a `CodecError`
/// naming the field that ran out of bytes.
pub trait BufExt: Buf {
    fn try_get_u8(&mut self, field: &'static str) -> CodecResult<u8> {
        if self.remaining() < 1 {
            return Err(CodecError::Truncated(field));
        }
        Ok(self.get_u8())
    }

    fn try_get_i8(&mut self, field: &'static str) -> CodecResult<i8> {
        if self.remaining() < 1 {
            return Err(CodecError::Truncated(field));
        }
        Ok(self.get_i8())
    }

    fn try_get_i16(&mut self, field: &'static str) -> CodecResult<i16> {
        if self.remaining() < 2 {
            return Err(CodecError::Truncated(field));
        }
        Ok(self.get_i16())
    }

    fn try_get_i32(&mut self, field: &'static str) -> CodecResult<i32> {
        if self.remaining() < 4 {
            return Err(CodecError::Truncated(field));
        }
        Ok(self.get_i32())
    }

    fn try_copy_bytes(&mut self, len: usize, field: &'static str) -> CodecResult<Bytes> {
        if self.remaining() < len {
            return Err(CodecError::Truncated(field));
        }
        Ok(self.copy_to_bytes(len))
    }
}

impl<T: Buf> BufExt for T {}

/// Represents a sequence of characters. First the length N + 1 is given as an UNSIGNED_VARINT.
/// Then N bytes follow which are the UTF-8 encoding of the character sequence.
pub struct CompactString;

impl CompactString {
    pub fn serialize(s: &str) -> Bytes {
        let len = s.len() as u8 + 1;

        let mut b = BytesMut::new();
        b.put_u8(len);
        b.put(s.as_bytes());

        b.freeze()
    }

    pub fn deserialize(src: &mut Bytes) -> CodecResult<String> {
        let len = src.try_get_u8("compact string length")?; // string length + 1
        let string_len = if len > 1 { len as usize - 1 } else { 0 };
        let bytes = src.try_copy_bytes(string_len, "compact string")?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Deserialize<String> for CompactString {
    fn deserialize(src: &mut Bytes) -> CodecResult<String> {
        Self::deserialize(src)
    }
}

/// A sequence of characters or null. A length of -1 denotes null; otherwise a
/// 2-byte length N is followed by N bytes of UTF-8.
pub struct NullableString;

impl NullableString {
    pub fn deserialize(src: &mut Bytes) -> CodecResult<Option<String>> {
        let len = src.try_get_i16("string length")?;
        if len == -1 {
            return Ok(None);
        }
        if len < 0 {
            return Err(CodecError::NegativeLength {
                field: "string length",
                len,
            });
        }
        let bytes = src.try_copy_bytes(len as usize, "string")?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

// Represents a sequence of objects of a given type T. Type T can be either a primitive type (e.g. STRING) or a structure.
// First, the length N + 1 is given as an UNSIGNED_VARINT. Then N instances of type T follow.
// A null array is represented with a length of 0.
pub struct CompactArray;

impl CompactArray {
    pub fn deserialize<T, U: Deserialize<T>>(src: &mut Bytes) -> CodecResult<Vec<T>> {
        let len = src.try_get_i8("compact array length")?; // array length + 1
        let items_len = if len > 1 { len as usize - 1 } else { 0 };

        let mut items = Vec::with_capacity(items_len);
        for _ in 0..items_len {
            let item = U::deserialize(src)?;
            items.push(item);
            _ = src.try_get_u8("compact array item tag buffer")?; // tag buffer
        }

        Ok(items)
    }
}

pub trait Deserialize<T> {
    fn deserialize(src: &mut Bytes) -> CodecResult<T>;
}
