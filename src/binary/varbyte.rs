//! VarByte integers.
//!
//! An unsigned integer is written as base-128 digits, most significant first.
//! Each byte carries seven bits; the high bit is clear on every byte except
//! the last, where it marks the end of the number.
//!
//! ```rust
//! use axion::binary::varbyte::{read_var_usize, write_var_usize};
//!
//! let mut buf = Vec::new();
//! write_var_usize(&mut buf, 300).unwrap();
//! assert_eq!(buf, vec![0x02, 0xAC]);
//! assert_eq!(read_var_usize(&mut &buf[..]).unwrap(), 300);
//! ```

use crate::{Error, Result};
use num_bigint::BigUint;
use std::io::{Read, Write};

const TERMINAL: u8 = 0x80;
const DIGIT_MASK: u8 = 0x7F;

/// Encodes `value` as VarByte digits.
#[must_use]
pub fn encode_var_bytes(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return vec![TERMINAL];
    }
    let mut digits = value.to_radix_be(128);
    if let Some(last) = digits.last_mut() {
        *last |= TERMINAL;
    }
    digits
}

/// # Errors
///
/// Propagates write failures.
pub fn write_var_bytes<W: Write>(writer: &mut W, value: &BigUint) -> Result<()> {
    writer.write_all(&encode_var_bytes(value))?;
    Ok(())
}

/// Reads one VarByte integer of any size.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] if the input ends before the terminal byte.
pub fn read_var_byte_integer<R: Read>(reader: &mut R) -> Result<BigUint> {
    let mut digits = Vec::new();
    loop {
        let byte = read_u8(reader)?;
        digits.push(byte & DIGIT_MASK);
        if byte & TERMINAL != 0 {
            break;
        }
    }
    BigUint::from_radix_be(&digits, 128)
        .ok_or_else(|| Error::format("invalid VarByte digits"))
}

/// # Errors
///
/// Propagates write failures.
pub fn write_var_usize<W: Write>(writer: &mut W, value: usize) -> Result<()> {
    let mut digits = vec![(value & 0x7F) as u8 | TERMINAL];
    let mut rest = value >> 7;
    while rest > 0 {
        digits.push((rest & 0x7F) as u8);
        rest >>= 7;
    }
    digits.reverse();
    writer.write_all(&digits)?;
    Ok(())
}

/// Reads a VarByte integer that must fit in a `usize`.
///
/// # Errors
///
/// Returns a format error on overflow and [`Error::UnexpectedEof`] on truncation.
pub fn read_var_usize<R: Read>(reader: &mut R) -> Result<usize> {
    let mut value: usize = 0;
    loop {
        let byte = read_u8(reader)?;
        value = value
            .checked_mul(128)
            .and_then(|v| v.checked_add(usize::from(byte & DIGIT_MASK)))
            .ok_or_else(|| Error::format("VarByte length does not fit in usize"))?;
        if byte & TERMINAL != 0 {
            return Ok(value);
        }
    }
}

pub(crate) fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Reads exactly `len` bytes without trusting `len` for the allocation size.
pub(crate) fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Error::unexpected_eof(&format!(
            "{} bytes, found {}",
            len,
            buf.len()
        )));
    }
    Ok(buf)
}

/// A VarByte length followed by that many bytes.
pub(crate) fn read_block<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let len = read_var_usize(reader)?;
    read_bytes(reader, len)
}

pub(crate) fn write_block<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    write_var_usize(writer, bytes.len())?;
    writer.write_all(bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert_eq!(encode_var_bytes(&BigUint::from(0u32)), vec![0x80]);
        assert_eq!(encode_var_bytes(&BigUint::from(127u32)), vec![0xFF]);
        assert_eq!(encode_var_bytes(&BigUint::from(128u32)), vec![0x01, 0x80]);
    }

    #[test]
    fn test_usize_and_biguint_agree() {
        for n in [0usize, 1, 127, 128, 16_383, 16_384, usize::MAX] {
            let mut buf = Vec::new();
            write_var_usize(&mut buf, n).unwrap();
            assert_eq!(buf, encode_var_bytes(&BigUint::from(n)));
            assert_eq!(read_var_usize(&mut &buf[..]).unwrap(), n);
        }
    }

    #[test]
    fn test_big_values() {
        let big = BigUint::from(u128::MAX) * BigUint::from(u128::MAX);
        let buf = encode_var_bytes(&big);
        assert_eq!(read_var_byte_integer(&mut &buf[..]).unwrap(), big);
    }

    #[test]
    fn test_truncated_input() {
        let buf = [0x01u8, 0x02];
        assert!(matches!(
            read_var_byte_integer(&mut &buf[..]),
            Err(Error::UnexpectedEof { .. })
        ));
        assert!(matches!(
            read_bytes(&mut &buf[..], 5),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_usize_overflow() {
        let mut buf = vec![0x7Fu8; 12];
        buf.push(0xFF);
        assert!(matches!(read_var_usize(&mut &buf[..]), Err(Error::Format(_))));
    }
}
