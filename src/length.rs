//! X.690 length octets: short form and long definite form.

use crate::{Decodable, Decoder, Encodable, Encoder, Error, ErrorKind, Result};
use core::{
    convert::{TryFrom, TryInto},
    fmt,
    ops::Add,
};

/// BER-encoded content length.
///
/// Short form carries lengths below 128 in a single octet. Long definite form
/// sets the high bit of the first octet and stores the count of following
/// big-endian octets in its low 7 bits; up to 8 following octets are accepted
/// on decode, of which this crate can represent values up to `u32::MAX`.
/// The indefinite form (`0x80`) is rejected.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Length(u32);

impl Length {
    /// Return a length of `0`.
    pub const fn zero() -> Self {
        Length(0)
    }

    /// Get the maximum length supported by this crate
    pub const fn max() -> usize {
        u32::MAX as usize
    }

    /// Convert length to `usize`
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Add for Length {
    type Output = Result<Self>;

    fn add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Length)
            .ok_or_else(|| ErrorKind::Overflow.into())
    }
}

impl Add<u8> for Length {
    type Output = Result<Self>;

    fn add(self, other: u8) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<u16> for Length {
    type Output = Result<Self>;

    fn add(self, other: u16) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<u32> for Length {
    type Output = Result<Self>;

    fn add(self, other: u32) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<usize> for Length {
    type Output = Result<Self>;

    fn add(self, other: usize) -> Result<Self> {
        self + Length::try_from(other)?
    }
}

impl Add<Length> for Result<Length> {
    type Output = Self;

    fn add(self, other: Length) -> Self {
        self? + other
    }
}

impl From<u8> for Length {
    fn from(len: u8) -> Length {
        Length(len as u32)
    }
}

impl From<u16> for Length {
    fn from(len: u16) -> Length {
        Length(len as u32)
    }
}

impl From<u32> for Length {
    fn from(len: u32) -> Length {
        Length(len)
    }
}

impl From<Length> for u32 {
    fn from(len: Length) -> u32 {
        len.0
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> usize {
        len.0 as usize
    }
}

impl TryFrom<usize> for Length {
    type Error = Error;

    fn try_from(len: usize) -> Result<Length> {
        u32::try_from(len)
            .map(Length)
            .map_err(|_| ErrorKind::Overflow.into())
    }
}

impl TryFrom<u64> for Length {
    type Error = Error;

    fn try_from(len: u64) -> Result<Length> {
        u32::try_from(len)
            .map(Length)
            .map_err(|_| ErrorKind::InvalidLength.into())
    }
}

impl Decodable<'_> for Length {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Length> {
        let first = decoder.byte()?;

        if first & 0x80 == 0 {
            return Ok(Length(first as u32));
        }

        match first & 0x7F {
            // indefinite form: rejected, never silently mis-parsed
            0 => decoder.error(ErrorKind::IndefiniteLength),
            count @ 1..=8 => {
                let mut value = 0u64;
                for byte in decoder.bytes(count)? {
                    value = (value << 8) | (*byte as u64);
                }
                value.try_into()
            }
            _ => decoder.error(ErrorKind::InvalidLength),
        }
    }
}

impl Encodable for Length {
    fn encoded_length(&self) -> Result<Length> {
        match self.0 {
            0..=0x7F => Ok(Length(1)),
            0x80..=0xFF => Ok(Length(2)),
            0x100..=0xFFFF => Ok(Length(3)),
            0x1_0000..=0xFF_FFFF => Ok(Length(4)),
            _ => Ok(Length(5)),
        }
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        if self.0 < 0x80 {
            return encoder.byte(self.0 as u8);
        }

        // minimal count of big-endian octets, no leading zero byte
        let be = self.0.to_be_bytes();
        let skip = (self.0.leading_zeros() / 8) as usize;
        encoder.byte(0x80 | (4 - skip) as u8)?;
        encoder.bytes(&be[skip..])
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
