//! X.690 identifier octets: tag class, construction bit and tag number.

use crate::{Decodable, Decoder, Encodable, Encoder, Error, ErrorKind, Length, Result};
use core::fmt;

/// Universal tag numbers assigned by X.680 for the types this crate models.
pub mod universal {
    pub const BOOLEAN: u64 = 1;
    pub const INTEGER: u64 = 2;
    pub const BIT_STRING: u64 = 3;
    pub const OCTET_STRING: u64 = 4;
    pub const NULL: u64 = 5;
    pub const OBJECT_IDENTIFIER: u64 = 6;
    pub const ENUMERATED: u64 = 10;
    pub const UTF8_STRING: u64 = 12;
    pub const SEQUENCE: u64 = 16;
    pub const SET: u64 = 17;
    pub const PRINTABLE_STRING: u64 = 19;
    pub const UTC_TIME: u64 = 23;
    pub const GENERALIZED_TIME: u64 = 24;
    pub const VISIBLE_STRING: u64 = 26;
}

/// Tag class, encoded in bits 8 and 7 of the leading identifier octet.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Class {
    Universal = 0b00,
    Application = 0b01,
    Context = 0b10,
    Private = 0b11,
}

impl Class {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Class::Universal,
            0b01 => Class::Application,
            0b10 => Class::Context,
            _ => Class::Private,
        }
    }

    const fn bits(self) -> u8 {
        (self as u8) << 6
    }
}

impl TryFrom<u8> for Class {
    type Error = Error;

    fn try_from(value: u8) -> Result<Class> {
        if value > 0b11 {
            return Err(ErrorKind::InvalidClass { value }.into());
        }
        Ok(Class::from_bits(value))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Class::Universal => "universal",
            Class::Application => "application",
            Class::Context => "context",
            Class::Private => "private",
        })
    }
}

/// Value of bit 6 of the leading identifier octet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Construction {
    Primitive,
    Constructed,
}

impl Construction {
    const fn bit(self) -> u8 {
        match self {
            Construction::Primitive => 0,
            Construction::Constructed => 0b0010_0000,
        }
    }
}

/// A decoded identifier octet sequence.
///
/// Tag numbers up to 30 use the short form; larger numbers use the long form
/// with base-128 continuation octets. Numbers up to `u64::MAX` are supported.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Tag {
    pub class: Class,
    pub constructed: bool,
    pub number: u64,
}

impl Tag {
    /// A primitive tag; chain [`Tag::constructed`] to set bit 6.
    pub const fn new(class: Class, number: u64) -> Self {
        Tag {
            class,
            constructed: false,
            number,
        }
    }

    pub const fn universal(number: u64) -> Self {
        Tag::new(Class::Universal, number)
    }

    pub const fn application(number: u64) -> Self {
        Tag::new(Class::Application, number)
    }

    pub const fn context(number: u64) -> Self {
        Tag::new(Class::Context, number)
    }

    pub const fn private(number: u64) -> Self {
        Tag::new(Class::Private, number)
    }

    /// The same tag with the construction bit set.
    pub const fn constructed(self) -> Self {
        Tag {
            constructed: true,
            ..self
        }
    }

    pub fn construction(&self) -> Construction {
        if self.constructed {
            Construction::Constructed
        } else {
            Construction::Primitive
        }
    }

    /// Assert that the tag matches `expected` in class and number,
    /// ignoring the construction bit.
    pub fn assert_number(&self, class: Class, number: u64) -> Result<()> {
        if self.class == class && self.number == number {
            Ok(())
        } else {
            Err(ErrorKind::UnexpectedTag {
                expected: Some(Tag::new(class, number)),
                actual: *self,
            }
            .into())
        }
    }
}

impl Decodable<'_> for Tag {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Tag> {
        let first = decoder.byte()?;
        let class = Class::from_bits(first >> 6);
        let constructed = first & 0b0010_0000 != 0;

        let number = if first & 0x1F != 0x1F {
            (first & 0x1F) as u64
        } else {
            let mut number = 0u64;
            loop {
                let byte = decoder.byte()?;
                if number > u64::MAX >> 7 {
                    return decoder.error(ErrorKind::Overflow);
                }
                number = (number << 7) | (byte & 0x7F) as u64;
                if byte & 0x80 == 0 {
                    break;
                }
            }
            number
        };

        Ok(Tag {
            class,
            constructed,
            number,
        })
    }
}

impl Encodable for Tag {
    fn encoded_length(&self) -> Result<Length> {
        if self.number <= 30 {
            return Ok(Length::from(1u8));
        }
        let bits = 64 - self.number.leading_zeros();
        let continuation = (bits + 6) / 7;
        Ok(Length::from(1 + continuation as u8))
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let leading = self.class.bits() | self.construction().bit();

        if self.number <= 30 {
            return encoder.byte(leading | self.number as u8);
        }

        encoder.byte(leading | 0x1F)?;
        let bits = 64 - self.number.leading_zeros();
        let mut shift = ((bits + 6) / 7 - 1) * 7;
        while shift > 0 {
            encoder.byte(0x80 | ((self.number >> shift) & 0x7F) as u8)?;
            shift -= 7;
        }
        encoder.byte((self.number & 0x7F) as u8)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::{Class, Tag};
    use crate::{Decodable, Encodable, ErrorKind};

    #[test]
    fn class_bits() {
        assert_eq!(Class::try_from(0b00).unwrap(), Class::Universal);
        assert_eq!(Class::try_from(0b11).unwrap(), Class::Private);
        assert_eq!(
            Class::try_from(4).unwrap_err().kind(),
            ErrorKind::InvalidClass { value: 4 }
        );
    }

    #[test]
    fn short_form() {
        let mut buffer = [0u8; 16];

        let sequence = Tag::universal(16).constructed();
        assert_eq!(&[0x30], sequence.encode_to_slice(&mut buffer).unwrap());
        assert_eq!(sequence, Tag::from_bytes(&[0x30]).unwrap());

        let integer = Tag::universal(2);
        assert_eq!(&[0x02], integer.encode_to_slice(&mut buffer).unwrap());

        let context = Tag::context(0).constructed();
        assert_eq!(&[0xA0], context.encode_to_slice(&mut buffer).unwrap());
        assert_eq!(context, Tag::from_bytes(&[0xA0]).unwrap());

        let private = Tag::private(30);
        assert_eq!(&[0xDE], private.encode_to_slice(&mut buffer).unwrap());
    }

    #[test]
    fn long_form() {
        let mut buffer = [0u8; 16];

        // 31 is the first number that needs the long form
        let tag = Tag::universal(31);
        assert_eq!(&[0x1F, 0x1F], tag.encode_to_slice(&mut buffer).unwrap());
        assert_eq!(tag, Tag::from_bytes(&[0x1F, 0x1F]).unwrap());

        let tag = Tag::universal(127);
        assert_eq!(&[0x1F, 0x7F], tag.encode_to_slice(&mut buffer).unwrap());

        let tag = Tag::universal(128);
        assert_eq!(
            &[0x1F, 0x81, 0x00],
            tag.encode_to_slice(&mut buffer).unwrap()
        );
        assert_eq!(tag, Tag::from_bytes(&[0x1F, 0x81, 0x00]).unwrap());

        let tag = Tag::application(0xFFFF).constructed();
        let encoded = tag.encode_to_slice(&mut buffer).unwrap();
        assert_eq!(&[0x7F, 0x83, 0xFF, 0x7F], encoded);
        assert_eq!(tag, Tag::from_bytes(encoded).unwrap());

        let tag = Tag::universal(u64::MAX);
        let encoded = tag.encode_to_slice(&mut buffer).unwrap();
        assert_eq!(11, encoded.len());
        assert_eq!(tag, Tag::from_bytes(encoded).unwrap());
    }

    #[test]
    fn reported_width_matches_encoding() {
        let mut buffer = [0u8; 16];
        for number in [0u64, 30, 31, 127, 128, 1 << 14, u64::MAX] {
            let tag = Tag::universal(number);
            let encoded = tag.encode_to_slice(&mut buffer).unwrap();
            assert_eq!(tag.encoded_length().unwrap().to_usize(), encoded.len());
        }
    }

    #[test]
    fn rejects_number_overflow() {
        // 10 continuation septets of 0x7F exceed u64
        let bytes = [0x1F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(
            Tag::from_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn rejects_truncation() {
        assert!(Tag::from_bytes(&[]).is_err());
        // continuation bit set with no following byte
        assert!(Tag::from_bytes(&[0x1F, 0x81]).is_err());
    }
}
