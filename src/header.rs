//! Tag-and-length header preceding the content octets of a TLV element.

use crate::{Decodable, Decoder, Encodable, Encoder, Length, Result, Tag};

/// Identifier and length octets of a BER element.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub tag: Tag,
    pub length: Length,
}

impl Header {
    pub fn new(tag: Tag, length: impl TryInto<Length>) -> Result<Self> {
        let length = length
            .try_into()
            .map_err(|_| crate::ErrorKind::Overflow)?;
        Ok(Header { tag, length })
    }
}

impl Decodable<'_> for Header {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Header> {
        let tag = Tag::decode(decoder)?;
        let length = Length::decode(decoder)?;
        Ok(Header { tag, length })
    }
}

impl Encodable for Header {
    fn encoded_length(&self) -> Result<Length> {
        self.tag.encoded_length() + self.length.encoded_length()?
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.tag.encode(encoder)?;
        self.length.encode(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::Header;
    use crate::{Decodable, Encodable, Length, Tag};

    #[test]
    fn round_trip() {
        let header = Header {
            tag: Tag::universal(16).constructed(),
            length: Length::from(0x80u8),
        };

        let mut buffer = [0u8; 8];
        let encoded = header.encode_to_slice(&mut buffer).unwrap();
        assert_eq!(&[0x30, 0x81, 0x80], encoded);
        assert_eq!(header, Header::from_bytes(encoded).unwrap());
    }

    #[test]
    fn position_of_bad_length_is_reported() {
        // tag parses, then the length octets run out
        let err = Header::from_bytes(&[0x30, 0x82, 0x01]).unwrap_err();
        assert_eq!(err.position(), Some(Length::from(2u8)));
    }
}
