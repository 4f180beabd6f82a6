//! Trait definitions.

use crate::{BerView, Construction, Decoder, Encoder, Identifier, Length, Result};

#[cfg(feature = "alloc")]
use {alloc::vec::Vec, core::iter, crate::ErrorKind};

/// Decoding trait.
pub trait Decodable<'a>: Sized {
    /// Attempt to decode this message using the provided decoder.
    fn decode(decoder: &mut Decoder<'a>) -> Result<Self>;

    /// Parse `Self` from the provided byte slice, insisting it is consumed
    /// in full.
    fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let mut decoder = Decoder::new(bytes);
        let result = Self::decode(&mut decoder)?;
        decoder.finish(result)
    }
}

/// Encoding trait.
pub trait Encodable {
    /// Compute the length of this value in bytes when BER-encoded.
    fn encoded_length(&self) -> Result<Length>;

    /// Encode this value as BER using the provided [`Encoder`].
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;

    /// Encode this value to the provided byte slice, returning a sub-slice
    /// containing the encoded message.
    fn encode_to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8]> {
        let mut encoder = Encoder::new(buf);
        self.encode(&mut encoder)?;
        encoder.finish()
    }

    /// Encode this message as BER, appending it to the provided byte vector
    /// and returning the count of appended bytes.
    #[cfg(feature = "alloc")]
    fn encode_to_vec(&self, buf: &mut Vec<u8>) -> Result<Length> {
        let expected_length = self.encoded_length()?.to_usize();
        let current_length = buf.len();
        buf.reserve(expected_length);
        buf.extend(iter::repeat(0).take(expected_length));

        let mut encoder = Encoder::new(&mut buf[current_length..]);
        self.encode(&mut encoder)?;
        let actual_length = encoder.finish()?.len();

        if expected_length != actual_length {
            return Err(ErrorKind::Underlength {
                expected: expected_length.try_into()?,
                actual: actual_length.try_into()?,
            }
            .into());
        }

        actual_length.try_into()
    }

    /// Serialize this message as a byte vector.
    #[cfg(feature = "alloc")]
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_to_vec(&mut buf)?;
        Ok(buf)
    }

    /// Serialize this message into a fixed-capacity heapless byte vector.
    fn to_heapless_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>>
    where
        Self: Sized,
    {
        let mut buf = heapless::Vec::new();
        buf.resize_default(self.encoded_length()?.to_usize())
            .map_err(|_| crate::ErrorKind::Overlength)?;

        let mut encoder = Encoder::new(&mut buf);
        self.encode(&mut encoder)?;
        let actual_length = encoder.finish()?.len();
        buf.truncate(actual_length);
        Ok(buf)
    }
}

/// Types with a fixed wire identifier.
pub trait Identified {
    const IDENTIFIER: Identifier;
}

/// Types that can encode their content octets, leaving the header octets to
/// the identifier the type carries.
///
/// Together with [`Identified`] this yields a blanket [`Encodable`] impl that
/// writes the full element, headers of explicitly tagged pairs included.
pub trait EncodableContent {
    /// Construction bit for the innermost tag.
    const CONSTRUCTION: Construction = Construction::Primitive;

    /// Length of the content octets alone.
    fn content_length(&self) -> Result<Length>;

    /// Write the content octets alone.
    fn encode_content(&self, encoder: &mut Encoder<'_>) -> Result<()>;
}

impl<T: EncodableContent + Identified> Encodable for T {
    fn encoded_length(&self) -> Result<Length> {
        let content = self.content_length()?;
        Self::IDENTIFIER.header_length(content)? + content
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let content = self.content_length()?;
        Self::IDENTIFIER.encode_header(Self::CONSTRUCTION, content, encoder)?;
        self.encode_content(encoder)
    }
}

/// Types that decode themselves out of a parsed [`BerView`].
///
/// Types which impl this trait receive a blanket [`Decodable`] impl.
pub trait DecodeView: Sized + Identified {
    /// Decode from a view, checking it against the given identifier rather
    /// than the type's own. Used by sequence fields and choice variants
    /// decoded under an overriding tag.
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self>;

    /// Decode from a view under the type's own identifier.
    fn decode_view(view: BerView<'_>) -> Result<Self> {
        Self::decode_view_with(view, &Self::IDENTIFIER)
    }
}

impl<'a, T: DecodeView> Decodable<'a> for T {
    fn decode(decoder: &mut Decoder<'a>) -> Result<T> {
        BerView::decode(decoder)
            .and_then(|view| Self::decode_view(view))
            .or_else(|e| {
                if decoder.is_failed() {
                    Err(e)
                } else {
                    decoder.error(e.kind())
                }
            })
    }
}
