//! Zero-copy view of an encoded BER element.

use crate::{
    Construction, Decodable, Decoder, Encodable, Encoder, ErrorKind, Identifier, Length, Result,
    Tag,
};

/// A parsed but not decoded TLV element, borrowing the encoded bytes.
///
/// Parsing validates the header octets and that the full content is present;
/// interpreting the content is left to the typed decoders. Views are cheap to
/// copy and iterate, so structural traversal allocates nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BerView<'a> {
    /// Full element, header octets included.
    data: &'a [u8],

    tag: Tag,

    /// Count of identifier octets at the start of `data`.
    id_length: usize,

    /// Count of identifier plus length octets at the start of `data`.
    header_length: usize,
}

impl<'a> BerView<'a> {
    /// Parse one element from the start of `bytes`.
    ///
    /// Trailing bytes after the element are ignored; use [`Decodable::from_bytes`]
    /// to insist the element spans the whole input.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let mut decoder = Decoder::new(bytes);
        let tag = decoder.decode::<Tag>()?;
        let id_length = decoder.position().to_usize();
        let length = decoder.decode::<Length>()?;
        let header_length = decoder.position().to_usize();

        let total = header_length + length.to_usize();
        let data = bytes
            .get(..total)
            .ok_or_else(|| ErrorKind::Truncated.at(decoder.position()))?;

        Ok(BerView {
            data,
            tag,
            id_length,
            header_length,
        })
    }

    /// Assemble a view from offsets already known to be valid.
    pub(crate) fn from_parts(
        data: &'a [u8],
        tag: Tag,
        id_length: usize,
        header_length: usize,
    ) -> Self {
        BerView {
            data,
            tag,
            id_length,
            header_length,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn class(&self) -> crate::Class {
        self.tag.class
    }

    pub fn construction(&self) -> Construction {
        self.tag.construction()
    }

    /// Count of identifier octets.
    pub fn identifier_length(&self) -> usize {
        self.id_length
    }

    /// Count of identifier plus length octets.
    pub fn header_length(&self) -> usize {
        self.header_length
    }

    /// Content length in bytes.
    pub fn content_length(&self) -> Length {
        // cannot overflow, parse() bounds both by the input length
        Length::try_from(self.data.len() - self.header_length).unwrap_or_default()
    }

    /// The content octets.
    pub fn content(&self) -> &'a [u8] {
        &self.data[self.header_length..]
    }

    /// The complete encoding, header octets included.
    pub fn ber(&self) -> &'a [u8] {
        self.data
    }

    /// The identifier octets.
    pub fn identifier_octets(&self) -> &'a [u8] {
        &self.data[..self.id_length]
    }

    /// The length octets.
    pub fn length_octets(&self) -> &'a [u8] {
        &self.data[self.id_length..self.header_length]
    }

    /// The length and content octets, identifier octets stripped.
    pub fn length_and_content(&self) -> &'a [u8] {
        &self.data[self.id_length..]
    }

    /// Iterate over the elements of this element's content.
    ///
    /// Meaningful for constructed elements; for primitive content the
    /// iterator will generally yield garbage or errors.
    pub fn children(&self) -> BerChildren<'a> {
        BerChildren {
            remaining: self.content(),
        }
    }

    /// Check this element against an identifier and construction, descending
    /// through the outer layer of explicit tagging where the identifier asks
    /// for it. Returns the view holding the actual content.
    pub(crate) fn expect(
        &self,
        id: &Identifier,
        construction: Construction,
    ) -> Result<BerView<'a>> {
        let mismatch = || ErrorKind::UnexpectedTag {
            expected: id.expected_tag(construction),
            actual: self.tag,
        };

        match id {
            Identifier::Single(single) => {
                if single.matches(self.tag) && self.construction() == construction {
                    Ok(*self)
                } else {
                    Err(mismatch().into())
                }
            }
            Identifier::Nested { outer, inner } => {
                if !outer.matches(self.tag) || !self.tag.constructed {
                    return Err(mismatch().into());
                }
                let child = BerView::parse(self.content())?;
                if child.ber().len() != self.content().len() {
                    return Err(ErrorKind::Length { tag: self.tag }.into());
                }
                if inner.matches(child.tag) && child.construction() == construction {
                    Ok(child)
                } else {
                    Err(ErrorKind::UnexpectedTag {
                        expected: Some(inner.tag(construction)),
                        actual: child.tag,
                    }
                    .into())
                }
            }
            Identifier::TagSet(_) => {
                if id.matches(self.tag) {
                    Ok(*self)
                } else {
                    Err(mismatch().into())
                }
            }
        }
    }
}

impl<'a> Decodable<'a> for BerView<'a> {
    fn decode(decoder: &mut Decoder<'a>) -> Result<BerView<'a>> {
        let view = BerView::parse(decoder.remaining()?)?;
        decoder.bytes(view.ber().len())?;
        Ok(view)
    }
}

impl Encodable for BerView<'_> {
    fn encoded_length(&self) -> Result<Length> {
        self.data.len().try_into()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.bytes(self.data)
    }
}

/// Iterator over the child elements of a constructed element's content.
///
/// Yields `Err` once and then ends if a child fails to parse.
#[derive(Clone, Debug)]
pub struct BerChildren<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for BerChildren<'a> {
    type Item = Result<BerView<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        match BerView::parse(self.remaining) {
            Ok(view) => {
                self.remaining = &self.remaining[view.ber().len()..];
                Some(Ok(view))
            }
            Err(e) => {
                self.remaining = &[];
                Some(Err(e))
            }
        }
    }
}
