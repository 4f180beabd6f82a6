//! Owning containers for encoded elements.
//!
//! Containers keep elements in wire form, so re-emitting one is a byte copy
//! and no re-encoding happens on the hot path. The typed wrappers in
//! [`crate::types`] are thin shells over these.

use crate::{
    BerView, Construction, Decodable, Decoder, Encodable, Encoder, ErrorKind, FixedId, Identified,
    Identifier, Length, Result,
};
use core::marker::PhantomData;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An owned element with a runtime tag.
///
/// Holds the complete encoding, header octets included. The default value is
/// the two-octet element with tag and length zero.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BerContainer {
    data: Vec<u8>,
    tag: crate::Tag,
    id_length: usize,
    header_length: usize,
}

#[cfg(feature = "alloc")]
impl BerContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a complete encoded element into this container.
    pub fn assign(&mut self, bytes: &[u8]) -> Result<Length> {
        let view = BerView::from_bytes(bytes)?;
        self.assign_view(view);
        Ok(view.content_length())
    }

    fn assign_view(&mut self, view: BerView<'_>) {
        self.data.clear();
        self.data.extend_from_slice(view.ber());
        self.tag = view.tag();
        self.id_length = view.identifier_octets().len();
        self.header_length = self.id_length + view.length_octets().len();
    }

    /// Replace the element with a freshly built one.
    pub fn assign_content(
        &mut self,
        id: &Identifier,
        construction: Construction,
        content: &[u8],
    ) -> Result<()> {
        let content_length = Length::try_from(content.len())?;
        let header_length = id.header_length(content_length)?.to_usize();

        self.data.clear();
        self.data.resize(header_length + content.len(), 0);
        let mut encoder = Encoder::new(&mut self.data[..header_length]);
        id.encode_header(construction, content_length, &mut encoder)?;
        encoder.finish()?;
        self.data[header_length..].copy_from_slice(content);

        // re-parse to refresh the cached tag and offsets
        let (tag, id_length, length_length) = {
            let view = BerView::from_bytes(&self.data)?;
            (
                view.tag(),
                view.identifier_octets().len(),
                view.length_octets().len(),
            )
        };
        self.tag = tag;
        self.id_length = id_length;
        self.header_length = id_length + length_length;
        Ok(())
    }

    /// View the held element.
    pub fn view(&self) -> BerView<'_> {
        BerView::from_parts(&self.data, self.tag, self.id_length, self.header_length)
    }

    pub fn tag(&self) -> crate::Tag {
        self.tag
    }

    /// The complete encoding.
    pub fn ber(&self) -> &[u8] {
        &self.data
    }

    /// The content octets.
    pub fn content(&self) -> &[u8] {
        &self.data[self.header_length..]
    }
}

#[cfg(feature = "alloc")]
impl Default for BerContainer {
    fn default() -> Self {
        BerContainer {
            data: alloc::vec![0x00, 0x00],
            tag: crate::Tag::universal(0),
            id_length: 1,
            header_length: 2,
        }
    }
}

#[cfg(feature = "alloc")]
impl<'a> Decodable<'a> for BerContainer {
    fn decode(decoder: &mut Decoder<'a>) -> Result<Self> {
        let view = BerView::decode(decoder)?;
        let mut container = BerContainer::new();
        container.assign_view(view);
        Ok(container)
    }
}

#[cfg(feature = "alloc")]
impl Encodable for BerContainer {
    fn encoded_length(&self) -> Result<Length> {
        self.data.len().try_into()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.bytes(&self.data)
    }
}

/// An owned element whose identifier is fixed by the type parameter.
///
/// Holds the complete encoding. Assigning content re-renders the header
/// octets, so the buffer is always a valid element under `I`.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedIdBerContainer<I: FixedId> {
    data: Vec<u8>,
    content_length: usize,
    _id: PhantomData<I>,
}

#[cfg(feature = "alloc")]
impl<I: FixedId> FixedIdBerContainer<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content octets.
    pub fn content(&self) -> &[u8] {
        &self.data[self.data.len() - self.content_length..]
    }

    /// Mutable access to the content octets.
    pub fn content_mut(&mut self) -> &mut [u8] {
        let start = self.data.len() - self.content_length;
        &mut self.data[start..]
    }

    pub fn content_length(&self) -> Length {
        Length::try_from(self.content_length).unwrap_or_default()
    }

    /// The complete encoding.
    pub fn ber(&self) -> &[u8] {
        &self.data
    }

    /// Replace the content octets, re-rendering the headers.
    pub fn assign_content(&mut self, content: &[u8]) -> Result<()> {
        let content_length = Length::try_from(content.len())?;
        let header_length = I::ID.header_length(content_length)?.to_usize();

        self.data.clear();
        self.data.resize(header_length + content.len(), 0);
        render_headers::<I>(&mut self.data[..header_length], content_length)?;
        self.data[header_length..].copy_from_slice(content);
        self.content_length = content.len();
        Ok(())
    }

    /// Resize the content to `new_length` octets in place, preserving the
    /// prefix that fits and zero-filling any grown tail.
    pub fn resize_content(&mut self, new_length: usize) -> Result<()> {
        let old_length = self.content_length;
        let old_header = self.data.len() - old_length;
        let content_length = Length::try_from(new_length)?;
        let new_header = I::ID.header_length(content_length)?.to_usize();
        let new_total = new_header + new_length;

        let kept = old_length.min(new_length);
        if new_total > self.data.len() {
            self.data.resize(new_total, 0);
        }
        self.data.copy_within(old_header..old_header + kept, new_header);
        self.data.truncate(new_total);
        for byte in &mut self.data[new_header + kept..] {
            *byte = 0;
        }
        render_headers::<I>(&mut self.data[..new_header], content_length)?;
        self.content_length = new_length;
        Ok(())
    }

    pub(crate) fn from_content(content: &[u8]) -> Result<Self> {
        let mut container = FixedIdBerContainer {
            data: Vec::new(),
            content_length: 0,
            _id: PhantomData,
        };
        container.assign_content(content)?;
        Ok(container)
    }
}

#[cfg(feature = "alloc")]
fn render_headers<I: FixedId>(buffer: &mut [u8], content_length: Length) -> Result<()> {
    let mut encoder = Encoder::new(buffer);
    I::ID.encode_header(Construction::Primitive, content_length, &mut encoder)?;
    encoder.finish()?;
    Ok(())
}

#[cfg(feature = "alloc")]
impl<I: FixedId> Default for FixedIdBerContainer<I> {
    fn default() -> Self {
        match Self::from_content(&[]) {
            Ok(container) => container,
            // unreachable, an empty element always renders
            Err(_) => FixedIdBerContainer {
                data: Vec::new(),
                content_length: 0,
                _id: PhantomData,
            },
        }
    }
}

#[cfg(feature = "alloc")]
impl<I: FixedId> Identified for FixedIdBerContainer<I> {
    const IDENTIFIER: Identifier = I::ID;
}

#[cfg(feature = "alloc")]
impl<I: FixedId> crate::DecodeView for FixedIdBerContainer<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, Construction::Primitive)?;
        Self::from_content(content.content())
    }
}

#[cfg(feature = "alloc")]
impl<I: FixedId> Encodable for FixedIdBerContainer<I> {
    fn encoded_length(&self) -> Result<Length> {
        self.data.len().try_into()
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.bytes(&self.data)
    }
}

/// A fixed-identifier element with inline content storage.
///
/// Content octets live in a `heapless::Vec` of capacity `N`; header octets
/// are rendered only at encode time. Suited to small leaf values that never
/// touch the heap.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct SmallFixedIdBerContainer<I: FixedId, const N: usize> {
    content: heapless::Vec<u8, N>,
    _id: PhantomData<I>,
}

impl<I: FixedId, const N: usize> SmallFixedIdBerContainer<I, N> {
    pub fn new() -> Self {
        SmallFixedIdBerContainer {
            content: heapless::Vec::new(),
            _id: PhantomData,
        }
    }

    /// The content octets.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_length(&self) -> Length {
        Length::try_from(self.content.len()).unwrap_or_default()
    }

    /// Replace the content octets. Fails if the content exceeds `N`.
    pub fn assign_content(&mut self, content: &[u8]) -> Result<()> {
        self.content.clear();
        self.content
            .extend_from_slice(content)
            .map_err(|_| ErrorKind::Overlength.into())
    }

    pub(crate) fn from_content(content: &[u8]) -> Result<Self> {
        let mut container = Self::new();
        container.assign_content(content)?;
        Ok(container)
    }
}

impl<I: FixedId, const N: usize> Identified for SmallFixedIdBerContainer<I, N> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId, const N: usize> crate::EncodableContent for SmallFixedIdBerContainer<I, N> {
    fn content_length(&self) -> Result<Length> {
        self.content.len().try_into()
    }

    fn encode_content(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.bytes(&self.content)
    }
}

impl<I: FixedId, const N: usize> crate::DecodeView for SmallFixedIdBerContainer<I, N> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, Construction::Primitive)?;
        Self::from_content(content.content())
    }
}

/// Length and content octets of an element, without its identifier octets.
///
/// Holds the payload of elements whose identifier is supplied from
/// elsewhere, as object identifier and time values do.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LengthAndContentContainer {
    /// Length octets followed by content octets.
    data: Vec<u8>,
    content_offset: usize,
}

#[cfg(feature = "alloc")]
impl LengthAndContentContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content octets.
    pub fn content(&self) -> &[u8] {
        &self.data[self.content_offset..]
    }

    pub fn content_length(&self) -> Length {
        Length::try_from(self.data.len() - self.content_offset).unwrap_or_default()
    }

    /// Length and content octets together.
    pub fn length_and_content(&self) -> &[u8] {
        &self.data
    }

    /// Replace the content octets, re-rendering the length octets.
    pub fn assign_content(&mut self, content: &[u8]) -> Result<()> {
        let content_length = Length::try_from(content.len())?;
        let length_length = content_length.encoded_length()?.to_usize();

        self.data.clear();
        self.data.resize(length_length + content.len(), 0);
        let mut encoder = Encoder::new(&mut self.data[..length_length]);
        content_length.encode(&mut encoder)?;
        encoder.finish()?;
        self.data[length_length..].copy_from_slice(content);
        self.content_offset = length_length;
        Ok(())
    }

    /// Copy the length and content octets out of a parsed element.
    pub fn assign_view(&mut self, view: BerView<'_>) {
        self.data.clear();
        self.data.extend_from_slice(view.length_octets());
        self.data.extend_from_slice(view.content());
        self.content_offset = view.length_octets().len();
    }
}

#[cfg(feature = "alloc")]
impl Default for LengthAndContentContainer {
    fn default() -> Self {
        LengthAndContentContainer {
            data: alloc::vec![0x00],
            content_offset: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SmallFixedIdBerContainer;
    use crate::{Decodable, Encodable, ErrorKind, UniversalId};
    use hex_literal::hex;

    #[cfg(feature = "alloc")]
    use super::{BerContainer, FixedIdBerContainer, LengthAndContentContainer};
    #[cfg(feature = "alloc")]
    use crate::{ContextId, ExplicitId, Length};

    #[cfg(feature = "alloc")]
    #[test]
    fn container_default_is_empty_element() {
        let container = BerContainer::new();
        assert_eq!(container.ber(), &[0x00, 0x00]);
        assert_eq!(container.content(), &[]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn container_assign_and_reemit() {
        let bytes = hex!("30 06 02 01 01 02 01 02");
        let mut container = BerContainer::new();
        assert_eq!(container.assign(&bytes).unwrap(), Length::from(6u8));
        assert_eq!(container.ber(), &bytes);
        assert_eq!(container.to_vec().unwrap(), &bytes);
        assert_eq!(container.view().children().count(), 2);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn container_rejects_trailing_bytes() {
        let bytes = hex!("02 01 2A FF");
        let mut container = BerContainer::new();
        assert!(container.assign(&bytes).is_err());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn fixed_container_renders_headers() {
        let mut container = FixedIdBerContainer::<UniversalId<4>>::new();
        assert_eq!(container.ber(), &hex!("04 00"));

        container.assign_content(&hex!("AA BB CC")).unwrap();
        assert_eq!(container.ber(), &hex!("04 03 AA BB CC"));
        assert_eq!(container.content(), &hex!("AA BB CC"));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn fixed_container_explicit_tagging() {
        let mut container =
            FixedIdBerContainer::<ExplicitId<ContextId<0>, UniversalId<4>>>::new();
        container.assign_content(&hex!("AB")).unwrap();
        assert_eq!(container.ber(), &hex!("A0 03 04 01 AB"));

        let decoded =
            FixedIdBerContainer::<ExplicitId<ContextId<0>, UniversalId<4>>>::from_bytes(
                &hex!("A0 03 04 01 AB"),
            )
            .unwrap();
        assert_eq!(decoded.content(), &hex!("AB"));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn fixed_container_rejects_wrong_tag() {
        let err = FixedIdBerContainer::<UniversalId<4>>::from_bytes(&hex!("02 01 00"))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnexpectedTag { .. }));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn resize_content_preserves_prefix() {
        let mut container = FixedIdBerContainer::<UniversalId<4>>::new();
        container.assign_content(&hex!("01 02 03 04")).unwrap();

        container.resize_content(2).unwrap();
        assert_eq!(container.ber(), &hex!("04 02 01 02"));

        container.resize_content(5).unwrap();
        assert_eq!(container.ber(), &hex!("04 05 01 02 00 00 00"));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn resize_content_across_length_forms() {
        // growing past 127 content octets widens the length octets
        let mut container = FixedIdBerContainer::<UniversalId<4>>::new();
        let content = [0x5Au8; 0x7F];
        container.assign_content(&content).unwrap();
        assert_eq!(container.ber().len(), 2 + 0x7F);

        container.resize_content(0x80).unwrap();
        assert_eq!(container.ber()[..3], hex!("04 81 80"));
        assert_eq!(&container.content()[..0x7F], &content[..]);
        assert_eq!(container.content()[0x7F], 0x00);

        container.resize_content(0x7F).unwrap();
        assert_eq!(container.ber()[..2], hex!("04 7F"));
        assert_eq!(container.content(), &content[..]);
    }

    #[test]
    fn small_container_capacity_is_enforced() {
        let mut container = SmallFixedIdBerContainer::<UniversalId<2>, 2>::new();
        assert!(container.assign_content(&[0x01, 0x02]).is_ok());
        assert_eq!(
            container.assign_content(&[0x01, 0x02, 0x03]).unwrap_err().kind(),
            ErrorKind::Overlength
        );
    }

    #[test]
    fn small_container_round_trip() {
        let container =
            SmallFixedIdBerContainer::<UniversalId<2>, 2>::from_bytes(&hex!("02 02 12 34"))
                .unwrap();
        assert_eq!(container.content(), &hex!("12 34"));

        let mut buffer = [0u8; 4];
        assert_eq!(
            container.encode_to_slice(&mut buffer).unwrap(),
            &hex!("02 02 12 34")
        );
    }

    #[test]
    fn small_container_rejects_oversized_wire_value() {
        let err = SmallFixedIdBerContainer::<UniversalId<2>, 2>::from_bytes(
            &hex!("02 03 12 34 56"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlength);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn length_and_content() {
        let mut container = LengthAndContentContainer::new();
        assert_eq!(container.length_and_content(), &[0x00]);

        container.assign_content(&hex!("2A 86 48")).unwrap();
        assert_eq!(container.length_and_content(), &hex!("03 2A 86 48"));
        assert_eq!(container.content(), &hex!("2A 86 48"));
        assert_eq!(container.content_length(), Length::from(3u8));
    }
}
