use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Result,
    SmallFixedIdBerContainer, UniversalId,
};

/// `BOOLEAN`, canonically encoded.
///
/// Encodes `true` as `0xFF`; on decode any non-zero content octet is
/// accepted as `true` and re-canonicalized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Boolean<I: FixedId = UniversalId<1>> {
    container: SmallFixedIdBerContainer<I, 1>,
}

impl Boolean {
    /// A `BOOLEAN` under the universal tag. Retagged booleans are built
    /// through `From`, e.g. `Boolean::<ContextId<3>>::from(true)`.
    pub fn new(value: bool) -> Self {
        Self::from(value)
    }
}

impl<I: FixedId> Boolean<I> {
    pub fn value(&self) -> bool {
        self.container.content() != [0x00]
    }

    pub fn assign(&mut self, value: bool) {
        *self = Self::from(value);
    }
}

impl<I: FixedId> Default for Boolean<I> {
    fn default() -> Self {
        Self::from(false)
    }
}

impl<I: FixedId> From<bool> for Boolean<I> {
    fn from(value: bool) -> Self {
        let mut container = SmallFixedIdBerContainer::new();
        // single octet, always fits
        let _ = container.assign_content(&[if value { 0xFF } else { 0x00 }]);
        Boolean { container }
    }
}

impl<I: FixedId> Identified for Boolean<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for Boolean<I> {
    fn content_length(&self) -> Result<crate::Length> {
        Ok(crate::Length::from(1u8))
    }

    fn encode_content(&self, encoder: &mut crate::Encoder<'_>) -> Result<()> {
        encoder.bytes(self.container.content())
    }
}

impl<I: FixedId> DecodeView for Boolean<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, crate::Construction::Primitive)?;
        match content.content() {
            [octet] => Ok(Self::from(*octet != 0)),
            _ => Err(ErrorKind::Length { tag: content.tag() }.into()),
        }
    }
}
