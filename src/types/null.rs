use crate::{
    BerView, DecodeView, ErrorKind, FixedId, Identified, Identifier, Length, Result, UniversalId,
};
use core::marker::PhantomData;

/// `NULL`. Carries no content octets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Null<I: FixedId = UniversalId<5>> {
    _id: PhantomData<I>,
}

impl Null {
    /// A `NULL` under the universal tag.
    pub fn new() -> Self {
        Null { _id: PhantomData }
    }
}

impl<I: FixedId> Identified for Null<I> {
    const IDENTIFIER: Identifier = I::ID;
}

impl<I: FixedId> crate::EncodableContent for Null<I> {
    fn content_length(&self) -> Result<Length> {
        Ok(Length::zero())
    }

    fn encode_content(&self, _encoder: &mut crate::Encoder<'_>) -> Result<()> {
        Ok(())
    }
}

impl<I: FixedId> DecodeView for Null<I> {
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, crate::Construction::Primitive)?;
        if content.content().is_empty() {
            Ok(Null { _id: PhantomData })
        } else {
            Err(ErrorKind::Length { tag: content.tag() }.into())
        }
    }
}
