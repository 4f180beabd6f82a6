//! Runtime re-tagging adapters.
//!
//! [`Implicit`] and [`Explicit`] wrap a borrowed value with an identifier
//! chosen at runtime, for protocols whose tags are not known at compile
//! time. Compile-time re-tagging goes through the marker parameter of the
//! leaf types instead, e.g. `Integer<ContextId<3>>`.

use crate::{
    Construction, Encodable, EncodableContent, Encoder, Header, Id, Length, Result,
};

/// Implicit tagging: the value's content octets under a replacement tag.
#[derive(Clone, Copy, Debug)]
pub struct Implicit<'a, E: ?Sized> {
    id: Id,
    value: &'a E,
}

impl<'a, E: ?Sized> Implicit<'a, E> {
    pub fn new(id: Id, value: &'a E) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

impl<E> Implicit<'_, E>
where
    E: EncodableContent + ?Sized,
{
    fn header(&self) -> Result<Header> {
        Header::new(self.id.tag(E::CONSTRUCTION), self.value.content_length()?)
    }
}

impl<E> Encodable for Implicit<'_, E>
where
    E: EncodableContent + ?Sized,
{
    fn encoded_length(&self) -> Result<Length> {
        self.header()?.encoded_length()? + self.value.content_length()?
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.header()?.encode(encoder)?;
        self.value.encode_content(encoder)
    }
}

/// Explicit tagging: the value's complete encoding nested inside an outer
/// constructed element.
#[derive(Clone, Copy, Debug)]
pub struct Explicit<'a, E: ?Sized> {
    id: Id,
    value: &'a E,
}

impl<'a, E: ?Sized> Explicit<'a, E> {
    pub fn new(id: Id, value: &'a E) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

impl<E> Explicit<'_, E>
where
    E: Encodable + ?Sized,
{
    fn header(&self) -> Result<Header> {
        Header::new(
            self.id.tag(Construction::Constructed),
            self.value.encoded_length()?,
        )
    }
}

impl<E> Encodable for Explicit<'_, E>
where
    E: Encodable + ?Sized,
{
    fn encoded_length(&self) -> Result<Length> {
        self.header()?.encoded_length()? + self.value.encoded_length()?
    }

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.header()?.encode(encoder)?;
        encoder.encode(self.value)
    }
}
