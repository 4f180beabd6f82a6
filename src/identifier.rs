//! Identifiers bound to types at compile time.
//!
//! A type that always appears on the wire under the same tag carries that
//! tag as a [`FixedId`] marker in its type parameters, so retagging is a
//! type-level operation and needs no runtime state.

use crate::{Class, Construction, Encodable, Encoder, ErrorKind, Length, Result, Tag};
use core::marker::PhantomData;

/// A single tag, without the construction bit.
///
/// The construction bit is a property of the content, not of the identity of
/// a type, so it lives in [`Construction`] and is supplied at encode time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Id {
    pub class: Class,
    pub number: u64,
}

impl Id {
    pub const fn new(class: Class, number: u64) -> Self {
        Id { class, number }
    }

    pub const fn universal(number: u64) -> Self {
        Id::new(Class::Universal, number)
    }

    pub const fn application(number: u64) -> Self {
        Id::new(Class::Application, number)
    }

    pub const fn context(number: u64) -> Self {
        Id::new(Class::Context, number)
    }

    pub const fn private(number: u64) -> Self {
        Id::new(Class::Private, number)
    }

    /// Pair this identity with a construction bit, yielding a wire tag.
    pub fn tag(self, construction: Construction) -> Tag {
        let tag = Tag::new(self.class, self.number);
        match construction {
            Construction::Constructed => tag.constructed(),
            Construction::Primitive => tag,
        }
    }

    pub fn matches(self, tag: Tag) -> bool {
        self.class == tag.class && self.number == tag.number
    }
}

/// Identifier of a type: a single tag, an explicitly tagged pair of them,
/// or a set of alternatives for choice types.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Identifier {
    /// One tag.
    Single(Id),

    /// Explicit tagging: an outer constructed tag whose content is exactly
    /// one inner element.
    Nested { outer: Id, inner: Id },

    /// Any of the listed identifiers. Used by choice types; never encoded
    /// directly.
    TagSet(&'static [Identifier]),
}

impl Identifier {
    /// Does a decoded tag match this identifier's outermost layer?
    pub fn matches(&self, tag: Tag) -> bool {
        match self {
            Identifier::Single(id) => id.matches(tag),
            Identifier::Nested { outer, .. } => outer.matches(tag),
            Identifier::TagSet(set) => set.iter().any(|id| id.matches(tag)),
        }
    }

    /// The tag a decoder should have seen, for error reporting.
    /// `None` for tag sets, which have no single expectation.
    pub(crate) fn expected_tag(&self, construction: Construction) -> Option<Tag> {
        match self {
            Identifier::Single(id) => Some(id.tag(construction)),
            Identifier::Nested { outer, .. } => Some(outer.tag(Construction::Constructed)),
            Identifier::TagSet(_) => None,
        }
    }

    /// Combined length of all header octets this identifier adds in front
    /// of `content_length` content octets.
    pub(crate) fn header_length(&self, content_length: Length) -> Result<Length> {
        match self {
            Identifier::Single(id) => header_length(*id, content_length),
            Identifier::Nested { outer, inner } => {
                let inner_header = header_length(*inner, content_length)?;
                let wrapped = (inner_header + content_length)?;
                header_length(*outer, wrapped)? + inner_header
            }
            Identifier::TagSet(_) => Err(ErrorKind::Failed.into()),
        }
    }

    /// Write the header octets for `content_length` content octets.
    ///
    /// The innermost tag takes the given construction bit; outer tags of an
    /// explicitly tagged pair are always constructed. Encoding a tag set is
    /// a bug in the caller and fails.
    pub(crate) fn encode_header(
        &self,
        construction: Construction,
        content_length: Length,
        encoder: &mut Encoder<'_>,
    ) -> Result<()> {
        match self {
            Identifier::Single(id) => {
                id.tag(construction).encode(encoder)?;
                content_length.encode(encoder)
            }
            Identifier::Nested { outer, inner } => {
                let inner_header = header_length(*inner, content_length)?;
                let wrapped = (inner_header + content_length)?;
                outer.tag(Construction::Constructed).encode(encoder)?;
                wrapped.encode(encoder)?;
                inner.tag(construction).encode(encoder)?;
                content_length.encode(encoder)
            }
            Identifier::TagSet(_) => encoder.error(ErrorKind::Failed),
        }
    }
}

fn header_length(id: Id, content_length: Length) -> Result<Length> {
    id.tag(Construction::Primitive).encoded_length() + content_length.encoded_length()?
}

/// Marker types naming the identifier a type is fixed to.
pub trait FixedId {
    const ID: Identifier;
}

/// Fixed identifiers that are a single tag, usable as either half of an
/// explicitly tagged pair.
pub trait SingleId: FixedId {
    const SINGLE: Id;
}

macro_rules! id_marker {
    ($(#[$attr:meta])* $name:ident, $ctor:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
        pub struct $name<const N: u64>;

        impl<const N: u64> FixedId for $name<N> {
            const ID: Identifier = Identifier::Single(Id::$ctor(N));
        }

        impl<const N: u64> SingleId for $name<N> {
            const SINGLE: Id = Id::$ctor(N);
        }
    };
}

id_marker!(
    /// `UNIVERSAL N`.
    UniversalId,
    universal
);
id_marker!(
    /// `APPLICATION N`.
    ApplicationId,
    application
);
id_marker!(
    /// `CONTEXT N`, i.e. `[N]` in ASN.1 notation.
    ContextId,
    context
);
id_marker!(
    /// `PRIVATE N`.
    PrivateId,
    private
);

/// Explicit tagging marker: outer tag `O` wrapping inner tag `I`,
/// e.g. `ExplicitId<ContextId<2>, UniversalId<2>>` for `[2] EXPLICIT INTEGER`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ExplicitId<O, I> {
    _markers: PhantomData<(O, I)>,
}

impl<O: SingleId, I: SingleId> FixedId for ExplicitId<O, I> {
    const ID: Identifier = Identifier::Nested {
        outer: O::SINGLE,
        inner: I::SINGLE,
    };
}

#[cfg(test)]
mod tests {
    use super::{ContextId, ExplicitId, FixedId, Id, Identifier, UniversalId};
    use crate::{Class, Construction, Encoder, Length, Tag};

    #[test]
    fn matching_ignores_construction() {
        let id = Identifier::Single(Id::universal(16));
        assert!(id.matches(Tag::universal(16).constructed()));
        assert!(id.matches(Tag::universal(16)));
        assert!(!id.matches(Tag::universal(17).constructed()));
        assert!(!id.matches(Tag::context(16).constructed()));
    }

    #[test]
    fn tag_set_matches_any_member() {
        const SET: Identifier = Identifier::TagSet(&[
            Identifier::Single(Id::universal(2)),
            Identifier::Nested {
                outer: Id::context(0),
                inner: Id::universal(4),
            },
        ]);
        assert!(SET.matches(Tag::universal(2)));
        assert!(SET.matches(Tag::context(0).constructed()));
        assert!(!SET.matches(Tag::universal(4)));
    }

    #[test]
    fn marker_expansion() {
        assert_eq!(
            <UniversalId<2>>::ID,
            Identifier::Single(Id::universal(2))
        );
        assert_eq!(
            <ExplicitId<ContextId<3>, UniversalId<1>>>::ID,
            Identifier::Nested {
                outer: Id::context(3),
                inner: Id::universal(1),
            }
        );
    }

    #[test]
    fn nested_header_octets() {
        let id = <ExplicitId<ContextId<2>, UniversalId<2>>>::ID;
        let content = Length::from(1u8);
        assert_eq!(Length::from(4u8), id.header_length(content).unwrap());

        let mut buffer = [0u8; 8];
        let mut encoder = Encoder::new(&mut buffer);
        id.encode_header(Construction::Primitive, content, &mut encoder)
            .unwrap();
        assert_eq!(encoder.finish().unwrap(), &[0xA2, 0x03, 0x02, 0x01]);
    }
}
