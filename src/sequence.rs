//! Constructed types: `SEQUENCE`, `SET` and their `OF` variants.
//!
//! A struct models a `SEQUENCE` by implementing [`Identified`], [`Sequence`]
//! for the encode direction and [`DecodeView`] over [`decode_fields`] for the
//! decode direction; the blanket impls then provide [`Encodable`] and
//! [`Decodable`](crate::Decodable).

use crate::{
    BerChildren, BerView, Construction, DecodeView, Encodable, Encoder, ErrorKind, FixedId,
    Identified, Identifier, Length, Result, UniversalId,
};
use core::{iter::Peekable, marker::PhantomData};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Encode side of a `SEQUENCE`-like type.
pub trait Sequence: Identified {
    /// Call the provided function with a slice of [`Encodable`] trait objects
    /// representing the fields of this message.
    ///
    /// This method uses a callback because structs with fields which aren't
    /// directly [`Encodable`] may need to construct temporary values from
    /// their fields prior to encoding.
    fn fields<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&[&dyn Encodable]) -> Result<T>;
}

impl<S: Sequence> crate::EncodableContent for S {
    const CONSTRUCTION: Construction = Construction::Constructed;

    fn content_length(&self) -> Result<Length> {
        self.fields(fields_length)
    }

    fn encode_content(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        self.fields(|fields| {
            for field in fields {
                encoder.encode(*field)?;
            }
            Ok(())
        })
    }
}

/// Combined encoded length of a run of fields.
pub fn fields_length(fields: &[&dyn Encodable]) -> Result<Length> {
    fields
        .iter()
        .try_fold(Length::zero(), |sum, field| sum + field.encoded_length()?)
}

/// Encode a run of fields as one constructed element under `id`.
///
/// The free-standing counterpart of the [`Sequence`] blanket impl, for
/// callers assembling an element without a dedicated struct.
pub fn encode_fields(
    encoder: &mut Encoder<'_>,
    id: &Identifier,
    fields: &[&dyn Encodable],
) -> Result<()> {
    let content = fields_length(fields)?;
    id.encode_header(Construction::Constructed, content, encoder)?;
    for field in fields {
        encoder.encode(*field)?;
    }
    Ok(())
}

/// Decode the fields of a constructed element.
///
/// Checks the element against `id` and hands a [`Fields`] walker to `f`.
/// Children remaining after the declared fields are ignored, so messages
/// extended with fields this version does not know still decode.
pub fn decode_fields<'a, T, F>(view: BerView<'a>, id: &Identifier, f: F) -> Result<T>
where
    F: FnOnce(&mut Fields<'a>) -> Result<T>,
{
    let content = view.expect(id, Construction::Constructed)?;
    let mut fields = Fields {
        children: content.children().peekable(),
    };
    f(&mut fields)
}

/// Cursor over the child elements of a constructed element.
///
/// Optional fields look one child ahead and only consume it when its tag
/// matches, the way `OPTIONAL` and `DEFAULT` members resolve in a definite
/// order.
pub struct Fields<'a> {
    children: Peekable<BerChildren<'a>>,
}

impl<'a> Fields<'a> {
    /// Decode the next field under the type's own identifier.
    pub fn required<T: DecodeView>(&mut self) -> Result<T> {
        self.required_with(&T::IDENTIFIER)
    }

    /// Decode the next field under an overriding identifier.
    pub fn required_with<T: DecodeView>(&mut self, id: &Identifier) -> Result<T> {
        match self.children.next() {
            Some(child) => T::decode_view_with(child?, id),
            None => {
                debug!("constructed element ended before a required field");
                Err(ErrorKind::Truncated.into())
            }
        }
    }

    /// Decode the next field if its tag matches, else leave it in place.
    pub fn optional<T: DecodeView>(&mut self) -> Result<Option<T>> {
        self.optional_with(&T::IDENTIFIER)
    }

    /// Optional field under an overriding identifier.
    pub fn optional_with<T: DecodeView>(&mut self, id: &Identifier) -> Result<Option<T>> {
        match self.children.peek() {
            Some(Ok(child)) if id.matches(child.tag()) => {
                let child = *child;
                self.children.next();
                T::decode_view_with(child, id).map(Some)
            }
            Some(Err(e)) => Err(*e),
            _ => Ok(None),
        }
    }

    /// Optional field, substituting `default` when absent.
    pub fn default_or<T: DecodeView>(&mut self, default: T) -> Result<T> {
        Ok(self.optional()?.unwrap_or(default))
    }
}

/// `SEQUENCE OF T`, an ordered homogeneous collection.
///
/// Derefs to its backing `Vec`, so the usual vector operations apply.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SequenceOf<T, I: FixedId = UniversalId<16>> {
    items: Vec<T>,
    _id: PhantomData<I>,
}

/// `SET OF T`.
///
/// Elements keep their in-memory order on encode; no sorting is applied.
#[cfg(feature = "alloc")]
pub type SetOf<T> = SequenceOf<T, UniversalId<17>>;

#[cfg(feature = "alloc")]
impl<T, I: FixedId> SequenceOf<T, I> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        SequenceOf {
            items,
            _id: PhantomData,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(feature = "alloc")]
impl<T, I: FixedId> Default for SequenceOf<T, I> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

#[cfg(feature = "alloc")]
impl<T, I: FixedId> core::ops::Deref for SequenceOf<T, I> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.items
    }
}

#[cfg(feature = "alloc")]
impl<T, I: FixedId> core::ops::DerefMut for SequenceOf<T, I> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

#[cfg(feature = "alloc")]
impl<T, I: FixedId> FromIterator<T> for SequenceOf<T, I> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(feature = "alloc")]
impl<T, I: FixedId> Identified for SequenceOf<T, I> {
    const IDENTIFIER: Identifier = I::ID;
}

#[cfg(feature = "alloc")]
impl<T: Encodable, I: FixedId> crate::EncodableContent for SequenceOf<T, I> {
    const CONSTRUCTION: Construction = Construction::Constructed;

    fn content_length(&self) -> Result<Length> {
        self.items
            .iter()
            .try_fold(Length::zero(), |sum, item| sum + item.encoded_length()?)
    }

    fn encode_content(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        for item in &self.items {
            encoder.encode(item)?;
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl<T: DecodeView, I: FixedId> DecodeView for SequenceOf<T, I> {
    /// Appends children while their tags match the element type; the first
    /// non-matching child ends the collection without error. A matching
    /// child that fails its own decode still fails the whole collection.
    fn decode_view_with(view: BerView<'_>, id: &Identifier) -> Result<Self> {
        let content = view.expect(id, Construction::Constructed)?;
        let mut items = Vec::new();
        let mut children = content.children().peekable();
        while let Some(child) = children.peek() {
            match child {
                Ok(element) if T::IDENTIFIER.matches(element.tag()) => {
                    let element = *element;
                    children.next();
                    items.push(T::decode_view(element)?);
                }
                Ok(_) => break,
                Err(e) => return Err(*e),
            }
        }
        Ok(Self::from_vec(items))
    }
}
