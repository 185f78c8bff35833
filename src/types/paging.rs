//! Page numbering with the counting convention carried in the type.
//!
//! Callers count pages from 0 or from 1 depending on the call site, and the
//! upstream always counts from 1. Mixing the two as bare integers is how
//! off-by-one pagination bugs happen, so a `PageNumber` is tagged with its
//! base and converting between bases is explicit.

use super::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;

/// A page-counting convention.
pub trait PageBase: fmt::Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static {
    /// The number of the first page.
    const BASE: u32;
}

/// Pages counted from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroBased;

/// Pages counted from 1. The upstream uses this convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneBased;

impl PageBase for ZeroBased {
    const BASE: u32 = 0;
}

impl PageBase for OneBased {
    const BASE: u32 = 1;
}

/// A page number in convention `B`. Never below `B::BASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber<B> {
    value: u32,
    _base: PhantomData<B>,
}

impl<B: PageBase> PageNumber<B> {
    /// Creates a page number, rejecting values below the first page.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < B::BASE {
            return Err(ValidationError::PageBelowBase {
                value,
                base: B::BASE,
            });
        }
        Ok(Self {
            value,
            _base: PhantomData,
        })
    }

    /// The first page in this convention.
    pub fn first() -> Self {
        Self {
            value: B::BASE,
            _base: PhantomData,
        }
    }

    /// Builds the page at the given zero-based position.
    pub fn from_index(index: u32) -> Self {
        Self {
            value: index.saturating_add(B::BASE),
            _base: PhantomData,
        }
    }

    /// The page number as the caller wrote it.
    pub fn value(self) -> u32 {
        self.value
    }

    /// Zero-based position of this page, whatever the convention.
    pub fn index(self) -> u32 {
        self.value - B::BASE
    }

    pub fn is_first(self) -> bool {
        self.value == B::BASE
    }

    /// The page after this one.
    pub fn next(self) -> Self {
        Self::from_index(self.index().saturating_add(1))
    }

    /// The same page expressed in another convention.
    pub fn rebase<C: PageBase>(self) -> PageNumber<C> {
        PageNumber::from_index(self.index())
    }
}

impl<B> fmt::Display for PageNumber<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<B> Serialize for PageNumber<B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    pub fn new(size: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or(ValidationError::ZeroPageSize)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl From<NonZeroU32> for PageSize {
    fn from(size: NonZeroU32) -> Self {
        Self(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What slice of a result set a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination<B> {
    /// No page or size given: the whole result set.
    Unpaged,
    /// A specific page of the given size.
    Paged { page: PageNumber<B>, size: PageSize },
}

impl<B: PageBase> Pagination<B> {
    pub fn paged(page: PageNumber<B>, size: PageSize) -> Self {
        Self::Paged { page, size }
    }

    /// Interprets optional page/size inputs.
    ///
    /// Both present with a non-zero size gives a page; anything else
    /// means the caller wants everything. A page number below the base is
    /// rejected rather than silently clamped.
    pub fn from_params(page: Option<u32>, size: Option<u32>) -> Result<Self, ValidationError> {
        match (page, size) {
            (Some(page), Some(size)) if size > 0 => Ok(Self::Paged {
                page: PageNumber::new(page)?,
                size: PageSize::new(size)?,
            }),
            _ => Ok(Self::Unpaged),
        }
    }
}

/// A page request in the upstream's own terms: one-based page and a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamPageRequest {
    pub page: PageNumber<OneBased>,
    pub limit: PageSize,
}

impl UpstreamPageRequest {
    pub fn new(page: PageNumber<OneBased>, limit: PageSize) -> Self {
        Self { page, limit }
    }
}
