//! Generic constructors for newtypes

#![allow(non_snake_case)]

use std::borrow::Cow;
use std::path::Path;

/// Generic constructor for `Program`
#[inline(always)]
pub fn Program<P>(path: P) -> crate::Program
where
    P: Into<Cow<'static, Path>>,
{
    crate::Program(path.into())
}

/// Generic constructor for `Args`
#[inline(always)]
pub fn Args<I, S>(args: I) -> crate::Args
where
    I: IntoIterator<Item = S>,
    S: Into<Cow<'static, str>>,
{
    crate::Args(args.into_iter().map(Into::into).collect())
}
