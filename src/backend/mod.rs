//! Group element realizations, selected at compile time.
//!
//! Both expose the same crate-private surface: `identity`, `generator`,
//! `is_identity`, `from_affine`, `affine`, `add` and `mul`.

#[cfg(not(feature = "arkworks"))]
mod native;
#[cfg(not(feature = "arkworks"))]
pub(crate) use native::G1;

#[cfg(feature = "arkworks")]
mod arkworks;
#[cfg(feature = "arkworks")]
pub(crate) use arkworks::G1;
