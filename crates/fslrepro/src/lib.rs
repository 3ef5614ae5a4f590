#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use fslrepro_transform as transform;

#[doc(inline)]
pub use fslrepro_invocation as invocation;

#[doc(inline)]
pub use fslrepro_sigdigits as sigdigits;
