//! Colors, image decoding, and the memoized template cache.

pub mod color;
pub mod decode;
pub mod store;
