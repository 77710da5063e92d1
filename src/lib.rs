#[doc(inline)]
pub use geo;
#[doc(inline)]
pub use inf;
#[doc(inline)]
pub use landcover;
