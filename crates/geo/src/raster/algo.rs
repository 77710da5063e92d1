mod crop;
mod quantile;

#[doc(inline)]
pub use crop::align_bottom_right;
#[doc(inline)]
pub use quantile::quantiles;
