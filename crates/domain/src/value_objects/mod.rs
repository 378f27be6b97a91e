/// Uppercase-normalized currency symbol.
pub mod currency;
/// Ownership share newtype.
pub mod percentage;
/// Pool price newtype.
pub mod price;

pub use currency::CurrencyCode;
pub use percentage::Percentage;
pub use price::Price;
