//! Supported currencies

pub const USD: &str = "USD";
pub const EUR: &str = "EUR";
pub const ILS: &str = "ILS";
pub const CAD: &str = "CAD";

/// All currencies accounts may be denominated in.
pub const SUPPORTED: [&str; 4] = [USD, EUR, ILS, CAD];

/// Whether `currency` is one of the supported codes.
pub fn is_supported(currency: &str) -> bool {
    SUPPORTED.contains(&currency)
}
