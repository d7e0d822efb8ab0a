//! # SKU Computation
//!
//! Pure logic for building SKU prefixes and sequence numbers. The
//! database layer supplies the "last SKU for this prefix" row; everything
//! else happens here.
//!
//! ## SKU Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Anatomy of a SKU                             │
//! │                                                                     │
//! │        ANZ  -  OWN  0001                                            │
//! │        ───     ───  ────                                            │
//! │         │       │     └── 4-digit zero-padded sequence, monotonic   │
//! │         │       │         per distinct (category, brand) prefix     │
//! │         │       └──────── first 3 chars of brand, uppercased,       │
//! │         │                 whitespace removed (omitted if no brand)  │
//! │         └──────────────── registered 3-letter category code,        │
//! │                           or GEN for unknown categories             │
//! │                                                                     │
//! │   With brand:    ANZ-OWN0001, ANZ-OWN0002, ...                      │
//! │   Without brand: ANZ-0001, ANZ-0002, ...                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zero-padding to 4 digits makes lexicographic and numeric ordering
//! coincide up to 9999, so the store can fetch the latest SKU for a
//! prefix with a simple `ORDER BY sku DESC LIMIT 1`. Past 9999 the field
//! widens to 5+ digits instead of failing.

use crate::SKU_SEQUENCE_WIDTH;

// =============================================================================
// SKU Prefix
// =============================================================================

/// The category-code + brand portion of a SKU, used to scope
/// sequence-number uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkuPrefix(String);

impl SkuPrefix {
    /// Builds a prefix from a category code and a brand name.
    ///
    /// The brand contributes its first 3 characters, uppercased, with
    /// whitespace removed. An empty brand leaves a bare `CAT-` prefix.
    ///
    /// ## Example
    /// ```rust
    /// use tackle_core::sku::SkuPrefix;
    ///
    /// assert_eq!(SkuPrefix::new("ANZ", "Owner").as_str(), "ANZ-OWN");
    /// assert_eq!(SkuPrefix::new("ANZ", "").as_str(), "ANZ-");
    /// assert_eq!(SkuPrefix::new("CAR", "Shimano").as_str(), "CAR-SHI");
    /// ```
    pub fn new(category_code: &str, brand: &str) -> SkuPrefix {
        let brand_code = brand_code(brand);
        if brand_code.is_empty() {
            SkuPrefix(format!("{category_code}-"))
        } else {
            SkuPrefix(format!("{category_code}-{brand_code}"))
        }
    }

    /// The prefix text, e.g. `ANZ-OWN` or `ANZ-`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL LIKE pattern matching every SKU under this prefix.
    pub fn like_pattern(&self) -> String {
        format!("{}%", self.0)
    }

    /// Formats a full SKU for the given sequence number.
    ///
    /// The sequence is zero-padded to 4 digits; values past 9999 widen
    /// naturally rather than failing.
    ///
    /// ## Example
    /// ```rust
    /// use tackle_core::sku::SkuPrefix;
    ///
    /// let prefix = SkuPrefix::new("ANZ", "Owner");
    /// assert_eq!(prefix.format(1), "ANZ-OWN0001");
    /// assert_eq!(prefix.format(10000), "ANZ-OWN10000");
    /// ```
    pub fn format(&self, sequence: u32) -> String {
        format!("{}{:0width$}", self.0, sequence, width = SKU_SEQUENCE_WIDTH)
    }
}

/// First 3 characters of the brand, uppercased, whitespace removed.
fn brand_code(brand: &str) -> String {
    brand
        .chars()
        .take(3)
        .flat_map(|c| c.to_uppercase())
        .filter(|c| !c.is_whitespace())
        .collect()
}

// =============================================================================
// Sequence Numbers
// =============================================================================

/// Extracts the trailing digit run from a SKU.
///
/// Returns `None` when the SKU does not end in a digit, or when the run
/// overflows a u32 (treated as no usable sequence).
///
/// ## Example
/// ```rust
/// use tackle_core::sku::trailing_sequence;
///
/// assert_eq!(trailing_sequence("ANZ-OWN0042"), Some(42));
/// assert_eq!(trailing_sequence("ANZ-OWN"), None);
/// ```
pub fn trailing_sequence(sku: &str) -> Option<u32> {
    let digits: String = sku
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Computes the next sequence number given the latest existing SKU for a
/// prefix (or `None` when the prefix has no products yet).
///
/// ## Example
/// ```rust
/// use tackle_core::sku::next_sequence;
///
/// assert_eq!(next_sequence(None), 1);
/// assert_eq!(next_sequence(Some("ANZ-OWN0007")), 8);
/// ```
pub fn next_sequence(last_sku: Option<&str>) -> u32 {
    last_sku
        .and_then(trailing_sequence)
        .map(|n| n + 1)
        .unwrap_or(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_with_brand() {
        assert_eq!(SkuPrefix::new("ANZ", "Owner").as_str(), "ANZ-OWN");
        assert_eq!(SkuPrefix::new("SEN", "Rapala").as_str(), "SEN-RAP");
    }

    #[test]
    fn test_prefix_without_brand() {
        assert_eq!(SkuPrefix::new("ANZ", "").as_str(), "ANZ-");
        assert_eq!(SkuPrefix::new("ANZ", "   ").as_str(), "ANZ-");
    }

    #[test]
    fn test_brand_code_strips_whitespace_after_truncating() {
        // The first 3 characters are taken before whitespace is removed,
        // so "a b" contributes "AB", not "ABC"
        assert_eq!(SkuPrefix::new("ANZ", "a bc").as_str(), "ANZ-AB");
    }

    #[test]
    fn test_brand_code_short_brand() {
        assert_eq!(SkuPrefix::new("LIN", "PE").as_str(), "LIN-PE");
    }

    #[test]
    fn test_format_pads_to_four_digits() {
        let prefix = SkuPrefix::new("ANZ", "Owner");
        assert_eq!(prefix.format(1), "ANZ-OWN0001");
        assert_eq!(prefix.format(42), "ANZ-OWN0042");
        assert_eq!(prefix.format(9999), "ANZ-OWN9999");
    }

    #[test]
    fn test_format_widens_past_9999() {
        let prefix = SkuPrefix::new("ANZ", "");
        assert_eq!(prefix.format(10000), "ANZ-10000");
        assert_eq!(prefix.format(123456), "ANZ-123456");
    }

    #[test]
    fn test_trailing_sequence() {
        assert_eq!(trailing_sequence("ANZ-OWN0001"), Some(1));
        assert_eq!(trailing_sequence("ANZ-OWN0042"), Some(42));
        assert_eq!(trailing_sequence("ANZ-10000"), Some(10000));
        assert_eq!(trailing_sequence("ANZ-OWN"), None);
        assert_eq!(trailing_sequence(""), None);
    }

    #[test]
    fn test_next_sequence() {
        assert_eq!(next_sequence(None), 1);
        assert_eq!(next_sequence(Some("ANZ-OWN0001")), 2);
        assert_eq!(next_sequence(Some("ANZ-OWN9999")), 10000);
        // A prefix-matching SKU with no numeric tail restarts the run
        assert_eq!(next_sequence(Some("ANZ-OWNX")), 1);
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(SkuPrefix::new("ANZ", "Owner").like_pattern(), "ANZ-OWN%");
    }
}
