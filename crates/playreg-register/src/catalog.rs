//! Deterministic catalog resolution.
//!
//! There is no product database. A scanned code is mapped to a name and a
//! price by hashing it twice with FNV-1a, each time with a different salt,
//! so the same code always rings up the same item:
//!
//! ```text
//! name  = names[fnv1a32(code + "|NAME|v1")  % names.len()]
//! price = price_min + (fnv1a32(code + "|PRICE|v1") % price_levels) * price_step
//! ```
//!
//! An empty name list resolves every code to the placeholder name at the
//! minimum price.

use playreg_core::constants::{FALLBACK_PRODUCT_NAME, NAME_HASH_SUFFIX, PRICE_HASH_SUFFIX};
use playreg_core::{Error, Item, RegisterConfig, Result, price_ladder_max};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over `input`.
///
/// ```
/// use playreg_register::catalog::fnv1a32;
///
/// assert_eq!(fnv1a32(b""), 0x811c_9dc5);
/// assert_eq!(fnv1a32(b"foobar"), 0xbf9c_f968);
/// ```
pub fn fnv1a32(input: &[u8]) -> u32 {
    fnv1a32_salted(input, &[])
}

/// FNV-1a over `input` followed by `salt`, without concatenating.
pub fn fnv1a32_salted(input: &[u8], salt: &[u8]) -> u32 {
    input
        .iter()
        .chain(salt)
        .fold(FNV_OFFSET_BASIS, |hash, &byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Hash-backed product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    names: Vec<String>,
    price_min: u32,
    price_step: u32,
    price_levels: u32,
    price_max: u32,
}

impl Catalog {
    /// Build a catalog from the name list and price ladder in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] when the price ladder has no levels
    /// or a zero step.
    pub fn new(config: &RegisterConfig) -> Result<Self> {
        Self::with_names(
            config.product_names.clone(),
            config.price_min,
            config.price_step,
            config.price_levels,
        )
    }

    pub fn with_names(
        names: Vec<String>,
        price_min: u32,
        price_step: u32,
        price_levels: u32,
    ) -> Result<Self> {
        if price_levels == 0 {
            return Err(Error::InvalidCatalog("price ladder has no levels".into()));
        }
        if price_step == 0 {
            return Err(Error::InvalidCatalog("price step must be non-zero".into()));
        }
        let Some(price_max) = price_ladder_max(price_min, price_step, price_levels) else {
            return Err(Error::InvalidCatalog("price ladder overflows u32".into()));
        };

        Ok(Self {
            names,
            price_min,
            price_step,
            price_levels,
            price_max,
        })
    }

    /// Resolve a normalized code to its item.
    ///
    /// ```
    /// use playreg_core::RegisterConfig;
    /// use playreg_register::Catalog;
    ///
    /// let catalog = Catalog::new(&RegisterConfig::default()).unwrap();
    /// let first = catalog.resolve("4901234567894");
    /// assert_eq!(first, catalog.resolve("4901234567894"));
    /// assert!((50..=500).contains(&first.price));
    /// ```
    pub fn resolve(&self, code: &str) -> Item {
        if self.names.is_empty() {
            return Item::new(FALLBACK_PRODUCT_NAME, self.price_min);
        }

        let name_hash = fnv1a32_salted(code.as_bytes(), NAME_HASH_SUFFIX.as_bytes());
        let name_index = name_hash as usize % self.names.len();

        let price_hash = fnv1a32_salted(code.as_bytes(), PRICE_HASH_SUFFIX.as_bytes());
        // step < price_levels, so this stays within price_max.
        let step = price_hash % self.price_levels;
        let price = self.price_min + step * self.price_step;

        Item::new(self.names[name_index].clone(), price)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn price_min(&self) -> u32 {
        self.price_min
    }

    /// Highest price the ladder can produce.
    pub fn price_max(&self) -> u32 {
        self.price_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"", 0x811c_9dc5)]
    #[case(b"a", 0xe40c_292c)]
    #[case(b"foobar", 0xbf9c_f968)]
    fn test_fnv1a32_reference_vectors(#[case] input: &[u8], #[case] expected: u32) {
        assert_eq!(fnv1a32(input), expected);
    }

    #[test]
    fn test_salted_equals_concatenated() {
        let joined = format!("ABC123{}", NAME_HASH_SUFFIX);
        assert_eq!(
            fnv1a32_salted(b"ABC123", NAME_HASH_SUFFIX.as_bytes()),
            fnv1a32(joined.as_bytes())
        );
    }

    #[test]
    fn test_resolve_follows_formula() {
        let catalog = Catalog::new(&RegisterConfig::default()).unwrap();
        let code = "ABC123";

        let name_hash = fnv1a32(format!("{}|NAME|v1", code).as_bytes());
        let price_hash = fnv1a32(format!("{}|PRICE|v1", code).as_bytes());
        let expected = Item::new(
            catalog.names()[name_hash as usize % catalog.names().len()].clone(),
            50 + (price_hash % 46) * 10,
        );

        assert_eq!(catalog.resolve(code), expected);
    }

    #[test]
    fn test_single_name_catalog() {
        let catalog = Catalog::with_names(vec!["おちゃ".into()], 50, 10, 46).unwrap();
        assert_eq!(catalog.resolve("anything").name, "おちゃ");
    }

    #[test]
    fn test_empty_names_fall_back() {
        let catalog = Catalog::with_names(Vec::new(), 80, 10, 46).unwrap();
        assert_eq!(catalog.resolve("ABC123"), Item::new("しょうひん", 80));
    }

    #[test]
    fn test_single_level_is_fixed_price() {
        let catalog = Catalog::with_names(vec!["a".into()], 100, 10, 1).unwrap();
        assert_eq!(catalog.resolve("xyz").price, 100);
        assert_eq!(catalog.price_max(), 100);
    }

    #[rstest]
    #[case(50, 10, 0)]
    #[case(50, 0, 46)]
    #[case(u32::MAX, 1, 2)]
    #[case(0, 4, 1 << 31)]
    #[case(50, 65_536, 65_537)]
    fn test_invalid_ladder(#[case] min: u32, #[case] step: u32, #[case] levels: u32) {
        let result = Catalog::with_names(vec!["a".into()], min, step, levels);
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_ladder_at_u32_limit() {
        let catalog = Catalog::with_names(vec!["a".into()], u32::MAX - 10, 5, 3).unwrap();
        assert_eq!(catalog.price_max(), u32::MAX);
        for code in ["ABC123", "4901234567894", "x"] {
            assert!(catalog.resolve(code).price >= u32::MAX - 10);
        }
    }

    #[test]
    fn test_overflowing_config_is_rejected() {
        let config = RegisterConfig {
            price_min: 0,
            price_step: 4,
            price_levels: 1 << 31,
            ..RegisterConfig::default()
        };
        assert!(matches!(Catalog::new(&config), Err(Error::InvalidCatalog(_))));
    }
}
