//! Human-readable sequential codes such as `RST/PRD/00001`.
//!
//! A code is a fixed prefix followed by a zero-padded counter. The next
//! counter is one more than the highest counter already issued under the
//! prefix; gaps are never filled.

use serde::Serialize;
use strum::{Display, EnumIter};

/// Width of the numeric segment
pub const CODE_WIDTH: usize = 5;

/// Suffix used when a code could not be allocated
pub const PLACEHOLDER_SUFFIX: &str = "DRAFT";

/// Every code series the back office issues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum CodeSeries {
    Product,
    AddressBook,
    Shipment,
    EmptyRepoJob,
    ContainerLeaseTariff,
    DepotAvgTariff,
    HandlingAgentTariff,
    LandTransportTariff,
    DepotCleaningTariff,
}

impl CodeSeries {
    pub fn prefix(&self) -> &'static str {
        match self {
            CodeSeries::Product => "RST/PRD/",
            CodeSeries::AddressBook => "RST-AB-",
            CodeSeries::Shipment => "RST/SHP/",
            CodeSeries::EmptyRepoJob => "RST/ERJ/",
            CodeSeries::ContainerLeaseTariff => "RST-CLT-",
            CodeSeries::DepotAvgTariff => "RST-DAT-",
            CodeSeries::HandlingAgentTariff => "RST-HA-",
            CodeSeries::LandTransportTariff => "RST-LT-",
            CodeSeries::DepotCleaningTariff => "RST-DC-",
        }
    }

    pub fn format(&self, n: u32) -> String {
        format_code(self.prefix(), n)
    }

    pub fn placeholder(&self) -> String {
        format!("{}{}", self.prefix(), PLACEHOLDER_SUFFIX)
    }

    /// Placeholder tagged with `token` so repeated fallbacks stay unique
    pub fn fallback_code(&self, token: &str) -> String {
        format!("{}-{}", self.placeholder(), token)
    }
}

pub fn format_code(prefix: &str, n: u32) -> String {
    format!("{prefix}{n:0width$}", width = CODE_WIDTH)
}

/// Counter carried by `code`. A code outside the prefix or with a
/// non-numeric tail counts as 0.
pub fn parse_suffix(prefix: &str, code: &str) -> u32 {
    code.strip_prefix(prefix)
        .and_then(|tail| tail.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Next code after the given issued codes
pub fn next_code<'a, I>(prefix: &str, issued: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = issued
        .into_iter()
        .map(|code| parse_suffix(prefix, code))
        .max()
        .unwrap_or(0);
    format_code(prefix, highest.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn first_code_is_one() {
        assert_eq!(next_code("RST/PRD/", []), "RST/PRD/00001");
    }

    #[test]
    fn increments_highest_issued() {
        assert_eq!(next_code("RST/PRD/", ["RST/PRD/00001"]), "RST/PRD/00002");
        assert_eq!(
            next_code("RST-HA-", ["RST-HA-00003", "RST-HA-00010", "RST-HA-00002"]),
            "RST-HA-00011"
        );
    }

    #[test]
    fn malformed_suffix_counts_as_zero() {
        assert_eq!(next_code("RST-LT-", ["RST-LT-ABCDE"]), "RST-LT-00001");
        assert_eq!(next_code("RST-LT-", ["RST-LT-DRAFT", "RST-LT-00004"]), "RST-LT-00005");
    }

    #[test]
    fn gaps_are_not_filled() {
        assert_eq!(
            next_code("RST/SHP/", ["RST/SHP/00001", "RST/SHP/00007"]),
            "RST/SHP/00008"
        );
    }

    #[test]
    fn series_prefixes_are_distinct() {
        let prefixes: std::collections::HashSet<_> =
            CodeSeries::iter().map(|s| s.prefix()).collect();
        assert_eq!(prefixes.len(), CodeSeries::iter().count());
        assert_eq!(CodeSeries::DepotAvgTariff.format(12), "RST-DAT-00012");
        assert_eq!(CodeSeries::AddressBook.placeholder(), "RST-AB-DRAFT");
        assert_eq!(
            CodeSeries::Shipment.fallback_code("1a2b3c4d"),
            "RST/SHP/DRAFT-1a2b3c4d"
        );
    }

    #[test]
    fn fallback_codes_do_not_advance_the_series() {
        let drafts = ["RST/PRD/DRAFT-0000abcd", "RST/PRD/DRAFT-12345678"];
        assert_eq!(next_code("RST/PRD/", drafts), "RST/PRD/00001");
    }

    proptest! {
        #[test]
        fn formatted_codes_parse_back(n in 0u32..100_000) {
            let code = format_code("RST-DC-", n);
            prop_assert_eq!(code.len(), "RST-DC-".len() + CODE_WIDTH);
            prop_assert_eq!(parse_suffix("RST-DC-", &code), n);
        }

        #[test]
        fn next_code_exceeds_every_issued(ns in proptest::collection::vec(0u32..99_999, 0..20)) {
            let issued: Vec<String> = ns.iter().map(|n| format_code("RST/ERJ/", *n)).collect();
            let next = next_code("RST/ERJ/", issued.iter().map(String::as_str));
            let next_n = parse_suffix("RST/ERJ/", &next);
            prop_assert!(ns.iter().all(|n| *n < next_n));
        }
    }
}
