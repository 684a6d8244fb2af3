//! ISO 4217 currency-code validation.
//!
//! Checkout form generation refuses to contact the gateway for an order
//! whose currency code is not an active ISO 4217 alpha code, so a
//! misconfigured store fails before any network call.

/// Active ISO 4217 alpha codes, sorted for binary search.
static ACTIVE_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV",
    "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHE", "CHF",
    "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUP", "CVE", "CZK",
    "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP",
    "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL",
    "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD",
    "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT",
    "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR",
    "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN",
    "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF",
    "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD",
    "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP",
    "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU",
    "UYW", "UZS", "VED", "VES", "VND", "VUV", "WST", "XAF", "XAG", "XAU",
    "XBA", "XBB", "XBC", "XBD", "XCD", "XCG", "XDR", "XOF", "XPD", "XPF",
    "XPT", "XSU", "XTS", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWG",
];

/// Whether `code` is an active ISO 4217 alpha currency code.
///
/// Matching is case-insensitive; no other normalization is applied.
pub fn is_recognized(code: &str) -> bool {
    let code = code.to_ascii_uppercase();
    ACTIVE_CODES.binary_search(&code.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_deduplicated() {
        assert!(ACTIVE_CODES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_recognizes_major_codes() {
        for code in ["USD", "EUR", "GBP", "JPY", "DKK", "SEK", "AUD"] {
            assert!(is_recognized(code), "{code} should be recognized");
        }
    }

    #[test]
    fn test_is_case_insensitive() {
        assert!(is_recognized("usd"));
        assert!(is_recognized("Eur"));
    }

    #[test]
    fn test_rejects_unknown_codes() {
        for code in ["", "US", "USDD", "FAKE", "BTC", "U-S"] {
            assert!(!is_recognized(code), "{code} should be rejected");
        }
    }
}
