//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! Functions for formatting EVM wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `format_address` with the defaults used by the connect button
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
//! assert_eq!(format_address(address, 6, 4), "0x71C7...976F");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// The `0x` prefix counts toward `prefix_len`. If the address is shorter than
/// `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// assert_eq!(format_address(addr, 6, 4), "0x71C7...976F");
/// assert_eq!(format_address("0xABC", 6, 4), "0xABC");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if !address.is_ascii()
        || address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address as `0x` plus four characters, then the last four.
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// assert_eq!(truncate_address("0x71C7656EC7ab88b098defB751B7401B5f6d8976F"), "0x71C7...976F");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Strip a leading `0x`/`0X` from a hex string.
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}
