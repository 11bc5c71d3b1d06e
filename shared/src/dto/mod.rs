//! # Data Transfer Objects (DTOs)
//!
//! Structures passed across the wallet provider boundary.
//!
//! ## Module Organization
//!
//! - [`rpc`] - EIP-1193 request arguments, call/transaction payloads, receipts, errors
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase, as Ethereum JSON-RPC expects
//! - **Optional fields**: Omitted when `None`
//! - **Quantities**: `0x`-prefixed hex strings, never JSON numbers
//!
//! ## Example
//!
//! ```text
//! provider.request({
//!   method: "eth_sendTransaction",
//!   params: [{ "from": "0xabc...", "to": "0x5Fb...", "data": "0x4b4c..." }]
//! })
//! ```

pub mod rpc;

pub use rpc::*;
