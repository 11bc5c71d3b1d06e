//! # Shared Provider Boundary Types
//!
//! Types exchanged with an injected EIP-1193 wallet provider, used by both the
//! core library and the browser front end.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for the provider boundary
//!   - **[`dto::rpc`]**: JSON-RPC payloads, transaction receipts and provider errors
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! Ethereum JSON-RPC uses camelCase field names and `0x`-prefixed hex strings
//! for quantities and byte arrays. The DTOs here keep those values as strings;
//! decoding into typed primitives happens in `lib-core`.
//!
//! ```rust
//! use shared::dto::rpc::CallRequest;
//!
//! let call = CallRequest {
//!     to: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
//!     data: "0x".to_string(),
//! };
//! let json = serde_json::to_value(&call).unwrap();
//! assert_eq!(json["to"], "0x5FbDB2315678afecb367f032d93F642f64180aa3");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
