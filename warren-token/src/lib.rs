//! warren-token: signed tenant identity tokens for Warren.
//!
//! A compact, HMAC-signed token whose payload carries exactly one claim:
//! the tenant identifier. The codec is stateless aside from its immutable
//! sign key, so a single instance serves unlimited concurrent requests.
//!
//! ```rust
//! use warren_token::{TokenCodec, TokenOptions};
//!
//! let codec = TokenCodec::new("a-shared-secret", TokenOptions::default());
//! let token = codec.encode("acme").unwrap();
//! assert_eq!(codec.decode(&token).unwrap(), "acme");
//! ```

pub mod codec;
pub mod options;

pub use codec::{TokenCodec, TokenError};
pub use options::{TokenOptions, ValidationPolicy};
