//! OAuth token lifecycle for the Daraz Open Platform.
//!
//! This module provides the [`TokenSet`] type and the operations that move
//! it through its lifecycle.
//!
//! # Overview
//!
//! - [`TokenSet::from_authorization_code`]: exchange a seller's authorization code
//! - [`TokenSet::from_refresh_token`]: renew with a refresh token
//! - [`TokenSet::from_refresh_token_in_store`]: renew with the persisted refresh token
//! - [`TokenSet::load_from_store`] / [`TokenSet::persist_to_store`]: secret store I/O
//! - [`TokenError`]: failures of the above
//!
//! # Token Flow
//!
//! ```rust,ignore
//! use daraz_sdk::auth::TokenSet;
//!
//! // 1. Seller authorizes the app; the callback carries `code`
//! let tokens = TokenSet::from_authorization_code(&code, &client).await?;
//! tokens.persist_to_store(&tokens_path, &store).await?;
//!
//! // 2. Later invocations renew the tokens before they expire
//! let tokens = TokenSet::from_refresh_token_in_store(&tokens_path, &store, &client).await?;
//! tokens.persist_to_store(&tokens_path, &store).await?;
//!
//! // 3. Business calls use the persisted access token
//! let tokens = TokenSet::load_from_store(&tokens_path, &store).await?;
//! ```

mod error;
mod tokens;

pub use error::TokenError;
pub use tokens::{
    TokenSet, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TOKEN_CREATE_PATH, TOKEN_REFRESH_PATH,
};
