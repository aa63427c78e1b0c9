//! Browser `localStorage` access for the persisted bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the session manager writes the token slot. Reads and writes are
//! hydrate-only; on the server every operation is a no-op so SSR renders an
//! unauthenticated shell.

use crate::config::TOKEN_STORAGE_KEY;

/// Durable single-slot token storage.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `window.localStorage` slot named [`TOKEN_STORAGE_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
            (!raw.is_empty()).then_some(raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = TOKEN_STORAGE_KEY;
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; token not persisted");
                return;
            };
            if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                log::warn!("failed to persist token");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; token not cleared");
                return;
            };
            if storage.remove_item(TOKEN_STORAGE_KEY).is_err() {
                log::warn!("failed to clear persisted token");
            }
        }
    }
}
