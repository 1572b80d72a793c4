//! # Wallet Adapter
//!
//! A static identity provider standing in for a browser wallet: it holds at
//! most one account and hands it out on request. Real deployments swap in
//! an adapter over their wallet layer; the port is the contract.

use async_trait::async_trait;
use parking_lot::Mutex;

use chainvote_types::{Address, IdentityError};

use crate::ports::IdentityProvider;

/// Identity provider backed by a fixed, optionally-absent account.
#[derive(Debug, Default)]
pub struct StaticWallet {
    account: Mutex<Option<Address>>,
}

impl StaticWallet {
    /// A wallet already connected as `account`.
    #[must_use]
    pub fn connected(account: Address) -> Self {
        Self {
            account: Mutex::new(Some(account)),
        }
    }

    /// A wallet with no account; `request_connection` will be rejected.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Swap the held account, simulating an account change in the wallet.
    pub fn set_account(&self, account: Option<Address>) {
        *self.account.lock() = account;
    }
}

#[async_trait]
impl IdentityProvider for StaticWallet {
    fn current_actor(&self) -> Option<Address> {
        *self.account.lock()
    }

    async fn request_connection(&self) -> Result<Address, IdentityError> {
        self.account.lock().ok_or(IdentityError::Rejected)
    }
}
