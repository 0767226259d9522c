use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is implemented by credential types a signer can consume.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is still usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential resolves the current credentials for a signing
/// operation.
///
/// Resolution may itself perform I/O (e.g. instance metadata), so the
/// operation is async. Implementations must be safe for concurrent
/// resolution or document otherwise.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Resolve the current credential.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer; callers
    /// decide whether that is fatal.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
