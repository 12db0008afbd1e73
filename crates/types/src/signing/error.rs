use alloy::primitives::Address;

/// An error that can occur when signing a [`TransactionIntent`].
///
/// [`TransactionIntent`]: crate::TransactionIntent
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The signer is not the sender named by the intent.
    #[error("intent is from {expected}, but the signer is {actual}")]
    WrongSigner {
        /// The sender named by the intent.
        expected: Address,
        /// The signer's address.
        actual: Address,
    },
    /// Error signing the transaction hash.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}

/// Errors that can occur while decoding a [`SignedTransaction`] and
/// recovering its sender.
///
/// [`SignedTransaction`]: crate::SignedTransaction
#[derive(Debug, thiserror::Error)]
pub enum RecoverError {
    /// Error occurred while decoding the transaction.
    #[error(transparent)]
    Decoding(#[from] alloy::eips::eip2718::Eip2718Error),

    /// Error occurred while recovering the signature.
    #[error(transparent)]
    Recovering(#[from] alloy::consensus::crypto::RecoveryError),
}
