use crate::RecoverError;
use alloy::{
    consensus::{transaction::SignerRecoverable, TxEnvelope},
    eips::eip2718::{Decodable2718, Encodable2718},
    primitives::{keccak256, Address, Bytes, TxHash},
};
use serde::{Deserialize, Serialize};

/// An EIP-2718 encoded, signed transaction.
///
/// Treated as opaque bytes by bundles and relays. It is only decoded when a
/// caller needs the sender or nonce, e.g. to check bundle ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedTransaction(Bytes);

impl SignedTransaction {
    /// Wrap already encoded bytes.
    pub const fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// Encode a signed envelope.
    pub fn from_envelope(envelope: &TxEnvelope) -> Self {
        Self(envelope.encoded_2718().into())
    }

    /// Get the encoded bytes.
    pub const fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    /// Take the encoded bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// The transaction hash, i.e. the hash of the encoded bytes.
    pub fn hash(&self) -> TxHash {
        keccak256(&self.0)
    }

    /// Decode the envelope.
    pub fn decode(&self) -> Result<TxEnvelope, RecoverError> {
        TxEnvelope::decode_2718(&mut self.0.as_ref()).map_err(Into::into)
    }

    /// Decode the envelope and recover its sender.
    pub fn recover(&self) -> Result<(Address, TxEnvelope), RecoverError> {
        let envelope = self.decode()?;
        let sender = envelope.recover_signer()?;
        Ok((sender, envelope))
    }
}

impl From<Bytes> for SignedTransaction {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<&TxEnvelope> for SignedTransaction {
    fn from(envelope: &TxEnvelope) -> Self {
        Self::from_envelope(envelope)
    }
}

impl AsRef<[u8]> for SignedTransaction {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_as_hex() {
        let tx = SignedTransaction::new(Bytes::from_static(b"\x02\xf8tx"));
        assert_eq!(serde_json::to_string(&tx).unwrap(), r#""0x02f87478""#);
    }

    #[test]
    fn garbage_does_not_decode() {
        let tx = SignedTransaction::new(Bytes::from_static(b"\x02\xf8tx"));
        assert!(matches!(tx.decode(), Err(RecoverError::Decoding(_))));
    }
}
