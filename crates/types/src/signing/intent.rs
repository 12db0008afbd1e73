use crate::{FeeParams, SignedTransaction, SigningError};
use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxEnvelope},
    primitives::{Address, Bytes, TxKind, U256},
    signers::Signer,
    sol_types::SolCall,
};

/// Gas limit used for every scenario transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// An unsigned EIP-1559 transaction, described by what it does rather than
/// by its encoding.
///
/// Nonces are never assigned here. Callers building several intents for the
/// same sender must number them in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    /// The sender.
    pub from: Address,
    /// The recipient.
    pub to: Address,
    /// The sender's nonce.
    pub nonce: u64,
    /// Value transferred, in wei.
    pub value: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Fee-market pricing.
    pub fees: FeeParams,
    /// Calldata.
    pub input: Bytes,
    /// Target chain id.
    pub chain_id: u64,
}

impl TransactionIntent {
    /// Create an intent with no value, no calldata, nonce zero, zero fees and
    /// [`DEFAULT_GAS_LIMIT`].
    pub fn new(from: Address, to: Address, chain_id: u64) -> Self {
        Self {
            from,
            to,
            nonce: 0,
            value: U256::ZERO,
            gas_limit: DEFAULT_GAS_LIMIT,
            fees: FeeParams::default(),
            input: Bytes::new(),
            chain_id,
        }
    }

    /// Set the nonce.
    pub const fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set the value.
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set the gas limit.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Set the fees.
    pub const fn with_fees(mut self, fees: FeeParams) -> Self {
        self.fees = fees;
        self
    }

    /// Set raw calldata.
    pub fn with_input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the calldata to an ABI encoded contract call.
    pub fn with_call<C: SolCall>(self, call: &C) -> Self {
        self.with_input(call.abi_encode())
    }

    /// Build the consensus transaction.
    pub fn to_tx(&self) -> TxEip1559 {
        TxEip1559 {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            max_fee_per_gas: self.fees.max_fee_per_gas,
            max_priority_fee_per_gas: self.fees.max_priority_fee_per_gas,
            to: TxKind::Call(self.to),
            value: self.value,
            access_list: Default::default(),
            input: self.input.clone(),
        }
    }

    /// Sign the intent, producing EIP-2718 encoded bytes.
    ///
    /// Fails if the signer is not [`Self::from`].
    pub async fn sign<S: Signer + ?Sized>(
        &self,
        signer: &S,
    ) -> Result<SignedTransaction, SigningError> {
        if signer.address() != self.from {
            return Err(SigningError::WrongSigner { expected: self.from, actual: signer.address() });
        }

        let tx = self.to_tx();
        let signature = signer.sign_hash(&tx.signature_hash()).await?;
        let envelope = TxEnvelope::from(tx.into_signed(signature));

        Ok(SignedTransaction::from_envelope(&envelope))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{TEST_CHAIN_ID, TEST_SIGNERS, TEST_USERS};
    use alloy::consensus::Transaction;

    #[tokio::test]
    async fn sign_roundtrip() {
        let fees = FeeParams::new(10, 50);
        let intent = TransactionIntent::new(TEST_USERS[0], TEST_USERS[1], TEST_CHAIN_ID)
            .with_nonce(7)
            .with_value(U256::from(1))
            .with_fees(fees);

        let signed = intent.sign(&TEST_SIGNERS[0]).await.unwrap();
        let (sender, envelope) = signed.recover().unwrap();

        assert_eq!(sender, TEST_USERS[0]);
        assert_eq!(envelope.nonce(), 7);
        assert_eq!(envelope.to(), Some(TEST_USERS[1]));
        assert_eq!(envelope.value(), U256::from(1));
        assert_eq!(envelope.max_fee_per_gas(), 20);
        assert_eq!(envelope.max_priority_fee_per_gas(), Some(20));
        assert_eq!(envelope.gas_limit(), DEFAULT_GAS_LIMIT);
        assert_eq!(envelope.chain_id(), Some(TEST_CHAIN_ID));
        assert_eq!(*envelope.tx_hash(), signed.hash());
    }

    #[tokio::test]
    async fn wrong_signer() {
        let intent = TransactionIntent::new(TEST_USERS[0], TEST_USERS[1], TEST_CHAIN_ID);
        let err = intent.sign(&TEST_SIGNERS[1]).await.unwrap_err();
        assert!(matches!(
            err,
            SigningError::WrongSigner { expected, actual }
                if expected == TEST_USERS[0] && actual == TEST_USERS[1]
        ));
    }
}
