mod error;
pub use error::{RecoverError, SigningError};

mod intent;
pub use intent::{TransactionIntent, DEFAULT_GAS_LIMIT};

mod signed;
pub use signed::SignedTransaction;
