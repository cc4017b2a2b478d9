pub mod aggregate;

pub use aggregate::{
    AppendTransactionDto, SupplyTransaction, SupplyTransactionId, TransactionKind,
    TransactionStatus, TransactionWithJoins, UpdateStatusDto,
};
