//! Per-product transaction chain rules.
//!
//! The chain is implicit: each append links to the most recently created
//! transaction of the same product, and `production` always starts a fresh
//! chain. The hash token is an opaque identifier and is never verified.

use contracts::domain::a003_supply_transaction::TransactionKind;
use rand::Rng;

/// Generate the chain token for a new transaction: "0x" + 32 hex chars.
///
/// Random, not a content digest; carries no tamper evidence.
pub fn chain_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("0x{}", hex)
}

/// Decide the predecessor link for a new transaction.
///
/// `latest` is the id of the product's head transaction at read time.
/// A `production` transaction drops the link regardless of history.
pub fn resolve_previous(kind: TransactionKind, latest: Option<String>) -> Option<String> {
    if kind.starts_lineage() {
        None
    } else {
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_token_shape() {
        let token = chain_token();
        assert!(token.starts_with("0x"));
        assert_eq!(token.len(), 34);
        assert!(token[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn chain_tokens_differ() {
        assert_ne!(chain_token(), chain_token());
    }

    #[test]
    fn production_always_starts_a_chain() {
        let latest = Some("4b4a89b2-05ce-4a24-86c0-87a01f25a5a1".to_string());
        assert_eq!(
            resolve_previous(TransactionKind::Production, latest.clone()),
            None
        );
        assert_eq!(resolve_previous(TransactionKind::Production, None), None);
        // Everything else links to the head when one exists
        assert_eq!(
            resolve_previous(TransactionKind::Delivery, latest.clone()),
            latest
        );
        assert_eq!(resolve_previous(TransactionKind::Transport, None), None);
    }
}
