//! Transaction tracking for correlating log records

use super::error::{Result, TelemetryError};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// An active transaction. Ended transactions are dropped from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Transaction {
    fn start(id: String) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}

/// The set of currently active transactions, keyed by id.
///
/// Not synchronized on its own; the logger guards it with its state lock.
#[derive(Debug, Default)]
pub struct TransactionTable {
    active: HashMap<String, Transaction>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String) {
        self.active.insert(id.clone(), Transaction::start(id));
    }

    /// Stamp the end time and remove the transaction.
    ///
    /// An id that was never started and one that already ended both fail with `UnknownTransaction`.
    pub fn end(&mut self, id: &str) -> Result<Transaction> {
        let mut transaction = self
            .active
            .remove(id)
            .ok_or_else(|| TelemetryError::unknown_transaction(id))?;
        transaction.ended_at = Some(Utc::now());
        Ok(transaction)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Generate a transaction id.
///
/// Normally 128 bits from the OS random source as 32 lowercase hex characters.
/// If the OS source fails, falls back to the current UNIX time in nanoseconds as a
/// decimal string. Ids from the fallback path are only unique as long as no two
/// calls land on the same clock reading.
pub fn generate_transaction_id() -> String {
    transaction_id_from(&mut OsRng)
}

fn transaction_id_from<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    match rng.try_fill_bytes(&mut bytes) {
        Ok(()) => to_hex(&bytes),
        Err(_) => fallback_transaction_id(),
    }
}

fn fallback_transaction_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_string()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{:02x}", byte);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Entropy source that always fails
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    #[test]
    fn test_generated_id_is_128_bit_hex() {
        let id = generate_transaction_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate_transaction_id(), generate_transaction_id());
    }

    #[test]
    fn test_fallback_id_is_numeric() {
        let id = fallback_transaction_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_failing_rng_falls_back_to_clock() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let id = transaction_id_from(&mut BrokenRng);
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();

        let nanos: u128 = id.parse().expect("fallback id is a decimal timestamp");
        assert!(nanos >= before && nanos <= after);
    }

    #[test]
    fn test_working_rng_gives_hex() {
        let id = transaction_id_from(&mut StepRng::new(0x0102_0304_0506_0708, 0));
        assert_eq!(id.len(), 32);
        assert!(id.starts_with("0807060504030201"));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
    }

    #[test]
    fn test_end_removes_and_stamps() {
        let mut table = TransactionTable::new();
        table.insert("abc".to_string());
        assert!(table.contains("abc"));

        let ended = table.end("abc").unwrap();
        assert_eq!(ended.id, "abc");
        assert!(ended.ended_at.is_some());
        assert!(ended.ended_at.unwrap() >= ended.started_at);
        assert!(table.is_empty());
    }

    #[test]
    fn test_end_twice_fails() {
        let mut table = TransactionTable::new();
        table.insert("abc".to_string());
        table.end("abc").unwrap();

        let err = table.end("abc").unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownTransaction { ref id } if id == "abc"));
    }

    #[test]
    fn test_end_unknown_fails() {
        let mut table = TransactionTable::new();
        assert!(table.end("never-started").is_err());
        assert_eq!(table.len(), 0);
    }
}
