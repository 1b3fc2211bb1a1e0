//! Migration trait definition.

use sha2::{Digest, Sha256};

/// A versioned schema change.
///
/// Migrations expose their DDL as statement lists rather than executing
/// directly; that keeps application, dry-run listing, and checksum
/// calculation on one code path.
pub trait Migration {
    /// Short snake_case name, stable once applied.
    fn name(&self) -> &str;

    /// Ordering key, conventionally `YYYYMMDDHHMMSS`.
    fn version(&self) -> i64;

    /// Statements that apply the migration, in execution order.
    fn up(&self) -> Vec<String>;

    /// Statements that revert the migration, in execution order.
    fn down(&self) -> Vec<String>;

    /// SHA-256 over the up statements, hex-encoded.
    fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        for statement in self.up() {
            hasher.update(statement.as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl Migration for Sample {
        fn name(&self) -> &str {
            "sample"
        }

        fn version(&self) -> i64 {
            20250101000000
        }

        fn up(&self) -> Vec<String> {
            vec!["CREATE TABLE sample (id INTEGER)".to_string()]
        }

        fn down(&self) -> Vec<String> {
            vec!["DROP TABLE sample".to_string()]
        }
    }

    #[test]
    fn test_checksum_is_stable_hex() {
        let first = Sample.checksum();
        let second = Sample.checksum();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
