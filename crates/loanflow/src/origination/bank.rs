use super::domain::{BankRecord, ExistingLoan};

/// Read-only lookup into the bank's customer records. The scoring engine and
/// the origination service depend on this abstraction so a real bank
/// integration can replace the static data set without touching either.
pub trait BankDirectory: Send + Sync {
    fn lookup_by_id(&self, bank_id: u32) -> Option<BankRecord>;

    /// Identity verification: id plus case-insensitive name and email match.
    fn lookup_by_identity(&self, name: &str, email: &str, bank_id: u32) -> Option<BankRecord>;
}

/// Fixed in-memory record set standing in for the bank integration.
#[derive(Debug, Clone)]
pub struct StaticBankDirectory {
    records: Vec<BankRecord>,
}

impl StaticBankDirectory {
    pub fn new(records: Vec<BankRecord>) -> Self {
        Self { records }
    }

    /// The demo customer base used by the portal when no integration is wired.
    pub fn seeded() -> Self {
        let loan = |purpose: &str, outstanding_amount: f64| ExistingLoan {
            purpose: purpose.to_string(),
            outstanding_amount,
        };
        let record =
            |id, name: &str, email: &str, pan: &str, salary, existing_loans| BankRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                pan: pan.to_string(),
                salary,
                existing_loans,
            };

        Self::new(vec![
            record(
                101,
                "Aarav Sharma",
                "aarav.sharma@example.com",
                "ABCPS1234F",
                85_000.0,
                Vec::new(),
            ),
            record(
                102,
                "Priya Patel",
                "priya.patel@example.com",
                "XYZPP5678K",
                52_000.0,
                vec![loan("Home", 1_250_000.0)],
            ),
            record(
                103,
                "Rohan Mehta",
                "rohan.mehta@example.com",
                "LMNRM9012T",
                145_000.0,
                vec![loan("Personal", 90_000.0), loan("Business", 400_000.0)],
            ),
            record(
                104,
                "Sneha Iyer",
                "sneha.iyer@example.com",
                "QRSSI3456B",
                38_000.0,
                Vec::new(),
            ),
            record(
                105,
                "Vikram Singh",
                "vikram.singh@example.com",
                "TUVVS7890D",
                210_000.0,
                vec![loan("Home", 3_500_000.0)],
            ),
            record(
                106,
                "Ananya Das",
                "ananya.das@example.com",
                "GHJAD2345M",
                27_000.0,
                vec![loan("Personal", 45_000.0)],
            ),
        ])
    }
}

impl Default for StaticBankDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl BankDirectory for StaticBankDirectory {
    fn lookup_by_id(&self, bank_id: u32) -> Option<BankRecord> {
        self.records
            .iter()
            .find(|record| record.id == bank_id)
            .cloned()
    }

    fn lookup_by_identity(&self, name: &str, email: &str, bank_id: u32) -> Option<BankRecord> {
        self.records
            .iter()
            .find(|record| {
                record.id == bank_id
                    && record.name.eq_ignore_ascii_case(name.trim())
                    && record.email.eq_ignore_ascii_case(email.trim())
            })
            .cloned()
    }
}
