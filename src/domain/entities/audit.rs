use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: u32,
    pub actor: String,
    pub action: String,
    pub target: String,
    pub at: NaiveDate,
}
