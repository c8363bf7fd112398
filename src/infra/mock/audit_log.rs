use chrono::{Days, NaiveDate};

use crate::domain::entities::audit::AuditEntry;

const ACTORS: [&str; 4] = ["m.chen", "o.haddad", "p.nair", "admin"];
const ACTIONS: [(&str, &str); 6] = [
    ("approved", "purchase request"),
    ("updated", "vendor profile"),
    ("created", "project milestone"),
    ("rejected", "purchase request"),
    ("uploaded", "project document"),
    ("archived", "catalog item"),
];

fn log_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default()
}

fn audit_entry(n: usize) -> AuditEntry {
    let (action, target) = ACTIONS[n % ACTIONS.len()];
    let start = log_start();
    AuditEntry {
        id: n as u32 + 1,
        actor: ACTORS[n % ACTORS.len()].to_string(),
        action: action.to_string(),
        target: format!("{target} #{}", 1000 + n),
        at: start
            .checked_add_days(Days::new(n as u64 / 3))
            .unwrap_or(start),
    }
}

pub fn seed_audit_log(len: usize) -> Vec<AuditEntry> {
    (0..len).map(audit_entry).collect()
}

/// Next entry for a log that grows while it is on screen.
pub fn next_audit_entry(log: &[AuditEntry]) -> AuditEntry {
    let mut entry = audit_entry(log.len());
    entry.id = log.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    entry
}
