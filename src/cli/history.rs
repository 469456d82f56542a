//! Audit history command

use crate::error::KharchaResult;
use crate::session::Session;

use super::require_user;

/// Print the active user's most recent audit entries, oldest first
pub fn handle_history_command(session: &Session, limit: usize) -> KharchaResult<()> {
    let principal = require_user(session)?;

    let entries = match session.storage().audit() {
        Some(logger) if logger.exists() => logger.read_recent_for(principal.email(), limit)?,
        _ => Vec::new(),
    };

    if entries.is_empty() {
        println!("No history for {}.", principal);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::models::{Money, Principal};
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_history_reads_own_entries() {
        let dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(dir.path().join("audit.log"));
        let mut session = Session::new(Storage::in_memory().with_audit(logger));
        session.switch_principal(Principal::parse("a@b.com")).unwrap();
        session.set_budget(2024, 5, Money::from_units(500)).unwrap();

        let entries = session
            .storage()
            .audit()
            .unwrap()
            .read_recent_for("a@b.com", 10)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(handle_history_command(&session, 10).is_ok());
    }
}
