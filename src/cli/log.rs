//! Activity log CLI command

use crate::display::summary::format_audit_entries;
use crate::error::LivrariaResult;
use crate::storage::Storage;

/// Handle the `log` command: print the most recent audit entries
pub fn handle_log_command(storage: &Storage, limit: usize) -> LivrariaResult<()> {
    let entries = storage.audit().read_recent(limit)?;
    print!("{}", format_audit_entries(&entries));

    let total = storage.audit().entry_count()?;
    if total > entries.len() {
        println!("({} of {} entries shown)", entries.len(), total);
    }
    Ok(())
}
