use crate::errors::TriageError;
use crate::reporting::format_action_table;

pub fn handle_table() -> Result<(), TriageError> {
    print!("{}", format_action_table());
    Ok(())
}
