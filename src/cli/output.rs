//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Record;

/// What a masked cell shows instead of its content.
const MASK: &str = "****************";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the vault entries (Username, Password, Note).
///
/// Passwords and notes are masked unless `show` is set.
pub fn print_records_table(records: &[Record], show: bool) {
    if records.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `pwvault add <USERNAME>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Username", "Password", "Note"]);

    for (index, r) in records.iter().enumerate() {
        let (password, note) = if show {
            (r.password.as_str(), r.note.as_str())
        } else {
            (MASK, if r.note.is_empty() { "" } else { MASK })
        };
        table.add_row(vec![
            (index + 1).to_string(),
            r.username.clone(),
            password.to_string(),
            note.to_string(),
        ]);
    }

    println!("{table}");
}
