//! Text rendering for command replies.

use crate::command::Command;
use colored::Colorize;
use deskmate_core::{Contact, NoteRecord, UpcomingBirthday};

const COMMAND_COLUMN_WIDTH: usize = 20;

/// Colored command overview. Plain text when colors are disabled.
pub fn commands_overview() -> String {
    let mut out = format!("\n{}\n\n", "COMMAND OVERVIEW".cyan().bold());
    for command in Command::ALL {
        let label = format!("{:<width$}", command.label(), width = COMMAND_COLUMN_WIDTH);
        out.push_str(&format!("{} {}\n", label.yellow(), command.summary().green()));
        if let Some(usage) = command.usage() {
            let indent = " ".repeat(COMMAND_COLUMN_WIDTH);
            out.push_str(&format!("{indent} {}\n", format!("Usage: {usage}").cyan()));
        }
    }
    out
}

pub fn contact_lines<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> String {
    contacts
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notes separated by a blank line.
pub fn note_blocks<'a>(notes: impl IntoIterator<Item = &'a NoteRecord>) -> String {
    notes
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn upcoming_birthdays(days: u32, upcoming: &[UpcomingBirthday<'_>]) -> String {
    if upcoming.is_empty() {
        return format!("No birthdays in the next {days} days.");
    }
    let mut lines = vec![format!("Upcoming birthdays in the next {days} days:")];
    lines.extend(upcoming.iter().map(|item| {
        format!(
            "{}: {}",
            item.contact.name(),
            item.date.format(deskmate_core::model::field::BIRTHDAY_FORMAT)
        )
    }));
    lines.join("\n")
}
