use crate::{Stack, TeamStack};

pub const EXPORT_HEADER: &str = "🎲 HACKATHON STACK ASSIGNMENTS";
pub const EXPORT_FILE_NAME: &str = "hackathon-stacks.txt";
const EXPORT_RULE_WIDTH: usize = 40;

/// `Frontend: name` / `Backend: name` / `Database: name`, no trailing newline.
pub fn stack_to_string(stack: &Stack) -> String {
    stack
        .entries()
        .map(|(role, item)| format!("{}: {}", role.label(), item.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Card text with icons, optionally headed by a team label.
pub fn copy_text(stack: &Stack, team_label: Option<&str>) -> String {
    let mut lines = Vec::with_capacity(4);
    if let Some(label) = team_label.filter(|label| !label.is_empty()) {
        lines.push(label.to_string());
    }
    for (role, item) in stack.entries() {
        lines.push(format!("{}: {} {}", role.label(), item.icon, item.name));
    }
    lines.join("\n")
}

/// Plain-text document listing every assignment.
pub fn export_text(teams: &[TeamStack]) -> String {
    let mut text = String::new();
    text.push_str(EXPORT_HEADER);
    text.push('\n');
    text.push_str(&"=".repeat(EXPORT_RULE_WIDTH));
    text.push_str("\n\n");
    for team in teams {
        text.push_str(&team.label());
        text.push('\n');
        for (role, item) in team.stack.entries() {
            // values line up under the longest label
            let heading = format!("{}:", role.label());
            text.push_str(&format!("  {heading:<9} {} {}\n", item.icon, item.name));
        }
        text.push('\n');
    }
    text
}
