use stackshuffle_core::{
    copy_text, export_text, stack_to_string, Stack, TeamStack, TechItem, EXPORT_HEADER,
};

fn sample_stack() -> Stack {
    Stack {
        frontend: TechItem::new("React", "⚛️"),
        backend: TechItem::new("Node.js", "🟢"),
        database: TechItem::new("PostgreSQL", "🐘"),
    }
}

#[test]
fn stack_label_is_three_lines() {
    assert_eq!(
        stack_to_string(&sample_stack()),
        "Frontend: React\nBackend: Node.js\nDatabase: PostgreSQL"
    );
}

#[test]
fn copy_text_includes_icons_and_label() {
    assert_eq!(
        copy_text(&sample_stack(), Some("Team 2")),
        "Team 2\nFrontend: ⚛️ React\nBackend: 🟢 Node.js\nDatabase: 🐘 PostgreSQL"
    );
    assert_eq!(
        copy_text(&sample_stack(), None),
        "Frontend: ⚛️ React\nBackend: 🟢 Node.js\nDatabase: 🐘 PostgreSQL"
    );
    assert_eq!(
        copy_text(&sample_stack(), Some("")),
        copy_text(&sample_stack(), None)
    );
}

#[test]
fn export_lists_teams_in_blocks() {
    let other = Stack {
        frontend: TechItem::new("Svelte", "🔥"),
        backend: TechItem::new("Flask", "🧪"),
        database: TechItem::new("Redis", "🔴"),
    };
    let teams = vec![
        TeamStack {
            team_number: 1,
            stack: sample_stack(),
        },
        TeamStack {
            team_number: 2,
            stack: other,
        },
    ];
    let expected = format!(
        "{EXPORT_HEADER}\n{}\n\n\
         Team 1\n  Frontend: ⚛️ React\n  Backend:  🟢 Node.js\n  Database: 🐘 PostgreSQL\n\n\
         Team 2\n  Frontend: 🔥 Svelte\n  Backend:  🧪 Flask\n  Database: 🔴 Redis\n\n",
        "=".repeat(40)
    );
    assert_eq!(export_text(&teams), expected);
}

#[test]
fn export_of_single_stack_uses_your_stack_label() {
    let text = export_text(&[TeamStack::single(sample_stack())]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], EXPORT_HEADER);
    assert_eq!(lines[3], "Your Stack");
    assert_eq!(lines[4], "  Frontend: ⚛️ React");
}

#[test]
fn export_with_no_teams_is_just_the_header() {
    let text = export_text(&[]);
    assert_eq!(text, format!("{EXPORT_HEADER}\n{}\n\n", "=".repeat(40)));
}
