use crate::system::SystemCommand;

/// `rename_commands` renames the computer from `current` to `target`.
/// The new name is added and made primary before the current name and the
/// name it resolves to are removed as alternate computer names.
pub fn rename_commands(current: &str, resolved: &str, target: &str) -> Vec<SystemCommand> {
    [
        format!("/add:{}", target),
        format!("/makeprimary:{}", target),
        format!("/remove:{}", current),
        format!("/remove:{}", resolved),
    ]
    .into_iter()
    .map(|operation| {
        SystemCommand::new(
            "netdom",
            [String::from("computername"), current.to_string(), operation],
        )
    })
    .collect()
}
