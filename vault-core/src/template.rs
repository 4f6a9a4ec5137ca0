//! Versioned text template for the generated user seeder.
//!
//! The seeder is assembled from named regions kept as separate files under
//! `templates/user_seeder/`. Placeholders are written `{{name}}`; unknown placeholders are
//! left untouched so a typo shows up in the generated file instead of vanishing.

use crate::domain::models::SeedEntry;

/// Bumped whenever the rendered shape changes in a way the injector has to know about.
pub const TEMPLATE_VERSION: u32 = 1;

/// The comment that opens the `USERS` array in a freshly rendered seeder.
pub const USERS_MARKER: &str = "// Users will be added here by `seed-vault add`";

/// Text that opens one rendered entry. The injector counts these to number new entries.
pub const ENTRY_OPEN: &str = "SeedEntry {";

pub const HEADER: &str = include_str!("../templates/user_seeder/header.rs.tpl");
pub const SAVE_AVATAR: &str = include_str!("../templates/user_seeder/save_avatar.rs.tpl");
pub const USERS: &str = include_str!("../templates/user_seeder/users.rs.tpl");
pub const RUN: &str = include_str!("../templates/user_seeder/run.rs.tpl");
pub const ENTRY: &str = include_str!("../templates/user_seeder/entry.rs.tpl");

/// Region order of a complete seeder file.
pub const SEEDER_REGIONS: [&str; 4] = [HEADER, SAVE_AVATAR, USERS, RUN];

/// Substitutes `{{key}}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value that itself contains `{{...}}` is
/// emitted verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after_open[..end].trim();
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Renders a value as a Rust string literal.
fn string_literal(value: &str) -> String {
    format!("{value:?}")
}

/// Renders the whole user seeder around pre-rendered entry text.
pub fn render_seeder(entries: &str) -> String {
    let version = TEMPLATE_VERSION.to_string();
    let vars = [
        ("version", version.as_str()),
        ("marker", USERS_MARKER),
        ("entries", entries),
    ];

    SEEDER_REGIONS
        .iter()
        .map(|region| render(region, &vars))
        .collect()
}

/// Everything between `= &[` and the closing `];` of the `USERS` array.
pub fn render_users_body(entries: &str) -> String {
    format!("\n    {USERS_MARKER}\n{entries}")
}

/// Renders one `USERS` element preceded by its `// <index>` comment.
pub fn render_entry(index: usize, entry: &SeedEntry<'_>) -> String {
    let index = index.to_string();
    let name = string_literal(entry.name);
    let email = string_literal(entry.email);
    let password = string_literal(entry.password);
    let avatar = string_literal(entry.avatar);

    render(
        ENTRY,
        &[
            ("index", index.as_str()),
            ("name", name.as_str()),
            ("email", email.as_str()),
            ("password", password.as_str()),
            ("avatar", avatar.as_str()),
        ],
    )
}

/// Renders `entries` numbered from `first_index`.
pub fn render_entries<'a>(
    entries: impl IntoIterator<Item = SeedEntry<'a>>,
    first_index: usize,
) -> String {
    entries
        .into_iter()
        .enumerate()
        .map(|(offset, entry)| render_entry(first_index + offset, &entry))
        .collect()
}
