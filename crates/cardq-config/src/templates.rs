//! Starter configuration written by `cardq init`.

/// Template for a project-local `.cardq.toml`.
pub fn local_template() -> &'static str {
    r#"# cardq configuration

[cards]
# Card dump to index, relative to this file.
path = "cards.json"
# Optional translations file keyed by card id, then language.
# localizations = "localizations.json"
# Restrict indexing to these set codes.
# sets = ["LEA", "MIR"]

[index]
# root = ".cardq/index"
# build_heap_size = 50000000

[suggest]
# max_count = 20
# language = "en"
# fuzzy_distance = 2
"#
}
