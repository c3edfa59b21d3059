use comfy_table::presets::NOTHING;
use comfy_table::{ContentArrangement, Table};

/// A borderless, left-aligned table with one header row, used by every
/// `list` command in table mode.
pub fn get_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(
            header
                .into_iter()
                .map(|h| h.as_ref().to_string())
                .collect::<Vec<_>>(),
        );
    table
}
