use crate::models::{Record, Table};

/// Prefix of the human readable table header lines, e.g.
/// `# table: http, type: ip, size:204800, used:1`.
const HEADER_MARKER: &str = "# ";

/// Prefix of entry lines, which start with the entry's address, e.g.
/// `0x55d4c7a0: key=10.0.0.1 use=0 exp=0 gpc0=1`.
const ID_MARKER: &str = "0x";

/// Split one line of `show table` output into its `key=value` fields.
///
/// Returns `None` for lines shorter than two bytes. Header lines are rewritten into `key=value`
/// form first; entry lines lose their leading address. Tokens without an `=` are skipped and a
/// repeated key keeps its last value.
pub fn parse_line(line: &str) -> Option<Record> {
    if line.len() < 2 {
        return None;
    }

    let normalized;
    let fields = if let Some(rest) = line.strip_prefix(HEADER_MARKER) {
        normalized = rest.replace(':', "=").replace(',', "").replace("= ", "=");
        normalized.as_str()
    } else if line.starts_with(ID_MARKER) {
        line.split_once(':')
            .map(|(_, rest)| rest.trim_matches(|c: char| c == ' ' || c == '\t'))
            .unwrap_or("")
    } else {
        line
    };

    Some(
        fields
            .split(' ')
            .filter_map(|token| token.split_once('='))
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect(),
    )
}

/// Collect the distinct table names announced by a `show table` response, first seen first.
pub fn parse_table_list(response: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();
    for mut record in response.split('\n').filter_map(parse_line) {
        if let Some(name) = record.remove("table") {
            if !tables.contains(&name) {
                tables.push(name);
            }
        }
    }
    tables
}

/// Index the entries of a `show table <name>` response by their `key` field.
pub fn parse_table_dump(name: &str, response: &str) -> Table {
    let mut table = Table::new(name);
    response
        .split('\n')
        .filter_map(parse_line)
        .for_each(|record| table.insert(record));
    table
}
