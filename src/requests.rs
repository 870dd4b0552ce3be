//! Request types for HAProxy.

use std::fmt::{self, Display};

/// Selects which stick table a `show table` command addresses.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TableId<'a> {
    /// List every table without dumping its entries.
    All,
    /// Dump the entries of a table by name.
    Name(&'a str),
}

impl Display for TableId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableId::All => f.write_str("show table"),
            TableId::Name(name) => write!(f, "show table {}", name),
        }
    }
}
