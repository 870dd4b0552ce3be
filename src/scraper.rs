//! Read stick tables from HAProxy, one connection per command.

use crate::connection::ConnectionBuilder;
use crate::errors::{Error, Result};
use crate::models::{ScrapeResult, Table};
use crate::parsers;
use crate::requests::TableId;

#[derive(Clone, Debug)]
pub struct Scraper<B> {
    builder: B,
}

impl<B: ConnectionBuilder> Scraper<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    /// Names of all stick tables HAProxy currently knows about.
    ///
    /// # Examples
    /// ```no_run
    /// use haproxy_table_exporter::{Scraper, UnixSocketBuilder};
    ///
    /// let scraper = Scraper::new(UnixSocketBuilder::default());
    /// for table in scraper.tables().expect("Failed to list tables") {
    ///     println!("{}", table);
    /// }
    /// ```
    pub fn tables(&self) -> Result<Vec<String>> {
        let response = self.session(&TableId::All)?;
        Ok(parsers::parse_table_list(&response))
    }

    /// Dump the entries of one stick table.
    pub fn scrape(&self, table: &str) -> Result<Table> {
        let response = self.session(&TableId::Name(table))?;
        Ok(parsers::parse_table_dump(table, &response))
    }

    /// List every table and dump each of them. The first failure aborts the whole scrape.
    pub fn scrape_all(&self) -> Result<ScrapeResult> {
        let tables = self
            .tables()
            .map_err(|err| Error::TableList(Box::new(err)))?;

        tables
            .iter()
            .map(|name| {
                self.scrape(name).map_err(|err| Error::Scrape {
                    table: name.clone(),
                    source: Box::new(err),
                })
            })
            .collect()
    }

    fn session(&self, id: &TableId) -> Result<String> {
        let connection = self.builder.connect().map_err(Error::Connect)?;
        let response = connection.show_table(id)?;
        tracing::debug!(command = %id, bytes = response.len(), "control socket response");
        Ok(response)
    }
}
