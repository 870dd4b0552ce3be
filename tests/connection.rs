mod common;

use haproxy_table_exporter::requests::TableId;
use haproxy_table_exporter::{
    prepare_output, ConnectionBuilder, Error, RenderConfig, Scraper, UnixSocketBuilder,
};

use common::{haproxy, FakeHaproxy, HTTP_DUMP, TABLES};

#[test]
fn unix_socket_builder_connects() {
    let haproxy = haproxy();
    let builder = UnixSocketBuilder::new(haproxy.path.clone());
    assert!(
        builder.connect().is_ok(),
        "Failed to connect to the HAProxy Unix socket"
    );
}

#[test]
fn connection_show_table_reads_whole_response() {
    let haproxy = haproxy();
    let builder = UnixSocketBuilder::new(haproxy.path.clone());

    let connection = builder.connect().unwrap();
    assert_eq!(connection.show_table(&TableId::All).unwrap(), TABLES);

    let connection = builder.connect().unwrap();
    assert_eq!(
        connection.show_table(&TableId::Name("http")).unwrap(),
        HTTP_DUMP
    );
}

#[test]
fn scraper_tables() {
    let haproxy = FakeHaproxy::start(&[("show table", "# table: tbl1\n# table: tbl2\n")]);
    let scraper = Scraper::new(UnixSocketBuilder::new(haproxy.path.clone()));
    assert_eq!(scraper.tables().unwrap(), vec!["tbl1", "tbl2"]);
}

#[test]
fn scraper_scrape() {
    let haproxy = haproxy();
    let scraper = Scraper::new(UnixSocketBuilder::new(haproxy.path.clone()));
    let table = scraper.scrape("http").unwrap();

    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records["10.0.0.1"]["gpc0"], "3");
    assert_eq!(table.records["10.0.0.2"]["http_req_rate(10000)"], "4");
}

#[test]
fn prepare_output_covers_every_table() {
    let haproxy = haproxy();
    let scraper = Scraper::new(UnixSocketBuilder::new(haproxy.path.clone()));
    let config = RenderConfig {
        instance: Some("lb1".to_string()),
        ..RenderConfig::default()
    };
    let output = prepare_output(&scraper, &config).unwrap();

    assert!(output.contains("connected_ips{instance=\"lb1\"} 3\n"));
    assert!(output.contains("blocked_ips{instance=\"lb1\"} 2\n"));
    assert!(output.contains(
        "blocked_ip{frontend=\"api\",ip=\"192.168.1.9\",instance=\"lb1\"} 1\n"
    ));
    assert!(output.contains(
        "http_request_rate_per_ip{frontend=\"http\",ip=\"10.0.0.1\",instance=\"lb1\"} 12\n"
    ));
    assert!(!output.contains("http_request_rate_per_ip{frontend=\"api\""));
}

#[test]
fn prepare_output_fails_without_socket() {
    let (_dir, path) = FakeHaproxy::missing();
    let scraper = Scraper::new(UnixSocketBuilder::new(path));
    let err = prepare_output(&scraper, &RenderConfig::default()).unwrap_err();

    assert!(matches!(err, Error::TableList(_)));
    assert!(err.is_connect());
}
