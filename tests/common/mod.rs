#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::thread;

use tempfile::TempDir;

/// A fake HAProxy admin socket that answers each command from a fixed map and then hangs up.
pub struct FakeHaproxy {
    pub path: PathBuf,
    _dir: TempDir,
}

impl FakeHaproxy {
    pub fn start(responses: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let responses: HashMap<String, String> = responses
            .iter()
            .map(|(command, body)| (command.to_string(), body.to_string()))
            .collect();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(stream) => stream,
                    Err(_) => return,
                };
                let mut command = String::new();
                if BufReader::new(&stream).read_line(&mut command).is_err() {
                    continue;
                }
                let body = responses
                    .get(command.trim_end_matches('\n'))
                    .map(String::as_str)
                    .unwrap_or("Unknown command.\n");
                let _ = stream.write_all(body.as_bytes());
            }
        });

        Self { path, _dir: dir }
    }

    /// A socket path inside a fresh directory that nothing listens on.
    pub fn missing() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sock");
        (dir, path)
    }
}

pub const TABLES: &str = "# table: http, type: ip, size:204800, used:2\n\
                          # table: api, type: ip, size:204800, used:1\n";

pub const HTTP_DUMP: &str = "# table: http, type: ip, size:204800, used:2\n\
                             0x55d4c7a0b2c0: key=10.0.0.1 use=0 exp=2998 gpc0=3 http_req_rate(10000)=12\n\
                             0x55d4c7a0b3d0: key=10.0.0.2 use=1 exp=1450 gpc0=0 http_req_rate(10000)=4\n\
                             \n";

pub const API_DUMP: &str = "# table: api, type: ip, size:204800, used:1\n\
                            0x55d4c7a0b4e0: key=192.168.1.9 use=0 exp=100 gpc0=1\n\
                            \n";

pub fn haproxy() -> FakeHaproxy {
    FakeHaproxy::start(&[
        ("show table", TABLES),
        ("show table http", HTTP_DUMP),
        ("show table api", API_DUMP),
    ])
}
