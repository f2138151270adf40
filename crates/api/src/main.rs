#![forbid(unsafe_code)]

use kb_api::{ApiServer, protocol_error};
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// One request per line on stdin, one response envelope per line on stdout.
#[derive(Deserialize)]
struct RequestLine {
    cmd: String,
    #[serde(default)]
    args: Value,
}

fn storage_dir() -> PathBuf {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--storage-dir"
            && let Some(dir) = args.next()
        {
            return PathBuf::from(dir);
        }
    }
    PathBuf::from(".kanban")
}

fn main() {
    let storage_dir = storage_dir();
    let mut server = match ApiServer::open(&storage_dir) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RequestLine>(&line) {
            Ok(request) => server.dispatch(&request.cmd, request.args),
            Err(err) => protocol_error(&format!("bad request line: {err}")),
        };

        if writeln!(out, "{response}").is_err() {
            break;
        }
        let _ = out.flush();
    }
}
