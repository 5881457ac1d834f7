//! Interactive console over stdin/stdout.
//!
//! Stands in for a serial transport: stdin bytes are fed to the
//! interpreter, everything it emits goes to stdout. An optional
//! password may be passed as the first argument.

use std::io::{self, Read, Write};
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use fms_console::{escape_json, Console};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let password = std::env::args().nth(1);
    let mut console = Console::new("FMS", password.as_deref());

    // Cooked-mode terminals echo locally already
    console.set_echo(false);

    let started = Instant::now();
    console.register("uptime", "Show seconds since start", 0, 0, move |rsp, _args| {
        let fields = [
            ("command", "uptime".to_owned()),
            ("uptime", started.elapsed().as_secs().to_string()),
            ("success", "true".to_owned()),
        ];
        rsp.respond_fields(&fields);
    });

    console.register("ls", "List directory contents", 0, 1, |rsp, args| {
        let path = args.first().copied().unwrap_or(".");
        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(_) => {
                rsp.respond("ls", "Cannot open directory", false);
                return;
            }
        };

        // Streamed so a large directory never sits in memory at once
        rsp.begin_stream();
        rsp.part("\"files\":[");
        let mut first = true;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let mut item = String::new();
            if !first {
                item.push(',');
            }
            first = false;
            item.push_str(&format!(
                "{{\"name\":\"{}\",\"size\":{}}}",
                escape_json(&name),
                size
            ));
            rsp.part(&item);
        }
        rsp.part("]");
        rsp.end_stream();
    });

    let stdout = io::stdout();
    let stdin = io::stdin();
    let mut out = stdout.lock();
    let mut input = stdin.lock();

    console.start(&mut out);
    out.flush()?;

    let mut buf = [0u8; 256];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        console.feed(&buf[..n], &mut out);
        out.flush()?;
    }

    Ok(())
}
