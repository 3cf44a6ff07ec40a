//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` locally so the portfolio can be previewed.
//!
//! `PORTFOLIO_PORT` overrides the default port (8000).

use std::io;
use std::process::{Command, ExitCode, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn build_bundle() -> io::Result<bool> {
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) => Ok(st.success()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            eprintln!("wasm-pack not found in PATH. Serving whatever is already in static/pkg.");
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

fn serve(port: &str) -> io::Result<()> {
    println!("Serving the portfolio at http://127.0.0.1:{port} …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    // Keep process alive while the server runs.
    loop {
        if let Some(status) = server.try_wait()? {
            eprintln!("http server exited: {status}");
            return Ok(());
        }
        thread::sleep(Duration::from_secs(1));
    }
}

fn main() -> ExitCode {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return ExitCode::SUCCESS;
    }

    match build_bundle() {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("failed to run wasm-pack: {err}");
            return ExitCode::FAILURE;
        }
    }

    let port = env::var("PORTFOLIO_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_owned());
    if let Err(err) = serve(&port) {
        eprintln!("failed to start http server: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
