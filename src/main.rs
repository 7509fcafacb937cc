//! Host-side helper: `cargo run` builds the WASM site and serves `static/`
//! on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(about = "Build and serve the Crystal Grimoire site")]
    struct Args {
        /// Port for the local HTTP server.
        #[arg(long, env = "GRIMOIRE_PORT", default_value_t = 8000)]
        port: u16,
        /// Serve whatever is already in static/pkg.
        #[arg(long)]
        skip_build: bool,
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        if !args.skip_build {
            // Build wasm bundle
            log::info!("building WASM pkg …");
            match Command::new("wasm-pack")
                .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
                .status()
            {
                Ok(st) if st.success() => {}
                Ok(_) => {
                    log::error!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
                    std::process::exit(1);
                }
                Err(_) => {
                    log::warn!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
                }
            }
        }

        log::info!("launching local server at http://127.0.0.1:{} …", args.port);
        let port = args.port.to_string();
        let mut server = match Command::new("python3")
            .args(["-m", "http.server", &port, "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                log::error!("failed to start http server: {err}");
                std::process::exit(1);
            }
        };

        // Keep process alive while the server runs
        loop {
            match server.try_wait() {
                Ok(Some(status)) => {
                    log::warn!("http server exited with {status}");
                    return;
                }
                Ok(None) => thread::sleep(Duration::from_secs(1)),
                Err(err) => {
                    log::error!("lost track of http server: {err}");
                    return;
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    host::run();
}

// Only meaningful on non-wasm targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
