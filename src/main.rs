use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = fire_plan::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
            return;
        }
        Some("plan") => {
            if let Err(e) = fire_plan::api::run_plan_command(&raw_args[1..]) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            return;
        }
        _ => {}
    }

    eprintln!("Usage: cargo run -- serve [port]");
    eprintln!("       cargo run -- plan [--current-age N ...] [--csv-out PATH] [--pdf-out PATH]");
    std::process::exit(1);
}
