use claude_sandbox::LaunchError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match claude_sandbox::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if std::env::var("RUST_BACKTRACE").is_ok() {
                eprintln!("\nBacktrace:\n{}", e.backtrace());
            }
            let code = e
                .downcast_ref::<LaunchError>()
                .map_or(1, LaunchError::exit_code);
            std::process::exit(code);
        }
    }
}
