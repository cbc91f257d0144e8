//! WebAPI Bench chart generator entry point.

fn main() {
    if let Err(e) = webapi_bench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
