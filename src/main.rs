use batch_pipeline::cli::{execute_run, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // 診断ログは標準エラーへ（標準出力は集計行専用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(error) = execute_run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
