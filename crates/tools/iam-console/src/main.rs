use anyhow::Result;
use clap::Parser;
use iam_console::logging::init_logging;
use iam_console::{Args, Config, Console};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    init_logging(&config);

    let console = Console::new(&config)?;
    match console.run(args.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
