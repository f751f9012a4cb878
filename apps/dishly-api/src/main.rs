use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = dishly_api::Args::parse();
	dishly_api::run(args).await
}
