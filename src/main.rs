use clap::Parser;
use cropdeck::{args::Args, Outcome};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse().verify()?;
    match cropdeck::run(args)? {
        Outcome::Selected(rect) => {
            println!("top-left: {}", rect.top_left);
            println!("bottom-right: {}", rect.bottom_right);
        }
        Outcome::Deck(path) => println!("Deck saved to {}", path.display()),
    }
    Ok(())
}
