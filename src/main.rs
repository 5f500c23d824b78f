use anyhow::Context;
use podhtml::{DefaultResolver, Options, PodParser};
use std::env;
use std::io::{self, Read};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match env::var_os("PODHTML_CONFIG") {
        Some(path) => Options::load_from_path(path)?,
        None => Options::default(),
    };

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let mut parser = PodParser::with_options(DefaultResolver, options);
    parser.parse(&input);

    if env::args().skip(1).any(|arg| arg == "--tokens") {
        println!("{}", serde_json::to_string_pretty(parser.tokens())?);
    } else {
        print!("{}", parser.to_html());
    }
    Ok(())
}
