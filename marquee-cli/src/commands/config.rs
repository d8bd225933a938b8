use anyhow::Result;
use marquee_config::{Config, ConfigSource, loader::describe};

pub fn run(config: &Config, source: &ConfigSource) -> Result<()> {
    println!("# source: {}", describe(source));
    print!("{}", config.to_toml_string()?);
    Ok(())
}
