use hairpin_dns_domain::{CliOverrides, Config};

/// Loads and validates configuration. Returns the file it came from, if any,
/// so the caller can report it once logging is up.
pub fn load_config(
    path: Option<&str>,
    overrides: CliOverrides,
) -> anyhow::Result<(Config, Option<String>)> {
    let source = path.map(str::to_string).or_else(Config::get_config_path);
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok((config, source))
}
