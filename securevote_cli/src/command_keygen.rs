use crate::config::Config;
use crate::error::CliError;
use crate::files;
use securevote::IssuerKey;

pub fn command_keygen(matches: &clap::ArgMatches, config: &Config) -> Result<(), CliError> {
    let bits = matches.get_one::<usize>("bits").copied().unwrap_or(2048);
    let force = matches.get_flag("force");

    for path in &[&config.private_key_path, &config.public_key_path] {
        if files::exists(path) && !force {
            return Err(CliError::Exists(path.to_string()));
        }
    }

    let key = IssuerKey::generate(bits)?;
    files::write(&config.private_key_path, &key.to_pem()?)?;
    files::write(&config.public_key_path, &key.public_key().to_pem()?)?;

    println!("private-key: {}", config.private_key_path);
    println!("public-key: {}", config.public_key_path);
    Ok(())
}

pub fn command_public_key(config: &Config) -> Result<(), CliError> {
    let public_key = files::load_public_key(config)?;
    print!("{}", public_key.to_pem()?);
    Ok(())
}
