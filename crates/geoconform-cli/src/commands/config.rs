use crate::support::load_config_or_exit;

pub fn run(config: Option<String>) {
    let config = load_config_or_exit(config.as_deref());
    match config.to_toml_string() {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}
