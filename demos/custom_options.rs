//! Encoding the same record under different tag namespaces and separators.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use struct_map::{impl_record, marshal_map, marshal_map_with_options, EncoderOptions, Encoder};

struct Config {
    name: String,
    version: String,
    debug: bool,
    retries: u8,
}

impl_record! {
    Config {
        name => "Name" = r#"map:"name" db:"app_name" env:"APP_NAME""#,
        version => "Version" = r#"map:"version" db:"app_version;string""#,
        debug => "Debug" = r#"db:"-" env:"APP_DEBUG""#,
        retries => "Retries" = r#"env:"APP_RETRIES|string""#,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        retries: 3,
    };

    println!("Default (map tag, comma separator):");
    let default = marshal_map(&config)?;
    println!("{:?}\n", default.keys().collect::<Vec<_>>());

    println!("db tag, semicolon separator:");
    let db = EncoderOptions::new().with_tag("db").with_separator(";");
    let db_map = marshal_map_with_options(&config, db)?;
    println!("{:?}\n", db_map.keys().collect::<Vec<_>>());

    println!("env tag, pipe separator, reusable encoder:");
    let encoder = Encoder::new(EncoderOptions::new().with_tag("env").with_separator("|"));
    let env_map = encoder.marshal_map(&config)?;
    println!("{:?}\n", env_map.keys().collect::<Vec<_>>());

    assert!(db_map.contains_key("app_name") && !db_map.contains_key("Debug"));
    assert!(env_map.contains_key("APP_RETRIES"));
    println!("✓ Options applied");

    Ok(())
}
