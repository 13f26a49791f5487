//! The `json`, `string` and `bytes` tag options.
//!
//! Run with: cargo run --example capabilities

use chrono::{TimeZone, Utc};
use std::error::Error;
use struct_map::{impl_record, marshal_map, BinaryMarshaler, JsonMarshaler, Result, TextMarshaler};

struct Version {
    major: u16,
    minor: u16,
}

impl TextMarshaler for Version {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(format!("v{}.{}", self.major, self.minor).into_bytes())
    }
}

impl BinaryMarshaler for Version {
    fn marshal_binary(&self) -> Result<Vec<u8>> {
        let mut out = self.major.to_be_bytes().to_vec();
        out.extend_from_slice(&self.minor.to_be_bytes());
        Ok(out)
    }
}

impl_record! {
    Version { major => "Major", minor => "Minor" }
    capabilities [TextMarshaler, BinaryMarshaler]
}

struct Point {
    x: i32,
    y: i32,
}

impl JsonMarshaler for Point {
    fn marshal_json(&self) -> Result<Vec<u8>> {
        Ok(format!("[{},{}]", self.x, self.y).into_bytes())
    }
}

impl_record! { Point { x => "X", y => "Y" } capabilities [JsonMarshaler] }

struct Settings {
    theme: String,
    font_size: u8,
}

impl_record! {
    Settings {
        theme => "Theme" = r#"json:"theme""#,
        font_size => "FontSize" = r#"json:"font_size,omitempty""#,
    }
}

struct Release {
    version_text: Version,
    version_bytes: Version,
    origin: Point,
    settings: Settings,
    published: Box<chrono::DateTime<Utc>>,
}

impl_record! {
    Release {
        version_text => "VersionText" = r#"map:"version_text,string""#,
        version_bytes => "VersionBytes" = r#"map:"version_bytes,bytes""#,
        origin => "Origin" = r#"map:"origin,json""#,
        settings => "Settings" = r#"map:"settings,json""#,
        published => "Published" = r#"map:"published""#,
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let release = Release {
        version_text: Version { major: 1, minor: 4 },
        version_bytes: Version { major: 1, minor: 4 },
        origin: Point { x: 3, y: -7 },
        settings: Settings {
            theme: "dark".to_string(),
            font_size: 0,
        },
        published: Box::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
    };

    let map = marshal_map(&release)?;
    for (key, value) in &map {
        match value.as_bytes() {
            Some(bytes) => println!("{:<14} {:?} ({})", key, bytes, String::from_utf8_lossy(bytes)),
            None => println!("{:<14} {}", key, value),
        }
    }

    assert_eq!(map.get("version_text").and_then(|v| v.as_bytes()), Some(&b"v1.4"[..]));
    assert_eq!(map.get("version_bytes").and_then(|v| v.as_bytes()), Some(&[0, 1, 0, 4][..]));
    assert_eq!(map.get("origin").and_then(|v| v.as_bytes()), Some(&b"[3,-7]"[..]));
    assert_eq!(
        map.get("settings").and_then(|v| v.as_bytes()),
        Some(&br#"{"theme":"dark"}"#[..])
    );
    println!("\n✓ Capabilities applied in option order");

    Ok(())
}
