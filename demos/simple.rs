//! Tags, exclusion, nesting and embedding.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use struct_map::{impl_record, marshal_map, Value};

struct Audit {
    created_by: String,
    revision: u32,
}

impl_record! {
    Audit {
        created_by => "CreatedBy" = r#"map:"created_by""#,
        revision => "Revision" = r#"map:"revision""#,
    }
}

struct Address {
    street: String,
    city: String,
}

impl_record! {
    Address {
        street => "Street" = r#"map:"street""#,
        city => "City" = r#"map:"city""#,
    }
}

struct User {
    audit: Audit,
    id: u32,
    name: String,
    password: String,
    address: Address,
    manager: Option<Box<Address>>,
    login_count: u64,
}

impl_record! {
    User {
        audit => "Audit" [embedded],
        id => "ID" = r#"map:"id""#,
        name => "Name",
        password => "Password" = r#"map:"-""#,
        address => "Address" = r#"map:"address""#,
        manager => "Manager" = r#"map:"manager""#,
        login_count => "login_count" [private],
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        audit: Audit {
            created_by: "admin".to_string(),
            revision: 2,
        },
        id: 42,
        name: "Alice Johnson".to_string(),
        password: "correct horse battery staple".to_string(),
        address: Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
        },
        manager: None,
        login_count: 17,
    };

    let map = marshal_map(&user)?;
    for (key, value) in &map {
        println!("{:<12} {}", key, value);
    }

    assert!(!map.contains_key("Password"));
    assert!(!map.contains_key("login_count"));
    assert_eq!(map.get("created_by"), Some(&Value::from("admin")));
    assert_eq!(map.get("manager"), Some(&Value::Null));
    println!("\n✓ {} keys encoded", map.len());

    Ok(())
}
