use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use struct_map::json::to_json;
use struct_map::{impl_record, marshal_map, TextMarshaler, Result, Value};

struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl TextMarshaler for Color {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b).into_bytes())
    }
}

impl_record! { Color { r => "R", g => "G", b => "B" } capabilities [TextMarshaler] }

struct Base {
    id: u32,
}

impl_record! { Base { id => "ID" = r#"json:"id""# } }

struct Inner {
    flag: bool,
}

impl_record! { Inner { flag => "Flag" = r#"json:"flag""# } }

struct Document {
    base: Base,
    title: String,
    color: Color,
    inner: Option<Box<Inner>>,
    missing: Option<Box<Inner>>,
    blob: Vec<u8>,
    created: chrono::DateTime<Utc>,
    huge: BigInt,
    hidden: String,
    internal: u8,
    count: u32,
    note: String,
}

impl_record! {
    Document {
        base => "Base" [embedded],
        title => "Title" = r#"json:"title" map:"ignored""#,
        color => "Color" = r#"json:"color""#,
        inner => "Inner" = r#"json:"inner""#,
        missing => "Missing" = r#"json:"missing""#,
        blob => "Blob" = r#"json:"blob""#,
        created => "Created" = r#"json:"created""#,
        huge => "Huge" = r#"json:"huge""#,
        hidden => "Hidden" = r#"json:"-""#,
        internal => "internal" [private],
        count => "Count" = r#"json:"count,omitempty""#,
        note => "Note" = r#"json:"note,omitempty""#,
    }
}

fn document() -> Document {
    Document {
        base: Base { id: 9 },
        title: "Report".to_string(),
        color: Color { r: 255, g: 0, b: 16 },
        inner: Some(Box::new(Inner { flag: true })),
        missing: None,
        blob: b"hello".to_vec(),
        created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        huge: BigInt::from(u64::MAX) * 1000,
        hidden: "secret".to_string(),
        internal: 1,
        count: 0,
        note: String::new(),
    }
}

#[test]
fn test_generic_json_document() {
    let json = String::from_utf8(to_json(&document()).unwrap()).unwrap();
    assert_eq!(
        json,
        concat!(
            r##"{"id":9,"title":"Report","color":"#ff0010","inner":{"flag":true},"##,
            r#""missing":null,"blob":"aGVsbG8=","created":"2024-01-02T03:04:05Z","#,
            r#""huge":"18446744073709551615000"}"#
        )
    );
}

#[test]
fn test_omitempty_keeps_non_empty_values() {
    let mut doc = document();
    doc.count = 2;
    doc.note = "n".to_string();

    let parsed: serde_json::Value = serde_json::from_slice(&to_json(&doc).unwrap()).unwrap();
    assert_eq!(parsed["count"], serde_json::json!(2));
    assert_eq!(parsed["note"], serde_json::json!("n"));
    assert!(parsed.get("Hidden").is_none());
    assert!(parsed.get("internal").is_none());
}

#[test]
fn test_json_option_uses_generic_encoding() {
    struct Holder {
        doc: Inner,
    }
    impl_record! { Holder { doc => "Doc" = r#"map:"doc,json""# } }

    let map = marshal_map(&Holder {
        doc: Inner { flag: false },
    })
    .unwrap();
    assert_eq!(map.get("doc"), Some(&Value::Bytes(br#"{"flag":false}"#.to_vec())));
}

#[test]
fn test_non_finite_float_is_an_error() {
    struct Bad {
        ratio: f64,
    }
    impl_record! { Bad { ratio => "Ratio" } }

    assert!(to_json(&Bad { ratio: f64::INFINITY }).is_err());
}
