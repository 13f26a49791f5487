use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use struct_map::{
    impl_record, marshal_map, marshal_map_with_options, EncoderOptions, Result, TextMarshaler,
};

struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

impl_record! {
    User {
        id => "ID" = r#"map:"id""#,
        name => "Name" = r#"map:"name""#,
        email => "Email" = r#"map:"email" db:"email_address""#,
        active => "Active",
    }
}

struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

impl_record! {
    Metadata {
        created => "Created",
        updated => "Updated",
        version => "Version" = r#"map:"version""#,
    }
}

struct Base {
    id: u64,
    owner: String,
}

impl_record! { Base { id => "ID" = r#"map:"id""#, owner => "Owner" } }

struct Stamp {
    seconds: i64,
}

impl TextMarshaler for Stamp {
    fn marshal_text(&self) -> Result<Vec<u8>> {
        Ok(self.seconds.to_string().into_bytes())
    }
}

impl_record! { Stamp { seconds => "Seconds" } capabilities [TextMarshaler] }

struct NestedData {
    base: Base,
    metadata: Metadata,
    previous: Option<Box<Metadata>>,
    stamp: Stamp,
    secret: String,
}

impl_record! {
    NestedData {
        base => "Base" [embedded],
        metadata => "Metadata" = r#"map:"metadata""#,
        previous => "Previous" = r#"map:"previous,json""#,
        stamp => "Stamp" = r#"map:"stamp,string""#,
        secret => "Secret" = r#"map:"-""#,
    }
}

fn user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn nested() -> NestedData {
    let metadata = || Metadata {
        created: "2023-01-01T00:00:00Z".to_string(),
        updated: "2023-12-31T23:59:59Z".to_string(),
        version: 3,
    };
    NestedData {
        base: Base {
            id: 42,
            owner: "ops".to_string(),
        },
        metadata: metadata(),
        previous: Some(Box::new(metadata())),
        stamp: Stamp { seconds: 1_700_000_000 },
        secret: "hidden".to_string(),
    }
}

fn benchmark_flat_record(c: &mut Criterion) {
    let user = user();

    c.bench_function("marshal_flat_record", |b| {
        b.iter(|| marshal_map(black_box(&user)))
    });
}

fn benchmark_nested_record(c: &mut Criterion) {
    let data = nested();

    c.bench_function("marshal_nested_record", |b| {
        b.iter(|| marshal_map(black_box(&data)))
    });
}

fn benchmark_custom_options(c: &mut Criterion) {
    let user = user();

    c.bench_function("marshal_custom_tag", |b| {
        b.iter(|| {
            let options = EncoderOptions::new().with_tag("db");
            marshal_map_with_options(black_box(&user), options)
        })
    });
}

fn benchmark_many_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_records");

    for size in [10, 50, 100, 500].iter() {
        let users: Vec<User> = (0..*size)
            .map(|i| User {
                id: i,
                name: format!("User {}", i),
                email: format!("user{}@example.com", i),
                active: i % 2 == 0,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &users, |b, users| {
            b.iter(|| {
                users
                    .iter()
                    .map(|user| marshal_map(black_box(user)))
                    .collect::<Result<Vec<_>>>()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_flat_record,
    benchmark_nested_record,
    benchmark_custom_options,
    benchmark_many_records
);
criterion_main!(benches);
