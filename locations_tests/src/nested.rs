use locations::{ConversionRegistry, Location, Locations, UrlBuilder, UrlProtocol};
use serde::Serialize;

#[derive(Serialize, Location)]
#[location("/articles/{slug}")]
struct Article {
    slug: &'static str,
}

#[derive(Serialize)]
struct Share {
    article: Article,
    via: &'static str,
}

#[derive(Serialize)]
struct Period {
    since: &'static str,
    until: &'static str,
}

#[derive(Serialize, Location)]
#[location("/reports/{id}")]
struct Report {
    id: u32,
    period: Period,
}

fn report() -> Report {
    Report {
        id: 12,
        period: Period {
            since: "2024-01-01",
            until: "2024-12-31",
        },
    }
}

#[test]
fn nested_fields_are_written_by_their_names() {
    let locations = Locations::new().with::<Report>();

    assert_eq!(
        locations.href(&report()).unwrap().full_path(),
        "/reports/12?since=2024-01-01&until=2024-12-31"
    );
}

#[test]
fn converted_values_are_written_under_outer_name() {
    let conversion = ConversionRegistry::new().with("Period", |fields| {
        Ok(fields.iter().map(|(_, value)| value.to_owned()).collect())
    });
    let locations = Locations::new()
        .with::<Report>()
        .with_conversion(conversion);
    let url = locations.href(&report()).unwrap();

    assert_eq!(
        url.parameters().pairs().collect::<Vec<_>>(),
        [("period", "2024-01-01"), ("period", "2024-12-31")]
    );
}

#[test]
fn pattern_of_nested_location() {
    let locations = Locations::new().with::<Article>();
    let share = Share {
        article: Article { slug: "hello" },
        via: "mail",
    };

    assert_eq!(
        locations.href_value(&share).unwrap().full_path(),
        "/articles/hello?via=mail"
    );
}

#[test]
fn base_url() {
    let mut base = UrlBuilder::new();
    base.protocol = UrlProtocol::HTTPS;
    base.host = "blog.example.com".to_owned();
    base.port = Some(443);

    let locations = Locations::new().with::<Article>().with_base(base.build());
    let url = locations.href(&Article { slug: "hello" }).unwrap();

    assert_eq!(url.port(), 443);
    assert_eq!(url.specified_port(), Some(443));
    assert_eq!(url.host_with_port(), "blog.example.com:443");
    assert_eq!(url.to_string(), "https://blog.example.com/articles/hello");
    assert_eq!(UrlBuilder::from(&url).build(), url);
}

#[derive(Serialize)]
struct Paging {
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_page: Option<u32>,
}

#[derive(Serialize, Location)]
#[location("/lists/{id}")]
struct Listing {
    id: u32,
    #[serde(flatten)]
    paging: Paging,
    labels: std::collections::BTreeMap<&'static str, &'static str>,
}

#[test]
fn flattened_fields_and_nested_maps() {
    let listing = Listing {
        id: 1,
        paging: Paging {
            page: 2,
            per_page: None,
        },
        labels: [("id", "7"), ("kind", "todo")].into(),
    };

    assert_eq!(
        locations::href(&listing).unwrap().full_path(),
        "/lists/1?page=2&labels=7&labels=todo"
    );
    assert_eq!(
        Locations::new().href(&listing).unwrap().full_path(),
        "/lists/1?page=2&labels=7&labels=todo"
    );
}
