mod definition;

use definition::*;
use locations::{href, Error, Location};
use rstest::rstest;

#[test]
fn index() {
    let url = href(&Index).unwrap();

    assert_eq!(url.full_path(), "/");
    assert_eq!(url.to_string(), "http://localhost/");
}

#[rstest]
#[case(None, "/users/5")]
#[case(Some("posts"), "/users/5?tab=posts")]
#[case(Some("a&b c"), "/users/5?tab=a%26b+c")]
fn user(#[case] tab: Option<&str>, #[case] expected: &str) {
    let user = User {
        id: 5,
        tab: tab.map(str::to_owned),
    };

    assert_eq!(href(&user).unwrap().full_path(), expected);
}

#[test]
fn renamed_fields() {
    let post = Post {
        user_id: "john doe".to_owned(),
        post_id: 9,
        sort_by: Order::MostLiked,
        tags: vec!["a", "b"],
    };
    let url = href(&post).unwrap();

    assert_eq!(url.encoded_path(), "/users/john%20doe/posts/9");
    assert_eq!(url.parameters().get_all("tags"), Some(&["a".to_owned(), "b".to_owned()][..]));
    assert_eq!(
        url.full_path(),
        "/users/john%20doe/posts/9?sortBy=most_liked&tags=a&tags=b"
    );
}

#[test]
fn enum_with_data() {
    let post = Post {
        user_id: "john".to_owned(),
        post_id: 9,
        sort_by: Order::Page(2),
        tags: vec![],
    };

    assert_eq!(
        href(&post),
        Err(Error::UnsupportedOperation("enum variant with data"))
    );
}

#[test]
fn wildcard() {
    let asset = Asset {
        path: "css/app.css".to_owned(),
        v: 3,
    };

    assert_eq!(href(&asset).unwrap().full_path(), "/static/css/app.css?v=3");
}

#[test]
fn embedded_captures() {
    let file = File {
        name: "report 2024",
        ext: "pdf",
    };

    assert_eq!(href(&file).unwrap().full_path(), "/files/report%202024.pdf");
}

#[test]
fn derived_constants() {
    assert_eq!(Search::NAME, "renamed_search");
    assert_eq!(Search::PATH, "/search");
    assert_eq!(Post::NAME, "Post");
    assert_eq!(
        Post::pattern().unwrap().path_parameter_names(),
        ["userId", "postId"]
    );

    let search = Search {
        q: "rust".to_owned(),
        cache: Some("ignored".to_owned()),
    };

    assert_eq!(href(&search).unwrap().full_path(), "/search?query=rust");
}

#[test]
fn missing_path_parameter() {
    assert_eq!(
        href(&MaybeUser { id: None }),
        Err(Error::MissingPathParameter("id".to_owned()))
    );
    assert_eq!(
        href(&MaybeUser { id: Some(1) }).unwrap().full_path(),
        "/maybe/1"
    );
}
