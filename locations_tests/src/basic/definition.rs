use locations::Location;
use serde::Serialize;

#[derive(Serialize, Location)]
#[location("/")]
pub struct Index;

#[derive(Serialize, Location)]
#[location("/users/{id}")]
pub struct User {
    pub id: u32,
    pub tab: Option<String>,
}

#[derive(Serialize, Location)]
#[serde(rename_all = "camelCase")]
#[location("/users/{userId}/posts/{postId}")]
pub struct Post {
    pub user_id: String,
    pub post_id: u64,
    pub sort_by: Order,
    pub tags: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Newest,
    MostLiked,
    Page(u32),
}

#[derive(Serialize, Location)]
#[location("/static/{*path}")]
pub struct Asset {
    pub path: String,
    pub v: u32,
}

#[derive(Serialize, Location)]
#[serde(rename = "renamed_search")]
#[location("/search")]
pub struct Search {
    #[serde(rename = "query")]
    pub q: String,
    #[serde(skip)]
    pub cache: Option<String>,
}

#[derive(Serialize, Location)]
#[location("/files/{name}.{ext}")]
pub struct File<'a> {
    pub name: &'a str,
    pub ext: &'a str,
}

#[derive(Serialize, Location)]
#[location("/maybe/{id}")]
pub struct MaybeUser {
    pub id: Option<u32>,
}
