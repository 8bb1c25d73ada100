/// Input for creating a post row.
#[derive(Debug, Clone)]
pub struct PostCreate {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Public path of the stored image, already written by the media store
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub contents: Option<String>,
}
