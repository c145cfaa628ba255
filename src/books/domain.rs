pub mod model;
pub mod search;
pub mod stats;

// Read access the aggregations need, implemented by stored books.
pub(crate) trait Book {
    fn title(&self) -> &str;
    fn author_id(&self) -> &str;
    fn page_count(&self) -> Option<i64>;
}
