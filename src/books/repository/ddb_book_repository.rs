use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use serde_json::{Map, Value};
use tracing::warn;

use crate::books::domain::model::{AUTHOR_ID_FIELD, BookEntity, ID_FIELD, ISBN_FIELD, validate_fields};
use crate::books::domain::search::{rank, TextQuery};
use crate::books::domain::stats::{AuthorStats, group_by_author};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PageRequest};
use crate::core::repository::Repository;
use crate::utils::ddb::{item_to_document, parse_item, set_expression};

// DynamoDB has no text index or aggregation pipeline, search and stats are evaluated over a scan.
#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // Scans in natural order, stopping as soon as the requested page is filled.
    async fn scan(&self, predicate: &HashMap<String, String>, page: PageRequest) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let wanted = page.limit().map(|limit| page.skip() + limit);
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.take());
            let mut filter_expr = String::new();
            for (i, (k, v)) in predicate.iter().enumerate() {
                if !filter_expr.is_empty() {
                    filter_expr.push_str(" AND ");
                }
                filter_expr.push_str(format!("#f{} = :f{}", i, i).as_str());
                request = request
                    .expression_attribute_names(format!("#f{}", i), k)
                    .expression_attribute_values(format!(":f{}", i), AttributeValue::S(v.to_string()));
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }

            let out = request.send().await?;
            records.extend(out.items().unwrap_or_default().iter().filter_map(map_to_book));
            if let Some(wanted) = wanted {
                if records.len() >= wanted {
                    break;
                }
            }
            match out.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(page.apply(records))
    }

    async fn scan_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan(&HashMap::new(), PageRequest::new(0, 0)).await
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", ID_FIELD)
            .set_item(Some(parse_item(val).map_err(|err| LibraryError::serialization(err.as_str()))?))
            .send()
            .await.map(|_| 1).map_err(|err| match err {
            SdkError::ServiceError(ref ctx) if ctx.err().is_conditional_check_failed_exception() => {
                LibraryError::duplicate_key(format!("book {} already exists", entity.book_id).as_str())
            }
            _ => LibraryError::from(err),
        })
    }

    async fn update(&self, id: &str, fields: &Map<String, Value>) -> LibraryResult<usize> {
        validate_fields(fields, true)?;
        let table_name: &str = self.table_name.as_ref();
        let (update_expr, names, values) = set_expression(fields)
            .map_err(|err| LibraryError::validation(err.as_str(), None))?;

        self.client
            .update_item()
            .table_name(table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .update_expression(update_expr)
            .set_expression_attribute_names(Some(names))
            .expression_attribute_names("#id", ID_FIELD)
            .set_expression_attribute_values(Some(values))
            // never upsert, a missing book simply matches nothing
            .condition_expression("attribute_exists(#id)")
            .send()
            .await.map(|_| 1).or_else(|err| match err {
            SdkError::ServiceError(ref ctx) if ctx.err().is_conditional_check_failed_exception() => Ok(0),
            _ => Err(LibraryError::from(err)),
        })
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match out.item() {
            Some(item) => BookEntity::from_document(item_to_document(item)),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map(|out| if out.attributes().is_some() { 1 } else { 0 }).map_err(LibraryError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: PageRequest) -> LibraryResult<Vec<BookEntity>> {
        self.scan(predicate, page).await
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let out = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .key_condition_expression("#isbn = :isbn")
            .expression_attribute_names("#isbn", ISBN_FIELD)
            .expression_attribute_values(":isbn", AttributeValue::S(isbn.to_string()))
            .limit(1)
            .send()
            .await?;
        Ok(out.count() > 0)
    }

    async fn find_by_author_id(&self, author_id: &str, page: PageRequest) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            (AUTHOR_ID_FIELD.to_string(), author_id.to_string()),
        ]);
        self.query(&predicate, page).await
    }

    async fn search(&self, text: &str) -> LibraryResult<Vec<(BookEntity, f64)>> {
        let query = TextQuery::parse(text);
        if query.is_empty() {
            return Ok(vec![]);
        }
        let mut hits: Vec<(BookEntity, f64)> = self.scan_all().await?.into_iter()
            .filter_map(|book| query.score(&book.indexed_text()).map(|score| (book, score)))
            .collect();
        rank(&mut hits);
        Ok(hits)
    }

    async fn stats_by_author(&self) -> LibraryResult<Vec<AuthorStats>> {
        let books = self.scan_all().await?;
        Ok(group_by_author(&books))
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> Option<BookEntity> {
    match BookEntity::from_document(item_to_document(map)) {
        Ok(book) => Some(book),
        Err(err) => {
            warn!(error = %err, "skipping malformed book document");
            None
        }
    }
}
