use crate::books::domain::Book;

// AuthorStats is the per-author aggregate over the books collection
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AuthorStats {
    pub author_id: String,
    pub average_page_count: Option<f64>,
    pub num_books: usize,
    pub titles: Vec<String>,
}

#[derive(Default)]
struct Group {
    author_id: String,
    page_total: f64,
    page_samples: usize,
    num_books: usize,
    titles: Vec<String>,
}

/// Groups books by `authorId` in the order authors are first seen.
///
/// Books without a page count are counted but left out of the average. Titles are
/// de-duplicated keeping the first occurrence and then reversed.
pub(crate) fn group_by_author<'a, B: Book + 'a>(books: impl IntoIterator<Item=&'a B>) -> Vec<AuthorStats> {
    let mut groups: Vec<Group> = vec![];
    for book in books {
        let idx = match groups.iter().position(|g| g.author_id == book.author_id()) {
            Some(idx) => idx,
            None => {
                groups.push(Group { author_id: book.author_id().to_string(), ..Default::default() });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.num_books += 1;
        if let Some(pages) = book.page_count() {
            group.page_total += pages as f64;
            group.page_samples += 1;
        }
        if !group.titles.iter().any(|t| t == book.title()) {
            group.titles.push(book.title().to_string());
        }
    }
    groups.into_iter().map(|g| AuthorStats {
        author_id: g.author_id,
        average_page_count: if g.page_samples == 0 { None } else { Some(g.page_total / g.page_samples as f64) },
        num_books: g.num_books,
        titles: g.titles.into_iter().rev().collect(),
    }).collect()
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::domain::stats::group_by_author;

    #[tokio::test]
    async fn test_should_group_by_author() {
        let books = vec![
            BookEntity::new("1", "X", "A", Some(100)),
            BookEntity::new("2", "Y", "A", Some(200)),
        ];
        let stats = group_by_author(&books);
        assert_eq!(1, stats.len());
        assert_eq!("A", stats[0].author_id);
        assert_eq!(Some(150.0), stats[0].average_page_count);
        assert_eq!(2, stats[0].num_books);
        assert_eq!(vec!["Y", "X"], stats[0].titles);
    }

    #[tokio::test]
    async fn test_should_dedupe_titles_and_skip_missing_pages() {
        let books = vec![
            BookEntity::new("1", "X", "A", Some(100)),
            BookEntity::new("2", "Z", "B", None),
            BookEntity::new("3", "X", "A", None),
            BookEntity::new("4", "W", "A", Some(300)),
        ];
        let stats = group_by_author(&books);
        assert_eq!(2, stats.len());
        assert_eq!("A", stats[0].author_id);
        assert_eq!(3, stats[0].num_books);
        assert_eq!(Some(200.0), stats[0].average_page_count);
        assert_eq!(vec!["W", "X"], stats[0].titles);
        assert_eq!("B", stats[1].author_id);
        assert_eq!(None, stats[1].average_page_count);
    }
}
