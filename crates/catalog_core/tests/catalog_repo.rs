use catalog_core::db::open_db_in_memory;
use catalog_core::{
    Author, AuthorRepository, Book, BookListQuery, BookRepository, CatalogValidationError,
    RepoError, SqliteAuthorRepository, SqliteBookRepository,
};
use uuid::Uuid;

fn book(title: &str, author: &Author, genres: &[&str]) -> Book {
    let mut book = Book::new(title, author.id);
    book.genres = genres.iter().map(|genre| genre.to_string()).collect();
    book
}

#[test]
fn find_or_create_author_inserts_once_and_then_reuses() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let first = repo.find_or_create_author("Martin Fowler").unwrap();
    assert!(first.created);
    assert_eq!(first.author.born, None);

    let second = repo.find_or_create_author("Martin Fowler").unwrap();
    assert!(!second.created);
    assert_eq!(second.author.id, first.author.id);
    assert_eq!(repo.count_authors().unwrap(), 1);
}

#[test]
fn find_or_create_author_rejects_short_name_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let err = repo.find_or_create_author("Al").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(CatalogValidationError::TooShort { field: "name", .. })
    ));
    assert_eq!(repo.count_authors().unwrap(), 0);
}

#[test]
fn author_lookup_by_name_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);
    repo.find_or_create_author("Joshua Kerievsky").unwrap();

    assert!(repo.find_author_by_name("Joshua Kerievsky").unwrap().is_some());
    assert!(repo.find_author_by_name("joshua kerievsky").unwrap().is_none());
    assert!(repo.find_author_by_name("Joshua").unwrap().is_none());
}

#[test]
fn update_author_persists_birth_year_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);
    let mut author = repo.find_or_create_author("Robert Martin").unwrap().author;

    author.set_born(1952);
    repo.update_author(&author).unwrap();
    let loaded = repo.get_author(author.id).unwrap().unwrap();
    assert_eq!(loaded.born, Some(1952));
    assert_eq!(loaded.name, "Robert Martin");

    let ghost = Author::new("Nobody Known");
    let err = repo.update_author(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id));
}

#[test]
fn list_authors_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);
    for name in ["Sandi Metz", "Kent Beck", "Fyodor Dostoevsky"] {
        repo.find_or_create_author(name).unwrap();
    }

    let names: Vec<String> = repo
        .list_authors()
        .unwrap()
        .into_iter()
        .map(|author| author.name)
        .collect();
    assert_eq!(names, ["Sandi Metz", "Kent Beck", "Fyodor Dostoevsky"]);
}

#[test]
fn create_book_round_trips_genre_order() {
    let conn = open_db_in_memory().unwrap();
    let author = SqliteAuthorRepository::new(&conn)
        .find_or_create_author("Martin Fowler")
        .unwrap()
        .author;
    let repo = SqliteBookRepository::new(&conn);

    let mut created = book("Refactoring", &author, &["refactoring", "tech", "classic"]);
    created.published = Some(1999);
    let id = repo.create_book(&created).unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn list_books_filters_on_exact_genre() {
    let conn = open_db_in_memory().unwrap();
    let author = SqliteAuthorRepository::new(&conn)
        .find_or_create_author("Martin Fowler")
        .unwrap()
        .author;
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&book("Refactoring", &author, &["refactoring", "tech"]))
        .unwrap();
    repo.create_book(&book("Crime and punishment", &author, &["classic", "crime"]))
        .unwrap();
    repo.create_book(&book("Technopolis", &author, &["technology"]))
        .unwrap();

    let all = repo.list_books(&BookListQuery::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "Refactoring");
    assert_eq!(all[2].title, "Technopolis");

    let tech = repo
        .list_books(&BookListQuery {
            genre: Some("tech".to_string()),
        })
        .unwrap();
    assert_eq!(tech.len(), 1);
    assert_eq!(tech[0].title, "Refactoring");
    assert_eq!(tech[0].genres, ["refactoring", "tech"]);

    let upper = repo
        .list_books(&BookListQuery {
            genre: Some("Tech".to_string()),
        })
        .unwrap();
    assert!(upper.is_empty());
}

#[test]
fn duplicate_title_is_a_constraint_rejection_and_leaves_no_genres() {
    let conn = open_db_in_memory().unwrap();
    let author = SqliteAuthorRepository::new(&conn)
        .find_or_create_author("Martin Fowler")
        .unwrap()
        .author;
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&book("Refactoring", &author, &["tech"]))
        .unwrap();

    let err = repo
        .create_book(&book("Refactoring", &author, &["again"]))
        .unwrap_err();
    assert!(err.is_rejection());
    assert!(err.to_string().contains("Refactoring"));

    let stray: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM book_genres WHERE genre = 'again';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stray, 0);
    assert_eq!(repo.count_books().unwrap(), 1);
}

#[test]
fn book_with_unknown_author_is_rejected_by_foreign_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let orphan = Book::new("Orphaned", Uuid::new_v4());
    let err = repo.create_book(&orphan).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn count_books_by_author_includes_zero() {
    let conn = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&conn);
    let fowler = authors.find_or_create_author("Martin Fowler").unwrap().author;
    let beck = authors.find_or_create_author("Kent Beck").unwrap().author;
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&book("Refactoring", &fowler, &[])).unwrap();
    repo.create_book(&book("Patterns", &fowler, &[])).unwrap();

    assert_eq!(repo.count_books_by_author(fowler.id).unwrap(), 2);
    assert_eq!(repo.count_books_by_author(beck.id).unwrap(), 0);
}
