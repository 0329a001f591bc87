//! Walks the completion tree for a pattern given on the command line.
//!
//! ```sh
//! cargo run --example completion -- "rust book"
//! ```

use trellis::completion::{CategoryOptions, CompletionModel, SortOrder};
use trellis::model::{ItemModel, ModelIndex};
use trellis::sql::Database;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let pattern = std::env::args().nth(1).unwrap_or_default();

    let db = Database::open_in_memory()?;
    db.execute_batch(
        "CREATE TABLE history (url TEXT, title TEXT, atime INTEGER);
         INSERT INTO history VALUES ('https://www.rust-lang.org', 'Rust Programming Language', 5);
         INSERT INTO history VALUES ('https://doc.rust-lang.org/book', 'The Rust Book', 4);
         INSERT INTO history VALUES ('https://duckduckgo.com', 'DuckDuckGo', 3);
         INSERT INTO history VALUES ('https://news.ycombinator.com', 'Hacker News', 2);
         CREATE TABLE quickmarks (name TEXT, url TEXT);
         INSERT INTO quickmarks VALUES ('book', 'https://doc.rust-lang.org/book');
         INSERT INTO quickmarks VALUES ('hn', 'https://news.ycombinator.com');",
    )?;

    let mut model = CompletionModel::new(db).with_filter_columns(vec![0, 1]);
    model.new_category(
        "history",
        CategoryOptions::new()
            .with_sort("atime", SortOrder::Descending)
            .with_limit(500),
    )?;
    model.new_category("quickmarks", CategoryOptions::new())?;

    model.set_pattern(&pattern)?;
    println!(
        "pattern {:?} -> {} completions",
        model.pattern(),
        model.total_item_count()
    );

    let root = ModelIndex::invalid();
    for cat_row in 0..model.row_count(&root) {
        let category = model.index(cat_row, 0, &root);
        println!("{}", model.display_text(&category).unwrap_or_default());

        while model.can_fetch_more(&category) {
            model.fetch_more(&category);
        }
        for row in 0..model.row_count(&category) {
            let cells: Vec<String> = (0..model.column_count(&category))
                .map(|col| {
                    let index = model.index(row, col, &category);
                    model.display_text(&index).unwrap_or_default()
                })
                .collect();
            println!("  {}", cells.join(" | "));
        }
    }

    Ok(())
}
