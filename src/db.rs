#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{Rating, ReviewDocument, ReviewRecord};
    use chrono::Utc;
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{params, Connection, Error, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;


    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("[DB] Connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    handle TEXT NOT NULL,
                    link TEXT NOT NULL DEFAULT '',
                    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                    comment TEXT NOT NULL DEFAULT '',
                    avatar TEXT NOT NULL DEFAULT '',
                    timestamp INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_timestamp ON reviews (timestamp);",
            )
            .map_err(|e| {
                logging::error!("[DB] Failed creating reviews table: {}", e);
                e
            })?;
            log!("[DB] Schema ready");
            Ok(())
        }

        fn row_to_document(row: &Row<'_>) -> Result<ReviewDocument, Error> {
            let raw_rating: i64 = row.get(4)?;
            let rating = u8::try_from(raw_rating)
                .ok()
                .and_then(|r| Rating::new(r).ok())
                .ok_or(Error::IntegralValueOutOfRange(4, raw_rating))?;
            Ok(ReviewDocument {
                id: row.get(0)?,
                timestamp: row.get(7)?,
                record: ReviewRecord {
                    name: row.get(1)?,
                    handle: row.get(2)?,
                    link: row.get(3)?,
                    rating,
                    comment: row.get(5)?,
                    avatar: row.get(6)?,
                },
            })
        }

        // Retrieve every review, oldest first. Equal timestamps keep insertion order.
        pub async fn get_reviews(&self) -> Result<Vec<ReviewDocument>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, handle, link, rating, comment, avatar, timestamp
                 FROM reviews
                 ORDER BY timestamp ASC, rowid ASC",
            )?;
            let rows = stmt.query_map([], Self::row_to_document)?;
            let documents = rows.collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} reviews", documents.len());
            Ok(documents)
        }

        // Append one review with a server-assigned id and timestamp.
        // Timestamps never go backwards even if the clock does.
        pub async fn insert_review(&self, record: &ReviewRecord) -> Result<ReviewDocument, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let latest: i64 =
                tx.query_row("SELECT COALESCE(MAX(timestamp), 0) FROM reviews", [], |row| row.get(0))?;
            let timestamp = Utc::now().timestamp_millis().max(latest + 1);
            let id = Uuid::new_v4().to_string();

            tx.execute(
                "INSERT INTO reviews (id, name, handle, link, rating, comment, avatar, timestamp)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    &id,
                    &record.name,
                    &record.handle,
                    &record.link,
                    record.rating.get(),
                    &record.comment,
                    &record.avatar,
                    timestamp
                ],
            )?;
            tx.commit()?;
            log!("[DB] Stored review {} from {}", id, record.handle);

            Ok(ReviewDocument {
                id,
                timestamp,
                record: record.clone(),
            })
        }

        pub async fn count_reviews(&self) -> Result<i64, Error> {
            let conn = self.conn.lock().await;
            conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
