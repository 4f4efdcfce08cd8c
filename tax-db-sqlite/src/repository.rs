use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, Row, Sqlite};
use tax_core::{
    AdvisoryRepository, ChatMessage, ChatRole, ContactSubmission, DocumentUpload, NewChatMessage,
    NewContactSubmission, NewDocumentUpload, RepositoryError,
};
use uuid::Uuid;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect using a sqlx-style URL (`sqlite:advisory.db?mode=rwc`,
    /// `sqlite::memory:`).
    ///
    /// In-memory databases are confined to a single long-lived connection,
    /// since every new connection would otherwise see its own empty
    /// database.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get<'r, T>(
    row: &'r SqliteRow,
    column: &str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepositoryError::Database(format!("Failed to get {}: {}", column, e)))
}

fn row_to_chat_message(row: &SqliteRow) -> Result<ChatMessage, RepositoryError> {
    let role: String = get(row, "role")?;
    let role = ChatRole::parse(&role)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid chat role: {}", role)))?;

    Ok(ChatMessage {
        id: get(row, "id")?,
        session_id: get(row, "session_id")?,
        role,
        content: get(row, "content")?,
        timestamp: get(row, "timestamp")?,
    })
}

fn stored_chat_message(
    message: NewChatMessage,
    timestamp: DateTime<Utc>,
) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        session_id: message.session_id,
        role: message.role,
        content: message.content,
        timestamp,
    }
}

async fn insert_chat_message<'e, E>(
    executor: E,
    message: &ChatMessage,
) -> Result<(), RepositoryError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO chat_messages (id, session_id, role, content, timestamp)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&message.id)
    .bind(&message.session_id)
    .bind(message.role.as_str())
    .bind(&message.content)
    .bind(message.timestamp)
    .execute(executor)
    .await
    .map_err(db_error)?;

    Ok(())
}

fn row_to_contact(row: &SqliteRow) -> Result<ContactSubmission, RepositoryError> {
    Ok(ContactSubmission {
        id: get(row, "id")?,
        name: get(row, "name")?,
        email: get(row, "email")?,
        phone: get(row, "phone")?,
        service: get(row, "service")?,
        message: get(row, "message")?,
        timestamp: get(row, "timestamp")?,
    })
}

fn row_to_document(row: &SqliteRow) -> Result<DocumentUpload, RepositoryError> {
    Ok(DocumentUpload {
        id: get(row, "id")?,
        filename: get(row, "filename")?,
        file_type: get(row, "file_type")?,
        purpose: get(row, "purpose")?,
        user_email: get(row, "user_email")?,
        size_bytes: get(row, "size_bytes")?,
        timestamp: get(row, "timestamp")?,
    })
}

#[async_trait]
impl AdvisoryRepository for SqliteRepository {
    async fn append_chat_exchange(
        &self,
        question: NewChatMessage,
        answer: NewChatMessage,
    ) -> Result<(ChatMessage, ChatMessage), RepositoryError> {
        // Same timestamp for both; rowid keeps the question first.
        let now = Utc::now();
        let question = stored_chat_message(question, now);
        let answer = stored_chat_message(answer, now);

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        insert_chat_message(&mut *tx, &question).await?;
        insert_chat_message(&mut *tx, &answer).await?;
        tx.commit().await.map_err(db_error)?;

        Ok((question, answer))
    }

    async fn recent_chat_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, content, timestamp
             FROM chat_messages
             WHERE session_id = ?
             ORDER BY timestamp DESC, rowid DESC
             LIMIT ?",
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut messages = rows
            .iter()
            .map(row_to_chat_message)
            .collect::<Result<Vec<_>, _>>()?;
        messages.reverse();
        Ok(messages)
    }

    async fn list_chat_messages(
        &self,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, content, timestamp
             FROM chat_messages
             WHERE session_id = ?
             ORDER BY timestamp, rowid
             LIMIT ?",
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_chat_message).collect()
    }

    async fn clear_chat_history(&self, session_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn create_contact(
        &self,
        contact: NewContactSubmission,
    ) -> Result<ContactSubmission, RepositoryError> {
        let stored = ContactSubmission {
            id: Uuid::new_v4().to_string(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            service: contact.service,
            message: contact.message,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO contact_forms (id, name, email, phone, service, message, timestamp)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.name)
        .bind(&stored.email)
        .bind(&stored.phone)
        .bind(&stored.service)
        .bind(&stored.message)
        .bind(stored.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(stored)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, service, message, timestamp
             FROM contact_forms
             ORDER BY timestamp, rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_contact).collect()
    }

    async fn create_document(
        &self,
        document: NewDocumentUpload,
    ) -> Result<DocumentUpload, RepositoryError> {
        let stored = DocumentUpload {
            id: Uuid::new_v4().to_string(),
            filename: document.filename,
            file_type: document.file_type,
            purpose: document.purpose,
            user_email: document.user_email,
            size_bytes: document.size_bytes,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO documents (id, filename, file_type, purpose, user_email, size_bytes, timestamp)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&stored.id)
        .bind(&stored.filename)
        .bind(&stored.file_type)
        .bind(&stored.purpose)
        .bind(&stored.user_email)
        .bind(stored.size_bytes)
        .bind(stored.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(stored)
    }

    async fn get_document(&self, id: &str) -> Result<DocumentUpload, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, filename, file_type, purpose, user_email, size_bytes, timestamp
             FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_document(&row)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let repo = SqliteRepository::new("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn contents(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    async fn seed_conversation(
        repo: &SqliteRepository,
        session_id: &str,
        turns: usize,
    ) {
        for n in 0..turns {
            repo.append_chat_exchange(
                NewChatMessage::user(session_id, format!("q{n}")),
                NewChatMessage::assistant(session_id, format!("a{n}")),
            )
            .await
            .expect("Should append exchange");
        }
    }

    // chat history

    #[tokio::test]
    async fn test_append_chat_exchange_assigns_ids_and_timestamps() {
        let repo = setup_test_db().await;
        let before = Utc::now();

        let (question, answer) = repo
            .append_chat_exchange(
                NewChatMessage::user("s1", "What is 80C?"),
                NewChatMessage::assistant("s1", "A deduction."),
            )
            .await
            .expect("Should append exchange");

        assert_eq!(question.id.len(), 36);
        assert_ne!(question.id, answer.id);
        assert_eq!(question.session_id, "s1");
        assert!(question.timestamp >= before);
    }

    #[tokio::test]
    async fn test_append_chat_exchange_stores_question_then_answer() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 1).await;

        let (question, answer) = repo
            .append_chat_exchange(
                NewChatMessage::user("s1", "q1"),
                NewChatMessage::assistant("s1", "a1"),
            )
            .await
            .expect("Should append exchange");

        assert_eq!(question.role, ChatRole::User);
        assert_eq!(answer.role, ChatRole::Assistant);
        assert!(answer.timestamp >= question.timestamp);

        let messages = repo.list_chat_messages("s1", 100).await.expect("list");
        assert_eq!(contents(&messages), vec!["q0", "a0", "q1", "a1"]);
    }

    #[tokio::test]
    async fn test_append_chat_exchange_keeps_nothing_when_answer_fails() {
        let repo = setup_test_db().await;
        sqlx::query(
            "CREATE TRIGGER reject_assistant BEFORE INSERT ON chat_messages
             WHEN NEW.role = 'assistant'
             BEGIN SELECT RAISE(ABORT, 'assistant rejected'); END",
        )
        .execute(&repo.pool)
        .await
        .expect("Should create trigger");

        let result = repo
            .append_chat_exchange(
                NewChatMessage::user("s1", "q0"),
                NewChatMessage::assistant("s1", "a0"),
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
        let messages = repo.list_chat_messages("s1", 100).await.expect("list");
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_list_chat_messages_is_chronological() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 2).await;

        let messages = repo
            .list_chat_messages("s1", 100)
            .await
            .expect("Should list messages");

        assert_eq!(contents(&messages), vec!["q0", "a0", "q1", "a1"]);
        assert_eq!(messages[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_list_chat_messages_respects_limit() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 3).await;

        let messages = repo
            .list_chat_messages("s1", 2)
            .await
            .expect("Should list messages");

        assert_eq!(contents(&messages), vec!["q0", "a0"]);
    }

    #[tokio::test]
    async fn test_recent_chat_messages_returns_latest_oldest_first() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 3).await;

        let messages = repo
            .recent_chat_messages("s1", 3)
            .await
            .expect("Should list recent messages");

        assert_eq!(contents(&messages), vec!["a1", "q2", "a2"]);
    }

    #[tokio::test]
    async fn test_chat_sessions_are_isolated() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 1).await;
        seed_conversation(&repo, "s2", 2).await;

        let s1 = repo.list_chat_messages("s1", 100).await.expect("s1");
        let s2 = repo.list_chat_messages("s2", 100).await.expect("s2");

        assert_eq!(s1.len(), 2);
        assert_eq!(s2.len(), 4);
        assert!(s2.iter().all(|m| m.session_id == "s2"));
    }

    #[tokio::test]
    async fn test_clear_chat_history_only_touches_one_session() {
        let repo = setup_test_db().await;
        seed_conversation(&repo, "s1", 2).await;
        seed_conversation(&repo, "s2", 1).await;

        let removed = repo
            .clear_chat_history("s1")
            .await
            .expect("Should clear history");

        assert_eq!(removed, 4);
        assert!(repo.list_chat_messages("s1", 100).await.expect("s1").is_empty());
        assert_eq!(repo.list_chat_messages("s2", 100).await.expect("s2").len(), 2);
    }

    #[tokio::test]
    async fn test_clear_unknown_session_removes_nothing() {
        let repo = setup_test_db().await;

        let removed = repo
            .clear_chat_history("missing")
            .await
            .expect("Should succeed");

        assert_eq!(removed, 0);
    }

    // contact forms

    #[tokio::test]
    async fn test_create_and_list_contacts() {
        let repo = setup_test_db().await;
        let new_contact = NewContactSubmission {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            service: "gst".to_string(),
            message: "Need help with GSTR-3B".to_string(),
        };

        let created = repo
            .create_contact(new_contact.clone())
            .await
            .expect("Should create contact");
        let listed = repo.list_contacts().await.expect("Should list contacts");

        assert_eq!(created.name, new_contact.name);
        assert_eq!(created.service, "gst");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].message, "Need help with GSTR-3B");
    }

    // documents

    #[tokio::test]
    async fn test_create_and_get_document() {
        let repo = setup_test_db().await;
        let created = repo
            .create_document(NewDocumentUpload {
                filename: "form16.pdf".to_string(),
                file_type: "application/pdf".to_string(),
                purpose: "itr".to_string(),
                user_email: "asha@example.com".to_string(),
                size_bytes: 2048,
            })
            .await
            .expect("Should create document");

        let fetched = repo
            .get_document(&created.id)
            .await
            .expect("Should fetch document");

        assert_eq!(fetched.filename, "form16.pdf");
        assert_eq!(fetched.size_bytes, 2048);
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_get_document_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_document("nope").await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }
}
