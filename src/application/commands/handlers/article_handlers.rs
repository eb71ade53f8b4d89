//! Article Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateArticle, DeleteArticle, UpdateArticle};
use crate::application::error::ApplicationError;
use crate::application::fatal::FatalSignal;
use crate::application::ports::ArticleRepositoryPort;

// ============================================================================
// CreateArticle
// ============================================================================

/// CreateArticle Handler - 保存文章（所属书籍不存在时由仓储创建）
pub struct CreateArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl CreateArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, command: CreateArticle) -> Result<i64, ApplicationError> {
        let id = self
            .article_repo
            .insert(&command.article)
            .await
            .map_err(|e| ApplicationError::from_storage("insert_article", e, &self.fatal))?;

        tracing::info!(
            article_id = id,
            book = %command.article.book,
            title = %command.article.title,
            "Article created"
        );

        Ok(id)
    }
}

// ============================================================================
// UpdateArticle
// ============================================================================

/// UpdateArticle Handler
pub struct UpdateArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl UpdateArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, command: UpdateArticle) -> Result<(), ApplicationError> {
        self.article_repo
            .update(&command.article, command.id)
            .await
            .map_err(|e| ApplicationError::from_storage("update_article", e, &self.fatal))?;

        tracing::info!(article_id = command.id, "Article updated");
        Ok(())
    }
}

// ============================================================================
// DeleteArticle
// ============================================================================

/// DeleteArticle Handler
pub struct DeleteArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl DeleteArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, command: DeleteArticle) -> Result<(), ApplicationError> {
        self.article_repo
            .delete(command.id)
            .await
            .map_err(|e| ApplicationError::from_storage("delete_article", e, &self.fatal))?;

        tracing::info!(article_id = command.id, "Article deleted");
        Ok(())
    }
}
