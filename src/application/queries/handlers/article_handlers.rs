//! Article Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::fatal::FatalSignal;
use crate::application::ports::ArticleRepositoryPort;
use crate::application::queries::{GetArticle, ListArticles, SearchArticles};
use crate::domain::library::Article;

/// GetArticle Handler
pub struct GetArticleHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl GetArticleHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, query: GetArticle) -> Result<Article, ApplicationError> {
        self.article_repo
            .find_by_id(query.id)
            .await
            .map_err(|e| ApplicationError::from_storage("find_article", e, &self.fatal))
    }
}

/// ListArticles Handler
pub struct ListArticlesHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl ListArticlesHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, _query: ListArticles) -> Result<Vec<Article>, ApplicationError> {
        self.article_repo
            .find_all()
            .await
            .map_err(|e| ApplicationError::from_storage("list_articles", e, &self.fatal))
    }
}

/// SearchArticles Handler
pub struct SearchArticlesHandler {
    article_repo: Arc<dyn ArticleRepositoryPort>,
    fatal: FatalSignal,
}

impl SearchArticlesHandler {
    pub fn new(article_repo: Arc<dyn ArticleRepositoryPort>, fatal: FatalSignal) -> Self {
        Self {
            article_repo,
            fatal,
        }
    }

    pub async fn handle(&self, query: SearchArticles) -> Result<Vec<Article>, ApplicationError> {
        let articles = self
            .article_repo
            .search(&query.keyword)
            .await
            .map_err(|e| ApplicationError::from_storage("search_articles", e, &self.fatal))?;

        tracing::debug!(keyword = %query.keyword, hits = articles.len(), "Article search");
        Ok(articles)
    }
}
