//! Book Commands

use crate::domain::library::Book;

/// 新建书籍命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub book: Book,
}

/// 更新书籍命令
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub id: i64,
    pub book: Book,
}

/// 删除书籍命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub id: i64,
}
