//! 致命错误信号
//!
//! 存储层不会自行退出进程，只在事务无法确定结果时上报；
//! 是否退出由组装入口（main）决定。

use tokio_util::sync::CancellationToken;

/// 进程级致命错误信号，可克隆共享
#[derive(Debug, Clone, Default)]
pub struct FatalSignal {
    token: CancellationToken,
}

impl FatalSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// 触发信号（可重复调用）
    pub fn trip(&self, reason: &str) {
        if !self.token.is_cancelled() {
            tracing::error!(reason, "Fatal storage condition, requesting shutdown");
        }
        self.token.cancel();
    }

    pub fn is_tripped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 等待信号触发
    pub async fn tripped(&self) {
        self.token.cancelled().await
    }
}
