/// 协调器状态（由协调器内部维护，外部只读监听）
///
/// `Init → Probing → (Simple | Planning → Fetching → Reassembling) → PostProcessing → Done`，
/// 任何非终态都可能进入 `Failed`；本地路径直接 `Init → Done`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Init,
    Probing,
    Simple,
    Planning,
    Fetching,
    Reassembling,
    PostProcessing,
    Done,
    Failed,
}

impl DownloadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadState::Done | DownloadState::Failed)
    }
}
